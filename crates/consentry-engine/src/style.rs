//! Computed-style parsing: colours, pixel lengths, padding and contrast.

use crate::dom::DocumentNode;

/// An sRGB colour with alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Parse a CSS colour. Unknown syntax yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex);
        }
        if let Some(args) = value
            .strip_prefix("rgba(")
            .or_else(|| value.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_args(args);
        }
        named(&value)
    }

    /// WCAG relative luminance.
    pub fn luminance(&self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(Color::rgb(digit(0)?, digit(1)?, digit(2)?)),
        4 => Some(Color {
            a: f32::from(digit(3)?) / 255.0,
            ..Color::rgb(digit(0)?, digit(1)?, digit(2)?)
        }),
        6 => Some(Color::rgb(pair(0)?, pair(2)?, pair(4)?)),
        8 => Some(Color {
            a: f32::from(pair(6)?) / 255.0,
            ..Color::rgb(pair(0)?, pair(2)?, pair(4)?)
        }),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() < 3 {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        if let Some(pct) = s.strip_suffix('%') {
            let v: f32 = pct.parse().ok()?;
            Some((v.clamp(0.0, 100.0) * 2.55).round() as u8)
        } else {
            let v: f32 = s.parse().ok()?;
            Some(v.clamp(0.0, 255.0).round() as u8)
        }
    };
    let alpha = match parts.get(3) {
        Some(s) => match s.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().ok()? / 100.0,
            None => s.parse::<f32>().ok()?,
        },
        None => 1.0,
    };
    Some(Color {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a: alpha.clamp(0.0, 1.0),
    })
}

fn named(name: &str) -> Option<Color> {
    let color = match name {
        "transparent" => Color {
            a: 0.0,
            ..Color::BLACK
        },
        "white" => Color::WHITE,
        "black" => Color::BLACK,
        "red" => Color::rgb(255, 0, 0),
        "green" => Color::rgb(0, 128, 0),
        "blue" => Color::rgb(0, 0, 255),
        "yellow" => Color::rgb(255, 255, 0),
        "orange" => Color::rgb(255, 165, 0),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        "lightgray" | "lightgrey" => Color::rgb(211, 211, 211),
        "darkgray" | "darkgrey" => Color::rgb(169, 169, 169),
        "silver" => Color::rgb(192, 192, 192),
        "navy" => Color::rgb(0, 0, 128),
        "teal" => Color::rgb(0, 128, 128),
        "purple" => Color::rgb(128, 0, 128),
        "whitesmoke" => Color::rgb(245, 245, 245),
        _ => return None,
    };
    Some(color)
}

/// WCAG contrast ratio between two colours, `1.0..=21.0`.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let (la, lb) = (a.luminance(), b.luminance());
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Parse a `px` (or unitless) length.
pub fn parse_px(value: &str) -> Option<f32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse().ok()
}

/// The node's own background colour: `background-color`, else the first
/// colour token of the `background` shorthand.
pub fn own_background<N: DocumentNode>(node: &N) -> Option<Color> {
    if let Some(color) = node.computed_style("background-color").and_then(Color::parse) {
        return Some(color);
    }
    node.computed_style("background")?
        .split_whitespace()
        .find_map(Color::parse)
}

pub fn has_filled_background<N: DocumentNode>(node: &N) -> bool {
    own_background(node).is_some_and(|c| !c.is_transparent())
}

/// First opaque-ish background on the node or its ancestors, white if none.
pub fn effective_background<N: DocumentNode>(node: &N) -> Color {
    std::iter::once(node.clone())
        .chain(node.ancestors())
        .find_map(|n| own_background(&n).filter(|c| !c.is_transparent()))
        .unwrap_or(Color::WHITE)
}

pub fn text_color<N: DocumentNode>(node: &N) -> Color {
    node.computed_style("color")
        .and_then(Color::parse)
        .unwrap_or(Color::BLACK)
}

pub fn text_contrast<N: DocumentNode>(node: &N) -> f64 {
    contrast_ratio(text_color(node), effective_background(node))
}

pub fn font_size<N: DocumentNode>(node: &N) -> Option<f32> {
    node.computed_style("font-size").and_then(parse_px)
}

pub fn font_weight<N: DocumentNode>(node: &N) -> u16 {
    match node.computed_style("font-weight").map(str::trim) {
        Some("bold") | Some("bolder") => 700,
        Some("lighter") => 300,
        Some(value) => value.parse().unwrap_or(400),
        None => 400,
    }
}

/// Padding as `[top, right, bottom, left]` in px; missing sides are zero.
pub fn padding<N: DocumentNode>(node: &N) -> [f32; 4] {
    let mut sides = node
        .computed_style("padding")
        .map(expand_box_shorthand)
        .unwrap_or([0.0; 4]);
    for (i, side) in ["top", "right", "bottom", "left"].iter().enumerate() {
        if let Some(v) = node
            .computed_style(&format!("padding-{side}"))
            .and_then(parse_px)
        {
            sides[i] = v;
        }
    }
    sides
}

fn expand_box_shorthand(value: &str) -> [f32; 4] {
    let v: Vec<f32> = value
        .split_whitespace()
        .map(|p| parse_px(p).unwrap_or(0.0))
        .collect();
    match v.as_slice() {
        [a] => [*a; 4],
        [a, b] => [*a, *b, *a, *b],
        [a, b, c] => [*a, *b, *c, *b],
        [a, b, c, d, ..] => [*a, *b, *c, *d],
        [] => [0.0; 4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colors() {
        assert_eq!(Color::parse("#fff"), Some(Color::WHITE));
        assert_eq!(Color::parse("#4CAF50"), Some(Color::rgb(0x4c, 0xaf, 0x50)));
        assert_eq!(Color::parse("rgb(1, 2, 3)"), Some(Color::rgb(1, 2, 3)));
        assert!(Color::parse("rgba(0,0,0,0)").is_some_and(|c| c.is_transparent()));
        assert!(Color::parse("transparent").is_some_and(|c| c.is_transparent()));
        assert_eq!(Color::parse("url(x.png)"), None);
        assert_eq!(Color::parse("#zzz"), None);
    }

    #[test]
    fn test_contrast_ratio() {
        let max = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!((max - 21.0).abs() < 0.01);
        let grey = contrast_ratio(Color::rgb(0x99, 0x99, 0x99), Color::WHITE);
        assert!(grey < 3.0, "#999 on white is {grey}");
    }

    #[test]
    fn test_box_shorthand() {
        assert_eq!(expand_box_shorthand("4px"), [4.0; 4]);
        assert_eq!(expand_box_shorthand("4px 8px"), [4.0, 8.0, 4.0, 8.0]);
        assert_eq!(expand_box_shorthand("1px 2px 3px"), [1.0, 2.0, 3.0, 2.0]);
        assert_eq!(parse_px(" 16px "), Some(16.0));
    }
}
