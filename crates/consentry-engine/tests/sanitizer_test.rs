use consentry_engine::capture::Sanitizer;
use consentry_engine::capture::sanitizer::SanitizeError;
use consentry_engine::config::SanitizerConfig;

#[test]
fn test_email_is_masked() {
    let out = Sanitizer::default().sanitize("<p>Contact test@example.com for details</p>");
    assert!(out.contains("[EMAIL]"));
    assert!(!out.contains("test@example.com"));
    assert_eq!(out, "<p>Contact [EMAIL] for details</p>");
}

#[test]
fn test_script_elements_are_removed() {
    let html = r#"<div class="banner">Hi<script type="text/javascript">track('x')</script><SCRIPT src="a.js"/></div>"#;
    let out = Sanitizer::default().sanitize(html);
    assert!(!out.to_ascii_lowercase().contains("<script"));
    assert!(!out.contains("track("));
    assert_eq!(out, r#"<div class="banner">Hi</div>"#);
}

#[test]
fn test_unclosed_script_is_removed() {
    let out = Sanitizer::default().sanitize("<div>Hi</div><script>var token = 'abc'");
    assert_eq!(out, "<div>Hi</div>");
}

#[test]
fn test_identifying_attributes_are_stripped() {
    let html = r#"<button id="accept-btn" class="btn primary" data-track="consent" onclick="go()" aria-label="Accept" title="Accept" style="color: red">OK</button>"#;
    let out = Sanitizer::default().sanitize(html);
    assert_eq!(out, r#"<button class="btn primary" style="color: red">OK</button>"#);
}

#[test]
fn test_form_fields_lose_values() {
    let html = r#"<input type="email" name="email" value="jane@corp.example" placeholder="Your email" autocomplete="email"/>"#;
    let out = Sanitizer::default().sanitize(html);
    assert_eq!(out, r#"<input type="email" />"#);
}

#[test]
fn test_links_and_images_lose_targets() {
    let html = r#"<a href="/privacy?ref=banner" class="link">Policy</a><img src="https://cdn.example.com/p.gif?u=42" alt="tracker">"#;
    let out = Sanitizer::default().sanitize(html);
    assert_eq!(out, r#"<a class="link">Policy</a><img>"#);
}

#[test]
fn test_embedded_url_query_is_removed() {
    let out = Sanitizer::default()
        .sanitize("<p>See https://example.com/terms?session=abc123#top now</p>");
    assert_eq!(out, "<p>See https://example.com/terms now</p>");
}

#[test]
fn test_phone_numbers_are_masked() {
    let out = Sanitizer::default().sanitize("<p>Call +1 (555) 123-4567 today</p>");
    assert_eq!(out, "<p>Call [PHONE] today</p>");
}

#[test]
fn test_comments_are_removed() {
    let out = Sanitizer::default().sanitize("<div><!-- user: 8841 -->Hello</div>");
    assert_eq!(out, "<div>Hello</div>");
}

#[test]
fn test_malformed_markup_does_not_panic() {
    let inputs = [
        "<div class=\"a><script>alert(1)",
        "<<<>>>",
        "<button data-x='unterminated>OK</button>",
        "",
        "<!-- never closed",
    ];
    let sanitizer = Sanitizer::default();
    for input in inputs {
        let out = sanitizer.sanitize(input);
        assert!(!out.to_ascii_lowercase().contains("<script"), "{input} -> {out}");
    }
}

#[test]
fn test_custom_placeholders() {
    let sanitizer = Sanitizer::new(SanitizerConfig {
        email_placeholder: "<redacted-email>".into(),
        ..Default::default()
    });
    let out = sanitizer.sanitize("mail me: a.b@c.io");
    assert_eq!(out, "mail me: <redacted-email>");
}

#[test]
fn test_oversized_input_falls_back_to_truncated_text() {
    let sanitizer = Sanitizer::new(SanitizerConfig {
        max_input_bytes: 10,
        fallback_chars: 40,
        ..Default::default()
    });
    let html = "<p>Contact test@example.com</p><script>evil()</script>";

    assert!(matches!(
        sanitizer.try_sanitize(html),
        Err(SanitizeError::TooLarge { limit: 10, .. })
    ));

    let out = sanitizer.sanitize(html);
    assert!(out.contains("[EMAIL]"));
    assert!(!out.contains('@'));
    assert!(!out.contains('<'));
    assert!(out.chars().count() <= 40);
}

#[test]
fn test_fallback_never_leaks_script_or_comment_text() {
    let sanitizer = Sanitizer::new(SanitizerConfig {
        max_input_bytes: 10,
        ..Default::default()
    });
    let html = "<div><script>var sessionToken='SECRET-abc123';</script><!-- uid 42 -->Hi</div>";

    let out = sanitizer.sanitize(html);
    assert!(!out.contains("SECRET"));
    assert!(!out.contains("sessionToken"));
    assert!(!out.contains("uid"));
    assert!(out.contains("Hi"));
}

#[test]
fn test_dates_survive_phone_masking() {
    let out = Sanitizer::default().sanitize("<p>Last updated 2024-01-01. Call 555-123-4567.</p>");
    assert_eq!(out, "<p>Last updated 2024-01-01. Call [PHONE].</p>");
}
