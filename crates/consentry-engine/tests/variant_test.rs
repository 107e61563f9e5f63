use consentry_common::{NodeSpec, Variant};
use consentry_engine::config::DarkPatternWeights;
use consentry_engine::{
    DocumentNode, DomSnapshot, Lexicon, SnapshotNode, detect_variant, score_dark_pattern,
};

fn by_id<'a>(snapshot: &'a DomSnapshot, id: &str) -> SnapshotNode<'a> {
    snapshot
        .root()
        .subtree()
        .into_iter()
        .find(|n| n.id() == id)
        .unwrap_or_else(|| panic!("no node with id {id}"))
}

fn two_buttons(accept_style: &str, reject: NodeSpec) -> NodeSpec {
    NodeSpec::element("div")
        .id("banner")
        .text("We use cookies")
        .child(
            NodeSpec::element("button")
                .id("accept")
                .styles(accept_style)
                .text("Accept all"),
        )
        .child(reject.id("other"))
}

#[test]
fn test_asymmetric_styling_is_a_dark_pattern() {
    let spec = two_buttons(
        "font-size:16px;background:#4CAF50",
        NodeSpec::element("button")
            .styles("font-size:11px;color:#999;background:transparent")
            .text("Reject all"),
    );
    let snapshot = DomSnapshot::from_spec(&spec);
    let (accept, reject) = (by_id(&snapshot, "accept"), by_id(&snapshot, "other"));
    let weights = DarkPatternWeights::default();

    let variant = detect_variant(
        &snapshot.root(),
        Some(&accept),
        Some(&reject),
        &Lexicon::builtin(),
        &weights,
    );
    assert_eq!(variant, Variant::DarkPattern);

    let score = score_dark_pattern(&accept, &reject, &weights);
    assert_eq!(score.reasons, vec!["font_size", "contrast", "filled_background"]);
    assert_eq!(score.total, 3.0);
    assert_eq!(score.weights_version, "v1");
}

#[test]
fn test_missing_reject_is_no_choice() {
    let spec = two_buttons("", NodeSpec::element("span").text("Reject all"));
    let snapshot = DomSnapshot::from_spec(&spec);
    let accept = by_id(&snapshot, "accept");

    let variant = detect_variant(
        &snapshot.root(),
        Some(&accept),
        None,
        &Lexicon::builtin(),
        &DarkPatternWeights::default(),
    );
    assert_eq!(variant, Variant::NoChoice);
}

#[test]
fn test_settings_like_reject_is_unknown() {
    let spec = two_buttons(
        "",
        NodeSpec::element("button")
            .class("btn-secondary")
            .text("More options"),
    );
    let snapshot = DomSnapshot::from_spec(&spec);
    let variant = detect_variant(
        &snapshot.root(),
        Some(&by_id(&snapshot, "accept")),
        Some(&by_id(&snapshot, "other")),
        &Lexicon::builtin(),
        &DarkPatternWeights::default(),
    );
    assert_eq!(variant, Variant::Unknown);
}

#[test]
fn test_symmetric_buttons_are_standard() {
    let style = "font-size:14px;background:#1a73e8;color:#ffffff;padding:8px 16px";
    let spec = two_buttons(
        style,
        NodeSpec::element("button").styles(style).text("Reject all"),
    );
    let snapshot = DomSnapshot::from_spec(&spec);
    let variant = detect_variant(
        &snapshot.root(),
        Some(&by_id(&snapshot, "accept")),
        Some(&by_id(&snapshot, "other")),
        &Lexicon::builtin(),
        &DarkPatternWeights::default(),
    );
    assert_eq!(variant, Variant::Standard);
}

#[test]
fn test_half_weights_alone_stay_standard() {
    let spec = two_buttons(
        "padding:12px 24px",
        NodeSpec::element("button")
            .styles("padding:4px")
            .text("Reject all"),
    );
    let snapshot = DomSnapshot::from_spec(&spec);
    let score = score_dark_pattern(
        &by_id(&snapshot, "accept"),
        &by_id(&snapshot, "other"),
        &DarkPatternWeights::default(),
    );
    assert_eq!(score.reasons, vec!["padding"]);
    assert!(!score.is_dark_pattern());
}

#[test]
fn test_position_rule_needs_separate_parents() {
    let spec = NodeSpec::element("div")
        .child(
            NodeSpec::element("div").child(
                NodeSpec::element("button")
                    .id("accept")
                    .rect(10.0, 0.0, 80.0, 30.0)
                    .text("Accept"),
            ),
        )
        .child(
            NodeSpec::element("div").child(
                NodeSpec::element("button")
                    .id("reject")
                    .rect(300.0, 0.0, 80.0, 30.0)
                    .text("Reject"),
            ),
        );
    let snapshot = DomSnapshot::from_spec(&spec);
    let score = score_dark_pattern(
        &by_id(&snapshot, "accept"),
        &by_id(&snapshot, "reject"),
        &DarkPatternWeights::default(),
    );
    assert_eq!(score.reasons, vec!["position"]);
    assert_eq!(score.total, 0.5);
}

#[test]
fn test_threshold_is_configurable() {
    let spec = two_buttons(
        "font-size:16px;background:#4CAF50",
        NodeSpec::element("button")
            .styles("font-size:11px;color:#999;background:transparent")
            .text("Reject all"),
    );
    let snapshot = DomSnapshot::from_spec(&spec);
    let weights = DarkPatternWeights {
        version: "strict-v2".to_string(),
        threshold: 4.0,
        ..Default::default()
    };
    let variant = detect_variant(
        &snapshot.root(),
        Some(&by_id(&snapshot, "accept")),
        Some(&by_id(&snapshot, "other")),
        &Lexicon::builtin(),
        &weights,
    );
    assert_eq!(variant, Variant::Standard);
}
