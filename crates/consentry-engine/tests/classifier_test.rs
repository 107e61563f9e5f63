use consentry_common::NodeSpec;
use consentry_engine::classifier::{
    classify_buttons, control_label, find_consent_toggles, is_informational_anchor,
};
use consentry_engine::{DocumentNode, DomSnapshot, Lexicon, SnapshotNode};

fn by_id<'a>(snapshot: &'a DomSnapshot, id: &str) -> SnapshotNode<'a> {
    snapshot
        .root()
        .subtree()
        .into_iter()
        .find(|n| n.id() == id)
        .unwrap_or_else(|| panic!("no node with id {id}"))
}

fn dialog(children: Vec<NodeSpec>) -> NodeSpec {
    NodeSpec::element("div")
        .id("cookie-banner")
        .text("We use cookies to improve your experience.")
        .children(children)
}

#[test]
fn test_identifier_pass_wins_over_text() {
    let spec = dialog(vec![
        NodeSpec::element("button").id("plain").text("Accept"),
        NodeSpec::element("button").id("accept-cookies").text("Continue"),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let result = classify_buttons(&snapshot.root(), &Lexicon::builtin());

    let accept = result.accept.expect("accept");
    assert_eq!(accept.node, by_id(&snapshot, "accept-cookies"));
    assert_eq!(accept.source_rule, "accept_identifier");
    assert_eq!(accept.score, 1.0);
}

#[test]
fn test_compound_text_preferred_over_bare_text() {
    let spec = dialog(vec![
        NodeSpec::element("button").id("b1").text("OK"),
        NodeSpec::element("button").id("b2").text("Accept all cookies"),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let result = classify_buttons(&snapshot.root(), &Lexicon::builtin());

    let accept = result.accept.expect("accept");
    assert_eq!(accept.node, by_id(&snapshot, "b2"));
    assert_eq!(accept.source_rule, "accept_compound_text");
}

#[test]
fn test_accept_and_reject_never_share_a_node() {
    let spec = dialog(vec![
        NodeSpec::element("button")
            .id("only")
            .class("btn-secondary")
            .text("Accept"),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let result = classify_buttons(&snapshot.root(), &Lexicon::builtin());

    assert_eq!(result.accept_node(), Some(&by_id(&snapshot, "only")));
    assert!(result.reject.is_none());
}

#[test]
fn test_learn_more_link_is_never_a_consent_control() {
    let spec = dialog(vec![
        NodeSpec::element("a")
            .id("learn")
            .class("btn")
            .class("btn-primary")
            .attr("href", "/privacy-policy")
            .text("Learn more"),
        NodeSpec::element("button").id("reject").text("Reject all"),
        NodeSpec::element("button").id("accept").text("Accept"),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let learn = by_id(&snapshot, "learn");
    let result = classify_buttons(&snapshot.root(), &Lexicon::builtin());

    assert!(is_informational_anchor(&learn, &Lexicon::builtin()));
    assert_ne!(result.accept_node(), Some(&learn));
    assert_ne!(result.reject_node(), Some(&learn));
    assert_eq!(result.accept_node(), Some(&by_id(&snapshot, "accept")));
    assert_eq!(result.reject_node(), Some(&by_id(&snapshot, "reject")));
}

#[test]
fn test_learn_more_link_alone_yields_no_accept() {
    let spec = dialog(vec![
        NodeSpec::element("a")
            .class("cta")
            .attr("href", "/privacy-policy")
            .text("Learn more"),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let result = classify_buttons(&snapshot.root(), &Lexicon::builtin());
    assert!(result.accept.is_none());
    assert!(result.reject.is_none());
}

#[test]
fn test_placeholder_anchor_stays_a_candidate() {
    let spec = dialog(vec![
        NodeSpec::element("a")
            .id("ok")
            .attr("href", "#")
            .text("Accept"),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let result = classify_buttons(&snapshot.root(), &Lexicon::builtin());
    assert_eq!(result.accept_node(), Some(&by_id(&snapshot, "ok")));
}

#[test]
fn test_settings_control_is_reported_not_classified() {
    let spec = dialog(vec![
        NodeSpec::element("button")
            .id("cookie-settings")
            .text("Cookie settings"),
        NodeSpec::element("button").id("go").text("Accept all cookies"),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let result = classify_buttons(&snapshot.root(), &Lexicon::builtin());

    assert_eq!(result.accept_node(), Some(&by_id(&snapshot, "go")));
    assert_eq!(result.settings, Some(by_id(&snapshot, "cookie-settings")));
    assert!(result.reject.is_none());
}

#[test]
fn test_settings_label_blocks_accept_identifier() {
    let spec = dialog(vec![
        NodeSpec::element("button")
            .id("custom")
            .class("cc-allow-custom")
            .text("Manage preferences"),
        NodeSpec::element("button").id("all").text("Accept all"),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let result = classify_buttons(&snapshot.root(), &Lexicon::builtin());

    let accept = result.accept.expect("accept");
    assert_eq!(accept.node, by_id(&snapshot, "all"));
    assert_eq!(accept.node.text_content(), "Accept all");
    assert_eq!(accept.source_rule, "accept_bare_text");
    assert_eq!(result.settings, Some(by_id(&snapshot, "custom")));
}

#[test]
fn test_necessary_only_is_a_reject_control() {
    let spec = dialog(vec![
        NodeSpec::element("button")
            .id("necessary")
            .text("Accept necessary only"),
        NodeSpec::element("button").id("all").text("Accept all"),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let result = classify_buttons(&snapshot.root(), &Lexicon::builtin());

    assert_eq!(result.accept_node(), Some(&by_id(&snapshot, "all")));
    assert_eq!(result.reject_node(), Some(&by_id(&snapshot, "necessary")));
}

#[test]
fn test_disabled_and_hidden_controls_are_skipped() {
    let spec = dialog(vec![
        NodeSpec::element("button")
            .id("disabled")
            .attr("disabled", "")
            .text("Accept"),
        NodeSpec::element("button")
            .id("aria-disabled")
            .attr("aria-disabled", "true")
            .text("Accept"),
        NodeSpec::element("button")
            .id("hidden")
            .style("visibility", "hidden")
            .text("Accept"),
        NodeSpec::element("button").id("live").text("Accept"),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let result = classify_buttons(&snapshot.root(), &Lexicon::builtin());
    assert_eq!(result.accept_node(), Some(&by_id(&snapshot, "live")));
}

#[test]
fn test_non_english_tables() {
    let spec = dialog(vec![
        NodeSpec::element("button").id("nein").text("Alle ablehnen"),
        NodeSpec::element("button").id("ja").text("Alle akzeptieren"),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let result = classify_buttons(&snapshot.root(), &Lexicon::builtin());

    assert_eq!(result.accept_node(), Some(&by_id(&snapshot, "ja")));
    assert_eq!(result.reject_node(), Some(&by_id(&snapshot, "nein")));
}

#[test]
fn test_unknown_language_finds_nothing_by_text() {
    let spec = dialog(vec![NodeSpec::element("button").text("Hyväksy kaikki evästeet xyz")]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let mut lexicon = Lexicon::builtin();
    lexicon.languages.retain(|l| l.code == "en");
    let result = classify_buttons(&snapshot.root(), &lexicon);
    assert!(result.accept.is_none());
}

#[test]
fn test_input_label_falls_back_to_value() {
    let spec = dialog(vec![
        NodeSpec::element("input")
            .id("submit")
            .attr("type", "submit")
            .attr("value", "Accept all"),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let input = by_id(&snapshot, "submit");
    assert_eq!(control_label(&input), "Accept all");

    let result = classify_buttons(&snapshot.root(), &Lexicon::builtin());
    assert_eq!(result.accept_node(), Some(&input));
}

#[test]
fn test_structural_fallback() {
    let spec = dialog(vec![
        NodeSpec::element("button")
            .id("secondary")
            .class("btn")
            .class("btn-secondary")
            .text("Nope"),
        NodeSpec::element("button")
            .id("primary")
            .class("btn")
            .class("btn-primary")
            .text("Sure"),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let result = classify_buttons(&snapshot.root(), &Lexicon::builtin());

    let accept = result.accept.expect("accept");
    let reject = result.reject.expect("reject");
    assert_eq!(accept.node, by_id(&snapshot, "primary"));
    assert_eq!(accept.source_rule, "accept_primary_style");
    assert_eq!(reject.node, by_id(&snapshot, "secondary"));
    assert_eq!(reject.source_rule, "reject_secondary_style");
}

#[test]
fn test_consent_toggles() {
    let spec = dialog(vec![
        NodeSpec::element("label").text("Analytics").child(
            NodeSpec::element("input")
                .id("analytics-toggle")
                .attr("type", "checkbox")
                .attr("checked", ""),
        ),
        NodeSpec::element("label").text("Marketing cookies").child(
            NodeSpec::element("span")
                .id("marketing")
                .attr("role", "switch")
                .attr("aria-checked", "false"),
        ),
    ]);
    let snapshot = DomSnapshot::from_spec(&spec);
    let toggles = find_consent_toggles(&snapshot.root(), &Lexicon::builtin());

    assert_eq!(toggles.len(), 2);
    assert_eq!(toggles[0].category.as_deref(), Some("analytics"));
    assert!(toggles[0].checked);
    assert_eq!(toggles[1].category.as_deref(), Some("marketing"));
    assert!(!toggles[1].checked);
}
