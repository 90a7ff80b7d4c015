//! Property tests for reply parsing, classification and filenames

use proptest::prelude::*;
use voxpilot::codegen::{classify, synthesize, CodeExtension};
use voxpilot::core::types::IntentKind;
use voxpilot::llm::parser::{extract_json, parse_reply};

const KNOWN_TAGS: [&str; 8] = [
    "open_app",
    "close_app",
    "screenshot",
    "volume_up",
    "volume_down",
    "type_text",
    "run_command",
    "write_code",
];

proptest! {
    #[test]
    fn prose_around_reply_is_ignored(
        prefix in "[a-zA-Z .,!:\n]{0,40}",
        suffix in "[a-zA-Z .,!:\n]{0,40}",
        tag in prop::sample::select(KNOWN_TAGS.to_vec()),
        value in "[a-z ]{1,20}",
    ) {
        let reply = format!(
            r#"{}{{"intent": "{}", "params": {{"app": "{}"}}}}{}"#,
            prefix, tag, value, suffix
        );
        let intent = parse_reply(&reply, "utterance").unwrap();
        prop_assert_eq!(intent.kind.as_tag(), tag);
        if !value.trim().is_empty() {
            prop_assert_eq!(intent.params.get("app"), Some(value.as_str()));
        }
    }

    #[test]
    fn reply_without_braces_has_no_span(reply in "[^{}]{0,80}") {
        prop_assert!(extract_json(&reply).is_none());
        prop_assert!(parse_reply(&reply, "utterance").is_err());
    }

    #[test]
    fn unrecognized_tags_are_preserved(tag in "[a-z]{3,12}_[a-z]{3,12}") {
        prop_assume!(!KNOWN_TAGS.contains(&tag.as_str()));
        let reply = format!(r#"{{"intent": "{}", "params": {{}}}}"#, tag);
        let intent = parse_reply(&reply, "utterance").unwrap();
        prop_assert_eq!(intent.kind, IntentKind::Other(tag));
    }

    #[test]
    fn html_markers_always_win(body in "[a-zA-Z{}();= \n]{0,60}") {
        let page = format!("<html>{}</html>", body);
        prop_assert_eq!(classify(&page), CodeExtension::Html);
    }

    #[test]
    fn plain_words_fall_through_to_txt(text in "[a-zA-Z,\n]{0,60}") {
        // No spaces: "import " and "def " markers cannot occur
        prop_assert_eq!(classify(&text), CodeExtension::Txt);
    }

    #[test]
    fn filenames_are_filesystem_safe(description in ".{0,80}", now in 0u64..4_000_000_000) {
        let name = synthesize(&description, "py", now);
        let expected_suffix = format!("_{}.py", now);
        prop_assert!(name.ends_with(&expected_suffix));
        let stem = &name[..name.len() - expected_suffix.len()];
        prop_assert!(!stem.is_empty());
        prop_assert!(stem.len() <= 30);
        prop_assert!(stem
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    }
}
