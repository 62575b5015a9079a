use picodash_core::config::{parse_config, RawWorkspace};
use picodash_core::workspace::{Params, WorkspaceRegistry};
use proptest::prelude::*;

fn workspace(display_time_s: i32, renderer: &str) -> RawWorkspace {
    RawWorkspace {
        name: heapless::String::try_from("ws").unwrap(),
        display_time_s: Some(display_time_s),
        renderer: heapless::String::try_from(renderer).unwrap(),
        params: Params::new(),
    }
}

proptest! {
    #[test]
    fn parser_never_panics(text in "\\PC{0,400}") {
        let _ = parse_config(&text);
    }

    #[test]
    fn parser_handles_line_soup(
        lines in prop::collection::vec(
            prop::sample::select(vec![
                "[[workspace]]",
                "[display]",
                "[wifi]",
                "name = \"Clock\"",
                "renderer = \"time\"",
                "display_time = 10",
                "display_time = -1",
                "format = \"HH:MM\"",
                "instructions = [\"a\", \"b\"]",
                "tick_ms = 100",
                "# comment",
                "",
                "garbage",
            ]),
            0..60,
        ),
    ) {
        let text = lines.join("\n");
        if let Ok(config) = parse_config(&text) {
            let (registry, error) = WorkspaceRegistry::load_or_fallback(&config.workspaces);
            prop_assert!(!registry.is_empty());
            prop_assert_eq!(registry.is_fallback(), error.is_some());
        }
    }

    #[test]
    fn any_invalid_entry_gives_single_fallback(
        good in prop::collection::vec(1i32..100, 0..8),
        bad_time in -1000i32..=0,
        position in 0usize..8,
    ) {
        let mut raw: Vec<RawWorkspace> = good.iter().map(|&s| workspace(s, "time")).collect();
        let position = position.min(raw.len());
        raw.insert(position, workspace(bad_time, "date"));

        let (registry, error) = WorkspaceRegistry::load_or_fallback(&raw);
        prop_assert!(error.is_some());
        prop_assert_eq!(registry.len(), 1);
        prop_assert!(registry.is_fallback());
    }
}
