//! Property-based tests for child environment overrides

use aiterm::platform::environment_overrides;
use proptest::prelude::*;
use std::collections::HashMap;

fn var_name() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,12}"
}

proptest! {
    #[test]
    fn test_only_custom_values_are_set(
        inherited in prop::collection::vec(var_name(), 0..16),
        custom in prop::collection::hash_map(var_name(), "[a-z0-9/]{0,16}", 0..16),
    ) {
        let env = environment_overrides(&inherited, &custom, "AITERM_TAG_VAR_", "unix", "/usr/bin");

        for (key, value) in &custom {
            prop_assert_eq!(env.get(key), Some(value));
        }
        for key in env.keys() {
            prop_assert!(
                custom.contains_key(key) || key == "AITERM_TAG_VAR_" || key == "PATH",
                "unexpected override {}",
                key
            );
        }
    }

    #[test]
    fn test_platform_tag_always_wins(
        custom in prop::collection::hash_map(var_name(), "[a-z]{0,8}", 0..8),
        os_tag in "(unix|windows)",
    ) {
        let mut custom: HashMap<String, String> = custom;
        custom.insert("AI_TERMINAL_PLATFORM".to_string(), "spoofed".to_string());

        let env = environment_overrides(Vec::<String>::new(), &custom, "AI_TERMINAL_PLATFORM", &os_tag, "/bin");
        prop_assert_eq!(env.get("AI_TERMINAL_PLATFORM"), Some(&os_tag));
    }

    #[test]
    fn test_default_path_only_without_inherited_path(
        inherited in prop::collection::vec(var_name(), 0..8),
        path_key in prop::option::of("(PATH|Path|path)"),
    ) {
        let mut inherited: Vec<String> = inherited;
        inherited.retain(|k| !k.eq_ignore_ascii_case("PATH"));
        if let Some(key) = &path_key {
            inherited.push(key.clone());
        }

        let env = environment_overrides(&inherited, &HashMap::new(), "TAG", "unix", "/usr/bin");
        match path_key {
            Some(_) => prop_assert!(!env.keys().any(|k| k.eq_ignore_ascii_case("PATH"))),
            None => prop_assert_eq!(env.get("PATH").map(String::as_str), Some("/usr/bin")),
        }
    }
}
