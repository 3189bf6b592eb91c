use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Matches `{{ env.VAR }}` and `{{ env.VAR | default("fallback") }}`
fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z_][A-Za-z0-9_]*)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("placeholder regex is valid")
    })
}

/// Substitute environment placeholders in raw configuration text
///
/// Runs before TOML parsing, so any string in the file may reference the
/// environment. Comment lines are copied verbatim.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut output = String::with_capacity(input.len());

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut missing = None;
        let expanded = placeholder().replace_all(line, |captures: &Captures<'_>| {
            let var = &captures[1];
            match (std::env::var(var), captures.get(2)) {
                (Ok(value), _) => value,
                (Err(_), Some(default)) => default.as_str().to_owned(),
                (Err(_), None) => {
                    missing.get_or_insert_with(|| var.to_owned());
                    String::new()
                }
            }
        });

        if let Some(var) = missing {
            return Err(format!("environment variable not found: `{var}`"));
        }

        output.push_str(&expanded);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "[[rules]]\ntype = \"Delete\"\nheader = \"X-Debug\"\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn substitutes_variable() {
        temp_env::with_var("HT_UPSTREAM_HOST", Some("api.internal"), || {
            let result = expand_env("value = \"{{ env.HT_UPSTREAM_HOST }}\"").unwrap();
            assert_eq!(result, "value = \"api.internal\"");
        });
    }

    #[test]
    fn substitutes_several_variables_across_lines() {
        let vars = [("HT_A", Some("a")), ("HT_B", Some("b"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("x = \"{{env.HT_A}}-{{ env.HT_B }}\"\ny = \"{{ env.HT_B }}\"\n").unwrap();
            assert_eq!(result, "x = \"a-b\"\ny = \"b\"\n");
        });
    }

    #[test]
    fn missing_variable_is_an_error() {
        temp_env::with_var_unset("HT_MISSING", || {
            let err = expand_env("value = \"{{ env.HT_MISSING }}\"").unwrap_err();
            assert!(err.contains("HT_MISSING"));
        });
    }

    #[test]
    fn default_applies_only_when_unset() {
        temp_env::with_var_unset("HT_OPTIONAL", || {
            let result = expand_env("value = \"{{ env.HT_OPTIONAL | default(\"fallback\") }}\"").unwrap();
            assert_eq!(result, "value = \"fallback\"");
        });

        temp_env::with_var("HT_OPTIONAL", Some("set"), || {
            let result = expand_env("value = \"{{ env.HT_OPTIONAL | default(\"fallback\") }}\"").unwrap();
            assert_eq!(result, "value = \"set\"");
        });
    }

    #[test]
    fn comment_lines_are_not_expanded() {
        temp_env::with_var_unset("HT_MISSING", || {
            let input = "  # value = \"{{ env.HT_MISSING }}\"\nother = 1";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}
