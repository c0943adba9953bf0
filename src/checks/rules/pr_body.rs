//! PR body validation: checklist completion, required and forbidden text.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::checks::check::{option_error, required_text, search_regex, Check};
use crate::config::CheckConfig;
use crate::content::{Content, FIELD_BODY};
use crate::results::{
    CheckResult, ERROR_FORBIDDEN_PR_BODY_TEXT, ERROR_MISSING_PR_BODY_TEXT,
    ERROR_UNFINISHED_CHECKLIST,
};

/// A markdown task list item: `- [ ]`, `* [x]`, ...
static CHECKLIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*[-*] \[([ xX])\]").expect("checklist regex is valid")
});

/// Checks that every checklist item in the PR body is ticked.
pub struct PrBodyChecklistCheck {
    config: CheckConfig,
}

impl PrBodyChecklistCheck {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }
}

impl Check for PrBodyChecklistCheck {
    fn config(&self) -> &CheckConfig {
        &self.config
    }

    fn run(&self, content: &Content) -> CheckResult {
        let body = match required_text(&self.config, content, FIELD_BODY, "PR body") {
            Ok(body) => body,
            Err(result) => return result,
        };

        let unfinished: Vec<&str> = body
            .lines()
            .filter(|line| {
                CHECKLIST_ITEM
                    .captures(line)
                    .is_some_and(|caps| &caps[1] == " ")
            })
            .map(str::trim)
            .collect();

        if unfinished.is_empty() {
            return CheckResult::pass(&self.config);
        }

        CheckResult::fail(
            &self.config,
            ERROR_UNFINISHED_CHECKLIST,
            format!(
                "PR body has {} unfinished checklist item(s)",
                unfinished.len()
            ),
        )
        .with_detail("unfinished", unfinished)
    }
}

/// Checks that the PR body contains a match for every pattern in `patterns`.
pub struct PrBodyIncludesCheck {
    config: CheckConfig,
}

impl PrBodyIncludesCheck {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }
}

impl Check for PrBodyIncludesCheck {
    fn config(&self) -> &CheckConfig {
        &self.config
    }

    fn run(&self, content: &Content) -> CheckResult {
        let (body, patterns) = match body_and_patterns(&self.config, content) {
            Ok(parts) => parts,
            Err(result) => return result,
        };

        let missing: Vec<String> = patterns
            .into_iter()
            .filter(|(_, regex)| !regex.is_match(body))
            .map(|(pattern, _)| pattern)
            .collect();

        if missing.is_empty() {
            return CheckResult::pass(&self.config);
        }

        CheckResult::fail(
            &self.config,
            ERROR_MISSING_PR_BODY_TEXT,
            format!(
                "PR body is missing required text matching: {}",
                quoted_list(&missing)
            ),
        )
        .with_detail("missing", Value::from(missing))
    }
}

/// Checks that the PR body contains no match for any pattern in `patterns`.
pub struct PrBodyExcludesCheck {
    config: CheckConfig,
}

impl PrBodyExcludesCheck {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }
}

impl Check for PrBodyExcludesCheck {
    fn config(&self) -> &CheckConfig {
        &self.config
    }

    fn run(&self, content: &Content) -> CheckResult {
        let (body, patterns) = match body_and_patterns(&self.config, content) {
            Ok(parts) => parts,
            Err(result) => return result,
        };

        let found: Vec<String> = patterns
            .into_iter()
            .filter(|(_, regex)| regex.is_match(body))
            .map(|(pattern, _)| pattern)
            .collect();

        if found.is_empty() {
            return CheckResult::pass(&self.config);
        }

        CheckResult::fail(
            &self.config,
            ERROR_FORBIDDEN_PR_BODY_TEXT,
            format!(
                "PR body contains forbidden text matching: {}",
                quoted_list(&found)
            ),
        )
        .with_detail("found", Value::from(found))
    }
}

type CompiledPatterns = Vec<(String, Regex)>;

fn body_and_patterns<'a>(
    config: &CheckConfig,
    content: &'a Content,
) -> Result<(&'a str, CompiledPatterns), CheckResult> {
    let body = required_text(config, content, FIELD_BODY, "PR body")?;
    let patterns = config
        .option_str_list("patterns")
        .map_err(|err| option_error(config, err))?;

    let compiled = patterns
        .into_iter()
        .map(|pattern| search_regex(config, &pattern).map(|regex| (pattern, regex)))
        .collect::<Result<_, _>>()?;
    Ok((body, compiled))
}

fn quoted_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{}\"", item))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{CheckStatus, ERROR_INVALID_CONFIG, ERROR_INVALID_CONTENT};
    use serde_json::json;

    fn body(text: &str) -> Content {
        Content::new().with(FIELD_BODY, text)
    }

    fn config(check_type: &str, options: Value) -> CheckConfig {
        CheckConfig::build(check_type, &options).unwrap()
    }

    #[test]
    fn checklist_all_ticked_passes() {
        let check = PrBodyChecklistCheck::new(config("pr_body_checklist", Value::Null));
        assert!(check
            .run(&body("This is something. \n- [x]\n- [x]\n\n* [X]"))
            .success());
    }

    #[test]
    fn checklist_without_space_is_not_an_item() {
        let check = PrBodyChecklistCheck::new(config("pr_body_checklist", Value::Null));
        assert!(check.run(&body("This is something. \n- []")).success());
    }

    #[test]
    fn checklist_unticked_item_fails() {
        let check = PrBodyChecklistCheck::new(config("pr_body_checklist", Value::Null));

        let result = check.run(&body("This is something. \n- [ ] Tests\n- [x]\n\n* [x]"));
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.error_code.as_deref(), Some(ERROR_UNFINISHED_CHECKLIST));
        assert_eq!(result.details["unfinished"], json!(["- [ ] Tests"]));

        let result = check.run(&body("This is something. \n- [x]\n- [x]\n\n  * [ ] Docs"));
        assert_eq!(result.error_code.as_deref(), Some(ERROR_UNFINISHED_CHECKLIST));
        assert_eq!(result.details["unfinished"], json!(["* [ ] Docs"]));
    }

    #[test]
    fn checklist_mid_line_brackets_are_ignored() {
        let check = PrBodyChecklistCheck::new(config("pr_body_checklist", Value::Null));
        assert!(check.run(&body("Use - [ ] for todo items")).success());
    }

    #[test]
    fn checklist_empty_body_is_invalid_content() {
        let check = PrBodyChecklistCheck::new(config("pr_body_checklist", Value::Null));
        let result = check.run(&body(""));
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.error_code.as_deref(), Some(ERROR_INVALID_CONTENT));
        assert_eq!(result.message.as_deref(), Some("PR body not defined or empty"));
    }

    #[test]
    fn includes_requires_every_pattern() {
        let check = PrBodyIncludesCheck::new(config(
            "pr_body_includes",
            json!({"patterns": ["must-be", "present"]}),
        ));

        assert!(check.run(&body("Things must-be present")).success());
        assert!(check.run(&body("A good present is a must-be")).success());

        let result = check.run(&body("present must be"));
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.error_code.as_deref(), Some(ERROR_MISSING_PR_BODY_TEXT));
        assert_eq!(result.details["missing"], json!(["must-be"]));

        let result = check.run(&body("must-be pres-ent"));
        assert_eq!(result.details["missing"], json!(["present"]));

        let result = check.run(&body("totally unrelated"));
        assert_eq!(result.details["missing"], json!(["must-be", "present"]));
        assert_eq!(
            result.message.as_deref(),
            Some("PR body is missing required text matching: \"must-be\", \"present\"")
        );
    }

    #[test]
    fn includes_accepts_single_pattern_string() {
        let check = PrBodyIncludesCheck::new(config(
            "pr_body_includes",
            json!({"patterns": "JIRA-[0-9]+"}),
        ));
        assert!(check.run(&body("Fixes JIRA-42")).success());
        assert!(!check.run(&body("Fixes a bug")).success());
    }

    #[test]
    fn includes_without_patterns_is_invalid_config() {
        let check = PrBodyIncludesCheck::new(config("pr_body_includes", json!({})));
        let result = check.run(&body("anything"));
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.error_code.as_deref(), Some(ERROR_INVALID_CONFIG));
    }

    #[test]
    fn excludes_rejects_any_pattern() {
        let check = PrBodyExcludesCheck::new(config(
            "pr_body_excludes",
            json!({"patterns": ["forbidden", "fruit"]}),
        ));

        assert!(check.run(&body("Something about something else")).success());

        let result = check.run(&body("I love eating fruit"));
        assert_eq!(result.error_code.as_deref(), Some(ERROR_FORBIDDEN_PR_BODY_TEXT));
        assert_eq!(result.details["found"], json!(["fruit"]));

        let result = check.run(&body("This is forbidden"));
        assert_eq!(result.details["found"], json!(["forbidden"]));

        // Case-sensitive unless the pattern says otherwise.
        let result = check.run(&body("Fruit is forbidden here"));
        assert_eq!(result.details["found"], json!(["forbidden"]));
    }

    #[test]
    fn excludes_case_insensitive_flag() {
        let check = PrBodyExcludesCheck::new(config(
            "pr_body_excludes",
            json!({"patterns": ["(?i)do not merge"]}),
        ));
        assert!(!check.run(&body("DO NOT MERGE yet")).success());
    }

    #[test]
    fn excludes_invalid_regex_is_invalid_config() {
        let check = PrBodyExcludesCheck::new(config(
            "pr_body_excludes",
            json!({"patterns": ["[unclosed"]}),
        ));
        let result = check.run(&body("anything"));
        assert_eq!(result.error_code.as_deref(), Some(ERROR_INVALID_CONFIG));
    }
}
