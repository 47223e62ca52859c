//! Message templates.
//!
//! A template body is plain text with `{{placeholder}}` tokens drawn from a
//! fixed allow-list. Bodies are validated when saved, so rendering a stored
//! template never fails: known placeholders are replaced from the context
//! and allowed ones missing from the context are left as written.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholders a template body may use.
pub const ALLOWED_PLACEHOLDERS: &[&str] = &[
    "photographerName",
    "clientName",
    "sessionDate",
    "sessionLocation",
    "sessionType",
    "sessionNotes",
];

pub const MAX_TEMPLATE_LENGTH: usize = 4000;

/// Matches `{{name}}` tokens; surrounding whitespace inside the braces is
/// not part of the name.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([^{}]*?)\s*\}\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Which message a template customises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKey {
    #[serde(rename = "reminder-48h")]
    Reminder48h,
    #[serde(rename = "reminder-24h")]
    Reminder24h,
    SessionCreated,
    SessionCancelled,
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TemplateKey::Reminder48h => "reminder-48h",
            TemplateKey::Reminder24h => "reminder-24h",
            TemplateKey::SessionCreated => "session-created",
            TemplateKey::SessionCancelled => "session-cancelled",
        };
        f.write_str(s)
    }
}

/// Template rejected at save time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Template body cannot be empty")]
    EmptyBody,

    #[error("Template body must be {max} characters or less")]
    TooLong { max: usize },

    #[error("Unknown placeholders: {}", .0.join(", "))]
    UnknownPlaceholders(Vec<String>),
}

/// A validated template body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplate {
    key: TemplateKey,
    body: String,
}

impl MessageTemplate {
    /// Validates and wraps a template body.
    pub fn new(key: TemplateKey, body: impl Into<String>) -> Result<Self, TemplateError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(TemplateError::EmptyBody);
        }
        if body.chars().count() > MAX_TEMPLATE_LENGTH {
            return Err(TemplateError::TooLong {
                max: MAX_TEMPLATE_LENGTH,
            });
        }

        let unknown: Vec<String> = extract_placeholders(&body)
            .into_iter()
            .filter(|name| !ALLOWED_PLACEHOLDERS.contains(&name.as_str()))
            .collect();
        if !unknown.is_empty() {
            return Err(TemplateError::UnknownPlaceholders(unknown));
        }

        Ok(Self { key, body })
    }

    pub fn key(&self) -> TemplateKey {
        self.key
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn render(&self, context: &TemplateContext) -> String {
        substitute(&self.body, context)
    }
}

/// Renders the stored template, or `default` through the same substitution.
pub fn render_or_default(
    template: Option<&MessageTemplate>,
    default: &str,
    context: &TemplateContext,
) -> String {
    match template {
        Some(template) => template.render(context),
        None => substitute(default, context),
    }
}

/// Values available to placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<&'static str, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value; names outside the allow-list are ignored.
    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        if let Some(known) = ALLOWED_PLACEHOLDERS.iter().find(|p| **p == name) {
            self.values.insert(known, value.to_string());
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Placeholder names used in `body`, sorted and de-duplicated.
pub fn extract_placeholders(body: &str) -> Vec<String> {
    let mut names: Vec<String> = PLACEHOLDER_RE
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

fn substitute(body: &str, context: &TemplateContext) -> String {
    PLACEHOLDER_RE
        .replace_all(body, |caps: &Captures| match context.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_placeholder_at_save() {
        let err = MessageTemplate::new(TemplateKey::Reminder24h, "Hi {{unknownToken}}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownPlaceholders(vec!["unknownToken".to_string()])
        );
    }

    #[test]
    fn reports_each_unknown_placeholder_once() {
        let err = MessageTemplate::new(TemplateKey::Reminder24h, "{{b}} {{a}} {{b}} {{clientName}}")
            .unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownPlaceholders(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn extracts_trimmed_names_in_order() {
        assert_eq!(
            extract_placeholders("{{ sessionType }} on {{sessionDate}}, {{sessionType}}"),
            vec!["sessionDate".to_string(), "sessionType".to_string()]
        );
    }

    #[test]
    fn rejects_empty_placeholder() {
        assert!(MessageTemplate::new(TemplateKey::Reminder24h, "Hi {{}}").is_err());
    }

    #[test]
    fn rejects_blank_body() {
        assert_eq!(
            MessageTemplate::new(TemplateKey::Reminder24h, "   "),
            Err(TemplateError::EmptyBody)
        );
    }

    #[test]
    fn renders_known_values() {
        let template = MessageTemplate::new(
            TemplateKey::Reminder24h,
            "Hi {{clientName}}, see you at {{ sessionLocation }}.",
        )
        .unwrap();
        let ctx = TemplateContext::new()
            .with("clientName", "Ada")
            .with("sessionLocation", "Studio B");

        assert_eq!(template.render(&ctx), "Hi Ada, see you at Studio B.");
    }

    #[test]
    fn leaves_allowed_placeholders_missing_from_context() {
        let template =
            MessageTemplate::new(TemplateKey::Reminder48h, "{{clientName}}: {{sessionNotes}}").unwrap();
        let ctx = TemplateContext::new().with("clientName", "Ada");

        assert_eq!(template.render(&ctx), "Ada: {{sessionNotes}}");
    }

    #[test]
    fn unterminated_braces_are_literal() {
        let template = MessageTemplate::new(TemplateKey::Reminder48h, "Price {{ 100").unwrap();
        assert_eq!(template.render(&TemplateContext::new()), "Price {{ 100");
    }

    #[test]
    fn falls_back_to_default_when_no_template() {
        let ctx = TemplateContext::new().with("clientName", "Ada");
        assert_eq!(
            render_or_default(None, "Reminder for {{clientName}}", &ctx),
            "Reminder for Ada"
        );
    }

    #[test]
    fn context_ignores_names_outside_allow_list() {
        let ctx = TemplateContext::new().with("secret", "x");
        assert_eq!(ctx.get("secret"), None);
    }
}
