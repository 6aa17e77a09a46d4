//! Module settings edited through the admin configuration form.
//!
//! Covers the typed values, their defaults, how a raw form submission is
//! normalized into them, and validation against the constraints the form
//! declares. Rendering and storage belong to the host application.

use crate::error::{FieldError, SettingsError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub const ACTIVATE: &str = "activate_ModuleTemplate";
/// Form field carrying [`ACTIVATE`]; the checkbox posts under its own name.
pub const ACTIVATE_FIELD: &str = "activate_ModuleTemplate_cb";
pub const DEMO_TOGGLE: &str = "moduletemplate_demo_toggle";
pub const DEMO_TEXT: &str = "moduletemplate_demo_text";
pub const DEMO_TEXTAREA: &str = "moduletemplate_demo_textarea";
pub const DEMO_NUMBER: &str = "moduletemplate_demo_number";
pub const DEMO_SELECT: &str = "moduletemplate_demo_select";
pub const DEMO_COLOR: &str = "moduletemplate_demo_color";
pub const DEMO_EMAIL: &str = "moduletemplate_demo_email";
pub const DEMO_URL: &str = "moduletemplate_demo_url";

pub const CHECKED_VALUE: &str = "1";
pub const UNCHECKED_VALUE: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Checkbox {
        checked_value: &'static str,
        unchecked_value: &'static str,
    },
    Text {
        placeholder: &'static str,
    },
    Textarea {
        rows: u32,
    },
    Number {
        min: i64,
        max: i64,
        step: i64,
    },
    Select {
        options: &'static [(&'static str, &'static str)],
    },
    Color,
    Email,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub info: &'static str,
    pub kind: FieldKind,
}

pub const SELECT_OPTIONS: &[(&str, &str)] =
    &[("a", "Option A"), ("b", "Option B"), ("c", "Option C")];

pub const NUMBER_MIN: i64 = 0;
pub const NUMBER_MAX: i64 = 2000;

/// The demo fields of the configuration form, in display order.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: DEMO_TOGGLE,
        label: "DEMO: enable feature",
        info: "Demo field to test checkbox behavior.",
        kind: FieldKind::Checkbox {
            checked_value: CHECKED_VALUE,
            unchecked_value: UNCHECKED_VALUE,
        },
    },
    FieldSpec {
        name: DEMO_TEXT,
        label: "DEMO: free text",
        info: "Demo field to test single-line input.",
        kind: FieldKind::Text {
            placeholder: "A demo text…",
        },
    },
    FieldSpec {
        name: DEMO_TEXTAREA,
        label: "DEMO: textarea",
        info: "Demo field to test multi-line input.",
        kind: FieldKind::Textarea { rows: 4 },
    },
    FieldSpec {
        name: DEMO_NUMBER,
        label: "DEMO: number (px)",
        info: "Demo field to test numeric input.",
        kind: FieldKind::Number {
            min: NUMBER_MIN,
            max: NUMBER_MAX,
            step: 1,
        },
    },
    FieldSpec {
        name: DEMO_SELECT,
        label: "DEMO: select",
        info: "Demo field to test dropdown selection.",
        kind: FieldKind::Select {
            options: SELECT_OPTIONS,
        },
    },
    FieldSpec {
        name: DEMO_COLOR,
        label: "DEMO: color",
        info: "Demo field to test color picker.",
        kind: FieldKind::Color,
    },
    FieldSpec {
        name: DEMO_EMAIL,
        label: "DEMO: email address",
        info: "Demo field to test email input.",
        kind: FieldKind::Email,
    },
    FieldSpec {
        name: DEMO_URL,
        label: "DEMO: URL",
        info: "Demo field to test URL input.",
        kind: FieldKind::Url,
    },
];

pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleSettings {
    // config 0.13 lowercases keys read from files
    #[serde(rename = "activate_ModuleTemplate", alias = "activate_moduletemplate")]
    pub activate: bool,
    #[serde(rename = "moduletemplate_demo_toggle")]
    pub demo_toggle: bool,
    #[serde(rename = "moduletemplate_demo_text")]
    pub demo_text: String,
    #[serde(rename = "moduletemplate_demo_textarea")]
    pub demo_textarea: String,
    #[serde(rename = "moduletemplate_demo_number")]
    pub demo_number: i64,
    #[serde(rename = "moduletemplate_demo_select")]
    pub demo_select: String,
    #[serde(rename = "moduletemplate_demo_color")]
    pub demo_color: String,
    #[serde(rename = "moduletemplate_demo_email")]
    pub demo_email: String,
    #[serde(rename = "moduletemplate_demo_url")]
    pub demo_url: String,
}

impl Default for ModuleSettings {
    fn default() -> Self {
        Self {
            activate: true,
            demo_toggle: false,
            demo_text: "Default text".to_string(),
            demo_textarea: "Line 1\nLine 2".to_string(),
            demo_number: 500,
            demo_select: "b".to_string(),
            demo_color: "#3366ff".to_string(),
            demo_email: "demo@example.com".to_string(),
            demo_url: "https://example.com".to_string(),
        }
    }
}

impl ModuleSettings {
    /// Values used to seed the configuration form, keyed by field name.
    pub fn form_values(&self) -> BTreeMap<String, String> {
        let flag = |b: bool| if b { CHECKED_VALUE } else { UNCHECKED_VALUE };
        BTreeMap::from([
            (ACTIVATE_FIELD.to_string(), flag(self.activate).to_string()),
            (DEMO_TOGGLE.to_string(), flag(self.demo_toggle).to_string()),
            (DEMO_TEXT.to_string(), self.demo_text.clone()),
            (DEMO_TEXTAREA.to_string(), self.demo_textarea.clone()),
            (DEMO_NUMBER.to_string(), self.demo_number.to_string()),
            (DEMO_SELECT.to_string(), self.demo_select.clone()),
            (DEMO_COLOR.to_string(), self.demo_color.clone()),
            (DEMO_EMAIL.to_string(), self.demo_email.clone()),
            (DEMO_URL.to_string(), self.demo_url.clone()),
        ])
    }

    /// Normalizes a posted form into new settings.
    ///
    /// Absent text fields become empty and an unticked checkbox is false. The
    /// number only changes when the posted value is numeric.
    pub fn apply_submission(&self, post: &BTreeMap<String, String>) -> ModuleSettings {
        let text = |key: &str| post.get(key).cloned().unwrap_or_default();

        let demo_number = match post.get(DEMO_NUMBER) {
            Some(raw) => parse_numeric(raw).unwrap_or_else(|| {
                warn!("{DEMO_NUMBER}: {raw:?} is not numeric, keeping {}", self.demo_number);
                self.demo_number
            }),
            None => self.demo_number,
        };

        let next = ModuleSettings {
            activate: post
                .get(ACTIVATE_FIELD)
                .is_some_and(|v| !v.is_empty() && v != UNCHECKED_VALUE),
            demo_toggle: post.get(DEMO_TOGGLE).is_some_and(|v| v == CHECKED_VALUE),
            demo_text: text(DEMO_TEXT),
            demo_textarea: text(DEMO_TEXTAREA),
            demo_number,
            demo_select: text(DEMO_SELECT),
            demo_color: text(DEMO_COLOR),
            demo_email: text(DEMO_EMAIL),
            demo_url: text(DEMO_URL),
        };
        debug!(?next, "normalized settings submission");
        next
    }

    /// Checks every field and reports all failures at once.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut errors = Vec::new();
        let mut reject = |field: &'static str, message: String| {
            errors.push(FieldError { field, message });
        };

        if !(NUMBER_MIN..=NUMBER_MAX).contains(&self.demo_number) {
            reject(
                DEMO_NUMBER,
                format!("must be between {NUMBER_MIN} and {NUMBER_MAX}"),
            );
        }
        if !SELECT_OPTIONS.iter().any(|(k, _)| *k == self.demo_select) {
            let keys: Vec<&str> = SELECT_OPTIONS.iter().map(|(k, _)| *k).collect();
            reject(DEMO_SELECT, format!("must be one of {}", keys.join(", ")));
        }
        if !self.demo_color.is_empty() && !is_hex_color(&self.demo_color) {
            reject(DEMO_COLOR, "must be a #rrggbb color".to_string());
        }
        if !self.demo_email.is_empty() && !is_email(&self.demo_email) {
            reject(DEMO_EMAIL, "must be an email address".to_string());
        }
        if !self.demo_url.is_empty() && !is_web_url(&self.demo_url) {
            reject(DEMO_URL, "must be an http(s) URL".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SettingsError(errors))
        }
    }
}

/// Integer or decimal text; decimals truncate toward zero.
fn parse_numeric(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn is_web_url(value: &str) -> bool {
    url::Url::parse(value).is_ok_and(|u| {
        matches!(u.scheme(), "http" | "https") && u.host_str().is_some_and(|h| !h.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_match_module_config() {
        let s = ModuleSettings::default();
        assert!(s.activate);
        assert!(!s.demo_toggle);
        assert_eq!(s.demo_text, "Default text");
        assert_eq!(s.demo_textarea, "Line 1\nLine 2");
        assert_eq!(s.demo_number, 500);
        assert_eq!(s.demo_select, "b");
        assert_eq!(s.demo_color, "#3366ff");
        assert_eq!(s.demo_email, "demo@example.com");
        assert_eq!(s.demo_url, "https://example.com");
        assert!(s.validate().is_ok());
    }

    #[test]
    fn serialized_keys_use_setting_names() {
        let value = serde_json::to_value(ModuleSettings::default()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            ACTIVATE,
            DEMO_TOGGLE,
            DEMO_TEXT,
            DEMO_TEXTAREA,
            DEMO_NUMBER,
            DEMO_SELECT,
            DEMO_COLOR,
            DEMO_EMAIL,
            DEMO_URL,
        ] {
            assert!(obj.contains_key(key), "missing default setting: {key}");
        }
    }

    #[test]
    fn form_contains_all_demo_fields() {
        let names: Vec<&str> = FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                DEMO_TOGGLE,
                DEMO_TEXT,
                DEMO_TEXTAREA,
                DEMO_NUMBER,
                DEMO_SELECT,
                DEMO_COLOR,
                DEMO_EMAIL,
                DEMO_URL
            ]
        );
        assert!(matches!(field(DEMO_COLOR).unwrap().kind, FieldKind::Color));
        assert!(field("unknown").is_none());
    }

    #[test]
    fn checkbox_uses_hidden_values() {
        match field(DEMO_TOGGLE).unwrap().kind {
            FieldKind::Checkbox {
                checked_value,
                unchecked_value,
            } => {
                assert_eq!(checked_value, "1");
                assert_eq!(unchecked_value, "0");
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn select_has_expected_options() {
        match field(DEMO_SELECT).unwrap().kind {
            FieldKind::Select { options } => {
                assert_eq!(
                    options,
                    &[("a", "Option A"), ("b", "Option B"), ("c", "Option C")]
                );
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn form_values_round_trip_through_submission() {
        let s = ModuleSettings::default();
        let values = s.form_values();
        assert_eq!(values[ACTIVATE_FIELD], "1");
        assert_eq!(values[DEMO_TOGGLE], "0");
        assert_eq!(values[DEMO_NUMBER], "500");
        assert_eq!(s.apply_submission(&values), s);
    }

    #[test]
    fn empty_submission_clears_text_and_flags() {
        let s = ModuleSettings::default().apply_submission(&BTreeMap::new());
        assert!(!s.activate);
        assert!(!s.demo_toggle);
        assert_eq!(s.demo_text, "");
        assert_eq!(s.demo_url, "");
        assert_eq!(s.demo_number, 500);
    }

    #[test]
    fn toggle_requires_exact_checked_value() {
        let base = ModuleSettings::default();
        assert!(base.apply_submission(&post(&[(DEMO_TOGGLE, "1")])).demo_toggle);
        assert!(!base.apply_submission(&post(&[(DEMO_TOGGLE, "on")])).demo_toggle);
        assert!(!base.apply_submission(&post(&[(DEMO_TOGGLE, "0")])).demo_toggle);
    }

    #[test]
    fn number_only_updates_when_numeric() {
        let base = ModuleSettings::default();
        assert_eq!(
            base.apply_submission(&post(&[(DEMO_NUMBER, " 750 ")])).demo_number,
            750
        );
        assert_eq!(
            base.apply_submission(&post(&[(DEMO_NUMBER, "12.9")])).demo_number,
            12
        );
        assert_eq!(
            base.apply_submission(&post(&[(DEMO_NUMBER, "wide")])).demo_number,
            500
        );
        assert_eq!(
            base.apply_submission(&post(&[(DEMO_NUMBER, "")])).demo_number,
            500
        );
    }

    #[test]
    fn validate_collects_all_failures() {
        let s = ModuleSettings {
            demo_number: 2001,
            demo_select: "z".into(),
            demo_color: "blue".into(),
            demo_email: "not-an-email".into(),
            demo_url: "ftp://example.com".into(),
            ..ModuleSettings::default()
        };
        let err = s.validate().unwrap_err();
        let fields: Vec<&str> = err.fields().collect();
        assert_eq!(
            fields,
            vec![DEMO_NUMBER, DEMO_SELECT, DEMO_COLOR, DEMO_EMAIL, DEMO_URL]
        );
    }

    #[test]
    fn blank_optional_fields_are_accepted() {
        let s = ModuleSettings {
            demo_color: String::new(),
            demo_email: String::new(),
            demo_url: String::new(),
            ..ModuleSettings::default()
        };
        assert!(s.validate().is_ok());
    }

    #[test]
    fn number_bounds_are_inclusive() {
        for n in [0, 2000] {
            let s = ModuleSettings {
                demo_number: n,
                ..ModuleSettings::default()
            };
            assert!(s.validate().is_ok(), "{n} should be accepted");
        }
        let s = ModuleSettings {
            demo_number: -1,
            ..ModuleSettings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("a@b.org"));
        assert!(!is_email("@b.org"));
        assert!(!is_email("a@"));
        assert!(!is_email("a@b@c"));
        assert!(!is_email("a b@c.org"));
    }
}
