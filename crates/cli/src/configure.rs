use anyhow::{anyhow, Result};
use site_search_core::settings::{self, FieldKind, ModuleSettings, FIELDS};
use std::collections::BTreeMap;

/// Settings keyed by setting name (as in config files), one `key = value`
/// line each, or pretty JSON.
pub fn render_settings(settings: &ModuleSettings, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(settings)?);
    }
    let value = serde_json::to_value(settings)?;
    let obj = value
        .as_object()
        .ok_or_else(|| anyhow!("settings did not serialize to an object"))?;
    let mut keys: Vec<&String> = obj.keys().collect();
    keys.sort();
    Ok(keys
        .into_iter()
        .map(|k| format!("{k} = {}", obj[k.as_str()]))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Parses `key=value` pairs. Keys must be form fields.
pub fn parse_assignments(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got {pair:?}"))?;
        let key = key.trim();
        if key != settings::ACTIVATE_FIELD && settings::field(key).is_none() {
            return Err(anyhow!("unknown setting field: {key}"));
        }
        out.insert(key.to_string(), value.to_string());
    }
    Ok(out)
}

/// Posts the current form values with `overrides` on top, then validates.
pub fn apply_overrides(
    current: &ModuleSettings,
    overrides: BTreeMap<String, String>,
) -> Result<ModuleSettings> {
    let mut post = current.form_values();
    post.extend(overrides);
    let next = current.apply_submission(&post);
    next.validate()?;
    Ok(next)
}

pub fn describe_fields() -> Vec<String> {
    FIELDS
        .iter()
        .map(|f| {
            let detail = match f.kind {
                FieldKind::Checkbox {
                    checked_value,
                    unchecked_value,
                } => format!("checkbox ({checked_value}/{unchecked_value})"),
                FieldKind::Text { .. } => "text".to_string(),
                FieldKind::Textarea { rows } => format!("textarea ({rows} rows)"),
                FieldKind::Number { min, max, step } => {
                    format!("number ({min}..={max}, step {step})")
                }
                FieldKind::Select { options } => {
                    let keys: Vec<&str> = options.iter().map(|(k, _)| *k).collect();
                    format!("select ({})", keys.join("|"))
                }
                FieldKind::Color => "color".to_string(),
                FieldKind::Email => "email".to_string(),
                FieldKind::Url => "url".to_string(),
            };
            format!("{:<30} {:<28} {}", f.name, detail, f.label)
        })
        .collect()
}
