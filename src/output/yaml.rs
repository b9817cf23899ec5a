//! YAML rules document

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::client::Rule;
use crate::error::Result;

/// Top-level document shape: `rules:` followed by the rule sequence
#[derive(Debug, Serialize)]
pub struct RulesDocument<'a> {
    pub rules: &'a [Rule],
}

/// Render rules as block-style YAML, keys in their original order
pub fn render_rules(rules: &[Rule]) -> Result<String> {
    let mut quoted = QuotedScalars::for_rules(rules);
    let masked: Vec<Rule> = rules
        .iter()
        .cloned()
        .map(|rule| quoted.mask_map(rule))
        .collect();

    let yaml = serde_yaml::to_string(&RulesDocument { rules: &masked })?;
    Ok(quoted.restore(yaml))
}

/// Strings that YAML 1.1 readers (PyYAML, go-yaml v2) load as booleans.
///
/// serde_yaml follows YAML 1.2 and leaves these unquoted; `true`/`false`
/// variants are already quoted by it.
fn is_yaml11_bool(s: &str) -> bool {
    matches!(
        s,
        "y" | "Y"
            | "yes"
            | "Yes"
            | "YES"
            | "n"
            | "N"
            | "no"
            | "No"
            | "NO"
            | "on"
            | "On"
            | "ON"
            | "off"
            | "Off"
            | "OFF"
    )
}

/// Swaps YAML 1.1 boolean words for plain placeholder tokens before
/// serialization, then puts them back single-quoted.
struct QuotedScalars {
    marker: String,
    originals: Vec<String>,
}

impl QuotedScalars {
    /// Pick a marker that occurs nowhere in the rules
    fn for_rules(rules: &[Rule]) -> Self {
        let mut marker = String::from("dq_extract_quoted_");
        while rules.iter().any(|rule| map_mentions(rule, &marker)) {
            marker.push('_');
        }
        Self {
            marker,
            originals: Vec::new(),
        }
    }

    fn token(&self, index: usize) -> String {
        format!("{}{}_", self.marker, index)
    }

    fn mask(&mut self, original: String) -> String {
        let token = self.token(self.originals.len());
        self.originals.push(original);
        token
    }

    fn mask_map(&mut self, map: Rule) -> Rule {
        map.into_iter()
            .map(|(key, value)| {
                let key = if is_yaml11_bool(&key) {
                    self.mask(key)
                } else {
                    key
                };
                (key, self.mask_value(value))
            })
            .collect()
    }

    fn mask_value(&mut self, value: Value) -> Value {
        match value {
            Value::String(s) if is_yaml11_bool(&s) => Value::String(self.mask(s)),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| self.mask_value(v)).collect())
            }
            Value::Object(map) => Value::Object(self.mask_map(map)),
            other => other,
        }
    }

    fn restore(&self, mut yaml: String) -> String {
        for (index, original) in self.originals.iter().enumerate() {
            yaml = yaml.replace(&self.token(index), &format!("'{}'", original));
        }
        yaml
    }
}

fn map_mentions(map: &Rule, needle: &str) -> bool {
    map.iter()
        .any(|(key, value)| key.contains(needle) || value_mentions(value, needle))
}

fn value_mentions(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.contains(needle),
        Value::Array(items) => items.iter().any(|v| value_mentions(v, needle)),
        Value::Object(map) => map_mentions(map, needle),
        _ => false,
    }
}

/// Write the rules document to `path`.
///
/// The document goes to a temporary file next to `path` and is renamed into
/// place, so the target is either fully written or untouched.
pub fn write_rules(path: &Path, rules: &[Rule]) -> Result<()> {
    let document = render_rules(rules)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(document.as_bytes())?;
    file.flush()?;

    // Temp files are created 0600; the rules file is meant to be shared and edited
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
