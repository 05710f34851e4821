//! Converter settings loaded from TOML
//!
//! Settings control the bridge template emitted before the first object,
//! the string escaping policy, and whether unconverted legacy properties
//! are kept in the output.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::emitter::EscapePolicy;
use crate::transform::{Object, Value, ValueMap};

/// Errors that can occur when loading or parsing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// The abstract service template every converted command inherits from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeTemplate {
    pub name: String,
    pub check_type: String,
    /// Default macro values
    pub macros: ValueMap,
}

impl BridgeTemplate {
    /// The template as an emittable object
    pub fn to_object(&self) -> Object {
        Object::new("service", self.name.clone())
            .with_abstract(true)
            .with_property("check_type", self.check_type.clone())
            .with_property("macros", self.macros.clone())
    }
}

/// Converter settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bridge: BridgeTemplate,
    pub escape: EscapePolicy,
    /// Emit properties no rule consumed under a nested `legacy` map
    pub keep_legacy: bool,
}

/// TOML structure for deserializing settings
#[derive(Deserialize)]
struct TomlSettings {
    bridge: Option<TomlBridge>,
    output: Option<TomlOutput>,
}

#[derive(Deserialize)]
struct TomlBridge {
    name: Option<String>,
    check_type: Option<String>,
    macros: Option<toml::Table>,
}

#[derive(Deserialize)]
struct TomlOutput {
    escape: Option<EscapePolicy>,
    keep_legacy: Option<bool>,
}

/// Built-in settings: the classic Nagios plugin bridge
const DEFAULT_SETTINGS: &str = r#"
[bridge]
name = "nagios-service"
check_type = "nagios"

[bridge.macros]
USER1 = "/tmp/nagios/plugins"
SERVICESTATE = 0
SERVICEDURATIONSEC = 0
TOTALHOSTSERVICESCRITICAL = 0
TOTALHOSTSERVICESWARNING = 0

[output]
escape = "minimal"
keep_legacy = false
"#;

impl Settings {
    /// Load settings from a TOML file, on top of the defaults
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string, on top of the defaults
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        Self::default().merge_str(content)
    }

    /// Override fields present in `content`; bridge macros are merged key by key
    pub fn merge_str(mut self, content: &str) -> Result<Self, SettingsError> {
        let parsed: TomlSettings = toml::from_str(content)?;

        if let Some(bridge) = parsed.bridge {
            if let Some(name) = bridge.name {
                self.bridge.name = name;
            }
            if let Some(check_type) = bridge.check_type {
                self.bridge.check_type = check_type;
            }
            if let Some(macros) = bridge.macros {
                for (key, value) in macros {
                    self.bridge.macros.insert(key, toml_to_value(value));
                }
            }
        }

        if let Some(output) = parsed.output {
            if let Some(escape) = output.escape {
                self.escape = escape;
            }
            if let Some(keep_legacy) = output.keep_legacy {
                self.keep_legacy = keep_legacy;
            }
        }

        Ok(self)
    }

    fn empty() -> Self {
        Self {
            bridge: BridgeTemplate {
                name: String::new(),
                check_type: String::new(),
                macros: ValueMap::new(),
            },
            escape: EscapePolicy::default(),
            keep_legacy: false,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::empty()
            .merge_str(DEFAULT_SETTINGS)
            .expect("Default settings should be valid TOML")
    }
}

fn toml_to_value(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(n) => Value::Integer(n),
        toml::Value::Table(table) => {
            let mut map = ValueMap::new();
            for (key, item) in table {
                map.insert(key, toml_to_value(item));
            }
            Value::Map(map)
        }
        toml::Value::Array(items) => Value::List(items.into_iter().map(toml_to_value).collect()),
        other => Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.bridge.name, "nagios-service");
        assert_eq!(settings.bridge.check_type, "nagios");
        assert_eq!(settings.escape, EscapePolicy::Minimal);
        assert!(!settings.keep_legacy);
        let keys: Vec<_> = settings.bridge.macros.keys().collect();
        assert_eq!(
            keys,
            vec![
                "USER1",
                "SERVICESTATE",
                "SERVICEDURATIONSEC",
                "TOTALHOSTSERVICESCRITICAL",
                "TOTALHOSTSERVICESWARNING"
            ]
        );
        assert_eq!(
            settings.bridge.macros.get("USER1"),
            Some(&Value::String("/tmp/nagios/plugins".to_string()))
        );
    }

    #[test]
    fn test_bridge_object() {
        let obj = Settings::default().bridge.to_object();
        assert_eq!(obj.object_type, "service");
        assert_eq!(obj.name, "nagios-service");
        assert!(obj.is_abstract);
        assert!(obj.parents.is_empty());
        assert_eq!(obj.properties.keys().collect::<Vec<_>>(), vec!["check_type", "macros"]);
    }

    #[test]
    fn test_partial_override() {
        let toml_str = r#"
[bridge.macros]
USER1 = "/usr/lib/nagios/plugins"
USER2 = "/usr/local/plugins"

[output]
escape = "legacy"
"#;
        let settings = Settings::from_str(toml_str).expect("Should parse");
        assert_eq!(settings.bridge.name, "nagios-service");
        assert_eq!(settings.escape, EscapePolicy::Legacy);
        assert_eq!(
            settings.bridge.macros.get("USER1"),
            Some(&Value::String("/usr/lib/nagios/plugins".to_string()))
        );
        assert!(settings.bridge.macros.contains_key("USER2"));
        assert!(settings.bridge.macros.contains_key("SERVICESTATE"));
    }

    #[test]
    fn test_rename_bridge_and_keep_legacy() {
        let settings = Settings::from_str(
            "[bridge]\nname = \"legacy-plugin\"\n[output]\nkeep_legacy = true\n",
        )
        .expect("Should parse");
        assert_eq!(settings.bridge.name, "legacy-plugin");
        assert!(settings.keep_legacy);
    }

    #[test]
    fn test_empty_settings_are_defaults() {
        assert_eq!(Settings::from_str("").expect("Should parse"), Settings::default());
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(Settings::from_str("this is not valid toml {{{{").is_err());
        assert!(Settings::from_str("[output]\nescape = \"markdown\"\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().expect("Should create temp dir");
        let path = dir.path().join("objconv.toml");
        std::fs::write(&path, "[bridge]\nname = \"file-bridge\"\n").expect("Should write settings");

        let settings = Settings::from_file(&path).expect("Should load");
        assert_eq!(settings.bridge.name, "file-bridge");
        assert_eq!(settings.bridge.check_type, "nagios");
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::TempDir::new().expect("Should create temp dir");
        let missing = Settings::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(SettingsError::IoError(_))));

        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[bridge\nname = 1\n").expect("Should write settings");
        assert!(matches!(Settings::from_file(&path), Err(SettingsError::ParseError(_))));
    }
}
