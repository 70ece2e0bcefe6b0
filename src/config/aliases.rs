use crate::error::{Error, Result};
use crate::matching::AliasTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Alias file format:
///
/// ```yaml
/// version: 1
/// replace_builtin: false
/// aliases:
///   gobi: cauliflower
///   bhindi: okra
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasConfig {
    pub version: u32,
    #[serde(default)]
    pub replace_builtin: bool,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl AliasConfig {
    /// Load alias configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "Failed to read alias config from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: AliasConfig = serde_yaml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse alias config from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(Error::Config(format!(
                "Unsupported alias config version: {}. Expected version 1",
                self.version
            )));
        }

        for (from, to) in &self.aliases {
            if from.trim().is_empty() {
                return Err(Error::Config("Alias key cannot be empty".to_string()));
            }
            if to.trim().is_empty() {
                return Err(Error::Config(format!("Alias '{from}' has an empty value")));
            }
            // Lookups happen after trim + lowercase, so other keys never match
            if from.trim().to_lowercase() != *from {
                return Err(Error::Config(format!(
                    "Alias key '{from}' must be lowercase without surrounding whitespace"
                )));
            }
        }

        Ok(())
    }

    /// Build the table, layered over `base` unless `replace_builtin` is set.
    pub fn apply(&self, base: &AliasTable) -> AliasTable {
        let pairs = self
            .aliases
            .iter()
            .map(|(from, to)| (from.clone(), to.clone()));

        if self.replace_builtin {
            AliasTable::from_pairs(pairs)
        } else {
            base.extended(pairs)
        }
    }
}

/// Built-in table, optionally customized by the file at `path`.
pub fn load_alias_table(path: Option<&Path>) -> Result<AliasTable> {
    let builtin = AliasTable::builtin();
    match path {
        Some(path) => {
            let config = AliasConfig::from_file(path)?;
            Ok(config.apply(&builtin))
        }
        None => Ok(builtin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_extend_builtin() {
        let file = create_test_config(
            r#"
version: 1
aliases:
  gobi: cauliflower
  mirchi: green chili
"#,
        );

        let table = load_alias_table(Some(file.path())).unwrap();
        assert_eq!(table.lookup("gobi"), Some("cauliflower"));
        assert_eq!(table.lookup("mirchi"), Some("green chili"));
        assert_eq!(table.lookup("aloo"), Some("potato"));
    }

    #[test]
    fn test_replace_builtin() {
        let file = create_test_config(
            r#"
version: 1
replace_builtin: true
aliases:
  bhindi: okra
"#,
        );

        let table = load_alias_table(Some(file.path())).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("aloo"), None);
        assert_eq!(table.normalize("Bhindi, aloo"), vec!["okra", "aloo"]);
    }

    #[test]
    fn test_no_path_uses_builtin() {
        let table = load_alias_table(None).unwrap();
        assert_eq!(table, AliasTable::builtin());
    }

    #[test]
    fn test_reject_bad_version() {
        let file = create_test_config("version: 2\naliases: {}\n");
        let result = AliasConfig::from_file(file.path());
        assert!(result.unwrap_err().to_string().contains("version"));
    }

    #[test]
    fn test_reject_uppercase_key() {
        let file = create_test_config("version: 1\naliases:\n  Gobi: cauliflower\n");
        let result = AliasConfig::from_file(file.path());
        assert!(result.unwrap_err().to_string().contains("lowercase"));
    }

    #[test]
    fn test_reject_empty_value() {
        let file = create_test_config("version: 1\naliases:\n  gobi: \"\"\n");
        let result = AliasConfig::from_file(file.path());
        assert!(result.unwrap_err().to_string().contains("empty value"));
    }

    #[test]
    fn test_missing_file() {
        let result = load_alias_table(Some(Path::new("/nonexistent/aliases.yaml")));
        assert!(result.unwrap_err().to_string().contains("Failed to read"));
    }
}
