use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Run configuration. Every key is optional; an empty TOML document yields
/// the stock behaviour (`Name`/`Container`/`Datatype` columns, `Unknown`
/// sentinel, outputs in the working directory).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconConfig {
    #[serde(default = "default_unknown")]
    pub unknown: String,
    #[serde(default)]
    pub columns: ColumnMapping,
    #[serde(default)]
    pub selections: SelectionsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            unknown: default_unknown(),
            columns: ColumnMapping::default(),
            selections: SelectionsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

fn default_unknown() -> String {
    "Unknown".into()
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Container-workbook columns that make up a lookup entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnMapping {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_container")]
    pub container: String,
    #[serde(default = "default_datatype")]
    pub datatype: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            name: default_name(),
            container: default_container(),
            datatype: default_datatype(),
        }
    }
}

fn default_name() -> String {
    "Name".into()
}

fn default_container() -> String {
    "Container".into()
}

fn default_datatype() -> String {
    "Datatype".into()
}

// ---------------------------------------------------------------------------
// Selections + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionsConfig {
    /// Explicit path to the selections workbook. When unset the CLI looks
    /// next to its own executable.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

pub const SELECTIONS_FILE_NAME: &str = "Selections.xlsx";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_updated")]
    pub updated: String,
    #[serde(default = "default_mismatches")]
    pub mismatches: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: None,
            updated: default_updated(),
            mismatches: default_mismatches(),
        }
    }
}

fn default_updated() -> String {
    "Updated_Selections.csv".into()
}

fn default_mismatches() -> String {
    "Datatype_Mismatches.csv".into()
}

impl OutputConfig {
    /// Output directory, defaulting to the current working directory.
    pub fn dir_or_cwd(&self) -> &Path {
        self.dir.as_deref().unwrap_or_else(|| Path::new("."))
    }

    pub fn updated_path(&self) -> PathBuf {
        self.dir_or_cwd().join(&self.updated)
    }

    pub fn mismatches_path(&self) -> PathBuf {
        self.dir_or_cwd().join(&self.mismatches)
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ReconError> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&input)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.unknown.is_empty() {
            return Err(ReconError::ConfigValidation(
                "unknown sentinel must not be empty".into(),
            ));
        }

        for (key, value) in [
            ("columns.name", &self.columns.name),
            ("columns.container", &self.columns.container),
            ("columns.datatype", &self.columns.datatype),
            ("output.updated", &self.output.updated),
            ("output.mismatches", &self.output.mismatches),
        ] {
            if value.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!("{key} must not be empty")));
            }
        }

        if self.output.updated == self.output.mismatches {
            return Err(ReconError::ConfigValidation(format!(
                "output.updated and output.mismatches both name '{}'",
                self.output.updated
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ReconConfig::from_toml("").unwrap();
        assert_eq!(config.unknown, "Unknown");
        assert_eq!(config.columns, ColumnMapping::default());
        assert_eq!(config.columns.name, "Name");
        assert_eq!(config.columns.container, "Container");
        assert_eq!(config.columns.datatype, "Datatype");
        assert!(config.selections.path.is_none());
        assert_eq!(config.output.updated_path(), Path::new("./Updated_Selections.csv"));
        assert_eq!(config.output.mismatches_path(), Path::new("./Datatype_Mismatches.csv"));
    }

    #[test]
    fn parse_full_config() {
        let input = r#"
unknown = "N/A"

[columns]
name = "Field"
container = "Table"
datatype = "Type"

[selections]
path = "/data/Selections.xlsx"

[output]
dir = "/tmp/out"
updated = "all.csv"
mismatches = "bad.csv"
"#;
        let config = ReconConfig::from_toml(input).unwrap();
        assert_eq!(config.unknown, "N/A");
        assert_eq!(config.columns.name, "Field");
        assert_eq!(config.columns.container, "Table");
        assert_eq!(config.columns.datatype, "Type");
        assert_eq!(
            config.selections.path.as_deref(),
            Some(Path::new("/data/Selections.xlsx"))
        );
        assert_eq!(config.output.updated_path(), Path::new("/tmp/out/all.csv"));
        assert_eq!(config.output.mismatches_path(), Path::new("/tmp/out/bad.csv"));
    }

    #[test]
    fn partial_columns_keep_other_defaults() {
        let config = ReconConfig::from_toml("[columns]\nname = \"Field\"\n").unwrap();
        assert_eq!(config.columns.name, "Field");
        assert_eq!(config.columns.container, "Container");
    }

    #[test]
    fn reject_unknown_key() {
        let err = ReconConfig::from_toml("[columns]\nnmae = \"Field\"\n").unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn reject_empty_column() {
        let err = ReconConfig::from_toml("[columns]\ndatatype = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("columns.datatype"));
    }

    #[test]
    fn reject_empty_sentinel() {
        let err = ReconConfig::from_toml("unknown = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("sentinel"));
    }

    #[test]
    fn reject_clashing_outputs() {
        let input = "[output]\nupdated = \"x.csv\"\nmismatches = \"x.csv\"\n";
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("x.csv"));
    }
}
