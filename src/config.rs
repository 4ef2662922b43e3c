//! Model configuration (YAML)
//!
//! Every field has a default, so an empty file or no file at all yields the
//! standard model: FY2020-FY2024 history, sixteen forecast years from
//! FY2025 and the fixed input roster.

use crate::error::{ModelError, ModelResult};
use crate::formula::TemplaterConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "NationalGrid_Full_Model_Generated.xlsx";

/// Which side of the model an input table feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Label, unit, then one column per forecast year
    Assumption,
    /// Label, then one column per historical year
    Historical,
}

/// One CSV file loaded into one sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTable {
    pub sheet: String,
    pub file: PathBuf,
    pub kind: TableKind,
}

impl InputTable {
    fn new(sheet: &str, file: &str, kind: TableKind) -> Self {
        Self {
            sheet: sheet.to_string(),
            file: PathBuf::from(file),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearSettings {
    pub first_historical_year: u32,
    pub historical_years: u32,
    pub forecast_years: u32,
    /// Trailing historical years shown on the history+forecast sheets
    pub display_history: u32,
}

impl Default for YearSettings {
    fn default() -> Self {
        Self {
            first_historical_year: 2020,
            historical_years: 5,
            forecast_years: 16,
            display_history: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory the input files are resolved against
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub years: YearSettings,
    pub inputs: Vec<InputTable>,
    pub templater: TemplaterConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT),
            years: YearSettings::default(),
            inputs: default_inputs(),
            templater: TemplaterConfig::default(),
        }
    }
}

fn default_inputs() -> Vec<InputTable> {
    use TableKind::{Assumption, Historical};
    vec![
        InputTable::new("Assumptions_Macro", "assumptions_macro.csv", Assumption),
        InputTable::new("Assumptions_UK_Reg", "assumptions_uk_reg.csv", Assumption),
        InputTable::new("Assumptions_US_Reg", "assumptions_us_reg.csv", Assumption),
        InputTable::new("Assumptions_NGV", "assumptions_ngv.csv", Assumption),
        InputTable::new("Hist_PL_Segment", "hist_pl_segment.csv", Historical),
        InputTable::new("Hist_BS_Consol", "hist_bs_consol.csv", Historical),
        InputTable::new("Hist_CF_Consol", "hist_cf_consol.csv", Historical),
        InputTable::new("Hist_RAV_RateBase", "hist_rav_ratebase.csv", Historical),
    ]
}

impl ModelConfig {
    /// Load and validate a YAML config file
    pub fn from_file(path: &Path) -> ModelResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> ModelResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> ModelResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn input_path(&self, input: &InputTable) -> PathBuf {
        if input.file.is_absolute() {
            input.file.clone()
        } else {
            self.input_dir.join(&input.file)
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        if self.years.forecast_years == 0 {
            return Err(ModelError::Config(
                "forecast_years must be at least 1".to_string(),
            ));
        }
        if self.years.historical_years == 0 {
            return Err(ModelError::Config(
                "historical_years must be at least 1".to_string(),
            ));
        }
        if self.years.display_history > self.years.historical_years {
            return Err(ModelError::Config(format!(
                "display_history ({}) exceeds historical_years ({})",
                self.years.display_history, self.years.historical_years
            )));
        }
        if self.templater.assumption_base_column == 0 {
            return Err(ModelError::Config(
                "templater.assumption_base_column is one-based and must be at least 1".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for input in &self.inputs {
            if input.sheet.is_empty() || input.sheet.len() > 31 {
                return Err(ModelError::Config(format!(
                    "sheet name '{}' must be 1-31 characters",
                    input.sheet
                )));
            }
            if !seen.insert(input.sheet.as_str()) {
                return Err(ModelError::Config(format!(
                    "sheet '{}' is listed more than once in inputs",
                    input.sheet
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let config = ModelConfig::default();
        assert_eq!(config.inputs.len(), 8);
        assert_eq!(
            config
                .inputs
                .iter()
                .filter(|i| i.kind == TableKind::Assumption)
                .count(),
            4
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(ModelConfig::from_yaml("  \n").unwrap(), ModelConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ModelConfig::from_yaml("years:\n  forecast_years: 5\n").unwrap();
        assert_eq!(config.years.forecast_years, 5);
        assert_eq!(config.years.first_historical_year, 2020);
        assert_eq!(config.inputs.len(), 8);
        assert_eq!(config.templater.assumption_base_column, 3);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ModelConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(ModelConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_zero_forecast() {
        let mut config = ModelConfig::default();
        config.years.forecast_years = 0;
        assert!(matches!(config.validate(), Err(ModelError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_sheet() {
        let mut config = ModelConfig::default();
        let dup = config.inputs[0].clone();
        config.inputs.push(dup);
        assert!(matches!(config.validate(), Err(ModelError::Config(_))));
    }

    #[test]
    fn test_input_path_joins_dir() {
        let config = ModelConfig {
            input_dir: PathBuf::from("data"),
            ..Default::default()
        };
        assert_eq!(
            config.input_path(&config.inputs[0]),
            PathBuf::from("data").join("assumptions_macro.csv")
        );
    }
}
