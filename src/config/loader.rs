//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tariff
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{DayPlan, MonthlyEvaluationRules};

use super::types::{DayPlansConfig, EvaluationConfig, TariffConfig, TariffMetadata};

/// Loads and provides access to tariff configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides methods to query day plans and monthly evaluation rules. It is
/// a convenience for callers and tests; the calculation engine itself never
/// touches the filesystem.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/standard/
/// ├── tariff.yaml       # Tariff metadata
/// ├── day_plans.yaml    # Day plans with tolerance, rounding and break rules
/// └── evaluation.yaml   # Monthly evaluation rule sets
/// ```
///
/// # Example
///
/// ```no_run
/// use timecalc_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard").unwrap();
///
/// let plan = loader.get_day_plan("fulltime_flex").unwrap();
/// println!("Target minutes: {}", plan.target_minutes);
///
/// let rules = loader.get_evaluation_rules("flex_standard").unwrap();
/// println!("Credit type: {:?}", rules.credit_type);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TariffConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Every loaded day plan is validated against the break-rule
    /// invariants, so a successfully loaded configuration is safe to hand
    /// to the calculators.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g. "./config/standard")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any day plan carries an invalid break rule
    ///
    /// # Example
    ///
    /// ```no_run
    /// use timecalc_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/standard")?;
    /// # Ok::<(), timecalc_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        // Load tariff.yaml
        let tariff_path = path.join("tariff.yaml");
        let metadata = Self::load_yaml::<TariffMetadata>(&tariff_path)?;

        // Load day_plans.yaml
        let day_plans_path = path.join("day_plans.yaml");
        let day_plans_config = Self::load_yaml::<DayPlansConfig>(&day_plans_path)?;

        // Load evaluation.yaml
        let evaluation_path = path.join("evaluation.yaml");
        let evaluation_config = Self::load_yaml::<EvaluationConfig>(&evaluation_path)?;

        for plan_config in day_plans_config.day_plans.values() {
            plan_config.plan.validate()?;
        }

        let config = TariffConfig::new(
            metadata,
            day_plans_config.day_plans,
            evaluation_config.evaluation_rules,
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying tariff configuration.
    pub fn config(&self) -> &TariffConfig {
        &self.config
    }

    /// Returns the tariff metadata.
    pub fn tariff(&self) -> &TariffMetadata {
        self.config.tariff()
    }

    /// Gets a day plan by its code.
    ///
    /// # Arguments
    ///
    /// * `code` - The day plan code (e.g. "fulltime_flex")
    ///
    /// # Returns
    ///
    /// Returns the plan if found, or `DayPlanNotFound` error.
    pub fn get_day_plan(&self, code: &str) -> EngineResult<&DayPlan> {
        self.config
            .day_plans()
            .get(code)
            .map(|c| &c.plan)
            .ok_or_else(|| EngineError::DayPlanNotFound {
                code: code.to_string(),
            })
    }

    /// Gets a monthly evaluation rule set by its code.
    ///
    /// # Arguments
    ///
    /// * `code` - The evaluation rules code (e.g. "flex_standard")
    ///
    /// # Returns
    ///
    /// Returns the rules if found, or `EvaluationRulesNotFound` error.
    pub fn get_evaluation_rules(&self, code: &str) -> EngineResult<&MonthlyEvaluationRules> {
        self.config
            .evaluation_rules()
            .get(code)
            .ok_or_else(|| EngineError::EvaluationRulesNotFound {
                code: code.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BreakRuleKind, CreditType, NoBookingPolicy, RoundingMode};

    fn config_path() -> &'static str {
        "./config/standard"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.tariff().code, "STANDARD");
        assert_eq!(loader.tariff().name, "Standard flextime tariff");
    }

    #[test]
    fn test_get_fulltime_flex_day_plan() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let plan = loader.get_day_plan("fulltime_flex").unwrap();
        assert_eq!(plan.target_minutes, 480);
        assert!(plan.is_work_day());

        let tolerance = plan.come_tolerance.unwrap();
        assert_eq!(tolerance.scheduled, 480);
        assert_eq!(tolerance.early_grace, 30);

        let rounding = plan.go_rounding.unwrap();
        assert_eq!(rounding.increment, 5);
        assert_eq!(rounding.mode, RoundingMode::Down);

        assert_eq!(plan.break_rules.len(), 2);
        assert_eq!(plan.break_rules[0].kind, BreakRuleKind::FixedWindow);
        assert_eq!(plan.break_rules[1].kind, BreakRuleKind::MinimumThreshold);
        assert_eq!(plan.no_booking_policy, NoBookingPolicy::Error);
    }

    #[test]
    fn test_get_off_day_plan() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let plan = loader.get_day_plan("weekend_off").unwrap();
        assert_eq!(plan.target_minutes, 0);
        assert!(!plan.is_work_day());
        assert_eq!(plan.no_booking_policy, NoBookingPolicy::Ignore);
    }

    #[test]
    fn test_get_day_plan_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let result = loader.get_day_plan("unknown");
        assert!(result.is_err());

        match result {
            Err(EngineError::DayPlanNotFound { code }) => {
                assert_eq!(code, "unknown");
            }
            _ => panic!("Expected DayPlanNotFound error"),
        }
    }

    #[test]
    fn test_get_evaluation_rules() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let rules = loader.get_evaluation_rules("flex_standard").unwrap();
        assert_eq!(rules.credit_type, CreditType::CompleteCarryover);
        assert_eq!(rules.monthly_cap, Some(1200));
        assert_eq!(rules.upper_annual_cap, Some(6000));
        assert_eq!(rules.lower_annual_cap, Some(-1200));
    }

    #[test]
    fn test_get_no_flex_evaluation_rules() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let rules = loader.get_evaluation_rules("no_flex").unwrap();
        assert_eq!(rules.credit_type, CreditType::NoCarryover);
        assert_eq!(rules.monthly_cap, None);
    }

    #[test]
    fn test_get_evaluation_rules_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let result = loader.get_evaluation_rules("unknown");
        match result {
            Err(EngineError::EvaluationRulesNotFound { code }) => {
                assert_eq!(code, "unknown");
            }
            _ => panic!("Expected EvaluationRulesNotFound error"),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("tariff.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_tariff_metadata_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.tariff().code, "STANDARD");
        assert_eq!(loader.tariff().name, "Standard flextime tariff");
        assert_eq!(loader.tariff().version, "2025-01-01");
    }
}
