//! Configuration types for tariff and day-plan settings.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{DayPlan, MonthlyEvaluationRules};

/// Metadata about a tariff configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TariffMetadata {
    /// The tariff code (e.g. "STANDARD").
    pub code: String,
    /// The human-readable name of the tariff.
    pub name: String,
    /// The version or effective date of the tariff.
    pub version: String,
}

/// A named day plan within the tariff.
///
/// Wraps the engine-level [`DayPlan`] with identifying information.
#[derive(Debug, Clone, Deserialize)]
pub struct DayPlanConfig {
    /// The human-readable name of the day plan.
    pub name: String,
    /// A description of when the plan applies.
    pub description: String,
    /// The plan settings handed to the calculators.
    pub plan: DayPlan,
}

/// Day plans configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DayPlansConfig {
    /// Map of day plan code to plan details.
    pub day_plans: HashMap<String, DayPlanConfig>,
}

/// Evaluation rules configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    /// Map of evaluation rules code to rules.
    pub evaluation_rules: HashMap<String, MonthlyEvaluationRules>,
}

/// The complete tariff configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various YAML
/// files in a tariff configuration directory. It is a plain value threaded
/// through calls by the caller; the engine keeps no process-wide defaults.
#[derive(Debug, Clone)]
pub struct TariffConfig {
    /// Tariff metadata.
    metadata: TariffMetadata,
    /// Day plans available under this tariff.
    day_plans: HashMap<String, DayPlanConfig>,
    /// Monthly evaluation rule sets available under this tariff.
    evaluation_rules: HashMap<String, MonthlyEvaluationRules>,
}

impl TariffConfig {
    /// Creates a new TariffConfig from its component parts.
    pub fn new(
        metadata: TariffMetadata,
        day_plans: HashMap<String, DayPlanConfig>,
        evaluation_rules: HashMap<String, MonthlyEvaluationRules>,
    ) -> Self {
        Self {
            metadata,
            day_plans,
            evaluation_rules,
        }
    }

    /// Returns the tariff metadata.
    pub fn tariff(&self) -> &TariffMetadata {
        &self.metadata
    }

    /// Returns all day plans.
    pub fn day_plans(&self) -> &HashMap<String, DayPlanConfig> {
        &self.day_plans
    }

    /// Returns all evaluation rule sets.
    pub fn evaluation_rules(&self) -> &HashMap<String, MonthlyEvaluationRules> {
        &self.evaluation_rules
    }
}
