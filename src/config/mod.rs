//! Configuration loading and management for the Time Calculation Engine.
//!
//! This module provides functionality to load tariff configurations from
//! YAML files, including tariff metadata, day plans and monthly evaluation
//! rule sets. Loaded configuration is a plain value the caller threads
//! through calculation calls.
//!
//! # Example
//!
//! ```no_run
//! use timecalc_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Loaded tariff: {}", config.tariff().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DayPlanConfig, DayPlansConfig, EvaluationConfig, TariffConfig, TariffMetadata};
