//! Rule set configuration for the Settlement Engine.
//!
//! Legislative parameters (minimum wage history, withholding brackets,
//! notice rules, fund rates) are data, not code. A built-in 2025 rule set is
//! available through [`RuleSet::default`], and other versions can be loaded
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use settlement_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/clt-2025").unwrap();
//! println!("Loaded rule set: {}", loader.rules().metadata().name);
//! ```

mod builtin;
mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    FundRates, MinimumWageConfig, MinimumWageRecord, MinimumWageTable, NoticeRules, RuleSet,
    RuleSetConfig, RuleSetMetadata, WithholdingBracket, WithholdingConfig, WithholdingTable,
};
