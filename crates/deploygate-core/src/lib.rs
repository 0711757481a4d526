//! DeployGate Core - configuration and result publishing
//!
//! This crate owns everything the uploader needs before and after the
//! network round trip: option declaration and resolution (explicit value,
//! environment variable, config file, default), pre-flight validation, and
//! the result-publishing map later build steps read from.

pub mod config;
pub mod context;
pub mod error;

pub use config::{DeployGateOptions, OptionKey, PartialOptions};
pub use context::{LaneContext, OutputKey, ResultPublisher};
pub use error::{ConfigError, Result};
