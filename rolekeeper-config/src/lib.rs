//! Configuration library for Rolekeeper.
//!
//! Loads the console configuration (store policy, permission universe, seed
//! data and logging), applies guard rails before anything is built, and
//! installs the tracing subscriber. Hosts embedding the console call
//! [`RolekeeperConfig::load`] once at startup and then
//! [`RolekeeperConfig::build_dashboard`].

#![allow(missing_docs)]

pub mod logging;
pub mod models;
pub mod validation;

pub use logging::init_tracing;
pub use models::logging::LoggingConfig;
pub use models::seed::SeedConfig;
pub use models::{ConfigFormat, ConfigLoad, ConfigSource, RolekeeperConfig};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
