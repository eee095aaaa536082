use serde::{Deserialize, Serialize};

/// Log output settings. `RUST_LOG` wins over `filter` when set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is absent, e.g.
    /// `"info"` or `"rolekeeper_core=debug"`.
    pub filter: String,
    /// Colorize formatted output.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            ansi: true,
        }
    }
}
