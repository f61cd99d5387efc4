//! Solver configuration.
//!
//! Loaded from TOML; every field is optional and command-line flags take
//! precedence over the file.
//!
//! ```
//! use eight_puzzle::config::{ColorChoice, Config};
//! use eight_puzzle::search::DepthFirstMode;
//!
//! let config = Config::from_toml_str(r#"
//!     [search]
//!     node_limit = 200000
//!     depth_first_mode = "strict"
//!
//!     [output]
//!     color = "never"
//! "#).unwrap();
//!
//! assert_eq!(config.search.node_limit, Some(200_000));
//! assert_eq!(config.search.depth_first_mode, DepthFirstMode::Strict);
//! assert_eq!(config.output.color, ColorChoice::Never);
//! assert!(config.output.show_path);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::search::{DepthFirstMode, SearchLimits};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Stop after this many generated successors.
    #[serde(default)]
    pub node_limit: Option<usize>,

    #[serde(default)]
    pub depth_first_mode: DepthFirstMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorChoice,

    /// Print every puzzle on the route, not just the summary.
    #[serde(default = "default_show_path")]
    pub show_path: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorChoice::default(),
            show_path: default_show_path(),
        }
    }
}

fn default_show_path() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorChoice {
    /// Colour only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown color choice '{other}' (expected 'auto', 'always' or 'never')"
            ))),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Replaces the configured node limit when `node_limit` is set,
    /// rejecting the result the same way a file would be rejected.
    pub fn override_node_limit(&mut self, node_limit: Option<usize>) -> Result<()> {
        if node_limit.is_some() {
            self.search.node_limit = node_limit;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.search.node_limit == Some(0) {
            return Err(Error::InvalidConfiguration(
                "search.node_limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            node_limit: self.search.node_limit,
        }
    }
}
