//! Run configuration for the `seqd` CLI
//!
//! Read from an optional TOML file; command-line flags override it.
//!
//! ```toml
//! trace = false
//! format = "text"       # or "json"
//! show_registers = true
//! strict = false        # exit with failure on any error diagnostic
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// How results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Output buffer followed by a register listing
    #[default]
    Text,
    /// The whole result as JSON
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Log each phase and instruction through `tracing`
    pub trace: bool,
    pub format: OutputFormat,
    /// Print the register listing (text format only)
    pub show_registers: bool,
    /// Treat error diagnostics as a failed run
    pub strict: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            trace: false,
            format: OutputFormat::Text,
            show_registers: true,
            strict: false,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse run config: {}", e))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
        Self::from_toml(&content)
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_show_registers(mut self, show: bool) -> Self {
        self.show_registers = show;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
