use serde::Deserialize;
use std::{fs, path::Path};

use crate::parser::ParserOptions;

/// Runtime configuration, loaded from a TOML file.
///
/// Every field has a default, and a missing file yields the defaults
/// outright, so the tool runs with zero setup.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserSection,
}

#[derive(Debug, Deserialize)]
pub struct ParserSection {
    #[serde(default = "default_lookahead_lines")]
    pub lookahead_lines: usize,
    #[serde(default = "default_total_cutoff")]
    pub total_cutoff: u32,
}

fn default_lookahead_lines() -> usize {
    5
}

fn default_total_cutoff() -> u32 {
    20
}

impl Default for ParserSection {
    fn default() -> Self {
        Self {
            lookahead_lines: default_lookahead_lines(),
            total_cutoff: default_total_cutoff(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            lookahead_lines: self.parser.lookahead_lines,
            total_cutoff: self.parser.total_cutoff,
        }
    }
}
