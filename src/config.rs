// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::fs::write;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::intervals::IntervalTable;
use crate::selector::SessionLimits;

pub const CONFIG_FILE_NAME: &str = "medflashcard.toml";

/// Library settings, read from `medflashcard.toml` in the library directory.
/// Every field is optional and defaults to the reference values.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(default)]
pub struct Config {
    /// Number of reviews after which an easy rating marks a card mastered.
    pub mastery_threshold: usize,
    pub intervals: IntervalTable,
    pub session: SessionLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mastery_threshold: 3,
            intervals: IntervalTable::default(),
            session: SessionLimits::default(),
        }
    }
}

impl Config {
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No config file, using defaults.");
            return Ok(Self::default());
        }
        log::debug!("Loading config from {}", path.display());
        let content = read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Fallible<()> {
        if self.mastery_threshold == 0 {
            return fail("mastery_threshold must be at least 1.");
        }
        self.intervals.validate()?;
        self.session.validate()
    }

    /// Writes the default config, unless a config file already exists.
    pub fn write_default(directory: &Path) -> Fallible<bool> {
        let path = directory.join(CONFIG_FILE_NAME);
        if path.exists() {
            return Ok(false);
        }
        let content = toml::to_string_pretty(&Self::default())?;
        write(&path, content)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() -> Fallible<()> {
        let dir = tempdir()?;
        assert_eq!(Config::load(dir.path())?, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_config() -> Fallible<()> {
        let config = Config::parse(
            "mastery_threshold = 5\n[intervals]\nhard = [1, 2]\n[session]\nmax_cards = 50\n",
        )?;
        assert_eq!(config.mastery_threshold, 5);
        assert_eq!(config.intervals.hard, vec![1, 2]);
        assert_eq!(config.intervals.easy, vec![1, 3, 7, 14, 30]);
        assert_eq!(config.session.max_cards, 50);
        assert_eq!(config.session.default_cards, 20);
        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::parse("mastery_threshold = 0").is_err());
        assert!(Config::parse("[intervals]\neasy = []").is_err());
        assert!(Config::parse("[session]\nmin_cards = 30").is_err());
        assert!(Config::parse("mastery_threshold = \"three\"").is_err());
    }

    #[test]
    fn test_rejects_out_of_range_interval() {
        let err = Config::parse("[intervals]\neasy = [4000000000]\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "error: interval row 'easy' must not exceed 36500 days."
        );
    }

    #[test]
    fn test_write_default_round_trips() -> Fallible<()> {
        let dir = tempdir()?;
        assert!(Config::write_default(dir.path())?);
        assert!(!Config::write_default(dir.path())?);
        assert_eq!(Config::load(dir.path())?, Config::default());
        Ok(())
    }
}
