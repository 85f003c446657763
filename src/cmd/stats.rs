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

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Write;

use clap::ValueEnum;

use crate::error::Fallible;
use crate::library::Library;
use crate::stats::Stats;
use crate::types::timestamp::Timestamp;

#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum StatsFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn deck_stats(
    library: &Library,
    deck: &str,
    now: Timestamp,
    format: StatsFormat,
) -> Fallible<String> {
    let stats = library.deck_stats(deck, now)?;
    match format {
        StatsFormat::Text => Ok(render_text(library.deck(deck)?.name(), &stats)),
        StatsFormat::Json => Ok(serde_json::to_string_pretty(&stats)?),
    }
}

fn render_text(name: &str, stats: &Stats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{name}");
    let _ = writeln!(out, "  cards:     {}", stats.total);
    let _ = writeln!(
        out,
        "  mastered:  {} ({:.0}%)",
        stats.mastered, stats.mastery_percentage
    );
    let _ = writeln!(out, "  due:       {}", stats.due);
    let counts = stats.by_difficulty;
    let _ = writeln!(
        out,
        "  ratings:   {} easy, {} medium, {} hard, {} new",
        counts.easy, counts.medium, counts.hard, counts.unrated
    );
    let _ = write!(
        out,
        "  reviews:   {:.1} per card",
        stats.average_review_count
    );
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::Config;
    use crate::helper::at;
    use crate::store::MemoryStore;

    fn sample() -> Fallible<Library> {
        let mut library = Library::with_store(
            PathBuf::from("."),
            Config::default(),
            Box::new(MemoryStore::new()),
        )?;
        library.seed_sample(at(0))?;
        Ok(library)
    }

    #[test]
    fn test_text() -> Fallible<()> {
        let library = sample()?;
        let text = deck_stats(&library, "Cardiologia", at(0), StatsFormat::Text)?;
        assert!(text.starts_with("Cardiologia\n"));
        assert!(text.contains("cards:     3"));
        assert!(text.contains("0 easy, 0 medium, 0 hard, 3 new"));
        Ok(())
    }

    #[test]
    fn test_json() -> Fallible<()> {
        let library = sample()?;
        let json = deck_stats(&library, "Cardiologia", at(0), StatsFormat::Json)?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        assert_eq!(value["total"], 3);
        assert_eq!(value["due"], 3);
        assert_eq!(value["byDifficulty"]["unrated"], 3);
        assert_eq!(value["masteryPercentage"], 0.0);
        Ok(())
    }

    #[test]
    fn test_unknown_deck() -> Fallible<()> {
        let library = sample()?;
        assert!(deck_stats(&library, "Neurologia", at(0), StatsFormat::Json).is_err());
        Ok(())
    }
}
