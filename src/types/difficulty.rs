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
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// The rating a user gives a card after recalling it. A card's stored
/// difficulty is the last rating it received.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "facil")]
    Easy,
    #[serde(alias = "medio")]
    Medium,
    #[serde(alias = "dificil")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Higher is more severe. Unrated cards are below every rating.
    pub fn severity(difficulty: Option<Difficulty>) -> u8 {
        match difficulty {
            None => 0,
            Some(Difficulty::Easy) => 1,
            Some(Difficulty::Medium) => 2,
            Some(Difficulty::Hard) => 3,
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "facil" => Ok(Difficulty::Easy),
            "medium" | "medio" => Ok(Difficulty::Medium),
            "hard" | "dificil" => Ok(Difficulty::Hard),
            _ => fail(format!("invalid rating: {s}")),
        }
    }
}
