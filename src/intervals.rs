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

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::difficulty::Difficulty;

/// The longest interval a table may hold, about a century.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Days until the next review, indexed by how many times the card has been
/// reviewed. One row per rating.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(default)]
pub struct IntervalTable {
    pub easy: Vec<u32>,
    pub medium: Vec<u32>,
    pub hard: Vec<u32>,
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            easy: vec![1, 3, 7, 14, 30],
            medium: vec![1, 2, 5, 10, 21],
            hard: vec![1, 1, 3, 7, 14],
        }
    }
}

impl IntervalTable {
    pub fn row(&self, rating: Difficulty) -> &[u32] {
        match rating {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// The interval for a card rated `rating` after `review_count` previous
    /// reviews. Counts past the end of the row reuse the last entry.
    pub fn interval_days(&self, rating: Difficulty, review_count: usize) -> u32 {
        let row = self.row(rating);
        let index = review_count.min(row.len() - 1);
        row[index]
    }

    pub fn validate(&self) -> Fallible<()> {
        for rating in Difficulty::ALL {
            let row = self.row(rating);
            if row.is_empty() {
                return fail(format!("interval row '{rating}' must not be empty."));
            }
            if row.contains(&0) {
                return fail(format!(
                    "interval row '{rating}' must only contain positive day counts."
                ));
            }
            if row.iter().any(|days| *days > MAX_INTERVAL_DAYS) {
                return fail(format!(
                    "interval row '{rating}' must not exceed {MAX_INTERVAL_DAYS} days."
                ));
            }
        }
        Ok(())
    }
}
