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

use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::intervals::IntervalTable;
use crate::types::card::Flashcard;
use crate::types::difficulty::Difficulty;
use crate::types::timestamp::Timestamp;

/// Computes a card's next review from the rating it was just given.
#[derive(Clone, Debug)]
pub struct Scheduler {
    intervals: IntervalTable,
    mastery_threshold: usize,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            intervals: IntervalTable::default(),
            mastery_threshold: 3,
        }
    }
}

impl Scheduler {
    pub fn new(intervals: IntervalTable, mastery_threshold: usize) -> Fallible<Self> {
        intervals.validate()?;
        if mastery_threshold == 0 {
            return fail("mastery_threshold must be at least 1.");
        }
        Ok(Self {
            intervals,
            mastery_threshold,
        })
    }

    pub fn from_config(config: &Config) -> Fallible<Self> {
        Self::new(config.intervals.clone(), config.mastery_threshold)
    }

    /// The card's next review date if it were rated `rating` at `now`. The
    /// interval is picked using the card's review count before the rating.
    pub fn next_review_date(&self, card: &Flashcard, rating: Difficulty, now: Timestamp) -> Timestamp {
        let days = self.intervals.interval_days(rating, card.review_count());
        now.plus_days(days)
    }

    /// Returns the card as it is after being rated `rating` at `now`. The
    /// input card is left untouched.
    ///
    /// Mastery counts reviews, not a streak of easy ratings, and once a card
    /// is mastered it stays mastered.
    pub fn apply_rating(&self, card: &Flashcard, rating: Difficulty, now: Timestamp) -> Flashcard {
        let next_review = self.next_review_date(card, rating, now);
        let review_count = card.review_count() + 1;
        let earned = rating == Difficulty::Easy && review_count >= self.mastery_threshold;
        Flashcard {
            difficulty: Some(rating),
            review_count,
            last_reviewed: Some(now),
            next_review: Some(next_review),
            mastered: card.is_mastered() || earned,
            updated_at: now,
            ..card.clone()
        }
    }
}
