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

use serde::Serialize;

use crate::types::card::Flashcard;
use crate::types::difficulty::Difficulty;
use crate::types::timestamp::Timestamp;

#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub mastered: usize,
    pub due: usize,
    pub by_difficulty: DifficultyCounts,
    pub average_review_count: f64,
    pub mastery_percentage: f64,
}

#[derive(Serialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    pub unrated: usize,
}

pub fn aggregate(cards: &[Flashcard], now: Timestamp) -> Stats {
    let total = cards.len();
    let mut mastered = 0;
    let mut due = 0;
    let mut reviews = 0;
    let mut by_difficulty = DifficultyCounts::default();
    for card in cards {
        if card.is_mastered() {
            mastered += 1;
        }
        if card.is_due(now) {
            due += 1;
        }
        reviews += card.review_count();
        match card.difficulty() {
            Some(Difficulty::Easy) => by_difficulty.easy += 1,
            Some(Difficulty::Medium) => by_difficulty.medium += 1,
            Some(Difficulty::Hard) => by_difficulty.hard += 1,
            None => by_difficulty.unrated += 1,
        }
    }
    let (average_review_count, mastery_percentage) = if total > 0 {
        (
            reviews as f64 / total as f64,
            mastered as f64 / total as f64 * 100.0,
        )
    } else {
        (0.0, 0.0)
    };
    Stats {
        total,
        mastered,
        due,
        by_difficulty,
        average_review_count,
        mastery_percentage,
    }
}
