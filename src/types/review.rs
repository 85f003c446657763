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
use crate::types::id::Id;
use crate::types::timestamp::Timestamp;

/// A rating given during a session.
#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub card_id: Id,
    pub reviewed_at: Timestamp,
    pub rating: Difficulty,
    pub review_count: usize,
    pub next_review: Timestamp,
    pub mastered: bool,
}

impl Review {
    /// Builds the log entry from a card the scheduler just rated.
    pub fn of(card: &Flashcard, rating: Difficulty, reviewed_at: Timestamp) -> Self {
        Self {
            card_id: card.id().clone(),
            reviewed_at,
            rating,
            review_count: card.review_count(),
            next_review: card.next_review().unwrap_or(reviewed_at),
            mastered: card.is_mastered(),
        }
    }
}
