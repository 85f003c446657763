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

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Flashcard;
use crate::types::difficulty::Difficulty;
use crate::types::timestamp::Timestamp;

/// Bounds on how many cards a session should hold.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(default)]
pub struct SessionLimits {
    pub min_cards: usize,
    pub default_cards: usize,
    pub max_cards: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            min_cards: 5,
            default_cards: 20,
            max_cards: 100,
        }
    }
}

impl SessionLimits {
    pub fn validate(&self) -> Fallible<()> {
        if self.min_cards == 0 {
            return fail("session.min_cards must be at least 1.");
        }
        if !(self.min_cards <= self.default_cards && self.default_cards <= self.max_cards) {
            return fail("session limits must satisfy min_cards <= default_cards <= max_cards.");
        }
        Ok(())
    }
}

/// The cards due at `now`, in their original order.
pub fn select_due(cards: &[Flashcard], now: Timestamp) -> Vec<Flashcard> {
    cards.iter().filter(|card| card.is_due(now)).cloned().collect()
}

/// Orders cards hardest first, then least recently reviewed first. Cards
/// that were never reviewed come first within their difficulty. The sort is
/// stable.
pub fn prioritize(cards: Vec<Flashcard>) -> Vec<Flashcard> {
    let mut cards = cards;
    cards.sort_by(compare_priority);
    cards
}

fn compare_priority(a: &Flashcard, b: &Flashcard) -> Ordering {
    let severity_a = Difficulty::severity(a.difficulty());
    let severity_b = Difficulty::severity(b.difficulty());
    // `None < Some(_)`, so never-reviewed cards sort first.
    severity_b
        .cmp(&severity_a)
        .then_with(|| a.last_reviewed().cmp(&b.last_reviewed()))
}

/// How many cards a session should hold, given how many are due.
pub fn recommended_session_size(cards: &[Flashcard], now: Timestamp, limits: SessionLimits) -> usize {
    let due = cards.iter().filter(|card| card.is_due(now)).count();
    if due <= limits.min_cards {
        limits.min_cards.max(due)
    } else if due >= limits.max_cards {
        limits.max_cards
    } else {
        limits.default_cards.min(due)
    }
}

/// The queue for a study session: due cards in priority order, cut to the
/// recommended size, or to `limit` when one is given.
pub fn build_queue(
    cards: &[Flashcard],
    now: Timestamp,
    limits: SessionLimits,
    limit: Option<usize>,
) -> Vec<Flashcard> {
    let size = match limit {
        Some(limit) => limit,
        None => recommended_session_size(cards, now, limits),
    };
    let mut queue = prioritize(select_due(cards, now));
    queue.truncate(size);
    queue
}
