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

use crate::types::timestamp::Timestamp;

/// The report produced when a study session ends.
#[derive(Serialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionPerformance {
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
    /// Number of cards in the session queue.
    pub total_cards: usize,
    /// Number of distinct cards rated at least once.
    pub cards_studied: usize,
    /// Number of easy ratings.
    pub correct_answers: usize,
    pub duration_ms: u64,
    pub average_time_ms: f64,
    /// Percentage of the queue answered correctly, between 0 and 100.
    pub accuracy: f64,
}

impl SessionPerformance {
    pub fn compute(
        started_at: Timestamp,
        ended_at: Timestamp,
        total_cards: usize,
        cards_studied: usize,
        correct_answers: usize,
    ) -> Self {
        let duration_ms = ended_at.millis_since(started_at);
        let (average_time_ms, accuracy) = if total_cards > 0 {
            let total = total_cards as f64;
            let accuracy = (correct_answers as f64 / total * 100.0).min(100.0);
            (duration_ms as f64 / total, accuracy)
        } else {
            (0.0, 0.0)
        };
        Self {
            started_at,
            ended_at,
            total_cards,
            cards_studied,
            correct_answers,
            duration_ms,
            average_time_ms,
            accuracy,
        }
    }
}
