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

//! Fixtures shared by the unit tests.

use chrono::TimeDelta;
use chrono::TimeZone;
use chrono::Utc;
use tempfile::TempDir;
use tempfile::tempdir;

use crate::error::Fallible;
use crate::types::card::Flashcard;
use crate::types::deck::Deck;
use crate::types::deck::DeckDetails;
use crate::types::difficulty::Difficulty;
use crate::types::id::Id;
use crate::types::timestamp::Timestamp;

/// Noon UTC on 2025-01-01, offset by the given number of hours.
pub fn at(hours: i64) -> Timestamp {
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    Timestamp::new(base + TimeDelta::hours(hours))
}

/// An unrated card with a fixed id.
pub fn card(id: &str) -> Flashcard {
    Flashcard {
        id: Id::new(id).unwrap(),
        front: format!("front {id}"),
        back: format!("back {id}"),
        difficulty: None,
        mastered: false,
        review_count: 0,
        last_reviewed: None,
        next_review: None,
        tags: Vec::new(),
        attachments: Vec::new(),
        created_at: at(0),
        updated_at: at(0),
    }
}

/// Unrated cards `card-0` to `card-{n-1}`.
pub fn cards(n: usize) -> Vec<Flashcard> {
    (0..n).map(|i| card(&format!("card-{i}"))).collect()
}

/// A card reviewed once, with the given rating and review times in hours.
pub fn reviewed(id: &str, difficulty: Difficulty, last_reviewed: i64, next_review: i64) -> Flashcard {
    Flashcard {
        difficulty: Some(difficulty),
        review_count: 1,
        last_reviewed: Some(at(last_reviewed)),
        next_review: Some(at(next_review)),
        ..card(id)
    }
}

/// An empty deck created at `at(0)`.
pub fn deck(name: &str) -> Deck {
    Deck::new(
        DeckDetails {
            name: name.to_string(),
            ..DeckDetails::default()
        },
        at(0),
    )
}

/// An empty library directory, removed when dropped.
pub fn create_tmp_library() -> Fallible<TempDir> {
    Ok(tempdir()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at() {
        assert_eq!(at(0).to_rfc3339(), "2025-01-01T12:00:00+00:00");
        assert_eq!(at(1).millis_since(at(0)), 3_600_000);
    }

    #[test]
    fn test_create_tmp_library() -> Fallible<()> {
        let dir = create_tmp_library()?;
        assert!(dir.path().exists());
        Ok(())
    }
}
