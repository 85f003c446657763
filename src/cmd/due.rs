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

use std::fmt::Write;

use crate::error::Fallible;
use crate::library::Library;
use crate::selector::prioritize;
use crate::selector::recommended_session_size;
use crate::selector::select_due;
use crate::types::timestamp::Timestamp;

/// Lists the due cards of a deck in the order a session would show them.
pub fn list_due(library: &Library, deck: &str, now: Timestamp) -> Fallible<String> {
    let deck = library.deck(deck)?;
    let due = prioritize(select_due(deck.cards(), now));
    let size = recommended_session_size(deck.cards(), now, library.config().session);
    let mut out = String::new();
    let _ = write!(
        out,
        "{} cards due in '{}' (recommended session: {size}).",
        due.len(),
        deck.name()
    );
    for card in &due {
        let rating = card.difficulty().map(|d| d.as_str()).unwrap_or("new");
        let last = card
            .last_reviewed()
            .map(|ts| ts.to_string())
            .unwrap_or_else(|| "never".to_string());
        let _ = write!(
            out,
            "\n{:<8}  {:<6}  {:<16}  {}",
            card.id().short(),
            rating,
            last,
            card.front()
        );
    }
    Ok(out)
}
