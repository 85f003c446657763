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

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Flashcard;
use crate::types::id::Id;
use crate::types::id::IdHasher;
use crate::types::timestamp::Timestamp;

/// A named collection of cards (a "study folder"). The card and mastered
/// counts are always computed from the cards, never stored.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(into = "DeckRecord", from = "DeckRecord")]
pub struct Deck {
    id: Id,
    name: String,
    description: String,
    icon: String,
    color: String,
    tags: Vec<String>,
    cards: Vec<Flashcard>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// The stored shape of a deck. The counts are written for readers of the
/// file and ignored when read back.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeckRecord {
    id: Id,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    card_count: usize,
    #[serde(default)]
    mastered_count: usize,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    cards: Vec<Flashcard>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl From<Deck> for DeckRecord {
    fn from(deck: Deck) -> Self {
        let card_count = deck.card_count();
        let mastered_count = deck.mastered_count();
        DeckRecord {
            id: deck.id,
            name: deck.name,
            description: deck.description,
            icon: deck.icon,
            color: deck.color,
            card_count,
            mastered_count,
            tags: deck.tags,
            cards: deck.cards,
            created_at: deck.created_at,
            updated_at: deck.updated_at,
        }
    }
}

impl From<DeckRecord> for Deck {
    fn from(record: DeckRecord) -> Self {
        Deck {
            id: record.id,
            name: record.name,
            description: record.description,
            icon: record.icon,
            color: record.color,
            tags: record.tags,
            cards: record.cards,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// The user-editable fields of a deck.
#[derive(Clone, Default, Debug)]
pub struct DeckDetails {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub tags: Vec<String>,
}

impl Deck {
    pub fn new(details: DeckDetails, now: Timestamp) -> Self {
        let name = details.name.trim().to_string();
        let id = IdHasher::new("deck").update(&name).finalize(now);
        Self {
            id,
            name,
            description: details.description,
            icon: details.icon,
            color: details.color,
            tags: details.tags,
            cards: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn mastered_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_mastered()).count()
    }

    pub fn card(&self, id: &Id) -> Option<&Flashcard> {
        self.cards.iter().find(|card| card.id() == id)
    }

    pub fn details(&self) -> DeckDetails {
        DeckDetails {
            name: self.name.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            color: self.color.clone(),
            tags: self.tags.clone(),
        }
    }

    pub fn with_details(&self, details: DeckDetails, now: Timestamp) -> Self {
        Self {
            name: details.name.trim().to_string(),
            description: details.description,
            icon: details.icon,
            color: details.color,
            tags: details.tags,
            updated_at: now,
            ..self.clone()
        }
    }

    pub fn with_card(&self, card: Flashcard, now: Timestamp) -> Fallible<Self> {
        if self.card(card.id()).is_some() {
            return fail(format!("card {} already exists in deck '{}'.", card.id(), self.name));
        }
        let mut cards = self.cards.clone();
        cards.push(card);
        Ok(self.with_cards(cards, now))
    }

    pub fn replace_card(&self, card: Flashcard, now: Timestamp) -> Fallible<Self> {
        let Some(index) = self.position(card.id()) else {
            return fail(format!("no card {} in deck '{}'.", card.id(), self.name));
        };
        let mut cards = self.cards.clone();
        cards[index] = card;
        Ok(self.with_cards(cards, now))
    }

    pub fn without_card(&self, id: &Id, now: Timestamp) -> Fallible<Self> {
        if self.position(id).is_none() {
            return fail(format!("no card {id} in deck '{}'.", self.name));
        }
        let cards = self
            .cards
            .iter()
            .filter(|card| card.id() != id)
            .cloned()
            .collect();
        Ok(self.with_cards(cards, now))
    }

    /// Replaces every card whose id matches one of `updated`. Cards that
    /// were deleted from the deck while a session was running are skipped.
    pub fn merge_cards(&self, updated: &[Flashcard], now: Timestamp) -> Self {
        let updated: HashMap<&Id, &Flashcard> =
            updated.iter().map(|card| (card.id(), card)).collect();
        let cards = self
            .cards
            .iter()
            .map(|card| match updated.get(card.id()) {
                Some(new) => (*new).clone(),
                None => card.clone(),
            })
            .collect();
        self.with_cards(cards, now)
    }

    fn position(&self, id: &Id) -> Option<usize> {
        self.cards.iter().position(|card| card.id() == id)
    }

    fn with_cards(&self, cards: Vec<Flashcard>, now: Timestamp) -> Self {
        Self {
            cards,
            updated_at: now,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::at;
    use crate::helper::card;
    use crate::helper::deck;

    #[test]
    fn test_counts_follow_cards() -> Fallible<()> {
        let mut mastered = card("b");
        mastered.mastered = true;
        let d = deck("Cardiologia")
            .with_card(card("a"), at(1))?
            .with_card(mastered, at(2))?;
        assert_eq!(d.card_count(), 2);
        assert_eq!(d.mastered_count(), 1);

        let d = d.without_card(&Id::new("b")?, at(3))?;
        assert_eq!(d.card_count(), 1);
        assert_eq!(d.mastered_count(), 0);
        assert_eq!(d.updated_at(), at(3));
        Ok(())
    }

    #[test]
    fn test_copy_on_write() -> Fallible<()> {
        let original = deck("Neurologia").with_card(card("a"), at(1))?;
        let edited = original.cards()[0].with_content("new front", "back", at(2));
        let updated = original.replace_card(edited, at(2))?;
        assert_eq!(original.cards()[0].front(), "front a");
        assert_eq!(updated.cards()[0].front(), "new front");
        Ok(())
    }

    #[test]
    fn test_duplicate_and_missing_cards() -> Fallible<()> {
        let d = deck("Anatomia").with_card(card("a"), at(1))?;
        assert!(d.with_card(card("a"), at(2)).is_err());
        assert!(d.replace_card(card("z"), at(2)).is_err());
        assert!(d.without_card(&Id::new("z")?, at(2)).is_err());
        Ok(())
    }

    #[test]
    fn test_merge_cards() -> Fallible<()> {
        let d = deck("Farmacologia")
            .with_card(card("a"), at(1))?
            .with_card(card("b"), at(1))?;
        let mut a = card("a");
        a.review_count = 7;
        let ghost = card("ghost");
        let merged = d.merge_cards(&[a, ghost], at(2));
        assert_eq!(merged.card_count(), 2);
        assert_eq!(merged.cards()[0].review_count(), 7);
        assert_eq!(merged.cards()[1].review_count(), 0);
        Ok(())
    }

    #[test]
    fn test_stored_counts_are_recomputed() -> Fallible<()> {
        let json = r#"{
            "id": "cardiologia",
            "name": "Cardiologia",
            "cardCount": 99,
            "masteredCount": 42,
            "cards": [],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let d: Deck = serde_json::from_str(json)?;
        assert_eq!(d.card_count(), 0);
        assert_eq!(d.mastered_count(), 0);

        let written = serde_json::to_value(&d)?;
        assert_eq!(written["cardCount"], 0);
        assert_eq!(written["masteredCount"], 0);
        Ok(())
    }
}
