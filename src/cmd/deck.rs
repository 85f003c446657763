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
use crate::types::attachment::Attachment;
use crate::types::attachment::Face;
use crate::types::attachment::Geometry;
use crate::types::attachment::VideoProvider;
use crate::types::deck::DeckDetails;
use crate::types::timestamp::Timestamp;

/// Changes to a deck's details. Absent fields are kept.
#[derive(Default)]
pub struct DeckEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub tags: Option<Vec<String>>,
}

pub fn list_decks(library: &Library, now: Timestamp) -> String {
    if library.decks().is_empty() {
        return "No decks.".to_string();
    }
    let mut out = String::new();
    let _ = write!(out, "{:<8}  {:>5}  {:>8}  {:>5}  name", "id", "cards", "mastered", "due");
    for deck in library.decks() {
        let due = deck.cards().iter().filter(|card| card.is_due(now)).count();
        let _ = write!(
            out,
            "\n{:<8}  {:>5}  {:>8}  {:>5}  {}",
            deck.id().short(),
            deck.card_count(),
            deck.mastered_count(),
            due,
            deck.name()
        );
    }
    out
}

pub fn create_deck(library: &mut Library, details: DeckDetails, now: Timestamp) -> Fallible<String> {
    let deck = library.create_deck(details, now)?;
    Ok(format!("Created deck '{}' ({}).", deck.name(), deck.id().short()))
}

pub fn edit_deck(library: &mut Library, deck: &str, edit: DeckEdit, now: Timestamp) -> Fallible<String> {
    let current = library.deck(deck)?.details();
    let details = DeckDetails {
        name: edit.name.unwrap_or(current.name),
        description: edit.description.unwrap_or(current.description),
        icon: edit.icon.unwrap_or(current.icon),
        color: edit.color.unwrap_or(current.color),
        tags: edit.tags.unwrap_or(current.tags),
    };
    let name = details.name.trim().to_string();
    library.update_deck(deck, details, now)?;
    Ok(format!("Updated deck '{name}'."))
}

pub fn delete_deck(library: &mut Library, deck: &str) -> Fallible<String> {
    let deleted = library.delete_deck(deck)?;
    Ok(format!(
        "Deleted deck '{}' and its {} cards.",
        deleted.name(),
        deleted.card_count()
    ))
}

pub fn add_card(
    library: &mut Library,
    deck: &str,
    front: &str,
    back: &str,
    tags: Vec<String>,
    now: Timestamp,
) -> Fallible<String> {
    let id = library.add_card(deck, front, back, tags, now)?;
    Ok(format!("Added card {}.", id.short()))
}

/// Replaces the content of a card. Absent fields are kept.
pub fn edit_card(
    library: &mut Library,
    deck: &str,
    card: &str,
    front: Option<String>,
    back: Option<String>,
    tags: Option<Vec<String>>,
    now: Timestamp,
) -> Fallible<String> {
    let current = library.card(deck, card)?.clone();
    let front = front.unwrap_or_else(|| current.front().to_string());
    let back = back.unwrap_or_else(|| current.back().to_string());
    let tags = tags.unwrap_or_else(|| current.tags().to_vec());
    library.update_card(deck, card, &front, &back, tags, now)?;
    Ok("Updated card.".to_string())
}

pub fn remove_card(library: &mut Library, deck: &str, card: &str, now: Timestamp) -> Fallible<String> {
    library.remove_card(deck, card, now)?;
    Ok("Removed card.".to_string())
}

pub fn attach_video(
    library: &mut Library,
    deck: &str,
    card: &str,
    provider: VideoProvider,
    url: &str,
    title: Option<String>,
    now: Timestamp,
) -> Fallible<String> {
    let attachment = Attachment::video(provider, url, title)?;
    library.attach(deck, card, attachment, now)?;
    Ok("Attached video.".to_string())
}

pub fn attach_image(
    library: &mut Library,
    deck: &str,
    card: &str,
    face: Face,
    geometry: Geometry,
    src: &str,
    now: Timestamp,
) -> Fallible<String> {
    let attachment = Attachment::image(face, geometry, src)?;
    library.attach(deck, card, attachment, now)?;
    Ok("Attached image.".to_string())
}
