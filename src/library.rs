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

use std::env::current_dir;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::scheduler::Scheduler;
use crate::selector::build_queue;
use crate::stats::Stats;
use crate::stats::aggregate;
use crate::store::DeckStore;
use crate::store::DirectoryStore;
use crate::types::attachment::Attachment;
use crate::types::card::Flashcard;
use crate::types::deck::Deck;
use crate::types::deck::DeckDetails;
use crate::types::id::Id;
use crate::types::timestamp::Timestamp;

const MAX_NAME_LENGTH: usize = 50;
const MAX_FACE_LENGTH: usize = 1000;
const MAX_TAGS: usize = 10;

/// A directory of decks plus its settings. Every mutation is written through
/// the store before the in-memory copy is updated.
pub struct Library {
    directory: PathBuf,
    config: Config,
    scheduler: Scheduler,
    store: Box<dyn DeckStore>,
    decks: Vec<Deck>,
}

impl Library {
    pub fn open(directory: Option<String>) -> Fallible<Self> {
        let directory = resolve_directory(directory)?;
        Self::open_at(directory)
    }

    pub fn open_at(directory: PathBuf) -> Fallible<Self> {
        let config = Config::load(&directory)?;
        let store = DirectoryStore::new(directory.clone());
        Self::with_store(directory, config, Box::new(store))
    }

    pub fn with_store(
        directory: PathBuf,
        config: Config,
        store: Box<dyn DeckStore>,
    ) -> Fallible<Self> {
        let scheduler = Scheduler::from_config(&config)?;
        let decks = {
            log::debug!("Loading decks...");
            let start = Instant::now();
            let decks = store.load_decks()?;
            let duration = start.elapsed().as_millis();
            log::debug!("{} decks loaded in {duration}ms.", decks.len());
            decks
        };
        Ok(Self {
            directory,
            config,
            scheduler,
            store,
            decks,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    /// Finds a deck by full id, exact name, or unique id prefix.
    pub fn deck(&self, key: &str) -> Fallible<&Deck> {
        let index = self.deck_index(key)?;
        Ok(&self.decks[index])
    }

    /// Finds a card in a deck by full id or unique id prefix.
    pub fn card(&self, key: &str, card_key: &str) -> Fallible<&Flashcard> {
        find_card(self.deck(key)?, card_key)
    }

    pub fn create_deck(&mut self, details: DeckDetails, now: Timestamp) -> Fallible<&Deck> {
        validate_details(&details)?;
        self.check_name_free(&details.name, None)?;
        let deck = Deck::new(details, now);
        log::debug!("Creating deck {} ({})", deck.name(), deck.id().short());
        self.store.save_deck(&deck)?;
        self.decks.push(deck);
        let last = self.decks.len() - 1;
        Ok(&self.decks[last])
    }

    pub fn update_deck(&mut self, key: &str, details: DeckDetails, now: Timestamp) -> Fallible<()> {
        validate_details(&details)?;
        let index = self.deck_index(key)?;
        let id = self.decks[index].id().clone();
        self.check_name_free(&details.name, Some(&id))?;
        let deck = self.decks[index].with_details(details, now);
        self.put(index, deck)
    }

    pub fn delete_deck(&mut self, key: &str) -> Fallible<Deck> {
        let index = self.deck_index(key)?;
        let id = self.decks[index].id().clone();
        if !self.store.delete_deck(&id)? {
            log::debug!("Deck {} had not been saved.", id.short());
        }
        Ok(self.decks.remove(index))
    }

    pub fn add_card(
        &mut self,
        key: &str,
        front: &str,
        back: &str,
        tags: Vec<String>,
        now: Timestamp,
    ) -> Fallible<Id> {
        validate_card(front, back, &tags)?;
        let index = self.deck_index(key)?;
        let card = Flashcard::new(self.decks[index].id(), front, back, tags, now);
        let id = card.id().clone();
        let deck = self.decks[index].with_card(card, now)?;
        self.put(index, deck)?;
        Ok(id)
    }

    pub fn update_card(
        &mut self,
        key: &str,
        card_key: &str,
        front: &str,
        back: &str,
        tags: Vec<String>,
        now: Timestamp,
    ) -> Fallible<()> {
        validate_card(front, back, &tags)?;
        let index = self.deck_index(key)?;
        let card = find_card(&self.decks[index], card_key)?
            .with_content(front, back, now)
            .with_tags(tags, now);
        let deck = self.decks[index].replace_card(card, now)?;
        self.put(index, deck)
    }

    pub fn remove_card(&mut self, key: &str, card_key: &str, now: Timestamp) -> Fallible<()> {
        let index = self.deck_index(key)?;
        let id = find_card(&self.decks[index], card_key)?.id().clone();
        let deck = self.decks[index].without_card(&id, now)?;
        self.put(index, deck)
    }

    pub fn attach(
        &mut self,
        key: &str,
        card_key: &str,
        attachment: Attachment,
        now: Timestamp,
    ) -> Fallible<()> {
        let index = self.deck_index(key)?;
        let card = find_card(&self.decks[index], card_key)?.with_attachment(attachment, now);
        let deck = self.decks[index].replace_card(card, now)?;
        self.put(index, deck)
    }

    pub fn deck_stats(&self, key: &str, now: Timestamp) -> Fallible<Stats> {
        Ok(aggregate(self.deck(key)?.cards(), now))
    }

    /// The queue for a study session over the given deck.
    pub fn queue(&self, key: &str, now: Timestamp, limit: Option<usize>) -> Fallible<Vec<Flashcard>> {
        let deck = self.deck(key)?;
        Ok(build_queue(deck.cards(), now, self.config.session, limit))
    }

    /// Writes the working copy of a finished session back to its deck.
    pub fn commit_session(&mut self, key: &str, cards: &[Flashcard], now: Timestamp) -> Fallible<()> {
        let index = self.deck_index(key)?;
        log::debug!(
            "Committing {} cards to {}",
            cards.len(),
            self.decks[index].id().short()
        );
        let deck = self.decks[index].merge_cards(cards, now);
        self.put(index, deck)
    }

    /// Adds a small cardiology deck, for a freshly initialized library.
    pub fn seed_sample(&mut self, now: Timestamp) -> Fallible<Id> {
        let details = DeckDetails {
            name: "Cardiologia".to_string(),
            description: "Exemplo: conceitos básicos de cardiologia.".to_string(),
            icon: "heart".to_string(),
            color: "#e53e3e".to_string(),
            tags: vec!["exemplo".to_string()],
        };
        let id = self.create_deck(details, now)?.id().clone();
        let samples = [
            (
                "Qual é o marcapasso fisiológico do coração?",
                "O nó sinoatrial.",
            ),
            (
                "Qual a frequência cardíaca normal em repouso de um adulto?",
                "Entre 60 e 100 batimentos por minuto.",
            ),
            (
                "Qual valva separa o átrio esquerdo do ventrículo esquerdo?",
                "A valva mitral.",
            ),
        ];
        for (front, back) in samples {
            self.add_card(id.as_str(), front, back, vec!["cardiologia".to_string()], now)?;
        }
        Ok(id)
    }

    fn deck_index(&self, key: &str) -> Fallible<usize> {
        let key = key.trim();
        if key.is_empty() {
            return fail("deck name or id must not be empty.");
        }
        if let Some(index) = self
            .decks
            .iter()
            .position(|deck| deck.id().as_str() == key || deck.name() == key)
        {
            return Ok(index);
        }
        let matches: Vec<usize> = self
            .decks
            .iter()
            .enumerate()
            .filter(|(_, deck)| deck.id().as_str().starts_with(key))
            .map(|(index, _)| index)
            .collect();
        match matches.as_slice() {
            [index] => Ok(*index),
            [] => fail(format!("no deck matches '{key}'.")),
            _ => fail(format!("'{key}' matches more than one deck.")),
        }
    }

    fn check_name_free(&self, name: &str, except: Option<&Id>) -> Fallible<()> {
        let name = name.trim();
        let folded = name.to_lowercase();
        let taken = self.decks.iter().any(|deck| {
            deck.name().trim().to_lowercase() == folded && Some(deck.id()) != except
        });
        if taken {
            return fail(format!("a deck named '{name}' already exists."));
        }
        Ok(())
    }

    fn put(&mut self, index: usize, deck: Deck) -> Fallible<()> {
        self.store.save_deck(&deck)?;
        self.decks[index] = deck;
        Ok(())
    }
}

fn resolve_directory(directory: Option<String>) -> Fallible<PathBuf> {
    let directory: PathBuf = match directory {
        Some(dir) => PathBuf::from(dir),
        None => current_dir()?,
    };
    if directory.exists() {
        Ok(directory.canonicalize()?)
    } else {
        fail("directory does not exist.")
    }
}

/// Finds a card by full id or unique id prefix.
fn find_card<'d>(deck: &'d Deck, key: &str) -> Fallible<&'d Flashcard> {
    let key = key.trim();
    if key.is_empty() {
        return fail("card id must not be empty.");
    }
    if let Some(card) = deck.cards().iter().find(|card| card.id().as_str() == key) {
        return Ok(card);
    }
    let matches: Vec<&Flashcard> = deck
        .cards()
        .iter()
        .filter(|card| card.id().as_str().starts_with(key))
        .collect();
    match matches.as_slice() {
        [card] => Ok(*card),
        [] => fail(format!("no card '{key}' in deck '{}'.", deck.name())),
        _ => fail(format!("'{key}' matches more than one card.")),
    }
}

fn validate_details(details: &DeckDetails) -> Fallible<()> {
    let length = details.name.trim().chars().count();
    if length == 0 {
        return fail("deck name must not be empty.");
    }
    if length > MAX_NAME_LENGTH {
        return fail(format!(
            "deck name must be at most {MAX_NAME_LENGTH} characters."
        ));
    }
    validate_tags(&details.tags)
}

fn validate_card(front: &str, back: &str, tags: &[String]) -> Fallible<()> {
    for (face, text) in [("front", front), ("back", back)] {
        let length = text.trim().chars().count();
        if length == 0 {
            return fail(format!("card {face} must not be empty."));
        }
        if length > MAX_FACE_LENGTH {
            return fail(format!(
                "card {face} must be at most {MAX_FACE_LENGTH} characters."
            ));
        }
    }
    validate_tags(tags)
}

fn validate_tags(tags: &[String]) -> Fallible<()> {
    if tags.len() > MAX_TAGS {
        return fail(format!("at most {MAX_TAGS} tags are allowed."));
    }
    if tags.iter().any(|tag| tag.trim().is_empty()) {
        return fail("tags must not be empty.");
    }
    Ok(())
}
