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

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs::create_dir_all;
use std::fs::read_to_string;
use std::fs::remove_file;
use std::fs::rename;
use std::fs::write;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::deck::Deck;
use crate::types::id::Id;

/// Where decks are kept between runs.
pub trait DeckStore {
    fn load_decks(&self) -> Fallible<Vec<Deck>>;

    fn save_deck(&self, deck: &Deck) -> Fallible<()>;

    /// Returns false if there was no such deck.
    fn delete_deck(&self, id: &Id) -> Fallible<bool>;
}

/// One pretty-printed JSON file per deck, under `<library>/decks`. A deck
/// loaded from disk is written back to the file it came from; a new deck
/// gets a file named after its id.
pub struct DirectoryStore {
    decks_dir: PathBuf,
    paths: RefCell<HashMap<Id, PathBuf>>,
}

impl DirectoryStore {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            decks_dir: directory.join("decks"),
            paths: RefCell::new(HashMap::new()),
        }
    }

    fn deck_path(&self, id: &Id) -> Fallible<PathBuf> {
        if let Some(path) = self.paths.borrow().get(id) {
            return Ok(path.clone());
        }
        let path = self.decks_dir.join(format!("{}.json", sanitize(id.as_str())));
        let owner = self
            .paths
            .borrow()
            .iter()
            .find(|(_, known)| **known == path)
            .map(|(other, _)| other.clone());
        if let Some(other) = owner {
            return fail(format!(
                "cannot save deck {id}: {} already holds deck {other}.",
                path.display()
            ));
        }
        Ok(path)
    }
}

impl DeckStore for DirectoryStore {
    fn load_decks(&self) -> Fallible<Vec<Deck>> {
        if !self.decks_dir.exists() {
            log::debug!("No decks directory, starting empty.");
            return Ok(Vec::new());
        }
        let mut decks: Vec<Deck> = Vec::new();
        let mut paths: HashMap<Id, PathBuf> = HashMap::new();
        for entry in WalkDir::new(&self.decks_dir)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                log::debug!("Loading deck {}", path.display());
                let content = read_to_string(path)?;
                let deck: Deck = serde_json::from_str(&content).map_err(|e| {
                    ErrorReport::new(format!("failed to parse {}: {e}", path.display()))
                })?;
                if let Some(first) = paths.get(deck.id()) {
                    return fail(format!(
                        "deck {} is stored twice: {} and {}.",
                        deck.id(),
                        first.display(),
                        path.display()
                    ));
                }
                paths.insert(deck.id().clone(), path.to_path_buf());
                decks.push(deck);
            }
        }
        *self.paths.borrow_mut() = paths;
        Ok(decks)
    }

    fn save_deck(&self, deck: &Deck) -> Fallible<()> {
        create_dir_all(&self.decks_dir)?;
        let path = self.deck_path(deck.id())?;
        let json = serde_json::to_string_pretty(deck)?;
        // Write to a sibling file first so a failed write never truncates
        // the existing deck.
        let tmp = path.with_extension("json.tmp");
        write(&tmp, json)?;
        rename(&tmp, &path)?;
        self.paths
            .borrow_mut()
            .insert(deck.id().clone(), path.clone());
        log::debug!("Saved deck {} to {}", deck.id().short(), path.display());
        Ok(())
    }

    fn delete_deck(&self, id: &Id) -> Fallible<bool> {
        let path = self.deck_path(id)?;
        self.paths.borrow_mut().remove(id);
        if !path.exists() {
            return Ok(false);
        }
        remove_file(&path)?;
        Ok(true)
    }
}

/// Keeps decks in memory. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    decks: RefCell<BTreeMap<Id, Deck>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeckStore for MemoryStore {
    fn load_decks(&self) -> Fallible<Vec<Deck>> {
        Ok(self.decks.borrow().values().cloned().collect())
    }

    fn save_deck(&self, deck: &Deck) -> Fallible<()> {
        self.decks
            .borrow_mut()
            .insert(deck.id().clone(), deck.clone());
        Ok(())
    }

    fn delete_deck(&self, id: &Id) -> Fallible<bool> {
        Ok(self.decks.borrow_mut().remove(id).is_some())
    }
}

/// Keeps file names portable whatever the id looks like.
fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
