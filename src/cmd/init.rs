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
use std::fs::create_dir_all;
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;
use crate::config::Config;
use crate::error::Fallible;
use crate::library::Library;
use crate::types::timestamp::Timestamp;

/// Creates the library layout. Existing config and decks are left alone; the
/// sample deck is only added to a library with no decks.
pub fn init_library(directory: Option<String>, now: Timestamp) -> Fallible<()> {
    let directory: PathBuf = match directory {
        Some(dir) => PathBuf::from(dir),
        None => current_dir()?,
    };
    create_dir_all(directory.join("decks"))?;
    if Config::write_default(&directory)? {
        println!("Wrote {CONFIG_FILE_NAME}.");
    }
    let mut library = Library::open_at(directory.canonicalize()?)?;
    if library.decks().is_empty() {
        let id = library.seed_sample(now)?;
        println!("Created sample deck {}.", id.short());
    }
    println!("Library ready at {}.", library.directory().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::at;
    use crate::helper::create_tmp_library;

    #[test]
    fn test_init() -> Fallible<()> {
        let dir = create_tmp_library()?;
        let path = dir.path().join("biblioteca");
        init_library(Some(path.display().to_string()), at(0))?;
        assert!(path.join(CONFIG_FILE_NAME).exists());

        let library = Library::open(Some(path.display().to_string()))?;
        assert_eq!(library.decks().len(), 1);
        assert_eq!(library.deck("Cardiologia")?.card_count(), 3);
        Ok(())
    }

    #[test]
    fn test_init_twice_keeps_decks() -> Fallible<()> {
        let dir = create_tmp_library()?;
        let path = Some(dir.path().display().to_string());
        init_library(path.clone(), at(0))?;
        {
            let mut library = Library::open(path.clone())?;
            library.add_card("Cardiologia", "Q", "A", Vec::new(), at(1))?;
        }
        init_library(path.clone(), at(2))?;
        let library = Library::open(path)?;
        assert_eq!(library.decks().len(), 1);
        assert_eq!(library.deck("Cardiologia")?.card_count(), 4);
        Ok(())
    }
}
