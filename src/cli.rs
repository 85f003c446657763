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

use std::io::stdin;
use std::io::stdout;

use clap::Parser;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::cmd::check::check_library;
use crate::cmd::deck::DeckEdit;
use crate::cmd::deck::add_card;
use crate::cmd::deck::attach_image;
use crate::cmd::deck::attach_video;
use crate::cmd::deck::create_deck;
use crate::cmd::deck::delete_deck;
use crate::cmd::deck::edit_card;
use crate::cmd::deck::edit_deck;
use crate::cmd::deck::list_decks;
use crate::cmd::deck::remove_card;
use crate::cmd::drill::drill;
use crate::cmd::due::list_due;
use crate::cmd::init::init_library;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::deck_stats;
use crate::error::Fallible;
use crate::library::Library;
use crate::types::attachment::Face;
use crate::types::attachment::Geometry;
use crate::types::attachment::VideoProvider;
use crate::types::deck::DeckDetails;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Create a library with a default config and a sample deck.
    Init {
        /// Path to the library directory.
        directory: Option<String>,
    },
    /// Check that the config and every deck load.
    Check {
        /// Path to the library directory.
        directory: Option<String>,
    },
    /// List decks.
    Decks {
        /// Path to the library directory.
        directory: Option<String>,
    },
    /// Create a deck.
    CreateDeck {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        icon: String,
        #[arg(long, default_value = "")]
        color: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        directory: Option<String>,
    },
    /// Change a deck's name, description, icon, color or tags.
    EditDeck {
        /// Deck name, id, or id prefix.
        deck: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
        /// Replaces every tag.
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
        #[arg(long)]
        directory: Option<String>,
    },
    /// Delete a deck and all of its cards.
    DeleteDeck {
        deck: String,
        #[arg(long)]
        directory: Option<String>,
    },
    /// Add a card to a deck.
    AddCard {
        deck: String,
        front: String,
        back: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        directory: Option<String>,
    },
    /// Change the content of a card.
    EditCard {
        deck: String,
        /// Card id or id prefix.
        card: String,
        #[arg(long)]
        front: Option<String>,
        #[arg(long)]
        back: Option<String>,
        /// Replaces every tag.
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
        #[arg(long)]
        directory: Option<String>,
    },
    /// Remove a card from a deck.
    RemoveCard {
        deck: String,
        card: String,
        #[arg(long)]
        directory: Option<String>,
    },
    /// Attach a video to a card.
    AttachVideo {
        deck: String,
        card: String,
        url: String,
        #[arg(long, value_enum, default_value_t = VideoProvider::Youtube)]
        provider: VideoProvider,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        directory: Option<String>,
    },
    /// Place an image on a card face.
    AttachImage {
        deck: String,
        card: String,
        src: String,
        #[arg(long, value_enum, default_value_t = Face::Back)]
        face: Face,
        #[arg(long, default_value_t = 0.0)]
        x: f64,
        #[arg(long, default_value_t = 0.0)]
        y: f64,
        #[arg(long, default_value_t = 200.0)]
        width: f64,
        #[arg(long, default_value_t = 150.0)]
        height: f64,
        #[arg(long)]
        directory: Option<String>,
    },
    /// List the due cards of a deck.
    Due {
        deck: String,
        #[arg(long)]
        directory: Option<String>,
    },
    /// Print deck statistics.
    Stats {
        deck: String,
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
        #[arg(long)]
        directory: Option<String>,
    },
    /// Drill the due cards of a deck in the terminal.
    Drill {
        deck: String,
        /// Maximum number of cards. Defaults to the recommended session size.
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let clock = SystemClock;
    match cli {
        Command::Init { directory } => init_library(directory, clock.now()),
        Command::Check { directory } => check_library(directory),
        Command::Decks { directory } => {
            let library = Library::open(directory)?;
            println!("{}", list_decks(&library, clock.now()));
            Ok(())
        }
        Command::CreateDeck {
            name,
            description,
            icon,
            color,
            tags,
            directory,
        } => {
            let mut library = Library::open(directory)?;
            let details = DeckDetails {
                name,
                description,
                icon,
                color,
                tags,
            };
            println!("{}", create_deck(&mut library, details, clock.now())?);
            Ok(())
        }
        Command::EditDeck {
            deck,
            name,
            description,
            icon,
            color,
            tags,
            directory,
        } => {
            let mut library = Library::open(directory)?;
            let edit = DeckEdit {
                name,
                description,
                icon,
                color,
                tags,
            };
            println!("{}", edit_deck(&mut library, &deck, edit, clock.now())?);
            Ok(())
        }
        Command::DeleteDeck { deck, directory } => {
            let mut library = Library::open(directory)?;
            println!("{}", delete_deck(&mut library, &deck)?);
            Ok(())
        }
        Command::AddCard {
            deck,
            front,
            back,
            tags,
            directory,
        } => {
            let mut library = Library::open(directory)?;
            let message = add_card(&mut library, &deck, &front, &back, tags, clock.now())?;
            println!("{message}");
            Ok(())
        }
        Command::EditCard {
            deck,
            card,
            front,
            back,
            tags,
            directory,
        } => {
            let mut library = Library::open(directory)?;
            let message = edit_card(&mut library, &deck, &card, front, back, tags, clock.now())?;
            println!("{message}");
            Ok(())
        }
        Command::RemoveCard {
            deck,
            card,
            directory,
        } => {
            let mut library = Library::open(directory)?;
            println!("{}", remove_card(&mut library, &deck, &card, clock.now())?);
            Ok(())
        }
        Command::AttachVideo {
            deck,
            card,
            url,
            provider,
            title,
            directory,
        } => {
            let mut library = Library::open(directory)?;
            let message = attach_video(
                &mut library,
                &deck,
                &card,
                provider,
                &url,
                title,
                clock.now(),
            )?;
            println!("{message}");
            Ok(())
        }
        Command::AttachImage {
            deck,
            card,
            src,
            face,
            x,
            y,
            width,
            height,
            directory,
        } => {
            let mut library = Library::open(directory)?;
            let geometry = Geometry {
                x,
                y,
                width,
                height,
            };
            let message = attach_image(
                &mut library,
                &deck,
                &card,
                face,
                geometry,
                &src,
                clock.now(),
            )?;
            println!("{message}");
            Ok(())
        }
        Command::Due { deck, directory } => {
            let library = Library::open(directory)?;
            println!("{}", list_due(&library, &deck, clock.now())?);
            Ok(())
        }
        Command::Stats {
            deck,
            format,
            directory,
        } => {
            let library = Library::open(directory)?;
            println!("{}", deck_stats(&library, &deck, clock.now(), format)?);
            Ok(())
        }
        Command::Drill {
            deck,
            limit,
            directory,
        } => {
            let mut library = Library::open(directory)?;
            let mut input = stdin().lock();
            let mut output = stdout().lock();
            drill(&mut library, &deck, limit, &clock, &mut input, &mut output)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_drill() {
        let cli = Command::try_parse_from(["medflashcard", "drill", "Cardiologia", "--limit", "10"]);
        match cli {
            Ok(Command::Drill { deck, limit, .. }) => {
                assert_eq!(deck, "Cardiologia");
                assert_eq!(limit, Some(10));
            }
            _ => panic!("expected drill"),
        }
    }

    #[test]
    fn test_parse_stats_format() {
        let cli = Command::try_parse_from(["medflashcard", "stats", "x", "--format", "json"]);
        assert!(matches!(
            cli,
            Ok(Command::Stats {
                format: StatsFormat::Json,
                ..
            })
        ));
    }
}
