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

use std::io::BufRead;
use std::io::Write;

use crate::clock::Clock;
use crate::drill::state::StudySession;
use crate::drill::terminal::run_drill;
use crate::error::Fallible;
use crate::library::Library;
use crate::types::performance::SessionPerformance;

/// Drills the due cards of a deck, then commits the ratings to the deck.
pub fn drill<R: BufRead, W: Write>(
    library: &mut Library,
    deck: &str,
    limit: Option<usize>,
    clock: &dyn Clock,
    input: &mut R,
    output: &mut W,
) -> Fallible<SessionPerformance> {
    let (deck_id, deck_name) = {
        let deck = library.deck(deck)?;
        (deck.id().clone(), deck.name().to_string())
    };
    let queue = library.queue(deck_id.as_str(), clock.now(), limit)?;
    if queue.is_empty() {
        writeln!(output, "No cards due in '{deck_name}'.")?;
    }
    let mut session = StudySession::new(queue, library.scheduler(), clock);
    let summary = run_drill(&mut session, &deck_name, input, output)?;
    if session.reviews().is_empty() {
        return Ok(summary);
    }
    let cards = session.into_cards();
    library.commit_session(deck_id.as_str(), &cards, clock.now())?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use super::*;
    use crate::clock::FixedClock;
    use crate::config::Config;
    use crate::helper::at;
    use crate::store::MemoryStore;

    fn sample() -> Fallible<Library> {
        let mut library = Library::with_store(
            PathBuf::from("."),
            Config::default(),
            Box::new(MemoryStore::new()),
        )?;
        library.seed_sample(at(0))?;
        Ok(library)
    }

    #[test]
    fn test_drill_commits_ratings() -> Fallible<()> {
        let mut library = sample()?;
        let clock = FixedClock::new(at(0));
        let mut input = Cursor::new(b"\n1\n\n1\n\n3\n".to_vec());
        let mut output = Vec::new();
        let summary = drill(&mut library, "Cardiologia", None, &clock, &mut input, &mut output)?;
        assert_eq!(summary.correct_answers, 2);

        let stats = library.deck_stats("Cardiologia", at(1))?;
        assert_eq!(stats.due, 0);
        assert_eq!(stats.by_difficulty.easy, 2);
        assert_eq!(stats.by_difficulty.hard, 1);
        Ok(())
    }

    #[test]
    fn test_limit() -> Fallible<()> {
        let mut library = sample()?;
        let clock = FixedClock::new(at(0));
        let mut input = Cursor::new(b"\n2\n".to_vec());
        let mut output = Vec::new();
        let summary = drill(&mut library, "Cardiologia", Some(1), &clock, &mut input, &mut output)?;
        assert_eq!(summary.total_cards, 1);
        assert_eq!(library.deck_stats("Cardiologia", at(1))?.due, 2);
        Ok(())
    }

    #[test]
    fn test_quitting_leaves_deck_unchanged() -> Fallible<()> {
        let mut library = sample()?;
        let before = library.deck("Cardiologia")?.clone();
        let clock = FixedClock::new(at(0));
        let mut input = Cursor::new(b"q\n".to_vec());
        let mut output = Vec::new();
        drill(&mut library, "Cardiologia", None, &clock, &mut input, &mut output)?;
        assert_eq!(library.deck("Cardiologia")?, &before);
        Ok(())
    }

    #[test]
    fn test_nothing_due() -> Fallible<()> {
        let mut library = sample()?;
        let clock = FixedClock::new(at(0));
        let mut input = Cursor::new(b"\n1\n\n1\n\n1\n".to_vec());
        let mut output = Vec::new();
        drill(&mut library, "Cardiologia", None, &clock, &mut input, &mut output)?;

        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let summary = drill(&mut library, "Cardiologia", None, &clock, &mut input, &mut output)?;
        assert_eq!(summary.total_cards, 0);
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("No cards due in 'Cardiologia'."));
        Ok(())
    }
}
