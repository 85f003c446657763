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

use crate::drill::action::Action;
use crate::drill::action::apply_action;
use crate::drill::state::StudySession;
use crate::drill::view::render_card;
use crate::drill::view::render_summary;
use crate::error::Fallible;
use crate::types::performance::SessionPerformance;

/// Runs the session to completion, one line of input per action. End of
/// input ends the session.
pub fn run_drill<R: BufRead, W: Write>(
    session: &mut StudySession<'_>,
    deck_name: &str,
    input: &mut R,
    output: &mut W,
) -> Fallible<SessionPerformance> {
    while let Some(screen) = render_card(session, deck_name) {
        writeln!(output, "{screen}")?;
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            log::debug!("End of input, ending session.");
            break;
        }
        match Action::parse(&line) {
            Some(action) => {
                if !apply_action(session, action) {
                    log::debug!("Ignored {action:?}");
                }
            }
            None => {
                writeln!(output, "Unknown key: {}", line.trim())?;
            }
        }
        writeln!(output)?;
    }
    let summary = session.end_session();
    writeln!(output, "{}", render_summary(&summary))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::clock::FixedClock;
    use crate::helper::at;
    use crate::helper::cards;
    use crate::scheduler::Scheduler;
    use crate::types::difficulty::Difficulty;

    fn drill(n: usize, keys: &str) -> Fallible<(SessionPerformance, Vec<usize>, String)> {
        let scheduler = Scheduler::default();
        let clock = FixedClock::new(at(0));
        let mut session = StudySession::new(cards(n), &scheduler, &clock);
        let mut input = Cursor::new(keys.as_bytes().to_vec());
        let mut output = Vec::new();
        let summary = run_drill(&mut session, "Cardiologia", &mut input, &mut output)?;
        let counts = session
            .into_cards()
            .iter()
            .map(|card| card.review_count())
            .collect();
        let text = String::from_utf8(output).unwrap();
        Ok((summary, counts, text))
    }

    #[test]
    fn test_e2e() -> Fallible<()> {
        let (summary, counts, text) = drill(2, "\n1\n\n3\n")?;
        assert_eq!(summary.correct_answers, 1);
        assert_eq!(summary.cards_studied, 2);
        assert_eq!(counts, vec![1, 1]);
        assert!(text.contains("Q: front card-0"));
        assert!(text.contains("A: back card-1"));
        assert!(text.contains("Session Completed"));
        Ok(())
    }

    #[test]
    fn test_rating_before_reveal_is_ignored() -> Fallible<()> {
        let (summary, counts, _) = drill(1, "1\nq\n")?;
        assert_eq!(summary.cards_studied, 0);
        assert_eq!(counts, vec![0]);
        Ok(())
    }

    #[test]
    fn test_undo_with_previous() -> Fallible<()> {
        let (summary, counts, _) = drill(2, "\n3\np\n\n1\n\n1\n")?;
        assert_eq!(counts, vec![2, 1]);
        assert_eq!(summary.correct_answers, 2);
        assert_eq!(summary.accuracy, 100.0);
        Ok(())
    }

    #[test]
    fn test_end() -> Fallible<()> {
        let (summary, counts, text) = drill(3, "x\nq\n")?;
        assert_eq!(summary.total_cards, 3);
        assert_eq!(counts, vec![0, 0, 0]);
        assert!(text.contains("Unknown key: x"));
        assert!(text.contains("Session Completed"));
        Ok(())
    }

    #[test]
    fn test_end_of_input() -> Fallible<()> {
        let (summary, _, _) = drill(2, "n\n")?;
        assert_eq!(summary.cards_studied, 0);
        Ok(())
    }

    #[test]
    fn test_empty_queue() -> Fallible<()> {
        let (summary, _, text) = drill(0, "")?;
        assert_eq!(summary.total_cards, 0);
        assert!(text.contains("Session Completed"));
        Ok(())
    }

    #[test]
    fn test_medium_rating() -> Fallible<()> {
        let scheduler = Scheduler::default();
        let clock = FixedClock::new(at(0));
        let mut session = StudySession::new(cards(1), &scheduler, &clock);
        let mut input = Cursor::new(b"\n2\n".to_vec());
        let mut output = Vec::new();
        run_drill(&mut session, "Cardiologia", &mut input, &mut output)?;
        assert_eq!(session.reviews()[0].rating, Difficulty::Medium);
        Ok(())
    }
}
