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

use crate::drill::state::StudySession;
use crate::types::difficulty::Difficulty;

/// A keypress in the terminal drill.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Reveal,
    Previous,
    Skip,
    End,
    Easy,
    Medium,
    Hard,
}

impl Action {
    /// Parses one line of input. An empty line (or a space) reveals. A rating
    /// can also be typed out in full.
    pub fn parse(input: &str) -> Option<Action> {
        match input.trim() {
            "" | "r" => Some(Action::Reveal),
            "p" => Some(Action::Previous),
            "n" => Some(Action::Skip),
            "q" => Some(Action::End),
            "1" | "e" => Some(Action::Easy),
            "2" | "m" => Some(Action::Medium),
            "3" | "h" => Some(Action::Hard),
            other => match other.parse::<Difficulty>() {
                Ok(rating) => Some(Action::rate(rating)),
                Err(e) => {
                    log::debug!("{}", e.message());
                    None
                }
            },
        }
    }

    pub fn rate(rating: Difficulty) -> Action {
        match rating {
            Difficulty::Easy => Action::Easy,
            Difficulty::Medium => Action::Medium,
            Difficulty::Hard => Action::Hard,
        }
    }

    pub fn rating(&self) -> Option<Difficulty> {
        match self {
            Action::Easy => Some(Difficulty::Easy),
            Action::Medium => Some(Difficulty::Medium),
            Action::Hard => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Applies an action to the session. Ratings are ignored until the answer
/// has been revealed. Returns whether the action changed anything.
pub fn apply_action(session: &mut StudySession<'_>, action: Action) -> bool {
    match action {
        Action::Reveal => {
            if session.show_answer() || session.current_card().is_none() {
                return false;
            }
            session.toggle_answer();
            true
        }
        Action::Previous => {
            let before = session.current_index();
            session.previous_card();
            session.current_index() != before
        }
        Action::Skip => {
            if session.current_card().is_none() {
                return false;
            }
            session.next_card();
            true
        }
        Action::End => {
            session.end_session();
            true
        }
        Action::Easy | Action::Medium | Action::Hard => {
            if !session.show_answer() {
                return false;
            }
            match action.rating() {
                Some(rating) => session.rate_card(rating).is_some(),
                None => false,
            }
        }
    }
}
