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

use std::collections::HashSet;

use crate::clock::Clock;
use crate::scheduler::Scheduler;
use crate::types::card::Flashcard;
use crate::types::difficulty::Difficulty;
use crate::types::performance::SessionPerformance;
use crate::types::review::Review;
use crate::types::timestamp::Timestamp;

#[derive(Clone, PartialEq, Debug)]
pub enum SessionState {
    Active { index: usize, revealed: bool },
    Completed(SessionPerformance),
}

/// One pass over a queue of cards. Ratings are applied to the session's own
/// copy of the cards; nothing is persisted until the caller takes the cards
/// back with [`StudySession::into_cards`].
pub struct StudySession<'a> {
    scheduler: &'a Scheduler,
    clock: &'a dyn Clock,
    cards: Vec<Flashcard>,
    state: SessionState,
    correct_answers: usize,
    started_at: Timestamp,
    reviews: Vec<Review>,
}

impl<'a> StudySession<'a> {
    pub fn new(cards: Vec<Flashcard>, scheduler: &'a Scheduler, clock: &'a dyn Clock) -> Self {
        let started_at = clock.now();
        log::debug!("Session started with {} cards", cards.len());
        Self {
            scheduler,
            clock,
            cards,
            state: SessionState::Active {
                index: 0,
                revealed: false,
            },
            correct_answers: 0,
            started_at,
            reviews: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        match self.state {
            SessionState::Active { index, .. } => self.cards.get(index),
            SessionState::Completed(_) => None,
        }
    }

    pub fn current_index(&self) -> usize {
        match self.state {
            SessionState::Active { index, .. } => index,
            SessionState::Completed(_) => self.total_cards().saturating_sub(1),
        }
    }

    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn show_answer(&self) -> bool {
        match self.state {
            SessionState::Active { revealed, .. } => revealed,
            SessionState::Completed(_) => false,
        }
    }

    /// Position in the queue as a percentage, counting the current card.
    pub fn progress(&self) -> f64 {
        let total = self.total_cards();
        if total == 0 {
            return 0.0;
        }
        match self.state {
            SessionState::Active { index, .. } => (index + 1) as f64 / total as f64 * 100.0,
            SessionState::Completed(_) => 100.0,
        }
    }

    pub fn correct_answers(&self) -> usize {
        self.correct_answers
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, SessionState::Completed(_))
    }

    pub fn summary(&self) -> Option<&SessionPerformance> {
        match &self.state {
            SessionState::Active { .. } => None,
            SessionState::Completed(summary) => Some(summary),
        }
    }

    pub fn toggle_answer(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        if let SessionState::Active { index, revealed } = self.state {
            self.state = SessionState::Active {
                index,
                revealed: !revealed,
            };
        }
    }

    /// Rates the current card and moves on. Returns the rated card.
    pub fn rate_card(&mut self, rating: Difficulty) -> Option<Flashcard> {
        let SessionState::Active { index, .. } = self.state else {
            return None;
        };
        let current = self.cards.get(index)?;
        let now = self.clock.now();
        let rated = self.scheduler.apply_rating(current, rating, now);
        log::debug!(
            "{} {} reviews={} next={}",
            rated.id().short(),
            rating,
            rated.review_count(),
            rated.next_review().map(|ts| ts.to_string()).unwrap_or_default()
        );
        let id = rated.id().clone();
        for card in self.cards.iter_mut().filter(|card| card.id() == &id) {
            *card = rated.clone();
        }
        if rating == Difficulty::Easy {
            self.correct_answers += 1;
        }
        self.reviews.push(Review::of(&rated, rating, now));
        self.next_card();
        Some(rated)
    }

    /// Moves to the next card with the answer hidden, or completes the
    /// session when the current card is the last one.
    pub fn next_card(&mut self) {
        let SessionState::Active { index, .. } = self.state else {
            return;
        };
        if self.cards.is_empty() {
            return;
        }
        if index + 1 < self.cards.len() {
            self.state = SessionState::Active {
                index: index + 1,
                revealed: false,
            };
        } else {
            self.complete();
        }
    }

    pub fn previous_card(&mut self) {
        if let SessionState::Active { index, .. } = self.state {
            if index > 0 {
                self.state = SessionState::Active {
                    index: index - 1,
                    revealed: false,
                };
            }
        }
    }

    /// Ends the session early. Returns the summary.
    pub fn end_session(&mut self) -> SessionPerformance {
        if let SessionState::Completed(summary) = &self.state {
            return summary.clone();
        }
        self.complete()
    }

    /// Consumes the session, returning the working copy of the cards.
    pub fn into_cards(self) -> Vec<Flashcard> {
        self.cards
    }

    fn complete(&mut self) -> SessionPerformance {
        let studied: HashSet<_> = self.reviews.iter().map(|review| &review.card_id).collect();
        let summary = SessionPerformance::compute(
            self.started_at,
            self.clock.now(),
            self.cards.len(),
            studied.len(),
            self.correct_answers,
        );
        log::debug!(
            "Session completed: {}/{} correct",
            summary.correct_answers,
            summary.total_cards
        );
        self.state = SessionState::Completed(summary.clone());
        summary
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::clock::FixedClock;
    use crate::helper::at;
    use crate::helper::cards;

    fn active(index: usize, revealed: bool) -> SessionState {
        SessionState::Active { index, revealed }
    }

    #[test]
    fn test_rate_all_easy() {
        let scheduler = Scheduler::default();
        let clock = FixedClock::new(at(0));
        let mut session = StudySession::new(cards(4), &scheduler, &clock);
        for _ in 0..4 {
            clock.advance(TimeDelta::seconds(30));
            session.toggle_answer();
            assert!(session.rate_card(Difficulty::Easy).is_some());
        }
        let summary = session.summary().unwrap();
        assert_eq!(summary.accuracy, 100.0);
        assert_eq!(summary.cards_studied, 4);
        assert_eq!(summary.correct_answers, 4);
        assert_eq!(summary.duration_ms, 120_000);
        assert_eq!(summary.average_time_ms, 30_000.0);
        assert_eq!(session.progress(), 100.0);
    }

    #[test]
    fn test_navigation() {
        let scheduler = Scheduler::default();
        let clock = FixedClock::new(at(0));
        let mut session = StudySession::new(cards(3), &scheduler, &clock);
        assert_eq!(session.state(), &active(0, false));

        session.previous_card();
        assert_eq!(session.state(), &active(0, false));

        session.toggle_answer();
        assert!(session.show_answer());
        session.next_card();
        assert_eq!(session.state(), &active(1, false));
        assert_eq!(session.current_card().unwrap().id().as_str(), "card-1");

        session.toggle_answer();
        session.previous_card();
        assert_eq!(session.state(), &active(0, false));

        session.next_card();
        session.next_card();
        assert_eq!(session.current_index(), 2);
        assert!((session.progress() - 100.0).abs() < f64::EPSILON);
        session.next_card();
        assert!(session.is_completed());
        assert_eq!(session.summary().unwrap().cards_studied, 0);
    }

    #[test]
    fn test_toggle_answer_flips_back() {
        let scheduler = Scheduler::default();
        let clock = FixedClock::new(at(0));
        let mut session = StudySession::new(cards(1), &scheduler, &clock);
        session.toggle_answer();
        session.toggle_answer();
        assert!(!session.show_answer());
    }

    #[test]
    fn test_rating_updates_working_copy_only() {
        let scheduler = Scheduler::default();
        let clock = FixedClock::new(at(0));
        let queue = cards(2);
        let mut session = StudySession::new(queue.clone(), &scheduler, &clock);
        let rated = session.rate_card(Difficulty::Hard).unwrap();
        assert_eq!(rated.review_count(), 1);
        assert_eq!(session.cards()[0], rated);
        assert_eq!(queue[0].review_count(), 0);
        assert_eq!(session.correct_answers(), 0);
        assert_eq!(session.state(), &active(1, false));
        assert_eq!(session.reviews().len(), 1);
        assert_eq!(session.reviews()[0].rating, Difficulty::Hard);
    }

    #[test]
    fn test_mixed_ratings_accuracy() {
        let scheduler = Scheduler::default();
        let clock = FixedClock::new(at(0));
        let mut session = StudySession::new(cards(4), &scheduler, &clock);
        session.rate_card(Difficulty::Easy);
        session.rate_card(Difficulty::Hard);
        session.rate_card(Difficulty::Medium);
        session.rate_card(Difficulty::Easy);
        let summary = session.summary().unwrap();
        assert_eq!(summary.correct_answers, 2);
        assert_eq!(summary.accuracy, 50.0);
    }

    #[test]
    fn test_empty_queue_is_inert() {
        let scheduler = Scheduler::default();
        let clock = FixedClock::new(at(0));
        let mut session = StudySession::new(Vec::new(), &scheduler, &clock);
        session.toggle_answer();
        assert!(session.rate_card(Difficulty::Easy).is_none());
        session.next_card();
        session.previous_card();
        assert_eq!(session.state(), &active(0, false));
        assert_eq!(session.progress(), 0.0);
        assert!(session.current_card().is_none());

        let summary = session.end_session();
        assert_eq!(summary.total_cards, 0);
        assert_eq!(summary.accuracy, 0.0);
        assert_eq!(summary.average_time_ms, 0.0);
    }

    #[test]
    fn test_completed_is_terminal() {
        let scheduler = Scheduler::default();
        let clock = FixedClock::new(at(0));
        let mut session = StudySession::new(cards(1), &scheduler, &clock);
        session.rate_card(Difficulty::Easy);
        let summary = session.summary().cloned();
        assert!(summary.is_some());

        clock.advance(TimeDelta::hours(1));
        session.toggle_answer();
        session.previous_card();
        session.next_card();
        assert!(session.rate_card(Difficulty::Hard).is_none());
        assert_eq!(session.end_session(), summary.unwrap());
        assert_eq!(session.into_cards()[0].review_count(), 1);
    }

    #[test]
    fn test_end_session_early() {
        let scheduler = Scheduler::default();
        let clock = FixedClock::new(at(0));
        let mut session = StudySession::new(cards(5), &scheduler, &clock);
        session.rate_card(Difficulty::Easy);
        session.rate_card(Difficulty::Medium);
        clock.advance(TimeDelta::minutes(5));
        let summary = session.end_session();
        assert_eq!(summary.cards_studied, 2);
        assert_eq!(summary.total_cards, 5);
        assert_eq!(summary.accuracy, 20.0);
        assert_eq!(summary.duration_ms, 300_000);
    }

    #[test]
    fn test_rerating_after_going_back() {
        let scheduler = Scheduler::default();
        let clock = FixedClock::new(at(0));
        let mut session = StudySession::new(cards(2), &scheduler, &clock);
        session.rate_card(Difficulty::Hard);
        session.previous_card();
        let rerated = session.rate_card(Difficulty::Easy).unwrap();
        assert_eq!(rerated.review_count(), 2);
        assert_eq!(rerated.difficulty(), Some(Difficulty::Easy));
        session.rate_card(Difficulty::Easy);
        let summary = session.summary().unwrap();
        assert_eq!(summary.cards_studied, 2);
        assert_eq!(summary.correct_answers, 2);
    }
}
