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

use serde::Deserialize;
use serde::Serialize;

use crate::types::attachment::Attachment;
use crate::types::difficulty::Difficulty;
use crate::types::id::Id;
use crate::types::id::IdHasher;
use crate::types::timestamp::Timestamp;

/// A flashcard. Cards are values: every change produces a new card, and the
/// scheduling fields can only be changed by the scheduler.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub(crate) id: Id,
    pub(crate) front: String,
    pub(crate) back: String,
    /// The last rating the card received. `None` until the first review.
    #[serde(default)]
    pub(crate) difficulty: Option<Difficulty>,
    #[serde(default)]
    pub(crate) mastered: bool,
    #[serde(default)]
    pub(crate) review_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) last_reviewed: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) next_review: Option<Timestamp>,
    #[serde(default)]
    pub(crate) tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) attachments: Vec<Attachment>,
    pub(crate) created_at: Timestamp,
    pub(crate) updated_at: Timestamp,
}

impl Flashcard {
    pub fn new(
        deck_id: &Id,
        front: impl Into<String>,
        back: impl Into<String>,
        tags: Vec<String>,
        now: Timestamp,
    ) -> Self {
        let front = front.into().trim().to_string();
        let back = back.into().trim().to_string();
        let id = IdHasher::new("card")
            .update(deck_id.as_str())
            .update(&front)
            .update(&back)
            .finalize(now);
        Self {
            id,
            front,
            back,
            difficulty: None,
            mastered: false,
            review_count: 0,
            last_reviewed: None,
            next_review: None,
            tags,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn is_mastered(&self) -> bool {
        self.mastered
    }

    pub fn review_count(&self) -> usize {
        self.review_count
    }

    pub fn last_reviewed(&self) -> Option<Timestamp> {
        self.last_reviewed
    }

    pub fn next_review(&self) -> Option<Timestamp> {
        self.next_review
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// A card is due if it was never scheduled, or its review time has come.
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.next_review {
            None => true,
            Some(next_review) => next_review <= now,
        }
    }

    pub fn with_content(&self, front: &str, back: &str, now: Timestamp) -> Self {
        Self {
            front: front.trim().to_string(),
            back: back.trim().to_string(),
            updated_at: now,
            ..self.clone()
        }
    }

    pub fn with_tags(&self, tags: Vec<String>, now: Timestamp) -> Self {
        Self {
            tags,
            updated_at: now,
            ..self.clone()
        }
    }

    pub fn with_attachment(&self, attachment: Attachment, now: Timestamp) -> Self {
        let mut attachments = self.attachments.clone();
        attachments.push(attachment);
        Self {
            attachments,
            updated_at: now,
            ..self.clone()
        }
    }
}
