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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::timestamp::Timestamp;

/// Number of hex characters kept from the digest.
const ID_LENGTH: usize = 16;

/// The identifier of a deck or a card. Generated ids are truncated blake3
/// digests, but any non-empty string read from storage is a valid id.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(s: impl Into<String>) -> Fallible<Self> {
        let s = s.into();
        if s.trim().is_empty() {
            return fail("id must not be empty.");
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A short prefix for log lines and terminal output.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct IdHasher {
    inner: blake3::Hasher,
}

impl IdHasher {
    /// Starts a digest in the given namespace, so that a deck and a card
    /// built from the same text never share an id.
    pub fn new(namespace: &str) -> Self {
        let mut inner = blake3::Hasher::new();
        inner.update(namespace.as_bytes());
        Self { inner }
    }

    pub fn update(&mut self, data: &str) -> &mut Self {
        // Length-prefixed so that ("ab", "c") and ("a", "bc") differ.
        self.inner.update(&(data.len() as u64).to_le_bytes());
        self.inner.update(data.as_bytes());
        self
    }

    pub fn finalize(&mut self, created_at: Timestamp) -> Id {
        self.inner.update(created_at.to_rfc3339().as_bytes());
        let hex = self.inner.finalize().to_hex();
        Id(hex[..ID_LENGTH].to_string())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn at(secs: u32) -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, secs).unwrap())
    }

    #[test]
    fn test_generated_ids_are_stable() {
        let a = IdHasher::new("card").update("front").update("back").finalize(at(0));
        let b = IdHasher::new("card").update("front").update("back").finalize(at(0));
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), ID_LENGTH);
    }

    #[test]
    fn test_generated_ids_differ() {
        let a = IdHasher::new("card").update("ab").update("c").finalize(at(0));
        let b = IdHasher::new("card").update("a").update("bc").finalize(at(0));
        let c = IdHasher::new("deck").update("ab").update("c").finalize(at(0));
        let d = IdHasher::new("card").update("ab").update("c").finalize(at(1));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_empty_id() {
        assert!(Id::new("  ").is_err());
    }

    #[test]
    fn test_short() -> Fallible<()> {
        assert_eq!(Id::new("card-1")?.short(), "card-1");
        assert_eq!(Id::new("0123456789abcdef")?.short(), "01234567");
        Ok(())
    }

    #[test]
    fn test_serde_transparent() -> Fallible<()> {
        let id = Id::new("card-1")?;
        assert_eq!(serde_json::to_string(&id)?, "\"card-1\"");
        Ok(())
    }
}
