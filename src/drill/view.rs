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

use std::fmt::Write;

use crate::drill::state::StudySession;
use crate::types::attachment::Attachment;
use crate::types::performance::SessionPerformance;

const REVEAL_HELP: &str = "[enter] reveal  [p] previous  [n] skip  [q] quit";
const RATE_HELP: &str = "[1] easy  [2] medium  [3] hard  [p] previous  [q] quit";

/// Renders the current card, or nothing if the session is over.
pub fn render_card(session: &StudySession<'_>, deck_name: &str) -> Option<String> {
    let card = session.current_card()?;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{deck_name}  {} / {}  ({:.0}%)",
        session.current_index() + 1,
        session.total_cards(),
        session.progress()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Q: {}", card.front());
    if session.show_answer() {
        let _ = writeln!(out, "A: {}", card.back());
        for attachment in card.attachments() {
            let _ = writeln!(out, "   {}", describe(attachment));
        }
        let _ = writeln!(out);
        let _ = write!(out, "{RATE_HELP}");
    } else {
        let _ = writeln!(out);
        let _ = write!(out, "{REVEAL_HELP}");
    }
    Some(out)
}

fn describe(attachment: &Attachment) -> String {
    match attachment {
        Attachment::TextCanvas { face, text, .. } => format!("note ({face}): {text}"),
        Attachment::ImageCanvas { face, src, .. } => format!("image ({face}): {src}"),
        Attachment::Video {
            url,
            title: Some(title),
            ..
        } => format!("video: {title} <{url}>"),
        Attachment::Video { url, title: None, .. } => format!("video: <{url}>"),
    }
}

pub fn render_summary(summary: &SessionPerformance) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Session Completed");
    let _ = writeln!(
        out,
        "  correct:  {}/{}",
        summary.correct_answers, summary.total_cards
    );
    let _ = writeln!(out, "  studied:  {}", summary.cards_studied);
    let _ = writeln!(out, "  accuracy: {:.0}%", summary.accuracy);
    let _ = write!(
        out,
        "  time:     {} ({} per card)",
        format_duration(summary.duration_ms),
        format_duration(summary.average_time_ms.round() as u64)
    );
    out
}

/// Formats milliseconds as `1h 5m`, `3m 20s` or `45s`.
pub fn format_duration(ms: u64) -> String {
    let seconds = ms / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    if hours > 0 {
        format!("{hours}h {}m", minutes % 60)
    } else if minutes > 0 {
        format!("{minutes}m {}s", seconds % 60)
    } else {
        format!("{seconds}s")
    }
}
