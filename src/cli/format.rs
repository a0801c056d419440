// Plain-text rendering for command output

use std::fmt::Write;

use crate::conversation::{ConversationMessage, Role};
use crate::emotion::ClassificationScore;
use crate::journal::{DayTrend, EmotionSummary, JournalEntry};

const BAR_WIDTH: usize = 20;

/// One journal entry as a card
pub fn entry(entry: &JournalEntry) -> String {
    let mut out = format!(
        "{}  {}  [{}]\n  {}\n",
        entry.created_at.format("%Y-%m-%d %H:%M"),
        entry.emotion.label(),
        entry.id,
        entry.text
    );

    if let Some(response) = &entry.ai_response {
        let _ = writeln!(out, "  💬 {}", response);
    }

    out
}

pub fn entries(entries: &[JournalEntry]) -> String {
    if entries.is_empty() {
        return "No entries yet.\n".to_string();
    }

    entries.iter().map(entry).collect::<Vec<_>>().join("\n")
}

/// Transcript line for the chat loop
pub fn message(message: &ConversationMessage) -> String {
    let time = message.created_at.format("%H:%M");
    match message.role {
        Role::User => format!("[{}] 你: {}", time, message.text),
        Role::Assistant => format!("[{}] 🤗 {}", time, message.text),
    }
}

pub fn classification(score: &ClassificationScore) -> String {
    let mut out = match score.dominant() {
        Some(category) => format!("{}\n", category.label()),
        None => "No emotion keywords found\n".to_string(),
    };

    for (category, count) in score.nonzero() {
        let _ = writeln!(out, "  {:<8} {}", category.as_str(), count);
    }

    out
}

pub fn summary(summary: &EmotionSummary) -> String {
    format!(
        "Entries: {}  Emotions: {}  Happy: {}  Active days: {}\n",
        summary.total, summary.distinct_emotions, summary.happy_count, summary.active_days
    )
}

/// Daily totals as horizontal bars scaled to the busiest day
pub fn trend(trend: &[DayTrend]) -> String {
    let max = trend.iter().map(|day| day.total).max().unwrap_or(0);
    let mut out = String::new();

    for day in trend {
        let width = if max == 0 { 0 } else { day.total * BAR_WIDTH / max };
        let emojis: String = day.counts.keys().map(|category| category.emoji()).collect();
        let _ = writeln!(
            out,
            "{}  {:<width$} {} {}",
            day.date.format("%m-%d"),
            "█".repeat(width),
            day.total,
            emojis,
            width = BAR_WIDTH
        );
    }

    out
}
