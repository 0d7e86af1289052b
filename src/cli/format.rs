use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Human label for a note's modification date.
///
/// Counts started days between `date` and `now`: "Today", "Yesterday",
/// "N days ago" within a week, otherwise the calendar date.
pub fn relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - date).num_seconds().abs();
    let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;

    match days {
        0 | 1 => "Today".to_string(),
        2 => "Yesterday".to_string(),
        d if d < 7 => format!("{} days ago", d - 1),
        _ => date.format("%Y-%m-%d").to_string(),
    }
}

/// Cut `text` to at most `max` characters, marking the cut with "...".
pub fn truncate(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() <= max && line.len() == text.len() {
        return line.to_string();
    }
    let kept: String = line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
