// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard line rendering and duration formatting.

use crate::models::Leaderboard;

/// Format a minute total as `"X min"`, `"X h Y min"` or `"X d Y h Z min"`.
///
/// All components use integer truncation of the float minute value, so
/// `90.9` renders as `"1 h 30 min"`.
pub fn format_duration(minutes: f64) -> String {
    if minutes < 60.0 {
        return format!("{} min", minutes as i64);
    }

    let total = minutes as i64;
    let hours = total / 60;
    let mins = total % 60;

    if hours < 24 {
        format!("{} h {} min", hours, mins)
    } else {
        format!("{} d {} h {} min", hours / 24, hours % 24, mins)
    }
}

/// Render a leaderboard as ordinal display lines.
///
/// Ranks are 1-based (`rank_start` shifts them, e.g. for paginated output).
/// The username is whatever display token the caller put in the entry; how
/// mentions are rendered is the caller's concern.
pub fn format_lines(board: &Leaderboard, rank_start: usize) -> Vec<String> {
    board
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{}. @{} — {}",
                rank_start + i,
                entry.username,
                format_duration(entry.minutes)
            )
        })
        .collect()
}

/// Render a username as a profile hyperlink instead of a bare mention,
/// so relaying the line into a chat does not ping the user.
pub fn profile_link(username: &str) -> String {
    format!("<a href=\"https://t.me/{}\">{}</a>", username, username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStat;

    #[test]
    fn test_format_duration_minutes_only() {
        assert_eq!(format_duration(0.0), "0 min");
        assert_eq!(format_duration(30.0), "30 min");
        assert_eq!(format_duration(59.9), "59 min");
    }

    #[test]
    fn test_format_duration_hours() {
        assert_eq!(format_duration(60.0), "1 h 0 min");
        assert_eq!(format_duration(90.0), "1 h 30 min");
        assert_eq!(format_duration(90.7), "1 h 30 min");
        assert_eq!(format_duration(1439.0), "23 h 59 min");
    }

    #[test]
    fn test_format_duration_days() {
        // 1500 min = 25 h = 1 d 1 h 0 min
        assert_eq!(format_duration(1500.0), "1 d 1 h 0 min");
        assert_eq!(format_duration(1440.0), "1 d 0 h 0 min");
        assert_eq!(format_duration(10000.0), "6 d 22 h 40 min");
    }

    #[test]
    fn test_format_lines_ranks_and_layout() {
        let board = Leaderboard::from_stats(vec![
            UserStat {
                username: "ada".to_string(),
                minutes: 90.0,
            },
            UserStat {
                username: "grace".to_string(),
                minutes: 30.0,
            },
        ]);

        assert_eq!(
            format_lines(&board, 1),
            vec!["1. @ada — 1 h 30 min", "2. @grace — 30 min"]
        );
        assert_eq!(
            format_lines(&board, 4),
            vec!["4. @ada — 1 h 30 min", "5. @grace — 30 min"]
        );
    }

    #[test]
    fn test_profile_link() {
        assert_eq!(
            profile_link("ada"),
            "<a href=\"https://t.me/ada\">ada</a>"
        );
    }
}
