//! CLI subcommands

pub mod check;
pub mod preview;
pub mod report;

use console::style;
use naksiter_common::constants;

/// Label inside the leading brackets of a result line
fn label_of(result: &str) -> Option<&str> {
    let rest = result.strip_prefix('[')?;
    rest.split_once(']').map(|(label, _)| label)
}

/// Color a result line by its bracketed label
pub fn colorize(result: &str) -> String {
    if result.starts_with(constants::ERROR_PREFIX) {
        return style(result).red().bold().to_string();
    }

    match label_of(result) {
        Some(constants::LABEL_NORMAL) => style(result).green().to_string(),
        Some(constants::LABEL_DANGER) => style(result).red().bold().to_string(),
        Some(constants::LABEL_WARNING | constants::LABEL_CAUTION) => style(result).yellow().to_string(),
        _ => result.to_string(),
    }
}

/// Truncate a string to `max` characters with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
