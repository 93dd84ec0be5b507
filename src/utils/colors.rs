/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Attendance percentage color:
/// \>=75 → green
/// \>=50 → yellow
/// below → red
pub fn color_for_percent(value: f64) -> &'static str {
    if value >= 75.0 {
        GREEN
    } else if value >= 50.0 {
        YELLOW
    } else {
        RED
    }
}

/// Returns the value greyed out when empty, unchanged otherwise.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Table cell variant of `color_for_percent`; unparsable cells stay uncolored.
pub fn color_for_percent_cell(cell: &str) -> &'static str {
    match cell.trim().trim_end_matches('%').trim().parse::<f64>() {
        Ok(v) => color_for_percent(v),
        Err(_) => RESET,
    }
}

pub fn color_for_status(cell: &str) -> &'static str {
    match cell.trim() {
        "present" => GREEN,
        "absent" => RED,
        _ => RESET,
    }
}
