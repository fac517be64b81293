//! ANSI color helper utilities for terminal output.

use crate::models::status::AttendanceStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

pub fn color_for_status(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => GREEN,
        AttendanceStatus::Absent => RED,
        AttendanceStatus::Remarks => YELLOW,
        AttendanceStatus::Medical => CYAN,
        AttendanceStatus::Camp => BLUE,
    }
}

pub fn colorize_status(status: AttendanceStatus) -> String {
    format!("{}{}{RESET}", color_for_status(status), status.code())
}

/// Optional roster fields: a grey dash when missing.
pub fn colorize_optional(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => format!("{GREY}-{RESET}"),
    }
}
