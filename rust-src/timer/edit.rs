//! Manual time entry for the countdown display.

use std::sync::OnceLock;

use regex::Regex;


const MAX_MINUTES: u32 = 99;
const MAX_SECONDS: u32 = 59;
const MAX_EDIT_LEN: usize = 5;


fn colon_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid regex"))
}


fn digits_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{1,4}$").expect("valid regex"))
}


/// Parse typed time into total seconds.
///
/// Accepts `m:ss`/`mm:ss`, `mss`, `mmss`, and 1-2 digits meaning seconds.
/// Minutes clamp to 0..=99 and seconds to 0..=59; a zero total becomes 60.
/// Returns `None` for anything else.
pub fn parse_time_input(text: &str) -> Option<u32> {
    let value = text.trim();

    let (minutes, seconds) = if let Some(caps) = colon_pattern().captures(value) {
        (caps[1].parse().ok()?, caps[2].parse().ok()?)
    } else if digits_pattern().is_match(value) {
        let split = match value.len() {
            1 | 2 => 0,
            3 => 1,
            _ => 2,
        };
        let (m, s) = value.split_at(split);
        (if m.is_empty() { 0 } else { m.parse().ok()? }, s.parse().ok()?)
    } else {
        return None;
    };

    let minutes: u32 = u32::min(minutes, MAX_MINUTES);
    let seconds: u32 = u32::min(seconds, MAX_SECONDS);

    match minutes * 60 + seconds {
        0 => Some(60),
        total => Some(total),
    }
}


/// Format seconds as `mm:ss`.
pub fn format_clock(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}


/// Text being typed over the countdown display.
///
/// Starts pre-filled with the current value; the first keystroke replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    pristine: bool,
}


impl EditBuffer {
    pub fn new(current_secs: u32) -> Self {
        Self {
            text: format_clock(current_secs),
            pristine: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Accept a digit or colon; everything else is ignored.
    pub fn push(&mut self, c: char) {
        if !c.is_ascii_digit() && c != ':' {
            return;
        }
        if self.pristine {
            self.text.clear();
            self.pristine = false;
        }
        if self.text.len() < MAX_EDIT_LEN {
            self.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.pristine {
            self.text.clear();
            self.pristine = false;
        } else {
            self.text.pop();
        }
    }

    /// Seconds the buffer parses to, if valid.
    pub fn parse(&self) -> Option<u32> {
        parse_time_input(&self.text)
    }
}
