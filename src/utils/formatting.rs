//! Formatting utilities used for CLI outputs.

use crate::core::calculator::session::PunchState;
use crate::utils::colors::{GREEN, GREY, YELLOW};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static ANSI_ESCAPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok());

/// Drop ANSI color sequences, leaving the visible text.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    match ANSI_ESCAPE.as_ref() {
        Some(re) => re.replace_all(s, ""),
        None => Cow::Borrowed(s),
    }
}

/// Label and ANSI color for a punch state.
pub fn describe_state(state: PunchState) -> (&'static str, &'static str) {
    match state {
        PunchState::Idle => ("Idle", GREY),
        PunchState::Working => ("Working", GREEN),
        PunchState::Paused => ("On break", YELLOW),
    }
}
