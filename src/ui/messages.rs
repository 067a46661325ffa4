//! Terminal messages: one icon and color per severity.

use crate::utils::colors::{BLUE, CYAN, GREEN, RED, RESET, YELLOW};
use std::fmt;

const BOLD: &str = "\x1b[1m";

fn line<T: fmt::Display>(color: &str, icon: &str, msg: T) -> String {
    format!("{color}{BOLD}{icon}{RESET} {msg}")
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(BLUE, "ℹ️", msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(GREEN, "✅", msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", line(YELLOW, "⚠️", msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(RED, "❌", msg));
}

pub fn header<T: fmt::Display>(msg: T) {
    println!("{BLUE}{BOLD}====================== {msg}\n{RESET}");
}

/// `• label: value`, for key facts under a header.
pub fn detail<T: fmt::Display>(label: &str, value: T) {
    println!("{CYAN}• {label}:{RESET} {value}");
}
