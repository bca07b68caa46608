//! Colored one-line messages for the terminal.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn color(self) -> &'static str {
        match self {
            Tone::Info => "\x1b[34m",
            Tone::Success => "\x1b[32m",
            Tone::Warning => "\x1b[33m",
            Tone::Error => "\x1b[31m",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Tone::Info => "ℹ️",
            Tone::Success => "✅",
            Tone::Warning => "⚠️",
            Tone::Error => "❌",
        }
    }
}

fn render<T: fmt::Display>(tone: Tone, msg: T) -> String {
    format!("{}{}{} {}{}", tone.color(), BOLD, tone.icon(), RESET, msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", render(Tone::Info, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", render(Tone::Success, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", render(Tone::Warning, msg));
}

/// Errors go to stderr.
pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", render(Tone::Error, msg));
}
