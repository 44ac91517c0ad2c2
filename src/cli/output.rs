//! Terminal output
//!
//! `colored` honours NO_COLOR and CLICOLOR_FORCE on its own.

use std::fmt::Display;
use std::io::Write;

use colored::{ColoredString, Colorize};

use crate::domain::{HighlightState, MatchResult};

pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

pub fn failure(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✗".red(), msg);
}

/// `label: value` with a green label
pub fn action(label: &str, msg: &(impl Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Indented by two spaces
pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("  {}", msg);
}

pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}

/// Question line for the quiz; stays on the same line as the answer.
pub fn prompt(msg: &(impl Display + ?Sized)) {
    print!("{} ", msg.to_string().cyan());
    std::io::stdout().flush().ok();
}

/// Feedback for a graded answer. A corrected answer names the alias it matched.
pub fn verdict(result: &MatchResult) {
    match result {
        MatchResult::Exact => success("Браво! Точен одговор."),
        MatchResult::Corrected(alias) => {
            success("Браво! Точен одговор.");
            detail(&format!("(Прифатено: Мислевте на \"{alias}\"?)").as_str().dimmed());
        }
        MatchResult::NoMatch => failure("Обиди се повторно! Провери го правописот."),
    }
}

/// Active elements bold orange, dimmed ones grey.
pub fn highlighted(text: &str, state: HighlightState) -> ColoredString {
    match state {
        HighlightState::Active => text.truecolor(249, 115, 22).bold(),
        HighlightState::Dimmed => text.dimmed(),
        HighlightState::Neutral => text.normal(),
    }
}
