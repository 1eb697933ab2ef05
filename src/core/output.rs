//! Unified output formatting utilities for consistent CLI presentation.
//!
//! This module provides standardized formatting functions for all
//! svn-bridge output, ensuring consistent colors, spacing, and message
//! structure across commands.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, blue for commands, yellow
//!   for states needing attention, bright_black for muted detail
//! - **Standardized spacing**: Newline before and after command outputs
//! - **Status-aware coloring**: Each file state renders in a fixed color

use crate::core::status::{FileState, LockState, StatusEntry};
use colored::*;

/// Formats and prints an error message with consistent styling
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message with consistent styling
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Color for a file state in status listings.
fn state_color(state: FileState) -> Color {
    match state {
        FileState::Modified => Color::Yellow,
        FileState::Added => Color::Green,
        FileState::Deleted | FileState::Missing => Color::Red,
        FileState::Conflicted | FileState::Obstructed => Color::BrightRed,
        FileState::Unversioned | FileState::Ignored => Color::BrightBlack,
        FileState::Replaced => Color::Magenta,
        FileState::External => Color::Cyan,
        FileState::Unknown => Color::Blue,
        FileState::None => Color::White,
    }
}

/// One rendered status line: state column, annotations, path.
pub fn format_status_line(entry: &StatusEntry) -> String {
    let mut annotations = Vec::new();
    if entry.out_of_date {
        annotations.push("out of date".to_string());
    }
    match entry.lock {
        LockState::None => {}
        LockState::LockedHere => annotations.push("locked here".to_string()),
        LockState::LockedElsewhere => annotations.push("locked elsewhere".to_string()),
        LockState::Stolen => annotations.push("lock stolen".to_string()),
        LockState::Broken => annotations.push("lock broken".to_string()),
    }
    if let Some(changelist) = &entry.changelist {
        annotations.push(format!("changelist '{changelist}'"));
    }

    let suffix = if annotations.is_empty() {
        String::new()
    } else {
        format!(" {}", format!("({})", annotations.join(", ")).bright_black())
    };

    format!(
        "  {:<12} {}{}",
        entry.state.description().color(state_color(entry.state)),
        entry.path.white(),
        suffix
    )
}

/// Print a group of entries under a section header, skipping clean ones.
pub fn print_status_entries(entries: &[StatusEntry]) {
    let interesting: Vec<&StatusEntry> = entries
        .iter()
        .filter(|e| {
            e.state != FileState::None
                || e.out_of_date
                || e.lock != LockState::None
                || e.changelist.is_some()
        })
        .collect();

    if interesting.is_empty() {
        print_info("Working copy is clean");
        return;
    }

    for entry in interesting {
        println!("{}", format_status_line(entry));
    }
    println!();
}
