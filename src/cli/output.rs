//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, present variables
//! - Red: errors, missing variables
//! - Yellow: warnings, secret-backed variables
//! - Cyan: paths, keys, hints
//! - Bold: headers
//! - Dimmed: secondary info

use console::style;

const RULE_WIDTH: usize = 56;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ 4 variables published`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
///
/// Example: `✗ unable to find required env manifest file 'required-env.json'`
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message to stderr (yellow).
pub fn warn(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("⚠").yellow(), msg);
    } else {
        eprintln!("⚠ {}", msg);
    }
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ run: az login`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a bold header followed by a dimmed path.
///
/// Example: `Manifest  required-env.json`
pub fn header(title: &str, path: &str) {
    if colors_enabled() {
        println!("{}  {}", style(title).bold(), style(path).cyan());
    } else {
        println!("{}  {}", title, path);
    }
}

/// Print a horizontal rule separator.
pub fn rule() {
    if colors_enabled() {
        println!("{}", style("─".repeat(RULE_WIDTH)).dim());
    } else {
        println!("{}", "─".repeat(RULE_WIDTH));
    }
}

/// Variable state shown by `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Present,
    Secret,
    Missing,
}

/// Print one variable row.
///
/// Example: `  ✗ DB_PORT               integer   missing`
pub fn variable(status: Status, key: &str, declared: &str, note: &str) {
    let symbol = match status {
        Status::Present => "✓",
        Status::Secret => "●",
        Status::Missing => "✗",
    };
    let key = format!("{:<24}", key);
    let declared = format!("{:<9}", declared);

    if colors_enabled() {
        let symbol = match status {
            Status::Present => style(symbol).green(),
            Status::Secret => style(symbol).yellow(),
            Status::Missing => style(symbol).red(),
        };
        println!("  {} {} {} {}", symbol, style(key).cyan(), declared, style(note).dim());
    } else {
        println!("  {} {} {} {}", symbol, key, declared, note);
    }
}
