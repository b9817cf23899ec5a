//! Severity-tagged console messages

use colored::Colorize;

/// Print `[SUCCESS] message` to stdout
pub fn success(message: &str) {
    println!("{} {}", "[SUCCESS]".green().bold(), message);
}

/// Print `[WARNING] message` to stdout
pub fn warning(message: &str) {
    println!("{} {}", "[WARNING]".yellow().bold(), message);
}

/// Print `[ERROR] message` to stderr
pub fn error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
}
