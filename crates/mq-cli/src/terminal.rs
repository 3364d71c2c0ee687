//! Terminal output with light colorization.

use colored::Colorize;
use mq_engine::GameIo;

/// Prints engine output to stdout, highlighting headlines.
pub struct TerminalIo;

impl GameIo for TerminalIo {
    fn print(&mut self, text: &str) {
        for line in text.lines() {
            if line.starts_with("***") {
                println!("{}", line.yellow().bold());
            } else if line.starts_with("===") {
                println!("{}", line.cyan().bold());
            } else if line.starts_with("Lvl ") {
                println!("{}", line.dimmed());
            } else {
                println!("{line}");
            }
        }
    }
}
