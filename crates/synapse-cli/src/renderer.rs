//! Terminal rendering for markdown output.
//!
//! Rich mode styles inline markdown with termimad, keeps header hashes
//! visible and colours operation status lines; plain mode prints the
//! markdown untouched.

use termimad::{
    crossterm::style::{Color, Stylize},
    MadSkin,
};

/// How a single line of rendered markdown is printed in rich mode.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Header,
    Success,
    Failure,
    /// `> ` note, such as a fallback or read-only notice
    Note(&'a str),
    Body,
}

fn classify(line: &str) -> LineKind<'_> {
    if line.starts_with('#') {
        LineKind::Header
    } else if line.starts_with('✓') {
        LineKind::Success
    } else if line.starts_with('✗') {
        LineKind::Failure
    } else if let Some(note) = line.strip_prefix("> ") {
        LineKind::Note(note)
    } else {
        LineKind::Body
    }
}

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        Self { rich_enabled, skin }
    }

    pub fn is_rich(&self) -> bool {
        self.rich_enabled
    }

    /// Prints markdown to stdout.
    pub fn render(&self, markdown: &str) {
        if !self.rich_enabled {
            print!("{markdown}");
            return;
        }
        for line in markdown.lines() {
            match classify(line) {
                LineKind::Header => println!("{}", line.blue()),
                LineKind::Success => println!("{}", line.green()),
                LineKind::Failure => println!("{}", line.red()),
                LineKind::Note(note) => {
                    self.skin.print_inline(&format!("*{note}*"));
                    println!();
                }
                LineKind::Body => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        assert!(!TerminalRenderer::new(false).is_rich());
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().is_rich());
    }

    #[test]
    fn test_classify_lines() {
        assert_eq!(classify("## Steps"), LineKind::Header);
        assert_eq!(classify("✓ Deleted plan"), LineKind::Success);
        assert_eq!(classify("✗ Kept plan 1"), LineKind::Failure);
        assert_eq!(
            classify("> Offline template used."),
            LineKind::Note("Offline template used.")
        );
        assert_eq!(classify("- Level: beginner"), LineKind::Body);
    }
}
