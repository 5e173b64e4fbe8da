//! Label fitting.

/// Horizontal advance assumed per character when fitting labels.
pub const CHAR_ADVANCE: f64 = 8.0;
/// Height of one label line.
pub const LINE_HEIGHT: f64 = 16.0;
/// Inner padding between a box border and its label.
pub const TEXT_PADDING: f64 = 10.0;

const ELLIPSIS: char = '…';

/// How many characters and lines fit in a box of the given size.
pub fn capacity(width: f64, height: f64) -> (usize, usize) {
    let chars = ((width - 2.0 * TEXT_PADDING) / CHAR_ADVANCE).floor().max(1.0) as usize;
    let lines = ((height - TEXT_PADDING) / LINE_HEIGHT).floor().max(1.0) as usize;
    (chars, lines)
}

/// Word-wraps `label` into at most `max_lines` lines of `max_chars`
/// characters. Overlong words are split; text that does not fit ends with
/// an ellipsis.
pub fn wrap_label(label: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let max_lines = max_lines.max(1);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in label.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let used = current.chars().count();
            let needed = if used == 0 { word.len() } else { used + 1 + word.len() };
            if needed <= max_chars {
                if used > 0 {
                    current.push(' ');
                }
                current.extend(word.iter());
                break;
            }
            if used > 0 {
                lines.push(std::mem::take(&mut current));
                continue;
            }
            // word alone is too long: hard split
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut chars: Vec<char> = last.chars().collect();
            chars.truncate(max_chars.saturating_sub(1));
            while chars.last() == Some(&' ') {
                chars.pop();
            }
            chars.push(ELLIPSIS);
            *last = chars.into_iter().collect();
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_is_one_line() {
        assert_eq!(wrap_label("Foundations", 25, 2), vec!["Foundations"]);
        assert!(wrap_label("   ", 25, 2).is_empty());
    }

    #[test]
    fn test_wraps_on_word_boundaries() {
        assert_eq!(
            wrap_label("Common mistakes and misconceptions", 20, 3),
            vec!["Common mistakes and", "misconceptions"]
        );
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        let lines = wrap_label("one two three four five six", 9, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "one two");
        assert!(lines[1].ends_with('…'));
        assert!(lines[1].chars().count() <= 9);
    }

    #[test]
    fn test_splits_overlong_words() {
        assert_eq!(
            wrap_label("Donaudampfschifffahrt", 8, 5),
            vec!["Donaudam", "pfschiff", "fahrt"]
        );
    }

    #[test]
    fn test_capacity_of_linear_box() {
        assert_eq!(capacity(220.0, 48.0), (25, 2));
        assert_eq!(capacity(280.0, 80.0), (32, 4));
    }
}
