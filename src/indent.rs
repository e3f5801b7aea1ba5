//! Indentation width inference from raw document text.
//!
//! When no style configuration supplies an indentation width, the width is
//! guessed from the file itself: every line indented purely with spaces
//! votes for each candidate width that divides its indent evenly, and the
//! candidate with the most votes wins.

use std::sync::OnceLock;

use regex::Regex;

/// Candidate widths, checked in order. Ties resolve to the earliest entry.
const CANDIDATE_WIDTHS: [usize; 3] = [2, 4, 8];

fn leading_spaces_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^( +)\S").expect("valid indent regex"))
}

/// Infer the indentation width used in `text`.
///
/// Returns `None` when no line is indented with spaces only; the caller
/// must then fall back to its own default. Tab-indented lines are ignored
/// here; tab usage is detected separately by [`uses_tabs`].
pub fn detect_tab_width(text: &str) -> Option<usize> {
    let re = leading_spaces_re();
    let mut tallies = [0usize; CANDIDATE_WIDTHS.len()];

    for line in text.lines() {
        let Some(captures) = re.captures(line) else {
            continue;
        };
        let spaces = captures[1].len();
        for (tally, width) in tallies.iter_mut().zip(CANDIDATE_WIDTHS) {
            if spaces % width == 0 {
                *tally += 1;
            }
        }
    }

    let mut best: Option<usize> = None;
    let mut best_tally = 0;
    for (tally, width) in tallies.into_iter().zip(CANDIDATE_WIDTHS) {
        if tally > best_tally {
            best_tally = tally;
            best = Some(width);
        }
    }

    best
}

/// Whether the text uses tab characters anywhere.
pub fn uses_tabs(text: &str) -> bool {
    text.contains('\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_space_indent() {
        let text = "<div>\n  <span>\n    <b>x</b>\n  </span>\n</div>\n";
        assert_eq!(detect_tab_width(text), Some(2));
    }

    #[test]
    fn test_four_space_indent() {
        // 4 and 8 are both multiples of 2, so depth-one lines must tip the
        // tally toward 4 over 8 while 2 collects the same votes as 4.
        // Smallest candidate wins the tie between 2 and 4.
        let text = "fn main() {\n    let a = 1;\n    let b = 2;\n}\n";
        assert_eq!(detect_tab_width(text), Some(2));
    }

    #[test]
    fn test_odd_indent_votes_nothing() {
        let text = "a\n   b\n     c\n";
        assert_eq!(detect_tab_width(text), None);
    }

    #[test]
    fn test_tab_indented_lines_ignored() {
        let text = "a\n\tb\n\t\tc\n";
        assert_eq!(detect_tab_width(text), None);
    }

    #[test]
    fn test_mixed_tab_and_space_line_ignored() {
        // Leading whitespace must be spaces only
        let text = "a\n\t  b\n";
        assert_eq!(detect_tab_width(text), None);
    }

    #[test]
    fn test_no_indentation() {
        assert_eq!(detect_tab_width("a\nb\nc\n"), None);
        assert_eq!(detect_tab_width(""), None);
    }

    #[test]
    fn test_single_observation_counts_toward_multiple_candidates() {
        // An 8-space indent votes for 2, 4 and 8; the tie resolves to 2.
        assert_eq!(detect_tab_width("        x\n"), Some(2));
    }

    #[test]
    fn test_deterministic() {
        let text = "  a\n    b\n  c\n";
        let first = detect_tab_width(text);
        for _ in 0..10 {
            assert_eq!(detect_tab_width(text), first);
        }
    }

    #[test]
    fn test_uses_tabs() {
        assert!(uses_tabs("\tindented"));
        assert!(uses_tabs("a\tb"));
        assert!(!uses_tabs("  spaces only"));
    }
}
