use regex::Regex;
use std::sync::OnceLock;

/// Words per tooltip line.
pub const WINDOW_WORDS: usize = 5;

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s\s+").expect("static regex"))
}

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\w']+").expect("static regex"))
}

/// Collapses repeated whitespace and trims.
pub fn normalize_whitespace(text: &str) -> String {
    whitespace_runs().replace_all(text, " ").trim().to_string()
}

/// Splits a sentence label into tooltip lines: one window of up to
/// `WINDOW_WORDS` words starting at every word, so consecutive lines overlap
/// and the last ones shrink as the sentence runs out.
pub fn tooltip_lines(label: &str) -> Vec<String> {
    let normalized = normalize_whitespace(label);
    let words: Vec<&str> = word_re().find_iter(&normalized).map(|m| m.as_str()).collect();

    (0..words.len())
        .map(|start| {
            let end = (start + WINDOW_WORDS).min(words.len());
            words[start..end].join(" ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_words_give_nine_overlapping_windows() {
        let lines = tooltip_lines("the quick brown fox jumps over the lazy dog");
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "the quick brown fox jumps");
        assert_eq!(lines[1], "quick brown fox jumps over");
        assert_eq!(lines[4], "jumps over the lazy dog");
        assert_eq!(lines[5], "over the lazy dog");
        assert_eq!(lines[8], "dog");
    }

    #[test]
    fn collapses_whitespace_before_splitting() {
        assert_eq!(normalize_whitespace("  The cat \t\n was   chased. "), "The cat was chased.");
        let lines = tooltip_lines("  The  cat   was chased ");
        assert_eq!(lines, vec!["The cat was chased", "cat was chased", "was chased", "chased"]);
    }

    #[test]
    fn keeps_apostrophes_and_drops_punctuation() {
        let lines = tooltip_lines("It's the dog's bone, isn't it?");
        assert_eq!(lines[0], "It's the dog's bone isn't");
        assert_eq!(lines.last().map(String::as_str), Some("it"));
    }

    #[test]
    fn empty_label_has_no_lines() {
        assert!(tooltip_lines("").is_empty());
        assert!(tooltip_lines("   ").is_empty());
    }
}
