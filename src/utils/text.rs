const SUMMARY_WORDS: usize = 10;

/// Short summary of a text: the first ten words, ellipsis when truncated.
pub fn summarize(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > SUMMARY_WORDS {
        format!("{}...", words[..SUMMARY_WORDS].join(" "))
    } else {
        words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_short_text() {
        assert_eq!(summarize("a quick draft"), "a quick draft");
    }

    #[test]
    fn test_summarize_truncates_long_text() {
        let text = "one two three four five six seven eight nine ten eleven twelve";
        assert_eq!(
            summarize(text),
            "one two three four five six seven eight nine ten..."
        );
    }

    #[test]
    fn test_summarize_collapses_whitespace() {
        assert_eq!(summarize("  spaced   out  "), "spaced out");
    }
}
