//! Text normalisation shared by the asset index and the matcher.

/// Remove every line break from `text`.
///
/// Caption names are single-line, so line breaks in a transcript file are
/// formatting artifacts.  Both `\n` and `\r` are dropped so CRLF files match
/// the same captions as LF files.
///
/// ```
/// use caption_voice::caption::strip_newlines;
///
/// assert_eq!(strip_newlines("こんにちは\r\n世界\n"), "こんにちは世界");
/// ```
pub fn strip_newlines(text: &str) -> String {
    text.chars().filter(|&c| c != '\n' && c != '\r').collect()
}

/// Normalise a decoded transcript into an index key.
///
/// A leading byte-order mark is removed as well; editors that save
/// transcripts as UTF-8 often prepend one.
pub fn normalize_transcript(text: &str) -> String {
    strip_newlines(text.strip_prefix('\u{FEFF}').unwrap_or(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_lf_and_crlf() {
        assert_eq!(strip_newlines("a\nb"), "ab");
        assert_eq!(strip_newlines("a\r\nb\r\n"), "ab");
    }

    #[test]
    fn keeps_other_whitespace() {
        assert_eq!(strip_newlines(" a\tb　c "), " a\tb　c ");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(strip_newlines(""), "");
        assert_eq!(normalize_transcript("\n"), "");
    }

    #[test]
    fn normalize_removes_bom() {
        assert_eq!(normalize_transcript("\u{FEFF}おはよう\n"), "おはよう");
    }

    #[test]
    fn normalize_keeps_inner_bom_like_chars() {
        assert_eq!(normalize_transcript("a\u{FEFF}b"), "a\u{FEFF}b");
    }
}
