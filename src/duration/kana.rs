//! Offline transliteration for text that is already phonetic.
//!
//! Captions written in kana need no dictionary: katakana is folded to
//! hiragana, separators and symbols pass through unchanged.  Ideographs have
//! no reading without a dictionary, so any kanji makes the call fail and the
//! estimator falls back to its overhead-only duration for that caption.

use super::{PhoneticTranscription, TransliterationError, Transliterator};

/// Katakana block range that has a hiragana counterpart (ァ..=ヶ).
const KATAKANA_FOLDABLE: std::ops::RangeInclusive<char> = '\u{30A1}'..='\u{30F6}';
/// Distance between a katakana and its hiragana counterpart.
const KATAKANA_TO_HIRAGANA: u32 = 0x60;

/// Kana pass-through transliterator.
///
/// # Examples
///
/// ```
/// use caption_voice::duration::{KanaTransliterator, Transliterator};
///
/// let t = KanaTransliterator;
/// assert_eq!(t.transliterate("カタカナ、です").unwrap().as_str(), "かたかな、です");
/// assert!(t.transliterate("漢字").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KanaTransliterator;

impl Transliterator for KanaTransliterator {
    fn transliterate(&self, text: &str) -> Result<PhoneticTranscription, TransliterationError> {
        text.chars()
            .map(|c| {
                if is_ideograph(c) {
                    Err(TransliterationError::Unsupported { ch: c })
                } else {
                    Ok(fold_katakana(c))
                }
            })
            .collect::<Result<String, _>>()
            .map(PhoneticTranscription::new)
    }
}

fn fold_katakana(c: char) -> char {
    if KATAKANA_FOLDABLE.contains(&c) {
        char::from_u32(c as u32 - KATAKANA_TO_HIRAGANA).unwrap_or(c)
    } else {
        c
    }
}

/// CJK ideographs, including the iteration mark 々 which repeats the
/// preceding kanji's reading.
fn is_ideograph(c: char) -> bool {
    matches!(c,
        '\u{3005}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2FA1F}')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Result<String, TransliterationError> {
        KanaTransliterator
            .transliterate(text)
            .map(PhoneticTranscription::into_string)
    }

    #[test]
    fn hiragana_passes_through() {
        assert_eq!(run("こんにちは").unwrap(), "こんにちは");
    }

    #[test]
    fn katakana_folds_to_hiragana() {
        assert_eq!(run("ボイスロイド").unwrap(), "ぼいすろいど");
    }

    #[test]
    fn long_vowel_mark_is_kept() {
        assert_eq!(run("スーパー").unwrap(), "すーぱー");
    }

    #[test]
    fn separators_pass_through() {
        assert_eq!(run("あ、い, う　え お").unwrap(), "あ、い, う　え お");
    }

    #[test]
    fn ascii_passes_through() {
        assert_eq!(run("OK 123").unwrap(), "OK 123");
    }

    #[test]
    fn kanji_is_unsupported() {
        let err = run("今日は").unwrap_err();
        assert!(matches!(err, TransliterationError::Unsupported { ch: '今' }));
    }

    #[test]
    fn iteration_mark_is_unsupported() {
        assert!(run("々").is_err());
    }

    #[test]
    fn empty_text_is_empty_transcription() {
        assert_eq!(run("").unwrap(), "");
    }
}
