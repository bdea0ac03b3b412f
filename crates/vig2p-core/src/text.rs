//! Corpus text cleanup applied before phonetic conversion.

use std::sync::OnceLock;

use regex::Regex;

use crate::unicode::fold_marks;

static NON_LETTER: OnceLock<Regex> = OnceLock::new();

fn non_letter_pattern() -> &'static Regex {
    NON_LETTER.get_or_init(|| {
        // Latin letters plus the Latin-1 / Latin Extended range that holds
        // every precomposed Vietnamese letter (À..ỹ).
        Regex::new(r"[^a-zA-ZÀ-ỹ\s]+").expect("cleanup pattern must compile")
    })
}

/// Replace each run of digits, punctuation and symbols with a single space
/// and trim the result. Whitespace inside the text is kept.
///
/// Combining marks are folded first, so the result is precomposed.
pub fn clean_text(text: &str) -> String {
    non_letter_pattern()
        .replace_all(&fold_marks(text), " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_digits() {
        assert_eq!(clean_text("Xin chào, thế giới!"), "Xin chào  thế giới");
        assert_eq!(clean_text("năm 2024."), "năm");
    }

    #[test]
    fn folds_decomposed_letters() {
        assert_eq!(clean_text("tie\u{0302}\u{0301}ng!"), "tiếng");
    }

    #[test]
    fn keeps_vietnamese_letters() {
        let s = "Đường phố Hà Nội";
        assert_eq!(clean_text(s), s);
    }

    #[test]
    fn separates_tokens_glued_by_punctuation() {
        assert_eq!(clean_text("a,b;c"), "a b c");
    }

    #[test]
    fn empty_and_symbol_only() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("... 123 !!!"), "");
    }
}
