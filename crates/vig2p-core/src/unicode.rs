//! Character-level tables for Vietnamese vowels.
//!
//! Every vowel is a base letter (`a ă â e ê i o ô ơ u ư y`, which may
//! already carry a quality mark) optionally combined with one tone mark.
//! The tables here map precomposed characters to `(base, tone)` and back.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::tone::Tone;

/// Base vowel and its toned forms, in [`Tone::MARKED`] order.
const TONED_VOWELS: &[(char, [char; 5])] = &[
    ('a', ['à', 'á', 'ả', 'ã', 'ạ']),
    ('ă', ['ằ', 'ắ', 'ẳ', 'ẵ', 'ặ']),
    ('â', ['ầ', 'ấ', 'ẩ', 'ẫ', 'ậ']),
    ('e', ['è', 'é', 'ẻ', 'ẽ', 'ẹ']),
    ('ê', ['ề', 'ế', 'ể', 'ễ', 'ệ']),
    ('i', ['ì', 'í', 'ỉ', 'ĩ', 'ị']),
    ('o', ['ò', 'ó', 'ỏ', 'õ', 'ọ']),
    ('ô', ['ồ', 'ố', 'ổ', 'ỗ', 'ộ']),
    ('ơ', ['ờ', 'ớ', 'ở', 'ỡ', 'ợ']),
    ('u', ['ù', 'ú', 'ủ', 'ũ', 'ụ']),
    ('ư', ['ừ', 'ứ', 'ử', 'ữ', 'ự']),
    ('y', ['ỳ', 'ý', 'ỷ', 'ỹ', 'ỵ']),
    ('A', ['À', 'Á', 'Ả', 'Ã', 'Ạ']),
    ('Ă', ['Ằ', 'Ắ', 'Ẳ', 'Ẵ', 'Ặ']),
    ('Â', ['Ầ', 'Ấ', 'Ẩ', 'Ẫ', 'Ậ']),
    ('E', ['È', 'É', 'Ẻ', 'Ẽ', 'Ẹ']),
    ('Ê', ['Ề', 'Ế', 'Ể', 'Ễ', 'Ệ']),
    ('I', ['Ì', 'Í', 'Ỉ', 'Ĩ', 'Ị']),
    ('O', ['Ò', 'Ó', 'Ỏ', 'Õ', 'Ọ']),
    ('Ô', ['Ồ', 'Ố', 'Ổ', 'Ỗ', 'Ộ']),
    ('Ơ', ['Ờ', 'Ớ', 'Ở', 'Ỡ', 'Ợ']),
    ('U', ['Ù', 'Ú', 'Ủ', 'Ũ', 'Ụ']),
    ('Ư', ['Ừ', 'Ứ', 'Ử', 'Ữ', 'Ự']),
    ('Y', ['Ỳ', 'Ý', 'Ỷ', 'Ỹ', 'Ỵ']),
];

/// (plain letter, combining quality mark, composed base vowel)
const QUALITY_MARKS: &[(char, char, char)] = &[
    ('a', '\u{0306}', 'ă'),
    ('a', '\u{0302}', 'â'),
    ('e', '\u{0302}', 'ê'),
    ('o', '\u{0302}', 'ô'),
    ('o', '\u{031B}', 'ơ'),
    ('u', '\u{031B}', 'ư'),
    ('A', '\u{0306}', 'Ă'),
    ('A', '\u{0302}', 'Â'),
    ('E', '\u{0302}', 'Ê'),
    ('O', '\u{0302}', 'Ô'),
    ('O', '\u{031B}', 'Ơ'),
    ('U', '\u{031B}', 'Ư'),
];

pub struct VowelTable {
    toned: HashMap<char, (char, Tone)>,
    composed: HashMap<(char, Tone), char>,
    bases: HashSet<char>,
}

impl VowelTable {
    pub fn new() -> Self {
        let mut toned = HashMap::new();
        let mut composed = HashMap::new();
        let mut bases = HashSet::new();
        for &(base, forms) in TONED_VOWELS {
            bases.insert(base);
            for (tone, form) in Tone::MARKED.into_iter().zip(forms) {
                toned.insert(form, (base, tone));
                composed.insert((base, tone), form);
            }
        }
        Self {
            toned,
            composed,
            bases,
        }
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static VowelTable {
        static INSTANCE: OnceLock<VowelTable> = OnceLock::new();
        INSTANCE.get_or_init(VowelTable::new)
    }

    /// Split a vowel into its base and tone. Untoned vowels return
    /// `Tone::Level`; non-vowels return `None`.
    pub fn analyse(&self, c: char) -> Option<(char, Tone)> {
        if let Some(&pair) = self.toned.get(&c) {
            Some(pair)
        } else if self.bases.contains(&c) {
            Some((c, Tone::Level))
        } else {
            None
        }
    }

    pub fn split_tone(&self, c: char) -> Option<(char, Tone)> {
        self.toned.get(&c).copied()
    }

    pub fn base_vowel(&self, c: char) -> char {
        self.toned.get(&c).map_or(c, |&(base, _)| base)
    }

    /// Compose `base` with `tone`. Any tone already on `base` is replaced.
    pub fn apply_tone(&self, vowel: char, tone: Tone) -> Option<char> {
        let base = self.base_vowel(vowel);
        if !self.bases.contains(&base) {
            return None;
        }
        match tone {
            Tone::Level => Some(base),
            _ => self.composed.get(&(base, tone)).copied(),
        }
    }

    pub fn is_vowel(&self, c: char) -> bool {
        self.bases.contains(&self.base_vowel(c))
    }

    /// Iterate over every toned vowel in table order.
    pub fn toned_vowels(&self) -> impl Iterator<Item = char> + '_ {
        TONED_VOWELS.iter().flat_map(|(_, forms)| forms.iter().copied())
    }
}

impl Default for VowelTable {
    fn default() -> Self {
        Self::new()
    }
}

pub fn base_vowel(c: char) -> char {
    VowelTable::global().base_vowel(c)
}

pub fn split_tone(c: char) -> Option<(char, Tone)> {
    VowelTable::global().split_tone(c)
}

pub fn apply_tone(vowel: char, tone: Tone) -> Option<char> {
    VowelTable::global().apply_tone(vowel, tone)
}

pub fn is_vowel(c: char) -> bool {
    VowelTable::global().is_vowel(c)
}

/// True for vowels carrying a breve, circumflex or horn (`ă â ê ô ơ ư`).
pub fn has_quality_mark(c: char) -> bool {
    matches!(
        base_vowel(c),
        'ă' | 'â' | 'ê' | 'ô' | 'ơ' | 'ư' | 'Ă' | 'Â' | 'Ê' | 'Ô' | 'Ơ' | 'Ư'
    )
}

/// Combining Diacritical Marks block (U+0300..U+036F).
pub fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

fn compose_quality(base: char, mark: char) -> Option<char> {
    QUALITY_MARKS
        .iter()
        .find(|&&(plain, m, _)| plain == base && m == mark)
        .map(|&(_, _, composed)| composed)
}

/// Fold a vowel followed by combining quality and tone marks into a single
/// precomposed character. Marks may appear in any order. Marks that cannot
/// be folded (a second tone, a quality mark on the wrong letter) are kept
/// after the folded vowel.
///
/// Strings without combining marks are returned borrowed.
pub fn fold_marks(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_combining_mark) {
        return Cow::Borrowed(s);
    }

    let table = VowelTable::global();
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        let Some((mut base, mut tone)) = table.analyse(c) else {
            out.push(c);
            continue;
        };

        let mut leftover = String::new();
        while let Some(&m) = chars.peek() {
            if !is_combining_mark(m) {
                break;
            }
            match (Tone::from_combining(m), compose_quality(base, m)) {
                (Some(t), _) if tone == Tone::Level => tone = t,
                (None, Some(q)) => base = q,
                _ => leftover.push(m),
            }
            chars.next();
        }

        out.push(table.apply_tone(base, tone).unwrap_or(base));
        out.push_str(&leftover);
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_and_apply_are_inverse() {
        let table = VowelTable::global();
        for c in table.toned_vowels() {
            let (base, tone) = table.split_tone(c).unwrap();
            assert_eq!(table.apply_tone(base, tone), Some(c), "vowel {c}");
        }
    }

    #[test]
    fn base_vowel_keeps_quality_marks() {
        assert_eq!(base_vowel('ế'), 'ê');
        assert_eq!(base_vowel('ợ'), 'ơ');
        assert_eq!(base_vowel('Ặ'), 'Ă');
        assert_eq!(base_vowel('ă'), 'ă');
        assert_eq!(base_vowel('t'), 't');
    }

    #[test]
    fn base_vowel_is_idempotent() {
        let table = VowelTable::global();
        for c in table.toned_vowels().chain("abcđxyz ".chars()) {
            let once = base_vowel(c);
            assert_eq!(base_vowel(once), once);
        }
    }

    #[test]
    fn apply_tone_replaces_existing_tone() {
        assert_eq!(apply_tone('á', Tone::LowBroken), Some('ạ'));
        assert_eq!(apply_tone('ệ', Tone::Level), Some('ê'));
        assert_eq!(apply_tone('k', Tone::HighRising), None);
    }

    #[test]
    fn vowel_classification() {
        assert!(is_vowel('a'));
        assert!(is_vowel('ữ'));
        assert!(is_vowel('Y'));
        assert!(!is_vowel('đ'));
        assert!(!is_vowel('q'));
        assert!(has_quality_mark('ấ'));
        assert!(has_quality_mark('ư'));
        assert!(!has_quality_mark('á'));
    }

    #[test]
    fn fold_precomposed_is_borrowed() {
        assert!(matches!(fold_marks("tiếng"), Cow::Borrowed("tiếng")));
    }

    #[test]
    fn fold_decomposed_sequences() {
        // ê + acute
        assert_eq!(fold_marks("tie\u{0302}\u{0301}ng"), "tiếng");
        // horn then dot below (canonical order)
        assert_eq!(fold_marks("o\u{031B}\u{0323}"), "ợ");
        // dot below before circumflex (canonical order for â)
        assert_eq!(fold_marks("a\u{0323}\u{0302}"), "ậ");
        // tone on an already precomposed quality vowel
        assert_eq!(fold_marks("vi\u{00EA}\u{0323}t"), "việt");
        assert_eq!(fold_marks("E\u{0301}"), "É");
    }

    #[test]
    fn fold_keeps_unfoldable_marks() {
        // second tone mark cannot be folded
        assert_eq!(fold_marks("a\u{0301}\u{0300}"), "á\u{0300}");
        // circumflex does not apply to i
        assert_eq!(fold_marks("i\u{0302}"), "i\u{0302}");
        // combining mark after a consonant
        assert_eq!(fold_marks("k\u{0301}"), "k\u{0301}");
    }
}
