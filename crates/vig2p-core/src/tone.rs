//! The six Vietnamese tones and their combining diacritics.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// ngang: unmarked.
    Level,
    /// huyền: grave accent (à).
    LowFalling,
    /// sắc: acute accent (á).
    HighRising,
    /// hỏi: hook above (ả).
    LowRising,
    /// ngã: tilde (ã).
    HighBroken,
    /// nặng: dot below (ạ).
    LowBroken,
}

impl Tone {
    /// All tones in digit order (`1`..`6`).
    pub const ALL: [Tone; 6] = [
        Tone::Level,
        Tone::LowFalling,
        Tone::HighRising,
        Tone::LowRising,
        Tone::HighBroken,
        Tone::LowBroken,
    ];

    /// The five marked tones, in the column order of the vowel table.
    pub const MARKED: [Tone; 5] = [
        Tone::LowFalling,
        Tone::HighRising,
        Tone::LowRising,
        Tone::HighBroken,
        Tone::LowBroken,
    ];

    /// Combining diacritic for this tone, `""` for the level tone.
    pub fn mark(self) -> &'static str {
        match self {
            Tone::Level => "",
            Tone::LowFalling => "\u{0300}",
            Tone::HighRising => "\u{0301}",
            Tone::LowRising => "\u{0309}",
            Tone::HighBroken => "\u{0303}",
            Tone::LowBroken => "\u{0323}",
        }
    }

    pub fn from_mark(mark: &str) -> Option<Tone> {
        Tone::ALL.into_iter().find(|t| t.mark() == mark)
    }

    /// Map a single combining character to its tone. The level tone has no
    /// combining character and is never returned.
    pub fn from_combining(c: char) -> Option<Tone> {
        match c {
            '\u{0300}' => Some(Tone::LowFalling),
            '\u{0301}' => Some(Tone::HighRising),
            '\u{0309}' => Some(Tone::LowRising),
            '\u{0303}' => Some(Tone::HighBroken),
            '\u{0323}' => Some(Tone::LowBroken),
            _ => None,
        }
    }

    /// Vietnamese name of the tone.
    pub fn name(self) -> &'static str {
        match self {
            Tone::Level => "ngang",
            Tone::LowFalling => "huyền",
            Tone::HighRising => "sắc",
            Tone::LowRising => "hỏi",
            Tone::HighBroken => "ngã",
            Tone::LowBroken => "nặng",
        }
    }

    /// ASCII key used in the `[tones]` section of the IPA table.
    pub fn key(self) -> &'static str {
        match self {
            Tone::Level => "ngang",
            Tone::LowFalling => "huyen",
            Tone::HighRising => "sac",
            Tone::LowRising => "hoi",
            Tone::HighBroken => "nga",
            Tone::LowBroken => "nang",
        }
    }

    pub fn from_key(key: &str) -> Option<Tone> {
        Tone::ALL.into_iter().find(|t| t.key() == key)
    }

    pub fn default_digit(self) -> char {
        match self {
            Tone::Level => '1',
            Tone::LowFalling => '2',
            Tone::HighRising => '3',
            Tone::LowRising => '4',
            Tone::HighBroken => '5',
            Tone::LowBroken => '6',
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown tone: {0}")]
pub struct ParseToneError(String);

impl FromStr for Tone {
    type Err = ParseToneError;

    /// Accepts either the Vietnamese name (`sắc`) or the ASCII key (`sac`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|t| t.name() == s || t.key() == s)
            .ok_or_else(|| ParseToneError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_are_unique() {
        for (i, a) in Tone::ALL.iter().enumerate() {
            for b in &Tone::ALL[i + 1..] {
                assert_ne!(a.mark(), b.mark(), "{a} and {b} share a mark");
            }
        }
    }

    #[test]
    fn from_mark_inverts_mark() {
        for tone in Tone::ALL {
            assert_eq!(Tone::from_mark(tone.mark()), Some(tone));
        }
        assert_eq!(Tone::from_mark("\u{0302}"), None);
    }

    #[test]
    fn from_combining_covers_marked_tones() {
        for tone in Tone::MARKED {
            let c = tone.mark().chars().next().unwrap();
            assert_eq!(Tone::from_combining(c), Some(tone));
        }
        assert_eq!(Tone::from_combining('a'), None);
    }

    #[test]
    fn default_digits_are_one_through_six() {
        let digits: String = Tone::ALL.iter().map(|t| t.default_digit()).collect();
        assert_eq!(digits, "123456");
    }

    #[test]
    fn parse_name_or_key() {
        assert_eq!("sắc".parse::<Tone>(), Ok(Tone::HighRising));
        assert_eq!("nang".parse::<Tone>(), Ok(Tone::LowBroken));
        assert_eq!("ngang".parse::<Tone>(), Ok(Tone::Level));
        assert!("rising".parse::<Tone>().is_err());
    }

    #[test]
    fn display_uses_vietnamese_name() {
        assert_eq!(Tone::LowRising.to_string(), "hỏi");
    }
}
