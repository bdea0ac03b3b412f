//! Syllable segmentation, tone handling and phonetic rendering.
//!
//! A syllable is `(initial)? medial (final)?` with at most one tone mark on
//! the medial. [`SyllableCodec`] owns every table it needs and is immutable
//! after construction, so one instance can be shared across threads.

pub mod inventory;

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, debug_span};

use crate::ipa::IpaTable;
use crate::tone::Tone;
use crate::unicode::{fold_marks, has_quality_mark, VowelTable};

use inventory::{by_length_desc, BASE_VOWELS, COMPOUND_MEDIALS, FINALS, INITIALS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyllableComponents {
    pub initial: Option<String>,
    /// The nucleus, as written. May still carry the tone mark.
    pub medial: String,
    #[serde(rename = "final")]
    pub final_: Option<String>,
}

impl SyllableComponents {
    /// An empty medial means the segmentation consumed every vowel.
    pub fn is_degenerate(&self) -> bool {
        self.medial.is_empty()
    }
}

/// Everything `to_phonetic` derives from one syllable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyllableAnalysis {
    pub components: SyllableComponents,
    pub tone: Tone,
    /// Medial with its tone mark removed; the key for the IPA lookup.
    pub base_medial: String,
    pub ipa_initial: String,
    pub ipa_medial: String,
    pub ipa_final: String,
    pub tone_digit: String,
    pub phonetic: String,
}

pub struct SyllableCodec {
    /// Initials in match order (longest first).
    initials: Vec<&'static str>,
    /// Finals in match order (longest first).
    finals: Vec<&'static str>,
    matcher: Regex,
    vowels: &'static VowelTable,
    ipa: Cow<'static, IpaTable>,
}

impl SyllableCodec {
    /// Build a codec over the global IPA table.
    pub fn new() -> Self {
        Self::build(Cow::Borrowed(IpaTable::global()))
    }

    /// Build a codec that renders with its own IPA table.
    pub fn with_ipa(ipa: IpaTable) -> Self {
        Self::build(Cow::Owned(ipa))
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static SyllableCodec {
        static INSTANCE: OnceLock<SyllableCodec> = OnceLock::new();
        INSTANCE.get_or_init(SyllableCodec::new)
    }

    fn build(ipa: Cow<'static, IpaTable>) -> Self {
        let vowels = VowelTable::global();
        let initials = by_length_desc(&INITIALS);
        let finals = by_length_desc(&FINALS);

        let mut medials: Vec<String> = COMPOUND_MEDIALS.iter().map(|m| m.to_string()).collect();
        for base in BASE_VOWELS {
            medials.push(base.to_string());
            medials.extend(
                Tone::MARKED
                    .into_iter()
                    .filter_map(|tone| vowels.apply_tone(base, tone))
                    .map(String::from),
            );
        }

        let pattern = format!(
            "^(?:{})?(?:{})+(?:{})?$",
            alternation(initials.iter().copied()),
            alternation(medials.iter().map(String::as_str)),
            alternation(finals.iter().copied()),
        );
        let matcher = Regex::new(&pattern).expect("syllable pattern must compile");

        Self {
            initials,
            finals,
            matcher,
            vowels,
            ipa,
        }
    }

    pub fn ipa(&self) -> &IpaTable {
        &self.ipa
    }

    /// True iff the whole token is `(initial)? (medial)+ (final)?`.
    ///
    /// The token is folded and lower-cased the same way [`segment`](Self::segment)
    /// does it, so an accepted token always splits into inventory members.
    pub fn is_syllable(&self, token: &str) -> bool {
        !token.is_empty() && self.matcher.is_match(&fold_marks(token).to_lowercase())
    }

    /// Split a token into initial, medial and final by longest match.
    ///
    /// The token is lower-cased and folded first. The pieces concatenated
    /// always reproduce that form. The medial may come back empty (for
    /// example for `gi`); this is returned as is.
    pub fn segment(&self, token: &str) -> SyllableComponents {
        let lowered = fold_marks(token).to_lowercase();
        let mut rest = lowered.as_str();

        let initial = self.initials.iter().copied().find(|i| rest.starts_with(i));
        if let Some(i) = initial {
            rest = &rest[i.len()..];
        }

        let final_ = self.finals.iter().copied().find(|f| rest.ends_with(f));
        if let Some(f) = final_ {
            rest = &rest[..rest.len() - f.len()];
        }

        if rest.is_empty() {
            debug!(token, "segmentation left an empty medial");
        }

        SyllableComponents {
            initial: initial.map(String::from),
            medial: rest.to_string(),
            final_: final_.map(String::from),
        }
    }

    /// Concatenate the components and put `tone` on the main vowel of the
    /// medial. A medial without a vowel (`gi`, `qu` segmented whole) puts it
    /// on the first vowel of the whole syllable instead; with no vowel at
    /// all the tone is dropped.
    pub fn join(
        &self,
        initial: Option<&str>,
        medial: &str,
        final_: Option<&str>,
        tone: Option<Tone>,
    ) -> String {
        let mut nucleus: Vec<char> = medial.chars().collect();
        let mut unplaced = None;

        if let Some(tone) = tone {
            let has_final = final_.is_some_and(|f| !f.is_empty());
            match self.tone_target(&nucleus, has_final) {
                Some(idx) => {
                    if let Some(toned) = self.vowels.apply_tone(nucleus[idx], tone) {
                        nucleus[idx] = toned;
                    }
                }
                None => unplaced = Some(tone),
            }
        }

        let mut out = String::with_capacity(
            initial.map_or(0, str::len) + medial.len() + 2 + final_.map_or(0, str::len),
        );
        out.push_str(initial.unwrap_or(""));
        out.extend(nucleus);
        out.push_str(final_.unwrap_or(""));

        match unplaced {
            Some(tone) => self.tone_first_vowel(&out, tone),
            None => out,
        }
    }

    fn tone_first_vowel(&self, s: &str, tone: Tone) -> String {
        let Some((idx, c)) = s.char_indices().find(|&(_, c)| self.vowels.is_vowel(c)) else {
            debug!(syllable = s, %tone, "no vowel to carry the tone mark");
            return s.to_string();
        };
        let toned = self.vowels.apply_tone(c, tone).unwrap_or(c);

        let mut out = String::with_capacity(s.len() + 2);
        out.push_str(&s[..idx]);
        out.push(toned);
        out.push_str(&s[idx + c.len_utf8()..]);
        out
    }

    /// [`join`](Self::join) over a segmentation result.
    pub fn join_components(&self, components: &SyllableComponents, tone: Option<Tone>) -> String {
        self.join(
            components.initial.as_deref(),
            &components.medial,
            components.final_.as_deref(),
            tone,
        )
    }

    /// Index of the vowel in `nucleus` that carries the tone mark.
    fn tone_target(&self, nucleus: &[char], has_final: bool) -> Option<usize> {
        let vowels: Vec<usize> = nucleus
            .iter()
            .enumerate()
            .filter(|(_, &c)| self.vowels.is_vowel(c))
            .map(|(i, _)| i)
            .collect();

        // A mark already in place stays where the writer put it.
        if let Some(&i) = vowels
            .iter()
            .find(|&&i| self.vowels.split_tone(nucleus[i]).is_some())
        {
            return Some(i);
        }
        if let Some(&i) = vowels.iter().rev().find(|&&i| has_quality_mark(nucleus[i])) {
            return Some(i);
        }

        match vowels.len() {
            0 => None,
            1 => Some(vowels[0]),
            _ if has_final => vowels.last().copied(),
            2 => {
                let pair: String = vowels
                    .iter()
                    .flat_map(|&i| nucleus[i].to_lowercase())
                    .collect();
                if matches!(pair.as_str(), "oa" | "oe" | "uy") {
                    Some(vowels[1])
                } else {
                    Some(vowels[0])
                }
            }
            n => Some(vowels[n / 2]),
        }
    }

    /// Tone of the first toned vowel (or standalone combining tone mark).
    pub fn get_tone(&self, syllable: &str) -> Tone {
        for c in syllable.chars() {
            if let Some((_, tone)) = self.vowels.split_tone(c) {
                return tone;
            }
            if let Some(tone) = Tone::from_combining(c) {
                return tone;
            }
        }
        Tone::Level
    }

    /// Remove tone marks, keeping quality marks.
    pub fn strip_tone(&self, s: &str) -> String {
        s.chars()
            .filter(|&c| Tone::from_combining(c).is_none())
            .map(|c| self.vowels.base_vowel(c))
            .collect()
    }

    /// Analyse one token. Returns `None` if it is not a syllable.
    pub fn explain(&self, token: &str) -> Option<SyllableAnalysis> {
        if !self.is_syllable(token) {
            return None;
        }
        let folded = fold_marks(token);

        let components = self.segment(&folded);
        let tone = self.get_tone(&folded);
        let base_medial = self.strip_tone(&components.medial);

        // Table misses fall back to the written form; an unmapped tone
        // renders as nothing.
        let ipa_initial = components
            .initial
            .as_deref()
            .map(|i| self.ipa.initial(i).unwrap_or(i).to_string())
            .unwrap_or_default();
        let ipa_medial = self
            .ipa
            .medial(&base_medial)
            .unwrap_or(&base_medial)
            .to_string();
        let ipa_final = components
            .final_
            .as_deref()
            .map(|f| self.ipa.final_(f).unwrap_or(f).to_string())
            .unwrap_or_default();
        let tone_digit = self.ipa.tone_digit(tone).unwrap_or("").to_string();

        let phonetic = [
            ipa_initial.as_str(),
            ipa_medial.as_str(),
            ipa_final.as_str(),
            tone_digit.as_str(),
        ]
        .concat();

        Some(SyllableAnalysis {
            components,
            tone,
            base_medial,
            ipa_initial,
            ipa_medial,
            ipa_final,
            tone_digit,
            phonetic,
        })
    }

    /// Render whitespace-separated text. Each token maps to exactly one
    /// output token; non-syllables are copied unchanged.
    pub fn to_phonetic(&self, text: &str) -> String {
        let _span = debug_span!("to_phonetic", bytes = text.len()).entered();

        let mut out = String::with_capacity(text.len() + text.len() / 4);
        for (i, token) in text.split_whitespace().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            match self.explain(token) {
                Some(analysis) => out.push_str(&analysis.phonetic),
                None => out.push_str(token),
            }
        }
        out
    }
}

fn alternation<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

impl Default for SyllableCodec {
    fn default() -> Self {
        Self::new()
    }
}
