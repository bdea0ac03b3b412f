//! Rule-based Vietnamese grapheme-to-phoneme conversion.
//!
//! [`SyllableCodec`] splits an orthographic syllable into initial, medial and
//! final, extracts its tone and renders an IPA-like form with a tone digit:
//!
//! ```
//! use vig2p_core::SyllableCodec;
//!
//! let codec = SyllableCodec::global();
//! assert_eq!(codec.to_phonetic("tiếng việt"), "tiəŋ3 viət6");
//! ```

pub mod ipa;
pub mod settings;
pub mod syllable;
pub mod text;
pub mod tone;
pub mod unicode;

pub use syllable::{SyllableAnalysis, SyllableCodec, SyllableComponents};
pub use tone::Tone;
