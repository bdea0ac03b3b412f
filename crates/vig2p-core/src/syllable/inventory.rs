//! Closed inventories of the three syllable slots.

/// Initial consonants in declaration order. Matching uses
/// [`by_length_desc`], which keeps this order among equal lengths.
pub const INITIALS: [&str; 25] = [
    "b", "ch", "d", "đ", "g", "gh", "gi", "h", "k", "kh", "l", "m", "n", "nh", "ng", "ngh", "ph",
    "qu", "r", "s", "t", "th", "tr", "v", "x",
];

/// Final consonants in declaration order.
pub const FINALS: [&str; 8] = ["c", "ch", "m", "n", "ng", "nh", "p", "t"];

/// Untoned single vowels. Each also appears in its five toned forms in
/// the medial inventory.
pub const BASE_VOWELS: [char; 12] = ['a', 'ă', 'â', 'e', 'ê', 'i', 'o', 'ô', 'ơ', 'u', 'ư', 'y'];

/// Vowel sequences listed as medials in their own right.
pub const COMPOUND_MEDIALS: [&str; 3] = ["ia", "ưa", "ua"];

/// Sort by decreasing character count. `sort_by_key` is stable, so entries
/// of the same length keep their declaration order.
pub(crate) fn by_length_desc(entries: &[&'static str]) -> Vec<&'static str> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));
    sorted
}

pub fn is_initial(s: &str) -> bool {
    INITIALS.contains(&s)
}

pub fn is_final(s: &str) -> bool {
    FINALS.contains(&s)
}
