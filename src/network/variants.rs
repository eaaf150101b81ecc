//! Edit-distance-1 candidate generation.
//!
//! Candidates are built by slicing the source word at character boundaries
//! into one reusable buffer. Nothing is de-duplicated here: substituting a
//! character with itself reproduces the word, and the dictionary lookup
//! filters such candidates out.

use std::collections::HashSet;
use std::fmt;
use std::iter;

use crate::core::errors::{NetworkError, Result};

/// Ordered set of letters used for insertions and substitutions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            letters: ('a'..='z').collect(),
        }
    }
}

impl Alphabet {
    /// Build an alphabet from its letters, in order. Rejects empty input and repeats.
    pub fn new(letters: &str) -> Result<Self> {
        if letters.is_empty() {
            return Err(NetworkError::configuration_field(
                "alphabet cannot be empty",
                "alphabet",
            ));
        }
        let mut seen = HashSet::new();
        for c in letters.chars() {
            if !seen.insert(c) {
                return Err(NetworkError::configuration_field(
                    format!("alphabet repeats the letter '{c}'"),
                    "alphabet",
                ));
            }
        }
        Ok(Self {
            letters: letters.chars().collect(),
        })
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letters.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Number of candidates generated for `word`: `(2 * |alphabet| + 1) * len + |alphabet|`.
///
/// That is `(len + 1) * |alphabet|` insertions, `len * |alphabet|`
/// substitutions and `len` deletions.
pub fn variant_count(word: &str, alphabet: &Alphabet) -> usize {
    let len = word.chars().count();
    (2 * alphabet.len() + 1) * len + alphabet.len()
}

/// Stream every edit-distance-1 candidate of `word` through `visit`.
///
/// Order is fixed: all insertions (boundary by boundary, letter by letter),
/// then for each character its substitutions followed by its deletion.
/// The `&str` handed to `visit` is only valid for that call.
/// Returns the number of candidates visited.
pub fn for_each_variant<F>(word: &str, alphabet: &Alphabet, mut visit: F) -> usize
where
    F: FnMut(&str),
{
    // byte offsets of every character boundary, including both ends
    let boundaries: Vec<usize> = word
        .char_indices()
        .map(|(i, _)| i)
        .chain(iter::once(word.len()))
        .collect();
    let mut buf = String::with_capacity(word.len() + 4);
    let mut visited = 0;

    for &at in &boundaries {
        for &letter in alphabet.letters() {
            buf.clear();
            buf.push_str(&word[..at]);
            buf.push(letter);
            buf.push_str(&word[at..]);
            visit(&buf);
            visited += 1;
        }
    }

    for span in boundaries.windows(2) {
        let (start, end) = (span[0], span[1]);
        for &letter in alphabet.letters() {
            buf.clear();
            buf.push_str(&word[..start]);
            buf.push(letter);
            buf.push_str(&word[end..]);
            visit(&buf);
            visited += 1;
        }

        buf.clear();
        buf.push_str(&word[..start]);
        buf.push_str(&word[end..]);
        visit(&buf);
        visited += 1;
    }

    visited
}

/// All edit-distance-1 candidates of `word`, duplicates included
pub fn variants_of(word: &str, alphabet: &Alphabet) -> Vec<String> {
    let mut out = Vec::with_capacity(variant_count(word, alphabet));
    for_each_variant(word, alphabet, |candidate| out.push(candidate.to_owned()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Reference Levenshtein distance over chars
    fn levenshtein(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let mut prev: Vec<usize> = (0..=b.len()).collect();
        for i in 1..=a.len() {
            let mut cur = vec![i; b.len() + 1];
            for j in 1..=b.len() {
                let cost = usize::from(a[i - 1] != b[j - 1]);
                cur[j] = (prev[j] + 1).min(cur[j - 1] + 1).min(prev[j - 1] + cost);
            }
            prev = cur;
        }
        prev[b.len()]
    }

    #[test]
    fn test_variant_count_for_cat() {
        let alphabet = Alphabet::default();
        let variants = variants_of("cat", &alphabet);
        // 4 * 26 insertions, 3 * 26 substitutions, 3 deletions
        assert_eq!(variants.len(), 185);
        assert_eq!(variants.len(), variant_count("cat", &alphabet));

        for expected in ["bat", "cot", "cab", "at", "ct", "ca", "cats", "scat", "chat"] {
            assert!(variants.iter().any(|v| v == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_first_character_is_substituted() {
        let alphabet = Alphabet::new("xy").unwrap();
        let variants = variants_of("ab", &alphabet);
        assert_eq!(
            variants,
            vec![
                // insertions at boundaries 0, 1, 2
                "xab", "yab", "axb", "ayb", "abx", "aby",
                // 'a': substitutions then deletion
                "xb", "yb", "b",
                // 'b': substitutions then deletion
                "ax", "ay", "a",
            ]
        );
    }

    #[test]
    fn test_variant_count_matches_generator() {
        let alphabet = Alphabet::new("xyz").unwrap();
        for word in ["", "a", "ab", "abc", "héllo"] {
            let visited = for_each_variant(word, &alphabet, |_| {});
            assert_eq!(visited, variant_count(word, &alphabet), "word = {word:?}");
        }
        assert_eq!(variants_of("ab", &Alphabet::new("xy").unwrap()).len(), 12);
    }

    #[test]
    fn test_empty_word_only_inserts() {
        let alphabet = Alphabet::default();
        let variants = variants_of("", &alphabet);
        assert_eq!(variants.len(), 26);
        assert_eq!(variant_count("", &alphabet), 26);
        assert_eq!(variants.first().map(String::as_str), Some("a"));
        assert_eq!(variants.last().map(String::as_str), Some("z"));
    }

    #[test]
    fn test_every_variant_is_within_distance_one() {
        let alphabet = Alphabet::default();
        let variants = variants_of("cat", &alphabet);
        let mut self_copies = 0;
        for v in &variants {
            match levenshtein("cat", v) {
                0 => self_copies += 1,
                1 => {}
                d => panic!("{v} is at distance {d}"),
            }
        }
        // each character substituted by itself once
        assert_eq!(self_copies, 3);
    }

    #[test]
    fn test_covers_brute_force_neighbours() {
        let alphabet = Alphabet::new("abct").unwrap();
        let generated: HashSet<String> = variants_of("cat", &alphabet).into_iter().collect();

        // every string of length 2..=4 over the alphabet
        let mut dictionary = vec![String::new()];
        let mut all = Vec::new();
        for _ in 0..4 {
            dictionary = dictionary
                .iter()
                .flat_map(|w| alphabet.letters().iter().map(move |c| format!("{w}{c}")))
                .collect();
            all.extend(dictionary.iter().cloned());
        }

        let neighbours: Vec<&String> = all.iter().filter(|w| levenshtein("cat", w) == 1).collect();
        assert!(!neighbours.is_empty());
        for n in neighbours {
            assert!(generated.contains(n), "{n} not generated");
        }
    }

    #[test]
    fn test_non_ascii_alphabet() {
        let alphabet = Alphabet::new("åäö").unwrap();
        let variants = variants_of("åb", &alphabet);
        assert_eq!(variants.len(), 17);
        assert_eq!(variants.len(), variant_count("åb", &alphabet));
        assert!(variants.iter().any(|v| v == "äb"));
        assert!(variants.iter().any(|v| v == "b"));
        assert!(variants.iter().any(|v| v == "åbö"));
    }

    #[test]
    fn test_deterministic() {
        let alphabet = Alphabet::default();
        assert_eq!(variants_of("causes", &alphabet), variants_of("causes", &alphabet));
    }

    #[test]
    fn test_alphabet_validation() {
        assert!(Alphabet::new("").is_err());
        assert!(Alphabet::new("abca").is_err());
        let alphabet = Alphabet::new("xyz").unwrap();
        assert_eq!(alphabet.to_string(), "xyz");
        assert_eq!(Alphabet::default().to_string(), "abcdefghijklmnopqrstuvwxyz");
    }
}
