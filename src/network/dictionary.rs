use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Result of a claim attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// Not a dictionary word
    Absent,
    /// In the dictionary, but another caller claimed it first
    AlreadyClaimed,
    /// This caller flipped the flag and now owns the expansion
    Claimed,
}

/// The universe of known words, each with a one-way "claimed" flag.
///
/// Entries are inserted once, before traversal, and never removed. The map
/// is sharded so lookups on unrelated words do not contend; a claim flips the
/// entry's own atomic flag and never takes a write lock.
#[derive(Debug, Default)]
pub struct DictionaryStore {
    entries: DashMap<Box<str>, AtomicBool>,
    claimed: AtomicUsize,
}

impl DictionaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store with every word unclaimed. Duplicate words collapse into one entry.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        for word in words {
            store.insert(word);
        }
        store
    }

    /// Add an unclaimed word. Re-inserting an existing word keeps its current flag.
    pub fn insert(&self, word: impl Into<String>) {
        let word: String = word.into();
        self.entries
            .entry(word.into_boxed_str())
            .or_insert_with(|| AtomicBool::new(false));
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Atomically flip `word` from unclaimed to claimed.
    ///
    /// Returns `true` for exactly one caller per word; `false` when the word
    /// is absent or someone already claimed it.
    pub fn try_claim(&self, word: &str) -> bool {
        self.claim(word) == ClaimOutcome::Claimed
    }

    /// Like [`try_claim`](Self::try_claim), but tells absent words from lost races
    pub fn claim(&self, word: &str) -> ClaimOutcome {
        let Some(flag) = self.entries.get(word) else {
            return ClaimOutcome::Absent;
        };
        match flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) => {
                self.claimed.fetch_add(1, Ordering::Relaxed);
                ClaimOutcome::Claimed
            }
            Err(_) => ClaimOutcome::AlreadyClaimed,
        }
    }

    pub fn is_claimed(&self, word: &str) -> bool {
        self.entries
            .get(word)
            .is_some_and(|flag| flag.load(Ordering::Acquire))
    }

    /// Running count of successful claims
    pub fn claimed_count(&self) -> usize {
        self.claimed.load(Ordering::Relaxed)
    }

    /// Count claimed entries by scanning every flag
    pub fn network_size(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().load(Ordering::Acquire))
            .count()
    }

    /// Claimed words, in no particular order
    pub fn network_members(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.value().load(Ordering::Acquire))
            .map(|entry| entry.key().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
