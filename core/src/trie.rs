//! Prefix trie holding the completion vocabulary.
use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::IndexError;
use crate::order::SortOrder;

/// A single node of the prefix tree.
///
/// Children are kept in a `BTreeMap` keyed by `char`, so any Unicode scalar
/// value is a valid edge and enumeration order is fixed (ascending `char`).
/// `frequency` is only meaningful when `is_terminal` is set.
#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    is_terminal: bool,
    frequency: u64,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: BTreeMap::new(),
            is_terminal: false,
            frequency: 0,
        }
    }
}

impl Drop for TrieNode {
    // Tear the subtree down with a work-list so very long words cannot
    // overflow the stack through nested drops.
    fn drop(&mut self) {
        let mut pending: Vec<TrieNode> = std::mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}

/// One completion: a full inserted word and how many times it was inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMatch {
    pub word: String,
    pub frequency: u64,
}

impl WordMatch {
    pub fn new<T: Into<String>>(word: T, frequency: u64) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }
}

/// In-memory prefix index over a vocabulary of words.
///
/// The index is filled by repeated [`insert`](Self::insert) calls and then
/// queried with [`words_with_prefix`](Self::words_with_prefix) or its lazy and
/// ordered variants. It performs no normalization of its own: `"Cat"` and
/// `"cat"` are different words.
///
/// Enumeration order is pre-order depth-first with children visited in
/// ascending `char` order. A word therefore always precedes its own
/// extensions and results come out sorted by Unicode scalar value.
///
/// # Example
/// ```
/// use listcomplete_core::PrefixIndex;
///
/// let mut index = PrefixIndex::new();
/// index.insert("maple").unwrap();
/// index.insert("map").unwrap();
/// index.insert("mango").unwrap();
///
/// let words: Vec<String> = index
///     .words_with_prefix("map")
///     .into_iter()
///     .map(|m| m.word)
///     .collect();
/// assert_eq!(words, vec!["map", "maple"]);
/// assert!(index.words_with_prefix("z").is_empty());
/// ```
#[derive(Debug)]
pub struct PrefixIndex {
    root: TrieNode,
    word_count: usize,
    node_count: usize,
    total_insertions: u64,
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixIndex {
    /// Create an empty index. The root node always exists and stands for the
    /// empty prefix.
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            word_count: 0,
            node_count: 1,
            total_insertions: 0,
        }
    }

    /// Insert one occurrence of `word`.
    ///
    /// Missing nodes along the path are created; the final node is marked
    /// terminal and its frequency incremented. Re-inserting a word creates no
    /// nodes, it only bumps the count.
    ///
    /// The empty word is rejected with [`IndexError::EmptyWord`] and leaves
    /// the index untouched.
    ///
    /// # Example
    /// ```
    /// use listcomplete_core::{IndexError, PrefixIndex};
    ///
    /// let mut index = PrefixIndex::new();
    /// index.insert("road").unwrap();
    /// index.insert("road").unwrap();
    /// assert_eq!(index.frequency("road"), 2);
    /// assert_eq!(index.insert(""), Err(IndexError::EmptyWord));
    /// ```
    pub fn insert(&mut self, word: &str) -> Result<(), IndexError> {
        self.insert_with_count(word, 1)
    }

    /// Insert `count` occurrences of `word` at once.
    ///
    /// A zero count is a no-op (no nodes are created). Frequencies saturate
    /// at `u64::MAX`.
    pub fn insert_with_count(&mut self, word: &str, count: u64) -> Result<(), IndexError> {
        if word.is_empty() {
            return Err(IndexError::EmptyWord);
        }
        if count == 0 {
            return Ok(());
        }
        self.add_occurrences(word, count);
        Ok(())
    }

    fn add_occurrences(&mut self, word: &str, count: u64) {
        let mut created = 0usize;
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = match node.children.entry(ch) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => {
                    created += 1;
                    e.insert(TrieNode::new())
                }
            };
        }
        if !node.is_terminal {
            node.is_terminal = true;
            self.word_count += 1;
        }
        node.frequency = node.frequency.saturating_add(count);
        self.node_count += created;
        self.total_insertions = self.total_insertions.saturating_add(count);
    }

    /// Follow `prefix` from the root. `None` when some character has no edge.
    fn find_node(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    /// Return every inserted word starting with `prefix`, with its frequency.
    ///
    /// An unknown prefix (or an empty index) yields an empty vector. The
    /// empty prefix enumerates the whole vocabulary.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<WordMatch> {
        self.iter_prefix(prefix).collect()
    }

    /// Lazily enumerate the words starting with `prefix`.
    ///
    /// Produces the same sequence as [`words_with_prefix`](Self::words_with_prefix)
    /// but walks the subtree only as far as the caller consumes it.
    ///
    /// # Example
    /// ```
    /// use listcomplete_core::PrefixIndex;
    ///
    /// let mut index = PrefixIndex::new();
    /// for w in ["map", "maple", "mapletree"] {
    ///     index.insert(w).unwrap();
    /// }
    /// let first: Vec<String> = index.iter_prefix("map").take(2).map(|m| m.word).collect();
    /// assert_eq!(first, vec!["map", "maple"]);
    /// ```
    pub fn iter_prefix(&self, prefix: &str) -> PrefixIter<'_> {
        match self.find_node(prefix) {
            Some(node) => PrefixIter {
                stack: vec![node.children.iter()],
                current: prefix.to_string(),
                start: node.is_terminal.then_some(node.frequency),
            },
            None => PrefixIter {
                stack: Vec::new(),
                current: String::new(),
                start: None,
            },
        }
    }

    /// Completions for `prefix` in the requested order, capped at `limit`.
    ///
    /// With [`SortOrder::Frequency`] the most frequent words come first and
    /// ties keep lexicographic order. `limit` of `None` means unbounded.
    pub fn suggest(&self, prefix: &str, order: SortOrder, limit: Option<usize>) -> Vec<WordMatch> {
        let cap = limit.unwrap_or(usize::MAX);
        match order {
            SortOrder::Lexicographic => self.iter_prefix(prefix).take(cap).collect(),
            SortOrder::Frequency => {
                let mut matches: Vec<WordMatch> = self.iter_prefix(prefix).collect();
                matches.sort_by(|a, b| b.frequency.cmp(&a.frequency));
                matches.truncate(cap);
                matches
            }
        }
    }

    /// Number of times `word` was inserted; 0 if it is absent or only a prefix.
    pub fn frequency(&self, word: &str) -> u64 {
        match self.find_node(word) {
            Some(node) if node.is_terminal => node.frequency,
            _ => 0,
        }
    }

    /// Check whether the index contains exactly the given word.
    pub fn contains_word(&self, word: &str) -> bool {
        self.find_node(word).map_or(false, |node| node.is_terminal)
    }

    /// Check whether at least one inserted word starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        match self.find_node(prefix) {
            Some(node) => node.is_terminal || !node.children.is_empty(),
            None => false,
        }
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Number of trie nodes, root included.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Sum of all word frequencies.
    pub fn total_insertions(&self) -> u64 {
        self.total_insertions
    }

    /// Add every word of `other` to this index, summing frequencies.
    pub fn merge_from(&mut self, other: &PrefixIndex) {
        for m in other.iter_prefix("") {
            self.add_occurrences(&m.word, m.frequency);
        }
        tracing::debug!(
            merged_words = other.len(),
            words = self.word_count,
            nodes = self.node_count,
            "merged prefix index"
        );
    }
}

/// Iterator returned by [`PrefixIndex::iter_prefix`].
///
/// Holds one child iterator per level of the current path; `current` is the
/// text spelled by that path.
#[derive(Debug)]
pub struct PrefixIter<'a> {
    stack: Vec<btree_map::Iter<'a, char, TrieNode>>,
    current: String,
    start: Option<u64>,
}

impl<'a> Iterator for PrefixIter<'a> {
    type Item = WordMatch;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(frequency) = self.start.take() {
            return Some(WordMatch::new(self.current.clone(), frequency));
        }

        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some((&ch, child)) => {
                    self.current.push(ch);
                    self.stack.push(child.children.iter());
                    if child.is_terminal {
                        return Some(WordMatch::new(self.current.clone(), child.frequency));
                    }
                }
                None => {
                    self.stack.pop();
                    // The bottom level belongs to the prefix itself.
                    if !self.stack.is_empty() {
                        self.current.pop();
                    }
                }
            }
        }
    }
}
