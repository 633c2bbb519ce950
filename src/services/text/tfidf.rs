//! TF-IDF weighting of tag text
//!
//! ```text
//! tf(t, d)    = count of term t in document d
//! idf(t)      = ln((1 + n) / (1 + df(t))) + 1
//! tfidf(t, d) = tf(t, d) * idf(t), each row L2-normalised
//! ```
//!
//! Documents without any vocabulary term produce an all-zero vector.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{tokenize, StopWords};

/// Sparse row vector, entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(i, _)| *i);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, w)| *w == 0.0)
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a) = self.entries[i];
            let (b_idx, b) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a * b;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Cosine of the angle between two vectors, 0 when either is zero
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return 0.0;
        }
        self.dot(other) / denom
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Learns a vocabulary and IDF weights from a corpus and turns documents into TF-IDF rows
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    stop_words: StopWords,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    fn terms(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    /// Learns the vocabulary (sorted alphabetically) and smoothed IDF weights.
    /// `None` documents count toward `n` but contribute no terms.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[Option<S>]) {
        let n_docs = documents.len();
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents.iter().flatten() {
            let unique: BTreeSet<String> = self.terms(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        self.vocabulary = doc_freq
            .keys()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        self.idf = doc_freq
            .values()
            .map(|&df| ((1 + n_docs) as f64 / (1 + df) as f64).ln() + 1.0)
            .collect();
    }

    /// Converts one document into a normalised TF-IDF row over the learned vocabulary
    pub fn transform_one(&self, document: Option<&str>) -> SparseVector {
        let Some(text) = document else {
            return SparseVector::default();
        };

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.terms(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let mut row = SparseVector::from_entries(entries);
        row.normalize();
        row
    }

    pub fn transform<S: AsRef<str>>(&self, documents: &[Option<S>]) -> Vec<SparseVector> {
        documents
            .iter()
            .map(|d| self.transform_one(d.as_ref().map(|s| s.as_ref())))
            .collect()
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[Option<S>]) -> Vec<SparseVector> {
        self.fit(documents);
        self.transform(documents)
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Learned IDF weight for a term, if it is in the vocabulary
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&idx| self.idf[idx])
    }
}
