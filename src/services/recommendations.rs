use std::{num::NonZeroUsize, sync::Arc, sync::OnceLock, time::Instant};

use crate::{
    catalog::Catalog,
    models::ProductView,
    services::text::{SparseVector, StopWords, TfidfVectorizer},
};

/// TF-IDF rows for every product in a catalog, in catalog order
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    vectors: Vec<SparseVector>,
    vocabulary_size: usize,
}

impl SimilarityIndex {
    /// Vectorizes the tag text of every product
    pub fn build(catalog: &Catalog) -> Self {
        let documents: Vec<Option<&str>> = catalog.products().iter().map(|p| p.tag_text()).collect();

        let mut vectorizer = TfidfVectorizer::new(StopWords::english());
        let vectors = vectorizer.fit_transform(&documents);

        Self {
            vectors,
            vocabulary_size: vectorizer.vocabulary_size(),
        }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    /// Cosine similarity between two catalog rows
    pub fn similarity(&self, a: usize, b: usize) -> f64 {
        match (self.vectors.get(a), self.vectors.get(b)) {
            (Some(a), Some(b)) => a.cosine(b),
            _ => 0.0,
        }
    }

    /// Row indices most similar to `row`, best first, excluding `row` itself.
    ///
    /// Rows are ordered by descending score with ties kept in catalog order.
    pub fn rank(&self, row: usize, top_n: usize) -> Vec<usize> {
        let Some(query) = self.vectors.get(row) else {
            return Vec::new();
        };

        let mut scored: Vec<(usize, f64)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(idx, v)| (idx, query.cosine(v)))
            .collect();

        // sort_by is stable, so equal scores keep catalog order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .filter(|(idx, _)| *idx != row)
            .take(top_n)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Content-based recommendations over a shared catalog.
///
/// The similarity index is built once, on first use or on [`Recommender::warm`],
/// and reused for every later call. Concurrent first callers wait on the single build.
#[derive(Debug)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    index: OnceLock<SimilarityIndex>,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            index: OnceLock::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the index, building it if this is the first call
    pub fn index(&self) -> &SimilarityIndex {
        self.index.get_or_init(|| {
            let started = Instant::now();
            let index = SimilarityIndex::build(&self.catalog);
            tracing::info!(
                products = index.len(),
                vocabulary = index.vocabulary_size(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Similarity index built"
            );
            index
        })
    }

    /// Builds the index ahead of the first request
    pub fn warm(&self) {
        self.index();
    }

    /// Up to `top_n` products most similar to `item_name`.
    ///
    /// Returns `None` when no product has exactly that name.
    pub fn recommend(&self, item_name: &str, top_n: NonZeroUsize) -> Option<Vec<ProductView>> {
        let row = self.catalog.find_index_by_name(item_name)?;
        let ranked = self.index().rank(row, top_n.get());
        Some(self.catalog.rows_for_display(&ranked))
    }
}

/// One-shot recommendation that vectorizes the catalog on every call.
///
/// Equivalent to [`Recommender::recommend`] without the cached index.
pub fn recommend(catalog: &Catalog, item_name: &str, top_n: NonZeroUsize) -> Option<Vec<ProductView>> {
    let row = catalog.find_index_by_name(item_name)?;
    let ranked = SimilarityIndex::build(catalog).rank(row, top_n.get());
    Some(catalog.rows_for_display(&ranked))
}
