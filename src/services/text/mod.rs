//! Text feature extraction for product tags

pub mod stopwords;
pub mod tfidf;
pub mod tokenizer;

pub use stopwords::{StopWords, ENGLISH_STOP_WORDS};
pub use tfidf::{SparseVector, TfidfVectorizer};
pub use tokenizer::tokenize;
