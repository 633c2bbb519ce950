pub mod accounts;
pub mod recommendations;
pub mod search;
pub mod storefront;
pub mod text;

pub use accounts::{AccountError, AccountStore, InMemoryAccountStore, PgAccountStore};
pub use recommendations::{recommend, Recommender, SimilarityIndex};
pub use search::filter_by_substring;
