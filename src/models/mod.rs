pub mod account;
pub mod product;
pub mod recommendation;

pub use account::{Account, SigninRequest, SignupRequest};
pub use product::{Product, ProductView};
pub use recommendation::{CountInput, RecommendationRequest, RecommendationResponse};
