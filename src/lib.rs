pub mod config;
pub mod document_verifier;
pub mod identity_extractor;
pub mod models;
pub mod processing;
pub mod utils;
pub mod validation;
pub mod verification;

pub use config::Config;
pub use document_verifier::{DocumentVerifier, VerificationReport};
pub use identity_extractor::IdentityExtractor;
pub use validation::Comparator;
