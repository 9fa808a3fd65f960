pub mod evaluator;
pub mod sma;
pub mod types;

pub use evaluator::{CrossoverEvaluator, evaluate};
pub use types::CrossoverSettings;
