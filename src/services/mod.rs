pub mod gemini;
pub mod generation;

pub use gemini::GeminiClient;
pub use generation::{GenerationError, GenerationService, TextGenerator};
