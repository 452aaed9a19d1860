pub mod backend;
pub mod checker;
pub mod gemini;
pub mod prompt;
pub mod render;
pub mod session;
pub mod store;

pub use checker::SymptomCheckerService;
