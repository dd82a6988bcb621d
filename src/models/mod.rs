pub mod ai_model;
pub mod entry;
pub mod persona;

pub use ai_model::{AiModel, AI_MODELS, DEFAULT_AI_MODEL};
pub use entry::{Category, EntrySource, LogEntry, Mood, NewEntry};
pub use persona::Persona;
