pub mod controller;
pub mod state;

pub use controller::{local_clock, Clock, DraftController};
pub use state::{Completion, DraftEdit, DraftState, DraftStatus, EditorMode, EntryDraft, Ticket};
