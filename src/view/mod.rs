pub mod controller;
pub mod notice;

pub use controller::ViewController;
pub use notice::{Notice, NoticeKind, NOTICE_TTL};

/// Top-level screens of the logbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Timeline,
    NewEntry,
    Personas,
    Settings,
}
