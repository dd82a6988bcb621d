use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::api::wire::split_tags;
use crate::error::ActionError;
use crate::models::{Category, Mood, NewEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStatus {
    IdleEmpty,
    Editing,
    Submitting,
    Polishing,
}

/// Display toggle for the editor. Switching never touches the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Write,
    Preview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InFlight {
    Submit,
    Polish,
}

/// The entry being authored. Tags stay as the raw comma-separated input
/// until submit.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub content: String,
    pub entry_date: NaiveDate,
    pub entry_time: NaiveTime,
    pub tags_input: String,
    pub category: Category,
    pub mood: Mood,
}

impl EntryDraft {
    /// Default shape: empty, stamped with `now` to the second.
    pub fn fresh(now: NaiveDateTime) -> Self {
        Self {
            content: String::new(),
            entry_date: now.date(),
            entry_time: now.time().with_nanosecond(0).unwrap_or_else(|| now.time()),
            tags_input: String::new(),
            category: Category::General,
            mood: Mood::Neutral,
        }
    }

    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    pub fn tags(&self) -> Vec<String> {
        split_tags(&self.tags_input)
    }

    pub fn to_new_entry(&self) -> NewEntry {
        NewEntry {
            content: self.content.clone(),
            entry_date: self.entry_date,
            entry_time: self.entry_time,
            tags: self.tags(),
            category: self.category.clone(),
            mood: self.mood,
            source: "Manual",
        }
    }
}

/// One field change from the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    Content(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Tags(String),
    Category(Category),
    Mood(Mood),
}

/// Identifies one polish or submit request. A reset invalidates every
/// ticket handed out before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Whether a finished request was applied to the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The draft was reset while the request was out; its answer was dropped.
    Discarded,
}

/// New-entry authoring state. Every change goes through a named transition.
#[derive(Debug, Clone)]
pub struct DraftState {
    draft: EntryDraft,
    mode: EditorMode,
    in_flight: Option<(InFlight, Ticket)>,
    issued: u64,
    last_error: Option<String>,
}

impl DraftState {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            draft: EntryDraft::fresh(now),
            mode: EditorMode::Write,
            in_flight: None,
            issued: 0,
            last_error: None,
        }
    }

    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn status(&self) -> DraftStatus {
        match self.in_flight {
            Some((InFlight::Submit, _)) => DraftStatus::Submitting,
            Some((InFlight::Polish, _)) => DraftStatus::Polishing,
            None if self.draft.has_content() => DraftStatus::Editing,
            None => DraftStatus::IdleEmpty,
        }
    }

    pub fn edit(&mut self, edit: DraftEdit) {
        match edit {
            DraftEdit::Content(content) => self.draft.content = content,
            DraftEdit::Date(date) => self.draft.entry_date = date,
            DraftEdit::Time(time) => self.draft.entry_time = time,
            DraftEdit::Tags(tags) => self.draft.tags_input = tags,
            DraftEdit::Category(category) => self.draft.category = category,
            DraftEdit::Mood(mood) => self.draft.mood = mood,
        }
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    fn guard(&self) -> Result<(), ActionError> {
        if self.in_flight.is_some() {
            return Err(ActionError::Busy);
        }
        if !self.draft.has_content() {
            return Err(ActionError::EmptyContent);
        }
        Ok(())
    }

    fn issue(&mut self, kind: InFlight) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.in_flight = Some((kind, ticket));
        self.last_error = None;
        ticket
    }

    /// Takes the in-flight marker if it belongs to `ticket`.
    fn settle(&mut self, kind: InFlight, ticket: Ticket) -> Completion {
        if self.in_flight != Some((kind, ticket)) {
            return Completion::Discarded;
        }
        self.in_flight = None;
        Completion::Applied
    }

    /// Enters `Polishing` and hands back the text to send.
    pub fn begin_polish(&mut self) -> Result<(Ticket, String), ActionError> {
        self.guard()?;
        Ok((self.issue(InFlight::Polish), self.draft.content.clone()))
    }

    /// Success replaces the content wholesale; failure keeps it.
    pub fn finish_polish(&mut self, ticket: Ticket, result: Result<String, String>) -> Completion {
        let completion = self.settle(InFlight::Polish, ticket);
        if completion == Completion::Applied {
            match result {
                Ok(polished) => self.draft.content = polished,
                Err(message) => self.last_error = Some(message),
            }
        }
        completion
    }

    /// Enters `Submitting` and hands back the create body.
    pub fn begin_submit(&mut self) -> Result<(Ticket, NewEntry), ActionError> {
        self.guard()?;
        Ok((self.issue(InFlight::Submit), self.draft.to_new_entry()))
    }

    /// Success resets to the default shape; failure keeps every field.
    pub fn finish_submit(
        &mut self,
        ticket: Ticket,
        result: Result<(), String>,
        now: NaiveDateTime,
    ) -> Completion {
        let completion = self.settle(InFlight::Submit, ticket);
        if completion == Completion::Applied {
            match result {
                Ok(()) => self.reset(now),
                Err(message) => self.last_error = Some(message),
            }
        }
        completion
    }

    /// Drops the draft without persisting anything. A request already out
    /// keeps going but its answer will be discarded.
    pub fn cancel(&mut self, now: NaiveDateTime) {
        self.reset(now);
    }

    fn reset(&mut self, now: NaiveDateTime) {
        self.draft = EntryDraft::fresh(now);
        self.mode = EditorMode::Write;
        self.in_flight = None;
        self.last_error = None;
    }
}
