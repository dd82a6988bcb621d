use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Entry category. The presets are what the editor offers; anything else the
/// server stores (GitHub sync writes `Development`) is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    General,
    Work,
    Personal,
    ProjectNoty,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::General => "General",
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::ProjectNoty => "Project Noty",
            Category::Other(label) => label,
        }
    }

    /// Blank input falls back to `General`.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "General" => Category::General,
            "Work" => Category::Work,
            "Personal" => Category::Personal,
            "Project Noty" => Category::ProjectNoty,
            other => Category::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Mood {
    #[default]
    Neutral,
    Productive,
    Tired,
    Excited,
    Stressed,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Neutral,
        Mood::Productive,
        Mood::Tired,
        Mood::Excited,
        Mood::Stressed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Neutral => "Neutral",
            Mood::Productive => "Productive",
            Mood::Tired => "Tired",
            Mood::Excited => "Excited",
            Mood::Stressed => "Stressed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(value))
    }
}

/// Where an entry came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntrySource {
    #[default]
    Manual,
    GitHub,
    Other(String),
}

impl EntrySource {
    pub fn as_str(&self) -> &str {
        match self {
            EntrySource::Manual => "Manual",
            EntrySource::GitHub => "GitHub",
            EntrySource::Other(label) => label,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "Manual" => EntrySource::Manual,
            "GitHub" | "GitHub-Auto" => EntrySource::GitHub,
            other => EntrySource::Other(other.to_string()),
        }
    }
}

/// A persisted logbook entry as the client sees it. Tags are already decoded
/// from their stored form.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: i64,
    pub content: String,
    pub entry_date: NaiveDate,
    pub entry_time: NaiveTime,
    pub tags: Vec<String>,
    pub category: Category,
    pub mood: Option<Mood>,
    pub source: EntrySource,
    pub created_at: Option<String>,
}

impl LogEntry {
    /// Time of day as shown on the timeline, truncated to minutes.
    pub fn display_time(&self) -> String {
        self.entry_time.format("%H:%M").to_string()
    }

    pub fn is_from_github(&self) -> bool {
        self.source == EntrySource::GitHub
    }
}

/// Body of a create request. Tags go out as a plain array.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewEntry {
    pub content: String,
    #[serde(serialize_with = "serialize_date")]
    pub entry_date: NaiveDate,
    #[serde(serialize_with = "serialize_time")]
    pub entry_time: NaiveTime,
    pub tags: Vec<String>,
    pub category: Category,
    pub mood: Mood,
    pub source: &'static str,
}

fn serialize_date<S: serde::Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
}

fn serialize_time<S: serde::Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.format("%H:%M:%S").to_string())
}
