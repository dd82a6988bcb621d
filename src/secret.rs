use std::fmt;

/// A write-only credential field.
///
/// The server never sends the secret back, only whether one is stored. On
/// every load the input is cleared and `is_set` is copied from the server; on
/// save the input goes out as-is, where an empty string means "keep the
/// stored secret".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RedactedSecret {
    input: String,
    is_set: bool,
}

impl RedactedSecret {
    /// Fresh field after a fetch. Whatever else the payload held is ignored.
    pub fn from_server(is_set: bool) -> Self {
        Self {
            input: String::new(),
            is_set,
        }
    }

    pub fn edit(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Whether the server reported a stored secret on the last fetch.
    pub fn is_set(&self) -> bool {
        self.is_set
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Value for the save body; empty leaves the stored secret untouched.
    pub fn wire_value(&self) -> String {
        self.input.clone()
    }

    pub fn placeholder(&self) -> &'static str {
        if self.is_set {
            "stored (leave empty to keep)"
        } else {
            "not set"
        }
    }
}

impl fmt::Debug for RedactedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactedSecret")
            .field("input", &if self.input.is_empty() { "" } else { "<redacted>" })
            .field("is_set", &self.is_set)
            .finish()
    }
}
