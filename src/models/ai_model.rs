/// A selectable model identifier and its menu label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiModel {
    pub id: &'static str,
    pub label: &'static str,
}

pub const DEFAULT_AI_MODEL: &str = "gemini-3-flash-preview";

pub const AI_MODELS: &[AiModel] = &[
    AiModel {
        id: "gemini-3-flash-preview",
        label: "Gemini 3 Flash Preview (fastest)",
    },
    AiModel {
        id: "gemini-3-pro-preview",
        label: "Gemini 3 Pro Preview (strong reasoning)",
    },
    AiModel {
        id: "gemini-2.5-flash",
        label: "Gemini 2.5 Flash (stable, economical)",
    },
    AiModel {
        id: "gemini-2.5-pro",
        label: "Gemini 2.5 Pro (stable, powerful)",
    },
    AiModel {
        id: "gemini-2.5-flash-lite",
        label: "Gemini 2.5 Flash Lite (cheapest)",
    },
];

impl AiModel {
    pub fn find(id: &str) -> Option<&'static AiModel> {
        AI_MODELS.iter().find(|model| model.id == id)
    }
}

/// Server value to the model the form should show. Empty means unset.
pub fn model_or_default(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        DEFAULT_AI_MODEL.to_string()
    } else {
        value.to_string()
    }
}
