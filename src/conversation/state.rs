//! Conversation states — which step of the chat each user is on.

use serde::{Deserialize, Serialize};

/// The steps of the conversation.
///
/// New users progress linearly: AskName → ProcessName → AskJob → ProcessJob →
/// DisplayMenu. From the menu the user branches into questions, editing their
/// details, or deleting their profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    AskName,
    ProcessName,
    AskJob,
    ProcessJob,
    DisplayMenu,
    AskQuestion,
    ProcessQuestion,
    EditDetails,
}

impl ConversationState {
    pub const ALL: [ConversationState; 8] = [
        Self::AskName,
        Self::ProcessName,
        Self::AskJob,
        Self::ProcessJob,
        Self::DisplayMenu,
        Self::AskQuestion,
        Self::ProcessQuestion,
        Self::EditDetails,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AskName => "ask_name",
            Self::ProcessName => "process_name",
            Self::AskJob => "ask_job",
            Self::ProcessJob => "process_job",
            Self::DisplayMenu => "display_menu",
            Self::AskQuestion => "ask_question",
            Self::ProcessQuestion => "process_question",
            Self::EditDetails => "edit_details",
        }
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::AskName
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConversationState {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| format!("Unknown conversation state: {s}"))
    }
}
