//! Conversation logic — the onboarding state machine and the slash-command
//! router. Both are pure; the bot service applies their results.

pub mod commands;
pub mod machine;
pub mod state;

pub use commands::{COMMAND_MENU, Command};
pub use machine::{Effect, Input, MenuOption, Reply, Transition, step};
pub use state::ConversationState;
