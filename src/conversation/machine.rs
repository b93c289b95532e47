//! Conversation state machine — pure `(state, input) → transition` logic.
//!
//! Each inbound event is consumed by exactly one transition. When an
//! input-consuming step (name, job) lands on a prompt-only step, that step's
//! prompt becomes the reply of the same transition, so the user is always
//! told what to send next.

use super::state::ConversationState;

pub const ASK_NAME_PROMPT: &str = "What is your name?";
pub const EDIT_DETAILS_PROMPT: &str = "Let's update your details. What is your name?";
pub const ASK_JOB_PROMPT: &str = "What job are you looking for?";
pub const ASK_QUESTION_PROMPT: &str = "What would you like to ask?";
pub const PROFILE_DELETED: &str =
    "Your profile has been deleted. Send any message to start over.";

/// What the user sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A text message.
    Text(String),
    /// A button tap carrying an action code.
    Postback(String),
    /// Anything else: stickers, images, follow events.
    Other,
}

impl Input {
    /// Non-blank text, if this input carries any.
    fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }
}

/// The four actions offered by the button menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    JobListings,
    AskQuestion,
    EditDetails,
    DeleteProfile,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        Self::JobListings,
        Self::AskQuestion,
        Self::EditDetails,
        Self::DeleteProfile,
    ];

    /// Postback data carried by the menu button.
    pub fn postback_data(&self) -> &'static str {
        match self {
            Self::JobListings => "option1",
            Self::AskQuestion => "option2",
            Self::EditDetails => "option3",
            Self::DeleteProfile => "option4",
        }
    }

    /// Button label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::JobListings => "Job listings",
            Self::AskQuestion => "Ask a question",
            Self::EditDetails => "Edit details",
            Self::DeleteProfile => "Delete profile",
        }
    }

    pub fn from_postback(data: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|option| option.postback_data() == data)
    }
}

/// Reply content, resolved into platform messages by the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// Button menu showing the user's name and job preference.
    Menu,
    /// Carousel of every job in the catalog.
    JobCarousel,
}

/// Store mutation requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SetName(String),
    SetJob(String),
    DeleteUser,
}

/// Result of feeding one input to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: ConversationState,
    pub reply: Option<Reply>,
    pub effect: Option<Effect>,
}

impl Transition {
    fn to(next: ConversationState, reply: Reply) -> Self {
        Self {
            next,
            reply: Some(reply),
            effect: None,
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }
}

fn text(s: &str) -> Reply {
    Reply::Text(s.to_string())
}

/// Advance the conversation by one input.
pub fn step(state: ConversationState, input: &Input) -> Transition {
    use ConversationState::*;

    match state {
        AskName => Transition::to(ProcessName, text(ASK_NAME_PROMPT)),
        EditDetails => Transition::to(ProcessName, text(EDIT_DETAILS_PROMPT)),
        ProcessName => match input.text() {
            Some(name) => Transition::to(ProcessJob, text(ASK_JOB_PROMPT))
                .with_effect(Effect::SetName(name.to_string())),
            None => Transition::to(ProcessName, text(ASK_NAME_PROMPT)),
        },
        AskJob => Transition::to(ProcessJob, text(ASK_JOB_PROMPT)),
        ProcessJob => match input.text() {
            Some(job) => Transition::to(DisplayMenu, Reply::Menu)
                .with_effect(Effect::SetJob(job.to_string())),
            None => Transition::to(ProcessJob, text(ASK_JOB_PROMPT)),
        },
        DisplayMenu => match input {
            Input::Postback(data) => match MenuOption::from_postback(data) {
                Some(MenuOption::JobListings) => Transition::to(DisplayMenu, Reply::JobCarousel),
                Some(MenuOption::AskQuestion) => {
                    Transition::to(ProcessQuestion, text(ASK_QUESTION_PROMPT))
                }
                Some(MenuOption::EditDetails) => {
                    Transition::to(ProcessName, text(EDIT_DETAILS_PROMPT))
                }
                Some(MenuOption::DeleteProfile) => {
                    Transition::to(AskName, text(PROFILE_DELETED)).with_effect(Effect::DeleteUser)
                }
                None => Transition::to(DisplayMenu, Reply::Menu),
            },
            _ => Transition::to(DisplayMenu, Reply::Menu),
        },
        AskQuestion => Transition::to(ProcessQuestion, text(ASK_QUESTION_PROMPT)),
        ProcessQuestion => match input.text() {
            Some(question) => Transition::to(DisplayMenu, Reply::Text(format!("You asked: {question}"))),
            None => Transition::to(ProcessQuestion, text(ASK_QUESTION_PROMPT)),
        },
    }
}
