//! Button menu shown once a user has finished onboarding.

use crate::conversation::MenuOption;
use crate::line::message::{Action, Message, Template};
use crate::store::UserRecord;

pub const MENU_ALT_TEXT: &str = "Menu";

/// LINE limits for a buttons template without a thumbnail.
const MAX_TITLE_CHARS: usize = 40;
const MAX_TEXT_CHARS_WITH_TITLE: usize = 60;
const MAX_TEXT_CHARS: usize = 160;

/// Menu text line for a job preference.
pub fn menu_text(job: &str) -> String {
    format!("Looking for: {job}")
}

/// Buttons template with the user's name as title, their job preference as
/// text, and one postback button per menu option.
pub fn menu(user: &UserRecord) -> Message {
    let title = (!user.name.trim().is_empty()).then(|| truncate(&user.name, MAX_TITLE_CHARS));
    let text_limit = if title.is_some() {
        MAX_TEXT_CHARS_WITH_TITLE
    } else {
        MAX_TEXT_CHARS
    };

    let actions = MenuOption::ALL
        .iter()
        .map(|option| Action::postback(option.label(), option.postback_data()))
        .collect();

    Message::template(
        MENU_ALT_TEXT,
        Template::Buttons {
            title,
            text: truncate(&menu_text(&user.job), text_limit),
            actions,
        },
    )
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
