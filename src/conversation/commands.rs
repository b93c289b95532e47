//! Slash commands for the stateless command bot.

pub const COMMAND_MENU: &str = "Commands:\n\
    /echo <text> - returns user input\n\
    /1 - job listings(table)\n\
    /2 - job listings(carousel)";

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/echo <text>`
    Echo(String),
    /// `/1`: job listings as a table bubble.
    JobTable,
    /// `/2`: job listings as a carousel.
    JobCarousel,
    /// Anything unrecognised.
    Menu,
}

impl Command {
    /// Parse a text message into a command.
    pub fn parse(text: &str) -> Self {
        let (head, rest) = match text.split_once(' ') {
            Some((head, rest)) => (head, Some(rest)),
            None => (text, None),
        };

        match (head, rest) {
            ("/echo", Some(rest)) => Self::Echo(rest.to_string()),
            ("/1", None) => Self::JobTable,
            ("/2", None) => Self::JobCarousel,
            _ => Self::Menu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_keeps_everything_after_first_space() {
        assert_eq!(Command::parse("/echo hello"), Command::Echo("hello".into()));
        assert_eq!(
            Command::parse("/echo  two  spaces "),
            Command::Echo(" two  spaces ".into())
        );
    }

    #[test]
    fn bare_echo_shows_menu() {
        assert_eq!(Command::parse("/echo"), Command::Menu);
    }

    #[test]
    fn listing_commands_are_exact() {
        assert_eq!(Command::parse("/1"), Command::JobTable);
        assert_eq!(Command::parse("/2"), Command::JobCarousel);
        assert_eq!(Command::parse("/1 please"), Command::Menu);
        assert_eq!(Command::parse("/3"), Command::Menu);
    }

    #[test]
    fn anything_else_is_menu() {
        assert_eq!(Command::parse(""), Command::Menu);
        assert_eq!(Command::parse("hello"), Command::Menu);
        assert_eq!(Command::parse("echo hi"), Command::Menu);
    }

    #[test]
    fn menu_lists_every_command() {
        for cmd in ["/echo <text>", "/1", "/2"] {
            assert!(COMMAND_MENU.contains(cmd), "menu should mention {cmd}");
        }
        assert!(COMMAND_MENU.starts_with("Commands:\n"));
    }
}
