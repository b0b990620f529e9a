//! Interpretation of one line typed at the prompt.

/// Slash commands offered by completion and hints.
pub const COMMANDS: [&str; 4] = ["/coping", "/resources", "/history", "/quit"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Nothing to do (blank line).
    Empty,
    Quit,
    Coping,
    Resources,
    History,
    /// A slash command we do not know.
    Unknown(String),
    /// Text to send to the assistant.
    Say(String),
}

/// Parses a line. A bare number selects from the quick replies last offered.
pub fn parse(line: &str, offered: &[String]) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }

    match trimmed {
        "quit" | "exit" | "/quit" | "/exit" => return Input::Quit,
        "/coping" => return Input::Coping,
        "/resources" => return Input::Resources,
        "/history" => return Input::History,
        _ => {}
    }

    if trimmed.starts_with('/') {
        return Input::Unknown(trimmed.to_string());
    }

    if let Ok(choice) = trimmed.parse::<usize>() {
        if let Some(action) = choice.checked_sub(1).and_then(|i| offered.get(i)) {
            return Input::Say(action.clone());
        }
    }

    Input::Say(trimmed.to_string())
}
