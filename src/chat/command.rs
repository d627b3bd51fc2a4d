use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/clear", "Start the conversation over"),
    ("/config", "Show the AI service settings"),
    ("/exit", "Back to the shell"),
    ("/help", "Show available commands"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

/// Slash command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Clear,
    Config,
    Help,
    Exit,
    Unknown(String),
}

/// Input types
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    // Bare `exit` also leaves chat.
    if input.eq_ignore_ascii_case("exit") {
        return Input::Command(SlashCommand::Exit);
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let parts: Vec<&str> = cmd.split_whitespace().collect();

    match parts.first().map(|p| p.to_lowercase()).as_deref() {
        Some("clear") => Input::Command(SlashCommand::Clear),
        Some("config") => Input::Command(SlashCommand::Config),
        Some("help") => Input::Command(SlashCommand::Help),
        Some("exit" | "quit" | "q") => Input::Command(SlashCommand::Exit),
        _ => Input::Command(SlashCommand::Unknown(parts.join(" "))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_input(""), Input::Empty);
        assert_eq!(parse_input("   "), Input::Empty);
    }

    #[test]
    fn test_parse_text_input() {
        assert_eq!(
            parse_input("  what is Yuno? "),
            Input::Text("what is Yuno?".to_string())
        );
    }

    #[test]
    fn test_parse_clear_and_config() {
        assert_eq!(parse_input("/clear"), Input::Command(SlashCommand::Clear));
        assert_eq!(parse_input("/config"), Input::Command(SlashCommand::Config));
        assert_eq!(parse_input("/HELP"), Input::Command(SlashCommand::Help));
    }

    #[test]
    fn test_parse_exit_commands() {
        for input in ["/exit", "/quit", "/q", "exit", "EXIT"] {
            assert_eq!(
                parse_input(input),
                Input::Command(SlashCommand::Exit),
                "{input}"
            );
        }
    }

    #[test]
    fn test_exit_inside_sentence_is_text() {
        assert!(matches!(parse_input("how do I exit vim"), Input::Text(_)));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            parse_input("/dance now"),
            Input::Command(SlashCommand::Unknown("dance now".to_string()))
        );
    }

    #[test]
    fn test_completer_no_suggestions_for_regular_text() {
        let mut completer = SlashCommandCompleter;
        let suggestions = completer.get_suggestions("hello").unwrap();
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_completer_suggestions_for_slash() {
        let mut completer = SlashCommandCompleter;
        let suggestions = completer.get_suggestions("/").unwrap();
        assert_eq!(suggestions.len(), 4);
    }

    #[test]
    fn test_completer_suggestions_filter_by_prefix() {
        let mut completer = SlashCommandCompleter;

        let suggestions = completer.get_suggestions("/c").unwrap();
        assert_eq!(suggestions.len(), 2);

        let suggestions = completer.get_suggestions("/e").unwrap();
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].starts_with("/exit"));
    }

    #[test]
    fn test_completer_completion() {
        let mut completer = SlashCommandCompleter;
        let suggestion = "/config  Show the AI service settings".to_string();
        let completion = completer.get_completion("/co", Some(suggestion)).unwrap();
        assert_eq!(completion, Some("/config".to_string()));
    }

    #[test]
    fn test_completer_completion_none() {
        let mut completer = SlashCommandCompleter;
        let completion = completer.get_completion("/x", None).unwrap();
        assert!(completion.is_none());
    }
}
