//! Interactive text input, behind a trait so workflows can be tested with
//! scripted answers.

/// Ask the user for a line of text.
pub trait Prompt {
    /// Returns the trimmed input, or `None` when the user cancelled (empty
    /// input, ESC, or a non-interactive terminal).
    fn prompt_text(&self, message: &str) -> Option<String>;
}

/// Terminal prompt backed by `inquire`.
pub struct ConsolePrompt;

impl Prompt for ConsolePrompt {
    fn prompt_text(&self, message: &str) -> Option<String> {
        let answer = inquire::Text::new(message)
            .with_help_message(r"Example: C:\Games\World_of_Tanks_EU\Aslain_Modpack (ENTER to cancel)")
            .prompt();

        match answer {
            Ok(input) => {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            // ESC, ctrl-c, or stdin that is not a terminal all read as
            // "the user declined to type a path"
            Err(_) => None,
        }
    }
}
