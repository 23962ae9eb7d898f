use super::string_completer::StringCompleter;
use crate::analyzer::builtins;
use crate::settings::{Setting, Settings};
use rustyline::completion::{Completer, Pair};
use rustyline::Context;

const COMMAND_NAMES: &[&str] = &[":help", ":set", ":settings", ":builtin", ":defined"];

/// `:`-prefixed commands of the REPL.
pub struct Commands;

impl Commands {
    pub fn new() -> Self {
        Self {}
    }

    /// Returns `false` when the input is not a command and should be analyzed.
    pub fn dispatch(
        &self,
        input: &str,
        settings: &mut Settings,
        defined: &[String],
    ) -> anyhow::Result<bool> {
        let parts: Vec<&str> = input.trim().split_whitespace().collect();

        if let Some(true) = parts.first().map(|e| e.starts_with(':')) {
            match &parts[..] {
                [":help"] => self.handle_help(),
                [":set", argument] => self.handle_set(argument, settings)?,
                [":settings"] => self.handle_settings(settings),
                [":builtin", name] => self.handle_builtin(name),
                [":defined"] => self.handle_defined(defined),
                _ => return Err(anyhow!("Invalid command")),
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn handle_help(&self) {
        println!("Available commands: ");
        self.display_help(":help", "Show help on the available commands");
        self.display_help(":set (+|-)setting", "Enable or disable a setting");
        self.display_help(":settings", "Show the values of all settings");
        self.display_help(":builtin name", "Tell whether `name` is a known built-in");
        self.display_help(":defined", "List the names defined in this session");
        println!(
            "Settings: {}",
            Setting::ALL
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    fn handle_set(&self, argument: &str, settings: &mut Settings) -> anyhow::Result<()> {
        if let Some(name) = argument.strip_prefix('+') {
            settings.enable(name.parse()?);
            Ok(())
        } else if let Some(name) = argument.strip_prefix('-') {
            settings.disable(name.parse()?);
            Ok(())
        } else {
            Err(anyhow!(
                "Setting must be a known setting and prefixed with either + or -"
            ))
        }
    }

    fn handle_settings(&self, settings: &Settings) {
        let info = settings
            .as_vec()
            .iter()
            .map(|(s, f)| format!("{}: {}", s, if *f { "enabled" } else { "disabled" }))
            .collect::<Vec<_>>()
            .join(" ");

        println!("Settings+> {}", info);
    }

    fn handle_builtin(&self, name: &str) {
        if builtins::is_builtin(name) {
            println!("{} is a built-in", name);
        } else {
            println!("{} is not a built-in", name);
        }
    }

    fn handle_defined(&self, defined: &[String]) {
        if defined.is_empty() {
            println!("Nothing defined yet");
        } else {
            println!("{}", defined.join(" "));
        }
    }

    #[inline]
    fn display_help(&self, usage: &str, description: &str) {
        println!("{:<25} {}", usage, description);
    }
}

impl Default for Commands {
    fn default() -> Self {
        Self::new()
    }
}

/// Completes command names, only when the line starts with `:`.
pub struct CommandCompleter {
    names: StringCompleter,
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self {
            names: StringCompleter::from(COMMAND_NAMES.iter().copied()),
        }
    }
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if line.trim_start().starts_with(':') && !line[..pos].contains(' ') {
            // ':' is not a word delimiter, complete the whole head
            let start = line.len() - line.trim_start().len();
            let (_, matches) = self.names.complete(&line[start..pos], pos - start, ctx)?;
            Ok((start, matches))
        } else {
            Ok((pos, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_commands_are_not_dispatched() {
        let mut settings = Settings::default();
        let commands = Commands::new();

        assert!(!commands.dispatch("(+ 1 2)", &mut settings, &[]).unwrap());
        assert!(!commands.dispatch("", &mut settings, &[]).unwrap());
    }

    #[test]
    fn test_set_command() {
        let mut settings = Settings::default();
        let commands = Commands::new();

        assert!(commands.dispatch("  :set +symbols", &mut settings, &[]).unwrap());
        assert!(settings.is_enabled(Setting::Symbols));

        assert!(commands.dispatch(":set -symbols", &mut settings, &[]).unwrap());
        assert!(!settings.is_enabled(Setting::Symbols));
    }

    #[test]
    fn test_invalid_commands() {
        let mut settings = Settings::default();
        let commands = Commands::new();

        assert!(commands.dispatch(":frobnicate", &mut settings, &[]).is_err());
        assert!(commands.dispatch(":set symbols", &mut settings, &[]).is_err());
        assert_eq!(
            commands
                .dispatch(":set +colors", &mut settings, &[])
                .unwrap_err()
                .to_string(),
            "Unknown setting colors"
        );
    }
}
