pub mod command;
pub mod lexicon;
pub mod string_completer;

use crate::analyzer::{self, builtins, AnalysisResult};
use crate::ast::json;
use crate::babble_config_directory;
use crate::emitter;
use crate::error::reporting::ErrorReporter;
use crate::error::Error;
use crate::reader::Reader;
use crate::repl::command::CommandCompleter;
use crate::repl::command::Commands;
use crate::repl::lexicon::Lexicon;
use crate::repl::string_completer::StringCompleter;
use crate::settings::{Setting, Settings};
use crate::BABBLE_VERSION;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::ValidationContext;
use rustyline::validate::ValidationResult;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use std::borrow::Cow;

pub struct Repl {
    reader: Reader,
    settings: Settings,
    commands: Commands,
    editor: Editor<ReplHelper>,
    lexicon: Lexicon,
}

pub struct ReplHelper {
    names_completer: StringCompleter,
    command_completer: CommandCompleter,
    bracket_validator: rustyline::validate::MatchingBracketValidator,
    bracket_highlighter: rustyline::highlight::MatchingBracketHighlighter,
}

impl ReplHelper {
    /// Completes built-ins and whatever the session defined so far.
    pub fn new(defined: &[String]) -> Self {
        let names = builtins::BUILTINS
            .iter()
            .map(|name| name.to_string())
            .chain(defined.iter().cloned());

        Self {
            names_completer: StringCompleter::from(names),
            command_completer: CommandCompleter::new(),
            bracket_validator: rustyline::validate::MatchingBracketValidator::new(),
            bracket_highlighter: rustyline::highlight::MatchingBracketHighlighter::new(),
        }
    }
}

impl Helper for ReplHelper {}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context) -> Option<Self::Hint> {
        None
    }
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &rustyline::Context,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.command_completer.complete(line, pos, ctx)?;

        if !matches.is_empty() {
            return Ok((start, matches));
        }

        self.names_completer.complete(line, pos, ctx)
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.bracket_highlighter.highlight(line, pos)
    }

    fn highlight_char(&self, line: &str, pos: usize) -> bool {
        self.bracket_highlighter.highlight_char(line, pos)
    }
}

impl Validator for ReplHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        self.bracket_validator.validate(ctx)
    }
}

impl Repl {
    pub fn new(reader: Reader, settings: Settings) -> anyhow::Result<Self> {
        Self::create_directories()?;

        let editor = Editor::<ReplHelper>::with_config(Self::default_config());
        let commands = Commands::new();

        Ok(Self {
            reader,
            settings,
            editor,
            commands,
            lexicon: Lexicon::new(),
        })
    }

    // main read-analyze-print loop
    pub fn run_loop(&mut self) -> anyhow::Result<()> {
        self.editor.load_history(&Self::history_path())?;
        self.banner();

        loop {
            let helper = ReplHelper::new(self.lexicon.names());
            self.editor.set_helper(Some(helper));

            let prompt = self.prompt();
            match self.editor.readline(&prompt) {
                Ok(input) => {
                    if let Err(e) = self.handle_input(&input) {
                        eprintln!("{}", e);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        self.editor.save_history(&Self::history_path())?;
        Ok(())
    }

    fn banner(&self) {
        println!("BABBLE - analyze and reformat Clojure-like code");
        println!("Version: {}\n", BABBLE_VERSION);
        println!("Type :help for help.");
    }

    fn handle_input(&mut self, input: &str) -> anyhow::Result<()> {
        if input.trim().is_empty() {
            return Ok(());
        }

        if !self
            .commands
            .dispatch(input, &mut self.settings, self.lexicon.names())?
        {
            self.eval(input)?
        }
        Ok(())
    }

    fn eval(&mut self, source: &str) -> anyhow::Result<()> {
        let forms = match self.reader.read(source) {
            Ok(forms) => forms,
            Err(e) => {
                ErrorReporter::new("repl", source).report_error(&Error::from(e))?;
                return Ok(());
            }
        };

        if self.settings.is_enabled(Setting::Debug) {
            println!("{:#?}", forms);
        }

        let result = analyzer::analyze(forms);

        let refused = self.lexicon.record(&result);
        if !refused.is_empty() {
            for error in &refused {
                eprintln!("error: {}", error);
            }
            return Ok(());
        }

        self.print_result(&result)?;

        if !result.is_error() {
            for name in self.lexicon.unrecognized(&result) {
                eprintln!("warning: {} is not recognized", name);
            }
        }
        Ok(())
    }

    fn print_result(&self, result: &AnalysisResult) -> anyhow::Result<()> {
        for error in &result.errors {
            eprintln!("error: {}", error);
        }
        for warning in &result.warnings {
            eprintln!("warning: {}", warning);
        }

        if !result.is_error() {
            println!("{}", emitter::ast_to_code(&result.ast));
        }

        if self.settings.is_enabled(Setting::Symbols) {
            let symbols = &result.symbols;
            println!("built-ins: {}", symbols.built_ins.to_vec().join(" "));
            println!("locals:    {}", symbols.locally_defined.to_vec().join(" "));
            println!("unknown:   {}", symbols.unknowns.to_vec().join(" "));
        }

        if self.settings.is_enabled(Setting::Ast) {
            println!("{}", json::to_string_pretty(&result.ast)?);
        }

        if self.settings.is_enabled(Setting::Json) {
            println!("{}", result.to_json()?);
        }

        Ok(())
    }

    #[inline]
    fn prompt(&self) -> String {
        String::from("babble> ")
    }

    fn default_config() -> rustyline::config::Config {
        let config_builder = rustyline::config::Config::builder();

        config_builder
            .auto_add_history(true)
            .history_ignore_dups(true)
            .history_ignore_space(false)
            .max_history_size(500)
            .completion_prompt_limit(100)
            .build()
    }

    fn history_path() -> std::path::PathBuf {
        Self::config_dir().join("history")
    }

    #[inline]
    fn create_directories() -> anyhow::Result<()> {
        std::fs::create_dir_all(Self::config_dir())?;

        if !Self::history_path().exists() {
            std::fs::File::create(Self::history_path())?;
        }

        Ok(())
    }

    #[inline]
    fn config_dir() -> std::path::PathBuf {
        babble_config_directory().join("repl")
    }
}
