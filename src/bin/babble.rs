use babble::cmd;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(version, about = "Semantic checks and canonical formatting for babble programs")]
struct Opts {
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a program and report problems
    Check(cmd::check::Opts),
    /// Print a program in canonical form
    Fmt(cmd::fmt::Opts),
    /// Print the syntax tree of a program as JSON
    Ast(cmd::ast::Opts),
    /// Turn a JSON syntax tree back into source code
    Code(cmd::code::Opts),
    /// Start the REPL (the default)
    Repl(cmd::repl::Opts),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let opts = Opts::parse();

    match opts.command {
        Some(Command::Check(opts)) => cmd::check::execute(&opts),
        Some(Command::Fmt(opts)) => cmd::fmt::execute(&opts),
        Some(Command::Ast(opts)) => cmd::ast::execute(&opts),
        Some(Command::Code(opts)) => cmd::code::execute(&opts),
        Some(Command::Repl(opts)) => cmd::repl::execute(&opts),
        None => cmd::repl::execute(&cmd::repl::Opts::default()),
    }
}
