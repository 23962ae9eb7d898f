use crate::analyzer;
use crate::ast::json;
use crate::reader::DEFAULT_MAX_DEPTH;
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(about = "Print the syntax tree of <input> as JSON")]
pub struct Opts {
    /// file to read, `-` reads stdin
    #[clap(default_value = "-")]
    input: String,

    /// annotate symbols with their classification
    #[clap(long)]
    analyze: bool,

    /// print the whole tree on one line
    #[clap(long)]
    compact: bool,

    #[clap(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

pub fn execute(opts: &Opts) -> anyhow::Result<()> {
    let source = super::read_input(&opts.input)?;
    let mut forms = super::read_program(&opts.input, &source, opts.max_depth)?;

    if opts.analyze {
        forms = analyzer::analyze(forms).ast;
    }

    let text = if opts.compact {
        json::to_string(&forms)?
    } else {
        json::to_string_pretty(&forms)?
    };
    println!("{}", text);
    Ok(())
}
