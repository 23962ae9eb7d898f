use crate::analyzer;
use crate::reader::DEFAULT_MAX_DEPTH;
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(about = "Analyze the program in <input> and report problems")]
pub struct Opts {
    /// file to analyze, `-` reads stdin
    #[clap(default_value = "-")]
    input: String,

    /// print the whole analysis result as JSON
    #[clap(long)]
    json: bool,

    /// treat warnings like errors
    #[clap(long)]
    deny_warnings: bool,

    #[clap(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

pub fn execute(opts: &Opts) -> anyhow::Result<()> {
    let source = super::read_input(&opts.input)?;
    let forms = super::read_program(&opts.input, &source, opts.max_depth)?;
    let result = analyzer::analyze(forms);

    if opts.json {
        println!("{}", result.to_json()?);
    } else {
        println!("{}: {}", result.status, result.message);
    }

    let failed = result.is_error() || (opts.deny_warnings && !result.is_success());
    if failed {
        Err(anyhow!("{} did not pass analysis", opts.input))
    } else {
        Ok(())
    }
}
