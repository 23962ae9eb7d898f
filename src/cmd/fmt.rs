use crate::emitter;
use crate::reader::DEFAULT_MAX_DEPTH;
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(about = "Print the program in <input> in canonical form")]
pub struct Opts {
    /// file to format, `-` reads stdin
    #[clap(default_value = "-")]
    input: String,

    #[clap(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

pub fn execute(opts: &Opts) -> anyhow::Result<()> {
    let source = super::read_input(&opts.input)?;
    let forms = super::read_program(&opts.input, &source, opts.max_depth)?;

    log::debug!("formatting {} top-level forms", forms.len());
    println!("{}", emitter::ast_to_code(&forms));
    Ok(())
}
