use crate::emitter;
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(about = "Turn the JSON syntax tree in <input> back into source code")]
pub struct Opts {
    /// file with the JSON tree, `-` reads stdin
    #[clap(default_value = "-")]
    input: String,

    /// pass undecodable input through unchanged instead of failing
    #[clap(long)]
    lenient: bool,
}

pub fn execute(opts: &Opts) -> anyhow::Result<()> {
    let text = super::read_input(&opts.input)?;

    let code = if opts.lenient {
        emitter::json_to_code(&text)
    } else {
        emitter::ast_to_code(&super::decode_program(&opts.input, &text)?)
    };

    println!("{}", code);
    Ok(())
}
