use crate::reader::{Reader, DEFAULT_MAX_DEPTH};
use crate::repl::Repl;
use crate::settings::{Setting, Settings};
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(about = "Start the REPL")]
pub struct Opts {
    /// settings to enable on start, e.g. `--enable symbols --enable ast`
    #[clap(long = "enable")]
    enabled: Vec<Setting>,

    #[clap(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            enabled: vec![],
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

pub fn execute(opts: &Opts) -> anyhow::Result<()> {
    let mut settings = Settings::default();

    for setting in &opts.enabled {
        settings.enable(*setting);
    }

    let mut repl = Repl::new(Reader::with_max_depth(opts.max_depth), settings)?;
    repl.run_loop()
}
