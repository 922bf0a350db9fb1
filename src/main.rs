mod args;

use std::process::ExitCode;

use clap::Parser;
use logline::{open_log_file, Renderer};

use crate::args::Args;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Err(err) => {
            let root = err.root_cause();

            eprint!("\x1b[31m");
            eprintln!("Error: {}", err);
            eprintln!();
            eprintln!("Caused by:");
            eprint!("  {}", root);
            eprintln!("\x1b[0m");
            ExitCode::from(1)
        }
        Ok(_) => ExitCode::from(0),
    }
}

fn run(args: &Args) -> eyre::Result<()> {
    let entry = args.entry();

    match &args.file {
        Some(path) => Renderer::with_config(open_log_file(path)?, args.config()).render(&entry),
        None => Renderer::with_config(std::io::stderr(), args.config()).render(&entry),
    }
}
