mod args;
mod poll;

use clap::Parser;
use log::{debug, warn};

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    debug!("args: {:?}", args);

    let settings = poll::RunSettings {
        config_path: args.config,
        kind: args.kind,
        script_path: args.script,
        reference_path: args.reference,
        out: args.out,
        ask_demographics: args.demographics,
    };

    if let Err(e) = poll::run_survey(&settings) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        std::process::exit(1);
    }
}
