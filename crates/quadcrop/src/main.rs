// Author: Dustin Pilgrim
// License: MIT

mod canvas;
mod cli;
mod config;
mod crop;
mod logging;
mod paths;
mod preview;
mod run;
mod script;

use clap::Parser;

use eventline::{debug, info};

use crate::cli::Args;

fn main() {
    let args = Args::parse();

    let log_path = logging::log_path(args.log_file.as_deref());
    if let Err(e) = logging::init_logging(&log_path, args.verbose) {
        // logging should never block normal usage
        eprintln!("quadcrop: failed to init logging: {e}");
    }

    info!("starting");
    debug!("parsed args: {:?}", args.cmd);

    if let Err(e) = run::run(args) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    info!("done");
}
