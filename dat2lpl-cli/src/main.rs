//! dat2lpl CLI
//!
//! Converts DAT XML catalogs into RetroArch LPL playlists.

mod cli_types;
mod convert;
mod error;
mod logging;
mod settings;

use clap::Parser;

use dat2lpl_dat::HttpSchemaFetcher;

use crate::cli_types::Cli;
use crate::convert::{ConvertOptions, run_convert};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = settings::load_settings();
    let result = ConvertOptions::resolve(cli, &settings)
        .and_then(|opts| run_convert(&opts, &HttpSchemaFetcher));

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
