//! eavsearch CLI
//!
//! Searches the EAV attribute tables of a Magento catalog database

use clap::Parser;
use eavsearch_core::logging_facility::{self, Profile};
use eavsearch_core_types::RequestId;

mod commands;
mod terminal;

#[derive(Debug, Parser)]
#[command(name = "eavsearch")]
#[command(
    about = "Search Magento catalog entities by attribute value",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    search: commands::search::SearchArgs,

    /// Debug-level human-readable logs on stderr
    #[arg(long)]
    verbose: bool,

    /// JSON structured logs on stderr
    #[arg(long, conflicts_with = "verbose")]
    log_json: bool,
}

impl Cli {
    fn log_profile(&self) -> Profile {
        if self.log_json {
            Profile::Production
        } else if self.verbose {
            Profile::Development
        } else {
            Profile::Interactive
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_profile());

    let request_id = RequestId::new();
    let span = tracing::info_span!("eavsearch", request_id = %request_id);
    let _guard = span.enter();

    let result = commands::search::execute(cli.search);

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
