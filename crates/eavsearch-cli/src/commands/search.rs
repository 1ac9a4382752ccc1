//! Search command
//!
//! Usage: eavsearch [-s SCOPE] [-a ATTRIBUTE] [-c OPERATOR] [-v VALUE]
//!                  [-f FORMAT] [-o OUTPUT] [-z] [--config PATH]

use crate::terminal::TerminalPrompter;
use clap::Args;
use eavsearch_core::resolver;
use eavsearch_core::{run_search, CatalogSource, SearchError, SearchOutcome, SearchParams};
use eavsearch_store::config::{self, DEFAULT_CONFIG_PATH};
use eavsearch_store::MySqlCatalog;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Catalog entity to search: category or product
    #[arg(short = 's', long)]
    pub scope: Option<String>,

    /// attribute_code to match on
    #[arg(short = 'a', long)]
    pub attribute: Option<String>,

    /// Comparison operator (=, <=>, !=, <>, <, <=, >=, >, LIKE, NOT LIKE, IS, IS NOT)
    #[arg(short = 'c', long)]
    pub comparison: Option<String>,

    /// Value to compare against; `--value ""` searches for the empty string
    #[arg(short = 'v', long, allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Output format: text or csv
    #[arg(short = 'f', long = "format")]
    pub output_format: Option<String>,

    /// "stdout" or a file path
    #[arg(short = 'o', long = "output")]
    pub output_location: Option<String>,

    /// Never prompt; any missing or invalid input is an error
    #[arg(short = 'z', long)]
    pub automated: bool,

    /// Database connection settings (YAML)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

impl SearchArgs {
    fn params(&self) -> SearchParams {
        SearchParams {
            scope: self.scope.clone(),
            attribute: self.attribute.clone(),
            comparison: self.comparison.clone(),
            value: self.value.clone().into(),
            output_format: self.output_format.clone(),
            output_location: self.output_location.clone(),
            automated: self.automated,
        }
    }
}

/// Execute the search command
///
/// Input ending at a prompt is a cancellation, not an error.
pub fn execute(args: SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    match execute_search(&args) {
        Err(SearchError::UserCancelled) => {
            println!();
            println!("Search successfully cancelled.");
            Ok(())
        }
        other => other.map_err(Into::into),
    }
}

fn execute_search(args: &SearchArgs) -> eavsearch_core::Result<()> {
    let params = args.params();

    // Nothing is read or contacted before automated input is known to be good.
    if params.automated {
        resolver::validate_all(&params)?;
    }

    let mut prompter = TerminalPrompter::new();
    let db_config = config::load_or_prompt(&args.config, params.automated, &mut prompter)?;
    let mut catalog = MySqlCatalog::connect(&db_config)?;

    let request = match resolver::resolve(&params, &mut prompter, &mut catalog) {
        Ok(request) => request,
        Err(e) => {
            if let Err(close_err) = catalog.close() {
                tracing::warn!(error = %close_err, "closing connection after failed resolution");
            }
            return Err(e);
        }
    };

    match run_search(&request, &mut prompter, &mut catalog)? {
        SearchOutcome::Completed { rows } => {
            tracing::info!(rows, "search completed");
        }
        SearchOutcome::Cancelled => {}
    }
    Ok(())
}
