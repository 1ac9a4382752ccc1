//! Search run: confirm, query, render, write, close
//!
//! The catalog is closed exactly once on every path out of [`run_search`],
//! including cancellation and errors.

use crate::catalog::CatalogSource;
use crate::errors::Result;
use crate::model::{Comparison, SearchRequest};
use crate::prompt::Prompter;
use crate::render;
use crate::{log_op_end, log_op_error, log_op_start};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Operator declined the confirmation; no search was executed
    Cancelled,
    Completed { rows: usize },
}

/// Human-readable summary shown before the search runs
///
/// ```
/// # use eavsearch_core::model::*;
/// # use eavsearch_core::runner::describe;
/// let request = SearchRequest {
///     scope: Scope::Product,
///     attribute: "color".to_string(),
///     comparison: Comparison::Is,
///     value: None,
///     output_format: OutputFormat::Text,
///     output_location: OutputLocation::Stdout,
///     automated: false,
/// };
/// assert_eq!(
///     describe(&request),
///     "Search for \"color IS NULL\" (within the \"product\" catalog entity)"
/// );
/// ```
pub fn describe(request: &SearchRequest) -> String {
    let value = match request.value.as_deref() {
        None => "NULL",
        Some("") => "''",
        Some(v) => v,
    };
    format!(
        "Search for \"{} {} {}\" (within the \"{}\" catalog entity)",
        request.attribute,
        request.comparison.as_sql(),
        value,
        request.scope
    )
}

/// Run a resolved search against `catalog` and write the results
///
/// # Errors
///
/// Propagates prompt, query, rendering and output failures. The catalog is
/// closed before any error is returned.
pub fn run_search(
    request: &SearchRequest,
    prompter: &mut dyn Prompter,
    catalog: &mut dyn CatalogSource,
) -> Result<SearchOutcome> {
    log_op_start!(
        "run_search",
        scope = request.scope.as_str(),
        attribute = request.attribute.as_str()
    );
    let start = std::time::Instant::now();

    let result = run_search_impl(request, prompter, catalog);
    let closed = catalog.close();
    let result = result.and_then(|outcome| closed.map(|_| outcome));

    match &result {
        Ok(outcome) => {
            log_op_end!(
                "run_search",
                duration_ms = start.elapsed().as_millis() as u64,
                outcome = ?outcome
            );
        }
        Err(e) => {
            log_op_error!(
                "run_search",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }

    if result == Ok(SearchOutcome::Cancelled) {
        prompter.say("Search successfully cancelled.");
    }
    result
}

fn run_search_impl(
    request: &SearchRequest,
    prompter: &mut dyn Prompter,
    catalog: &mut dyn CatalogSource,
) -> Result<SearchOutcome> {
    let summary = describe(request);
    if request.automated {
        prompter.say(&format!("{}...", summary));
    } else if !prompter.confirm(&summary, true)? {
        prompter.say("Okay. Cancelling search.");
        return Ok(SearchOutcome::Cancelled);
    }

    if request.value.is_none() && !matches!(request.comparison, Comparison::Is | Comparison::IsNot)
    {
        tracing::warn!(
            comparison = request.comparison.as_sql(),
            "NULL compared without IS/IS NOT; most operators never match NULL"
        );
    }

    let rows = catalog.search(request)?;
    let output = render::render_results(&rows, request.output_format)?;
    render::write_output(&request.output_location, &output)?;

    Ok(SearchOutcome::Completed { rows: rows.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OutputFormat, OutputLocation, Scope};

    #[test]
    fn test_describe_empty_value() {
        let request = SearchRequest {
            scope: Scope::Category,
            attribute: "name".to_string(),
            comparison: Comparison::Eq,
            value: Some(String::new()),
            output_format: OutputFormat::Csv,
            output_location: OutputLocation::Stdout,
            automated: true,
        };
        assert_eq!(
            describe(&request),
            "Search for \"name = ''\" (within the \"category\" catalog entity)"
        );
    }
}
