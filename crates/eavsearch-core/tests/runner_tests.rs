//! Confirmation, execution and connection lifecycle of a search run

mod common;

use common::{complete_params, sample_catalog};
use eavsearch_core::prompt::ScriptedPrompter;
use eavsearch_core::resolver::resolve;
use eavsearch_core::{run_search, OutputFormat, OutputLocation, SearchOutcome};

#[test]
fn test_declined_confirmation_closes_without_searching() {
    let mut prompter = ScriptedPrompter::new(["no"]);
    let mut catalog = sample_catalog();
    let request = resolve(&complete_params(), &mut prompter, &mut catalog).unwrap();

    let outcome = run_search(&request, &mut prompter, &mut catalog).unwrap();

    assert_eq!(outcome, SearchOutcome::Cancelled);
    assert_eq!(catalog.search_calls, 0);
    assert_eq!(catalog.close_calls, 1);
    assert_eq!(
        prompter.said,
        vec![
            "Okay. Cancelling search.".to_string(),
            "Search successfully cancelled.".to_string()
        ]
    );
}

#[test]
fn test_confirmed_search_writes_csv_file_and_closes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");

    let mut prompter = ScriptedPrompter::new(["y"]);
    let mut catalog = sample_catalog();
    let mut request = resolve(&complete_params(), &mut prompter, &mut catalog).unwrap();
    request.output_format = OutputFormat::Csv;
    request.output_location = OutputLocation::File(path.clone());

    let outcome = run_search(&request, &mut prompter, &mut catalog).unwrap();

    assert_eq!(outcome, SearchOutcome::Completed { rows: 2 });
    assert_eq!(catalog.search_calls, 1);
    assert_eq!(catalog.close_calls, 1);
    assert_eq!(
        catalog.last_request.as_ref().and_then(|r| r.value.as_deref()),
        Some("%red%")
    );
    assert_eq!(
        prompter.prompts[0],
        "Search for \"color LIKE %red%\" (within the \"product\" catalog entity) (YES/no): "
    );

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "SKU,Value\nSKU1,red\nSKU2,\n");
}

#[test]
fn test_automated_run_skips_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.txt");

    let mut params = complete_params();
    params.automated = true;
    params.output_location = Some(path.display().to_string());

    let mut prompter = ScriptedPrompter::default();
    let mut catalog = sample_catalog();
    let request = resolve(&params, &mut prompter, &mut catalog).unwrap();

    let outcome = run_search(&request, &mut prompter, &mut catalog).unwrap();

    assert_eq!(outcome, SearchOutcome::Completed { rows: 2 });
    assert!(prompter.prompts.is_empty());
    assert!(prompter.said[0].ends_with("catalog entity)..."));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "| SKU: SKU1 | Value: red |\n| SKU: SKU2 | Value: NULL |\n"
    );
}

#[test]
fn test_output_failure_still_closes_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let missing_dir = dir.path().join("no-such-dir").join("out.txt");

    let mut params = complete_params();
    params.automated = true;
    params.output_location = Some(missing_dir.display().to_string());

    let mut prompter = ScriptedPrompter::default();
    let mut catalog = sample_catalog();
    let request = resolve(&params, &mut prompter, &mut catalog).unwrap();

    let result = run_search(&request, &mut prompter, &mut catalog);

    assert!(result.is_err());
    assert_eq!(catalog.close_calls, 1);
}
