//! Parameter resolution
//!
//! The six search parameters are resolved in a fixed order (scope,
//! attribute, comparison, value, output format, output location). Each one
//! is validated against its domain; an invalid or missing value is fatal in
//! automated mode and re-prompted for otherwise, as many times as needed.
//!
//! ## Logging Ownership
//!
//! `resolve` owns the `resolve_parameters` start/end/end_error events.

use crate::catalog::CatalogSource;
use crate::errors::{Result, SearchError};
use crate::model::{
    Comparison, OutputFormat, OutputLocation, Parameter, Scope, SearchParams, SearchRequest,
    SearchValue,
};
use crate::normalize::{self, NullKeyword};
use crate::prompt::{PromptSpec, Prompter};
use crate::render;
use crate::{log_op_end, log_op_error, log_op_start};

/// Prompt settings for one parameter
#[derive(Debug, Clone, Copy)]
pub struct ParameterSpec {
    pub parameter: Parameter,
    pub prompt: &'static str,
    pub default: &'static str,
    pub options: &'static [&'static str],
    pub preserve_case: bool,
}

impl ParameterSpec {
    fn prompt_spec(&self) -> PromptSpec {
        let spec = PromptSpec::new(self.prompt)
            .with_default(self.default)
            .with_options(self.options.iter().copied());
        if self.preserve_case {
            spec.preserving_case()
        } else {
            spec
        }
    }
}

/// Resolution table, in resolution order
pub const PARAMETER_SPECS: [ParameterSpec; 6] = [
    ParameterSpec {
        parameter: Parameter::Scope,
        prompt: "Please enter the scope of your search",
        default: "product",
        options: &["category", "product"],
        preserve_case: false,
    },
    ParameterSpec {
        parameter: Parameter::Attribute,
        prompt: "Press [Enter] to retrieve a list of all available Attributes --be patient--, or provide the `attribute_code` that you are interested in now",
        default: "",
        options: &[],
        preserve_case: false,
    },
    ParameterSpec {
        parameter: Parameter::Comparison,
        prompt: "Please type the comparison operator that you would like to use",
        default: "LIKE",
        options: &[
            "=", "<=>", "!=", "<>", "<", "<=", ">=", ">", "LIKE", "NOT LIKE", "IS", "IS NOT",
        ],
        preserve_case: false,
    },
    ParameterSpec {
        parameter: Parameter::Value,
        prompt: "Please enter the value that you would like to search for",
        default: "",
        options: &[],
        preserve_case: true,
    },
    ParameterSpec {
        parameter: Parameter::OutputFormat,
        prompt: "Please choose a supported output format",
        default: "text",
        options: &["csv", "text"],
        preserve_case: false,
    },
    ParameterSpec {
        parameter: Parameter::OutputLocation,
        prompt: "Press [Enter] to print the results to stdout, or provide a filepath to save the output as a CSV",
        default: OutputLocation::STDOUT,
        options: &["stdout", "`/path/to/target/file.csv`"],
        preserve_case: true,
    },
];

const LIST_TARGET_PROMPT: &str =
    "Press [Enter] to list those Attributes, or provide a filepath to save the output as a CSV";
const ATTRIBUTE_PROMPT: &str = "Please provide the Attribute that you'd like to search on";

/// Whether `raw` lies in `parameter`'s domain
///
/// Only the value parameter accepts `Null`, and it accepts any text
/// including the empty string. Enumerated domains match case-insensitively.
pub fn validate(parameter: Parameter, raw: &SearchValue) -> bool {
    match (parameter, raw) {
        (Parameter::Value, value) => !value.is_missing(),
        (Parameter::Scope, SearchValue::Text(t)) => Scope::parse(t).is_some(),
        (Parameter::Attribute, SearchValue::Text(t)) => !t.is_empty(),
        (Parameter::Comparison, SearchValue::Text(t)) => Comparison::parse(t).is_some(),
        (Parameter::OutputFormat, SearchValue::Text(t)) => OutputFormat::parse(t).is_some(),
        (Parameter::OutputLocation, SearchValue::Text(t)) => OutputLocation::parse(t).is_some(),
        (_, SearchValue::Missing | SearchValue::Null) => false,
    }
}

fn supplied(params: &SearchParams, parameter: Parameter) -> SearchValue {
    let text = match parameter {
        Parameter::Scope => &params.scope,
        Parameter::Attribute => &params.attribute,
        Parameter::Comparison => &params.comparison,
        Parameter::Value => return params.value.clone(),
        Parameter::OutputFormat => &params.output_format,
        Parameter::OutputLocation => &params.output_location,
    };
    SearchValue::from(text.clone())
}

fn invalid(parameter: Parameter, raw: &SearchValue) -> SearchError {
    let value = match raw {
        SearchValue::Missing => String::new(),
        SearchValue::Null => "NULL".to_string(),
        SearchValue::Text(t) => t.clone(),
    };
    SearchError::InvalidParameter { parameter, value }
}

/// Check every parameter without prompting
///
/// # Errors
///
/// `SearchError::InvalidParameter` for the first parameter, in resolution
/// order, that is missing or outside its domain.
pub fn validate_all(params: &SearchParams) -> Result<()> {
    for parameter in Parameter::ORDER {
        let raw = supplied(params, parameter);
        if !validate(parameter, &raw) {
            return Err(invalid(parameter, &raw));
        }
    }
    Ok(())
}

/// Resolve raw parameters into a complete `SearchRequest`
///
/// In automated mode nothing is prompted: any invalid parameter fails
/// before the catalog is touched, and the NULL-keyword conversion takes its
/// default answer (yes).
///
/// # Errors
///
/// - `InvalidParameter`: automated mode and a parameter is invalid
/// - `UserCancelled`: input ended while prompting
/// - `Query`/`Io`: attribute discovery failed
pub fn resolve(
    params: &SearchParams,
    prompter: &mut dyn Prompter,
    catalog: &mut dyn CatalogSource,
) -> Result<SearchRequest> {
    log_op_start!("resolve_parameters", automated = params.automated);
    let start = std::time::Instant::now();

    let result = resolve_impl(params, prompter, catalog).map_err(|e| {
        log_op_error!(
            "resolve_parameters",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "resolve_parameters",
        duration_ms = start.elapsed().as_millis() as u64,
        scope = result.scope.as_str(),
        attribute = result.attribute.as_str(),
        comparison = result.comparison.as_sql()
    );

    Ok(result)
}

fn resolve_impl(
    params: &SearchParams,
    prompter: &mut dyn Prompter,
    catalog: &mut dyn CatalogSource,
) -> Result<SearchRequest> {
    if params.automated {
        validate_all(params)?;
    }

    let mut resolved: Vec<SearchValue> = Vec::with_capacity(PARAMETER_SPECS.len());
    let mut scope = None;
    let mut comparison = None;
    let mut normalized = None;

    for spec in &PARAMETER_SPECS {
        let mut raw = supplied(params, spec.parameter);
        if !validate(spec.parameter, &raw) {
            tracing::debug!(parameter = spec.parameter.name(), "prompting for parameter");
            raw = SearchValue::Text(prompt_until_valid(spec, scope, prompter, catalog)?);
        }
        match spec.parameter {
            Parameter::Scope => scope = text_of(&raw).and_then(Scope::parse),
            Parameter::Comparison => comparison = text_of(&raw).and_then(Comparison::parse),
            // Normalized before the output rows so the NULL question follows the value.
            Parameter::Value => {
                let operator = parsed(Parameter::Comparison, comparison)?;
                normalized = Some(normalize_value(
                    raw.clone(),
                    operator,
                    params.automated,
                    prompter,
                )?);
            }
            _ => {}
        }
        resolved.push(raw);
    }

    let [_, attribute, _, _, format, location] = <[SearchValue; 6]>::try_from(resolved)
        .map_err(|_| SearchError::Internal {
            message: "parameter table out of sync".to_string(),
        })?;
    let (value, comparison) = parsed(Parameter::Value, normalized)?;

    Ok(SearchRequest {
        scope: parsed(Parameter::Scope, scope)?,
        attribute: parsed(Parameter::Attribute, text_of(&attribute).map(str::to_string))?,
        comparison,
        value,
        output_format: parsed(
            Parameter::OutputFormat,
            text_of(&format).and_then(OutputFormat::parse),
        )?,
        output_location: parsed(
            Parameter::OutputLocation,
            text_of(&location).and_then(OutputLocation::parse),
        )?,
        automated: params.automated,
    })
}

fn text_of(raw: &SearchValue) -> Option<&str> {
    match raw {
        SearchValue::Text(t) => Some(t.as_str()),
        _ => None,
    }
}

// Reaching the error arm means validation and parsing disagree.
fn parsed<T>(parameter: Parameter, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| SearchError::Internal {
        message: format!("{} passed validation but did not parse", parameter),
    })
}

fn prompt_until_valid(
    spec: &ParameterSpec,
    scope: Option<Scope>,
    prompter: &mut dyn Prompter,
    catalog: &mut dyn CatalogSource,
) -> Result<String> {
    loop {
        let answer = match spec.parameter {
            Parameter::Attribute => prompt_attribute(spec, scope, prompter, catalog)?,
            _ => prompter.ask(&spec.prompt_spec())?,
        };
        if validate(spec.parameter, &SearchValue::Text(answer.clone())) {
            return Ok(answer);
        }
        prompter.say("Invalid selection.");
    }
}

/// Ask for the attribute code, offering the attribute listing on an empty
/// answer
fn prompt_attribute(
    spec: &ParameterSpec,
    scope: Option<Scope>,
    prompter: &mut dyn Prompter,
    catalog: &mut dyn CatalogSource,
) -> Result<String> {
    let answer = prompter.ask(&spec.prompt_spec())?;
    if !answer.is_empty() {
        return Ok(answer);
    }

    let scope = parsed(Parameter::Scope, scope)?;
    let attributes = catalog.list_attributes(scope)?;

    let target = prompter.ask(
        &PromptSpec::new(LIST_TARGET_PROMPT)
            .with_options(["`/path/to/target/file.csv`"])
            .preserving_case(),
    )?;
    if target.is_empty() {
        for line in render::render_attributes_text(&attributes).lines() {
            prompter.say(line);
        }
    } else {
        let csv = render::render_attributes_csv(&attributes)?;
        render::write_output(&OutputLocation::File(target.clone().into()), &csv)?;
        prompter.say(&format!(
            "Saved {} attributes to \"{}\".",
            attributes.len(),
            target
        ));
    }

    loop {
        let code = prompter.ask(&PromptSpec::new(ATTRIBUTE_PROMPT))?;
        if !code.is_empty() {
            return Ok(code);
        }
        prompter.say("I'm sorry, but I didn't get anything.");
    }
}

fn normalize_value(
    value: SearchValue,
    comparison: Comparison,
    automated: bool,
    prompter: &mut dyn Prompter,
) -> Result<(Option<String>, Comparison)> {
    let raw = match value {
        SearchValue::Text(text) => text,
        SearchValue::Null => return Ok(normalize::normalize(None, comparison, true)),
        SearchValue::Missing => {
            return Err(SearchError::Internal {
                message: "Value passed validation but is missing".to_string(),
            })
        }
    };

    let convert = match NullKeyword::detect(&raw) {
        Some(_) if automated => true,
        Some(_) => {
            prompter.say(&normalize::keyword_notice(&raw));
            prompter.confirm(normalize::CONVERT_QUESTION, true)?
        }
        None => false,
    };

    Ok(normalize::normalize(Some(&raw), comparison, convert))
}
