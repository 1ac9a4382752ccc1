//! Prompt primitive
//!
//! A prompt has text, an optional default, optional enumerated options and
//! optional typo corrections. Rendering and answer normalization are pure
//! (`PromptSpec`); reading a line is the `Prompter`'s job, so interactive
//! flows can be driven by a script in tests.

use crate::errors::{Result, SearchError};
use std::collections::VecDeque;

/// Description of one question to the operator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PromptSpec {
    pub text: String,
    pub default: String,
    pub options: Vec<String>,
    pub corrections: Vec<(String, String)>,
    /// Keep the answer's case (file paths, literal search values)
    pub preserve_case: bool,
}

impl PromptSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_correction(mut self, typo: impl Into<String>, fix: impl Into<String>) -> Self {
        self.corrections.push((typo.into(), fix.into()));
        self
    }

    pub fn preserving_case(mut self) -> Self {
        self.preserve_case = true;
        self
    }

    /// A yes/no question accepting `y`/`n`
    pub fn yes_no(text: impl Into<String>, default_yes: bool) -> Self {
        Self::new(text)
            .with_default(if default_yes { "yes" } else { "no" })
            .with_options(["yes", "no"])
            .with_correction("y", "yes")
            .with_correction("n", "no")
    }

    /// Text shown to the operator, e.g. `Scope (category/PRODUCT): `
    ///
    /// The default option is shown upper-case; other ALL-CAPS options are
    /// shown lower-case so the default stands out.
    pub fn render(&self) -> String {
        let options: Vec<String> = self
            .options
            .iter()
            .map(|option| {
                if *option == self.default {
                    option.to_uppercase()
                } else if *option == option.to_uppercase() {
                    option.to_lowercase()
                } else {
                    option.clone()
                }
            })
            .collect();

        if options.is_empty() {
            format!("{}: ", self.text)
        } else {
            format!("{} ({}): ", self.text, options.join("/"))
        }
    }

    /// Apply default, case folding and at most one correction to a raw answer
    pub fn normalize_response(&self, raw: &str) -> String {
        let mut response = if raw.is_empty() {
            self.default.clone()
        } else {
            raw.to_string()
        };

        if !self.preserve_case {
            response = response.to_lowercase();
        }

        // Applied after the default; an empty answer is never "corrected".
        if let Some((_, fix)) = self
            .corrections
            .iter()
            .filter(|_| !response.is_empty())
            .find(|(typo, _)| response.eq_ignore_ascii_case(typo))
        {
            response = if self.preserve_case {
                fix.clone()
            } else {
                fix.to_lowercase()
            };
        }

        response
    }
}

/// Interpret an answer to a [`PromptSpec::yes_no`] question
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// Line-oriented access to the operator
pub trait Prompter {
    /// Show `rendered` and read one line, without its line terminator
    ///
    /// # Errors
    ///
    /// `SearchError::UserCancelled` when input ends, `SearchError::Io` on
    /// terminal failure.
    fn read_line(&mut self, rendered: &str) -> Result<String>;

    /// Print an informational line
    fn say(&mut self, line: &str);

    /// Ask a question and return the normalized answer
    ///
    /// # Errors
    ///
    /// Propagates [`Prompter::read_line`] failures.
    fn ask(&mut self, spec: &PromptSpec) -> Result<String> {
        let raw = self.read_line(&spec.render())?;
        Ok(spec.normalize_response(&raw))
    }

    /// Ask a yes/no question; anything but "yes" counts as no
    ///
    /// # Errors
    ///
    /// Propagates [`Prompter::read_line`] failures.
    fn confirm(&mut self, text: &str, default_yes: bool) -> Result<bool> {
        let answer = self.ask(&PromptSpec::yes_no(text, default_yes))?;
        Ok(parse_yes_no(&answer) == Some(true))
    }
}

/// Prompter fed from a fixed list of answers
///
/// Records every rendered prompt and every informational line. Running out
/// of answers behaves like end of input.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub said: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            said: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, rendered: &str) -> Result<String> {
        self.prompts.push(rendered.to_string());
        self.answers.pop_front().ok_or(SearchError::UserCancelled)
    }

    fn say(&mut self, line: &str) {
        self.said.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_marks_default_option() {
        let spec = PromptSpec::new("Please enter the scope of your search")
            .with_default("product")
            .with_options(["category", "product"]);
        assert_eq!(
            spec.render(),
            "Please enter the scope of your search (category/PRODUCT): "
        );
    }

    #[test]
    fn test_render_lowercases_non_default_all_caps_options() {
        let spec = PromptSpec::new("Operator")
            .with_default("LIKE")
            .with_options(["=", "LIKE", "NOT LIKE"]);
        assert_eq!(spec.render(), "Operator (=/LIKE/not like): ");
    }

    #[test]
    fn test_render_without_options() {
        assert_eq!(PromptSpec::new("Hostname").render(), "Hostname: ");
    }

    #[test]
    fn test_empty_answer_takes_default_and_is_lowercased() {
        let spec = PromptSpec::new("Operator").with_default("LIKE");
        assert_eq!(spec.normalize_response(""), "like");
        assert_eq!(spec.normalize_response("Product"), "product");
    }

    #[test]
    fn test_preserve_case_keeps_answer() {
        let spec = PromptSpec::new("Path").preserving_case();
        assert_eq!(spec.normalize_response("/Tmp/Out.csv"), "/Tmp/Out.csv");
    }

    #[test]
    fn test_single_correction_is_applied() {
        let spec = PromptSpec::new("q")
            .with_correction("y", "yes")
            .with_correction("yes", "no");
        // No daisy-chaining: y -> yes, not y -> yes -> no
        assert_eq!(spec.normalize_response("Y"), "yes");
    }

    #[test]
    fn test_empty_answer_is_not_corrected() {
        let spec = PromptSpec::new("q").with_correction("", "boom");
        assert_eq!(spec.normalize_response(""), "");
    }

    #[test]
    fn test_yes_no_parsing() {
        let spec = PromptSpec::yes_no("Continue?", true);
        assert_eq!(parse_yes_no(&spec.normalize_response("")), Some(true));
        assert_eq!(parse_yes_no(&spec.normalize_response("n")), Some(false));
        assert_eq!(parse_yes_no(&spec.normalize_response("maybe")), None);
        assert_eq!(spec.render(), "Continue? (YES/no): ");
    }

    #[test]
    fn test_scripted_prompter_confirm_and_exhaustion() {
        let mut prompter = ScriptedPrompter::new(["y", "whatever"]);
        assert!(prompter.confirm("Go?", false).unwrap());
        assert!(!prompter.confirm("Go?", true).unwrap());
        assert_eq!(
            prompter.confirm("Go?", true),
            Err(SearchError::UserCancelled)
        );
        assert_eq!(prompter.prompts.len(), 3);
    }
}
