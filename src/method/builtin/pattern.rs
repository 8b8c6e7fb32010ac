use async_trait::async_trait;
use regex::Regex;

use super::TEXT_PATTERN;
use crate::error::EngineResult;
use crate::method::{AssessmentMethod, MethodContext, MethodOutcome};

/// Matches a plain-text value against the `pattern` regex parameter.
///
/// A malformed pattern is an implementation-level fault (the rubric author
/// supplied a non-regex), reported as `Errored` rather than a business
/// failure.
pub struct TextPattern;

#[async_trait]
impl AssessmentMethod for TextPattern {
    fn mnemonic(&self) -> &str {
        TEXT_PATTERN
    }

    async fn evaluate(&self, context: &MethodContext<'_>) -> EngineResult<MethodOutcome> {
        let Some(pattern) = context.parameter("pattern") else {
            return Ok(MethodOutcome::Errored {
                message: "text-pattern dispatched without a 'pattern' parameter".into(),
            });
        };
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(err) => {
                return Ok(MethodOutcome::Errored {
                    message: format!("invalid pattern '{pattern}': {err}"),
                });
            }
        };
        let Some(data) = context.data else {
            return Ok(MethodOutcome::failed(format!(
                "'{}' is absent",
                context.entity.display_name
            )));
        };

        let value = data.display_value();
        if regex.is_match(&value) {
            Ok(MethodOutcome::Succeeded)
        } else {
            Ok(MethodOutcome::failed(format!(
                "value '{value}' does not match pattern '{pattern}'"
            )))
        }
    }
}
