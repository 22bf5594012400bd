use crate::config::LimitsConfig;

/// Request validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Parameter {field} exceeds maximum length of {max_length}")]
    ExceedsMaxLength { field: String, max_length: usize },
}

/// Size guards applied to evaluation requests before the pipeline runs.
/// Empty text and empty context are valid inputs; only upper bounds are
/// enforced here.
pub struct RequestValidator;

impl RequestValidator {
    /// Check a field against its length limit
    pub fn check_length(field: &str, value: &str, max_length: usize) -> Result<(), ValidationError> {
        if value.len() > max_length {
            return Err(ValidationError::ExceedsMaxLength {
                field: field.to_string(),
                max_length,
            });
        }
        Ok(())
    }

    /// Validate the text/context pair of an evaluation request
    pub fn check_evaluation(
        text: &str,
        context: &str,
        limits: &LimitsConfig,
    ) -> Result<(), ValidationError> {
        Self::check_length("text", text, limits.max_text_length)?;
        Self::check_length("context", context, limits.max_context_length)?;
        Ok(())
    }
}
