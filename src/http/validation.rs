use crate::error::AppError;

/// Checks a value that ends up inside an upstream URL path segment.
///
/// Rejects empty values, dot segments, slashes and whitespace.
pub fn path_segment(field: &'static str, value: &str) -> Result<(), AppError> {
    let reason = if value.is_empty() {
        "must not be empty"
    } else if value == "." || value == ".." {
        "must not be a dot segment"
    } else if value
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_whitespace() || c.is_control())
    {
        "must not contain slashes or whitespace"
    } else {
        return Ok(());
    };

    Err(AppError::Validation {
        field,
        reason: reason.to_string(),
    })
}
