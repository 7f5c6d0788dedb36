use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use campusgate_core::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

/// Quoted name from a serde message such as "missing field `StudentID`".
fn quoted_field<'a>(message: &'a str, marker: &str) -> Option<&'a str> {
    message
        .split(marker)
        .nth(1)
        .and_then(|s| s.split('`').next())
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let message = rejection.body_text();

    if let Some(field) = quoted_field(&message, "missing field `") {
        return AppError::missing_parameter(field);
    }

    if let Some(field) = quoted_field(&message, "unknown field `") {
        return AppError::bad_request(anyhow!("Unknown field `{field}`"));
    }

    if message.contains("invalid type") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

/// JSON body extractor that also runs `validator` rules. Every failure is a
/// 400 with a readable message.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.validate().map_err(|errors| {
            AppError::bad_request(anyhow!("{}", format_errors(&errors)))
        })?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_field() {
        let message = "Failed to deserialize the JSON body into the target type: missing field `studentId` at line 1 column 2";
        assert_eq!(quoted_field(message, "missing field `"), Some("studentId"));
        assert_eq!(quoted_field(message, "unknown field `"), None);
    }
}
