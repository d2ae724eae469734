use std::borrow::Cow;

use serde::Deserialize;
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

use crate::app::errors::PipelineError;

use super::validation_messages;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GenerateVideoDto {
    #[validate(custom = "validate_leonard_payload")]
    pub leonard_payload: Map<String, Value>,
    pub dynami_payload: Map<String, Value>,
    pub user_id: String,
}

impl GenerateVideoDto {
    pub fn from_input(input: Value) -> Result<Self, PipelineError> {
        let dto: Self = serde_json::from_value(input)
            .map_err(|e| PipelineError::Validation(vec![e.to_string()]))?;

        if let Err(e) = dto.validate() {
            return Err(PipelineError::Validation(validation_messages(&e)));
        }

        Ok(dto)
    }

    pub fn prompt(&self) -> &str {
        self.leonard_payload
            .get("prompt")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

// The prompt doubles as the stored caption, so it is checked before any
// provider is called.
fn validate_leonard_payload(payload: &Map<String, Value>) -> Result<(), ValidationError> {
    match payload.get("prompt") {
        Some(Value::String(prompt)) if !prompt.trim().is_empty() => Ok(()),
        _ => Err(ValidationError {
            message: Some(Cow::from(
                "leonard_payload.prompt must be a non-empty string.",
            )),
            ..ValidationError::new("leonard_payload")
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn errors(input: Value) -> Vec<String> {
        match GenerateVideoDto::from_input(input) {
            Err(PipelineError::Validation(errors)) => errors,
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn accepts_complete_request() {
        let dto = GenerateVideoDto::from_input(json!({
            "leonard_payload": { "prompt": "a cat", "modelId": "abc" },
            "dynami_payload": {},
            "user_id": "u1"
        }))
        .unwrap();

        assert_eq!(dto.prompt(), "a cat");
        assert_eq!(dto.user_id, "u1");
        assert_eq!(dto.leonard_payload["modelId"], "abc");
    }

    #[test]
    fn missing_user_id_is_rejected() {
        let errors = errors(json!({
            "leonard_payload": { "prompt": "a cat" },
            "dynami_payload": {}
        }));

        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("user_id"));
    }

    #[test]
    fn wrong_payload_type_is_rejected() {
        let errors = errors(json!({
            "leonard_payload": "a cat",
            "dynami_payload": {},
            "user_id": "u1"
        }));

        assert!(errors[0].contains("invalid type"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let errors = errors(json!({
            "leonard_payload": { "prompt": "a cat" },
            "dynami_payload": {},
            "user_id": "u1",
            "priority": "high"
        }));

        assert!(errors[0].contains("priority"));
    }

    #[test]
    fn prompt_is_required() {
        let errors = errors(json!({
            "leonard_payload": { "width": 512 },
            "dynami_payload": {},
            "user_id": "u1"
        }));

        assert_eq!(
            errors,
            vec!["leonard_payload.prompt must be a non-empty string.".to_string()]
        );
    }
}
