use validator::ValidationErrors;

pub mod dynami_payload_dto;
pub mod generate_video_dto;

/// Flattens validator output into one sorted message per failed rule.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid.", field),
            })
        })
        .collect();

    messages.sort();
    messages
}
