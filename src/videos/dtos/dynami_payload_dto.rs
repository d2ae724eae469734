use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::{
    app::errors::PipelineError,
    media::apis::cog::models::{input_spec::InputSpec, input_spec_dynami::InputSpecDynami},
};

use super::validation_messages;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DynamiPayloadDto {
    #[serde(default = "default_input_text")]
    pub i2v_input_text: String,
    #[serde(default = "default_seed")]
    #[validate(range(max = 10000, message = "i2v_seed must be at most 10000."))]
    pub i2v_seed: i64,
    #[serde(default = "default_eta")]
    #[validate(range(min = 0.0, max = 1.0, message = "i2v_eta must be between 0 and 1."))]
    pub i2v_eta: f64,
    #[serde(default = "default_cfg_scale")]
    #[validate(range(
        min = 1.0,
        max = 15.0,
        message = "i2v_cfg_scale must be between 1 and 15."
    ))]
    pub i2v_cfg_scale: f64,
    #[serde(default = "default_steps")]
    #[validate(range(min = 1, max = 60, message = "i2v_steps must be between 1 and 60."))]
    pub i2v_steps: i64,
    #[serde(default = "default_motion")]
    #[validate(range(min = 1, max = 20, message = "i2v_motion must be between 1 and 20."))]
    pub i2v_motion: i64,
}

fn default_input_text() -> String {
    "man fishing in a boat at sunset".to_string()
}

fn default_seed() -> i64 {
    123
}

fn default_eta() -> f64 {
    1.0
}

fn default_cfg_scale() -> f64 {
    7.5
}

fn default_steps() -> i64 {
    50
}

fn default_motion() -> i64 {
    4
}

impl DynamiPayloadDto {
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, PipelineError> {
        let dto: Self = serde_json::from_value(Value::Object(payload.clone()))
            .map_err(|e| PipelineError::Validation(vec![format!("dynami_payload: {}", e)]))?;

        if let Err(e) = dto.validate() {
            return Err(PipelineError::Validation(validation_messages(&e)));
        }

        Ok(dto)
    }

    pub fn to_input_spec(&self, input_image: &str) -> InputSpec {
        InputSpec {
            input: InputSpecDynami {
                i2v_input_image: input_image.to_string(),
                i2v_input_text: self.i2v_input_text.to_string(),
                i2v_seed: self.i2v_seed,
                i2v_eta: self.i2v_eta,
                i2v_cfg_scale: self.i2v_cfg_scale,
                i2v_steps: self.i2v_steps,
                i2v_motion: self.i2v_motion,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: Value) -> Result<DynamiPayloadDto, PipelineError> {
        match value {
            Value::Object(map) => DynamiPayloadDto::from_payload(&map),
            _ => panic!("payload must be an object"),
        }
    }

    fn errors(value: Value) -> Vec<String> {
        match parse(value) {
            Err(PipelineError::Validation(errors)) => errors,
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn empty_payload_gets_defaults() {
        let dto = parse(json!({})).unwrap();

        assert_eq!(dto.i2v_input_text, "man fishing in a boat at sunset");
        assert_eq!(dto.i2v_seed, 123);
        assert_eq!(dto.i2v_eta, 1.0);
        assert_eq!(dto.i2v_cfg_scale, 7.5);
        assert_eq!(dto.i2v_steps, 50);
        assert_eq!(dto.i2v_motion, 4);
    }

    #[test]
    fn cfg_scale_upper_bound_is_inclusive() {
        let dto = parse(json!({ "i2v_cfg_scale": 15 })).unwrap();

        assert_eq!(dto.i2v_cfg_scale, 15.0);
    }

    #[test]
    fn cfg_scale_above_bound_names_field() {
        let errors = errors(json!({ "i2v_cfg_scale": 15.01 }));

        assert_eq!(errors, vec!["i2v_cfg_scale must be between 1 and 15.".to_string()]);
    }

    #[test]
    fn reports_every_violated_bound() {
        let errors = errors(json!({
            "i2v_seed": 10001,
            "i2v_steps": 0,
            "i2v_motion": 21,
            "i2v_eta": 1.5
        }));

        assert_eq!(
            errors,
            vec![
                "i2v_eta must be between 0 and 1.".to_string(),
                "i2v_motion must be between 1 and 20.".to_string(),
                "i2v_seed must be at most 10000.".to_string(),
                "i2v_steps must be between 1 and 60.".to_string(),
            ]
        );
    }

    #[test]
    fn fractional_step_count_is_a_type_error() {
        let errors = errors(json!({ "i2v_steps": 12.5 }));

        assert!(errors[0].starts_with("dynami_payload: invalid type"));
    }

    #[test]
    fn input_image_is_not_accepted_from_callers() {
        let errors = errors(json!({ "i2v_input_image": "https://example.com/a.png" }));

        assert!(errors[0].contains("i2v_input_image"));
    }

    #[test]
    fn input_spec_carries_image_and_parameters() {
        let dto = parse(json!({ "i2v_seed": 7, "i2v_input_text": "waves" })).unwrap();

        let spec = dto.to_input_spec("https://cdn.leonardo.ai/img-1.jpg");

        assert_eq!(spec.input.i2v_input_image, "https://cdn.leonardo.ai/img-1.jpg");
        assert_eq!(spec.input.i2v_seed, 7);
        assert_eq!(spec.input.i2v_input_text, "waves");
        assert_eq!(spec.input.i2v_steps, 50);
    }
}
