use serde::Serialize;

use super::input_spec_dynami::InputSpecDynami;

#[derive(Debug, Serialize)]
pub struct InputSpec {
    pub input: InputSpecDynami,
}
