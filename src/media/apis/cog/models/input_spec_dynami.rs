use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSpecDynami {
    pub i2v_input_image: String,
    pub i2v_input_text: String,
    pub i2v_seed: i64,
    pub i2v_eta: f64,
    pub i2v_cfg_scale: f64,
    pub i2v_steps: i64,
    pub i2v_motion: i64,
}
