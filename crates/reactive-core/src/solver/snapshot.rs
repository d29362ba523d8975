use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SolutionSnapshot {
    pub schema_version: u32,
    pub discount_factor: f64,
    pub iterations: usize,
    pub final_delta: f64,
    pub converged: bool,
    pub states: Vec<StateSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub state: usize,
    pub value: f64,
    pub action: usize,
}

impl SolutionSnapshot {
    /// Pretty-printed JSON for logs and fixtures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
