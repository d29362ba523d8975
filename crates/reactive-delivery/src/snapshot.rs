use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PolicySnapshot {
    pub schema_version: u32,
    pub discount_factor: f64,
    pub iterations: usize,
    pub final_delta: f64,
    pub converged: bool,
    pub states: Vec<PolicyEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyEntry {
    pub city: String,
    pub destination: Option<String>,
    pub value: f64,
    pub move_to: String,
    pub delivering: bool,
}

impl PolicySnapshot {
    /// Pretty-printed JSON for logs and fixtures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
