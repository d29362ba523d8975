use std::{fs, path::Path};

use crate::{Scenario, ScenarioError, ScenarioSpec};

/// Load a scenario spec from YAML on disk.
pub fn load_yaml(path: impl AsRef<Path>) -> Result<ScenarioSpec, ScenarioError> {
    let yaml = fs::read_to_string(path)?;
    let spec: ScenarioSpec = serde_yaml::from_str(&yaml)?;
    Ok(spec)
}

/// Load and compile a scenario from a YAML file.
pub fn compile_yaml(path: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
    let spec = load_yaml(path)?;
    spec.compile()
}

/// Serialize and write a scenario spec to YAML.
pub fn save_yaml(path: impl AsRef<Path>, spec: &ScenarioSpec) -> Result<(), ScenarioError> {
    let yaml = serde_yaml::to_string(spec)?;
    fs::write(path, yaml)?;
    Ok(())
}
