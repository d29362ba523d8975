pub mod bellman;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod snapshot;
pub mod value_iteration;

#[cfg(test)]
mod tests;
