//! jc-project: world document format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, plugin_diagnostics, validate_world};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_yaml(content: &str) -> ProjectResult<World> {
    let world: World = serde_yaml::from_str(content)?;
    validate_world(&world)?;
    Ok(world)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<World> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

pub fn save_yaml(path: &std::path::Path, world: &World) -> ProjectResult<()> {
    validate_world(world)?;
    let content = serde_yaml::to_string(world)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<World> {
    let content = std::fs::read_to_string(path)?;
    let world: World = serde_json::from_str(&content)?;
    validate_world(&world)?;
    Ok(world)
}

pub fn save_json(path: &std::path::Path, world: &World) -> ProjectResult<()> {
    validate_world(world)?;
    let content = serde_json::to_string_pretty(world)?;
    std::fs::write(path, content)?;
    Ok(())
}
