//! The single HTML page, rendered with or without a response.

use std::path::Path;

use minijinja::{Environment, context};

use crate::config::ConfigError;

const TEMPLATE_NAME: &str = "index.html";
const DEFAULT_TEMPLATE: &str = include_str!("../../templates/index.html");

/// A compiled page template. The `.html` name turns on HTML auto-escaping,
/// so model output can never inject markup.
pub struct Page {
    env: Environment<'static>,
}

impl Page {
    /// The template shipped inside the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, DEFAULT_TEMPLATE)
            .map_err(|source| ConfigError::TemplateInvalid {
                name: TEMPLATE_NAME.to_string(),
                source,
            })?;
        Ok(Self { env })
    }

    /// Read and compile a template from disk. Done once at startup.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut env = Environment::new();
        env.add_template_owned(TEMPLATE_NAME, source)
            .map_err(|source| ConfigError::TemplateInvalid {
                name: path.display().to_string(),
                source,
            })?;
        Ok(Self { env })
    }

    /// The operator's template if one is configured, otherwise the built-in one.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    pub fn render(&self, response: Option<&str>) -> Result<String, minijinja::Error> {
        self.env
            .get_template(TEMPLATE_NAME)?
            .render(context! { response => response })
    }
}
