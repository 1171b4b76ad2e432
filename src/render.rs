//! Template rendering.
//!
//! Templates are Handlebars documents rendered with HTML escaping turned off.
//! Unknown variables render as empty strings.
use handlebars::Handlebars;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::Config;
use crate::error::RenderError;

/// Names every template sees whatever `dotfiles.toml` defines.
pub const BUILTIN_VARIABLES: [&str; 4] = ["home", "github_token", "env", "source"];

/// Config variables hidden by a built-in of the same name.
#[must_use]
pub fn shadowed_variables(config: &Config) -> Vec<&str> {
    config
        .variables
        .keys()
        .map(String::as_str)
        .filter(|name| BUILTIN_VARIABLES.contains(name))
        .collect()
}

/// Renders template files against a fixed set of variables.
#[derive(Debug)]
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
    data: Map<String, Value>,
}

impl TemplateRenderer {
    /// Build a renderer exposing the config variables, `home`,
    /// `github_token` and the process environment as `env`.
    #[must_use]
    pub fn new(config: &Config, home: &Path, github_token: Option<&str>) -> Self {
        Self::with_env(config, home, github_token, std::env::vars().collect())
    }

    /// Like [`new`](Self::new), with an explicit environment map.
    #[must_use]
    pub fn with_env(
        config: &Config,
        home: &Path,
        github_token: Option<&str>,
        env: BTreeMap<String, String>,
    ) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(false);

        let mut data: Map<String, Value> = config
            .variables
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::to_value(v).unwrap_or_default()))
            .collect();
        data.insert(
            "home".to_string(),
            Value::String(home.to_string_lossy().into_owned()),
        );
        data.insert(
            "github_token".to_string(),
            Value::String(github_token.unwrap_or_default().to_string()),
        );
        let env = env.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
        data.insert("env".to_string(), Value::Object(env));

        Self { handlebars, data }
    }

    /// Render `text` as if it had been read from `source`.
    ///
    /// The result is trimmed of leading and trailing whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not parse or fails to render.
    pub fn render_str(&self, source: &Path, text: &str) -> Result<String, RenderError> {
        let mut data = self.data.clone();
        data.insert(
            "source".to_string(),
            Value::String(source.to_string_lossy().into_owned()),
        );
        self.handlebars
            .render_template(text, &data)
            .map(|rendered| rendered.trim().to_string())
            .map_err(|e| RenderError::Template {
                path: source.to_path_buf(),
                source: Box::new(e),
            })
    }

    /// Read and render the template at `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to render.
    pub fn render(&self, source: &Path) -> Result<String, RenderError> {
        let text = std::fs::read_to_string(source).map_err(|e| RenderError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;
        self.render_str(source, &text)
    }
}
