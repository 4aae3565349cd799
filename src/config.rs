use log::Level;

use crate::error::{Error, Result};

pub const DEFAULT_CANVAS_ID: &str = "c";

/// Runtime settings, overridable from the page query string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub canvas_id: String,
    pub log_level: Level,
    /// Every pixel is repainted each frame, so clearing is off unless asked for.
    pub auto_clear_color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            log_level: Level::Info,
            auto_clear_color: false,
        }
    }
}

impl Config {
    /// Builds a config from already-decoded query parameters (`canvas`, `log`,
    /// `clear`). `param` returns `None` for absent keys.
    pub fn from_params<F>(param: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(id) = param("canvas") {
            if id.is_empty() {
                return Err(Error::Config("canvas id is empty".into()));
            }
            config.canvas_id = id;
        }
        if let Some(level) = param("log") {
            config.log_level = level
                .parse()
                .map_err(|_| Error::Config(format!("unknown log level `{level}`")))?;
        }
        if let Some(flag) = param("clear") {
            config.auto_clear_color = parse_flag(&flag)?;
        }
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value {
        "" | "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        other => Err(Error::Config(format!("expected a boolean, got `{other}`"))),
    }
}
