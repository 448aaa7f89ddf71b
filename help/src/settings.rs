//! Run-time settings for matching a help document.
//!
//! # Example YAML
//!
//! ```yaml
//! help: true
//! version: "naval_fate 2.0"
//! options_first: false
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How [`Document::run`](crate::Document::run) treats help and version
/// requests and where option parsing stops.
///
/// Missing YAML keys keep their defaults.
///
/// # Examples
///
/// ```
/// use docmatch_help::Settings;
///
/// let settings: Settings = serde_yaml::from_str("version: prog 1.0").unwrap();
/// assert!(settings.help);
/// assert_eq!(settings.version.as_deref(), Some("prog 1.0"));
/// assert!(!settings.options_first);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Answer `-h`/`--help` with the document text.
    pub help: bool,
    /// Text to answer `--version` with; `None` leaves `--version` to the
    /// pattern.
    pub version: Option<String>,
    /// Everything after the first positional argument is positional.
    pub options_first: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            help: true,
            version: None,
            options_first: false,
        }
    }
}

impl Settings {
    pub fn with_help(mut self, help: bool) -> Self {
        self.help = help;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_options_first(mut self, options_first: bool) -> Self {
        self.options_first = options_first;
        self
    }

    /// Loads settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::HelpError::Io) if the file cannot be read, or
    /// [`Yaml`](crate::HelpError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let settings = serde_yaml::from_reader(reader)?;
        Ok(settings)
    }

    /// Saves settings to a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::HelpError::Io) if the file cannot be written, or
    /// [`Yaml`](crate::HelpError::Yaml) if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
