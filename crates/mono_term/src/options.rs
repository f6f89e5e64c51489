use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::SessionResult;

const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Program started by `mono run` without an explicit command
    #[serde(default = "default_shell")]
    pub shell: String,

    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,

    /// flexi_logger spec string
    #[serde(default = "default_log_spec")]
    pub log_spec: String,

    #[serde(default = "default_true")]
    pub log_to_file: bool,

    /// Echo parser diagnostics to stderr during replay
    #[serde(default)]
    pub print_diagnostics: bool,
}

fn default_shell() -> String {
    if cfg!(windows) {
        return "cmd.exe".to_string();
    }
    std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
}

fn default_read_buffer_size() -> usize {
    DEFAULT_READ_BUFFER_SIZE
}

fn default_log_spec() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Options {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            log_spec: default_log_spec(),
            log_to_file: true,
            print_diagnostics: false,
        }
    }
}

impl Options {
    /// Returns the configuration directory path
    pub fn get_config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "GitHub", "mono").map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
    }

    /// Returns the log directory, creating it when needed.
    pub fn get_log_dir() -> Option<PathBuf> {
        let dir = Self::get_config_dir()?;
        if !dir.exists() {
            fs::create_dir_all(&dir).ok()?;
        }
        Some(dir)
    }

    /// Path of `options.toml` inside the config directory
    pub fn get_options_file() -> Option<PathBuf> {
        Self::get_config_dir().map(|dir| dir.join("options.toml"))
    }

    /// Loads `options.toml` from the config directory, defaults if there is none.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but can't be read or isn't valid TOML.
    pub fn load_options() -> SessionResult<Self> {
        match Self::get_options_file() {
            Some(options_file) => Self::load_from(&options_file),
            None => Ok(Options::default()),
        }
    }

    /// Defaults if `options_file` doesn't exist.
    pub fn load_from(options_file: &Path) -> SessionResult<Self> {
        if !options_file.exists() {
            return Ok(Options::default());
        }
        let content = fs::read_to_string(options_file)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> SessionResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// # Errors
    ///
    /// Fails if the config directory can't be created or the file can't be written.
    pub fn store_options(&self) -> SessionResult<()> {
        if let Some(options_file) = Self::get_options_file() {
            self.store_to(&options_file)?;
        }
        Ok(())
    }

    pub fn store_to(&self, options_file: &Path) -> SessionResult<()> {
        let mut write_name = options_file.to_path_buf();
        write_name.set_extension("new");

        if let Some(dir) = options_file.parent() {
            fs::create_dir_all(dir)?;
        }
        let toml_string = toml::to_string_pretty(self)?;

        // Write to temp file, then move it over the real one
        fs::write(&write_name, toml_string)?;
        fs::rename(&write_name, options_file)?;
        Ok(())
    }
}
