use rmd_pretext_engine::{ChapterOptions, ConvertOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Conversion options shared by every job, plus the batch job list.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub options: ConvertOptions,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// One chapter to convert in a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Captured (code, output) pairs to attach after conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<ChapterOptions>,
    #[serde(default)]
    pub options: OptionsOverride,
}

impl Job {
    /// The global options with this job's overrides and fixed chapter applied.
    pub fn convert_options(&self, global: &ConvertOptions) -> ConvertOptions {
        let mut options = self.options.apply(global.clone());
        if self.chapter.is_some() {
            options.chapter = self.chapter.clone();
        }
        options
    }
}

/// Per-job option overrides; unset fields keep the global value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mdash: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockquote_attribution: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lazy_list_continuation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_front_matter: Option<bool>,
}

impl OptionsOverride {
    pub fn apply(&self, mut options: ConvertOptions) -> ConvertOptions {
        if let Some(v) = self.mdash {
            options.mdash = v;
        }
        if let Some(v) = self.blockquote_attribution {
            options.blockquote_attribution = v;
        }
        if let Some(v) = self.lazy_list_continuation {
            options.lazy_list_continuation = v;
        }
        if let Some(v) = self.skip_front_matter {
            options.skip_front_matter = v;
        }
        options
    }
}

impl Config {
    pub const LOCAL_FILE: &'static str = "rmd-pretext.toml";

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Job paths are relative to the config file, after expansion
        let base = config_path.parent().unwrap_or(Path::new(""));
        for job in &mut config.jobs {
            job.input = Self::resolve(base, &job.input);
            job.output = Self::resolve(base, &job.output);
            job.outputs = job.outputs.as_deref().map(|p| Self::resolve(base, p));
        }

        Ok(Some(config))
    }

    /// `rmd-pretext.toml` in the working directory, else the user config.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let local = PathBuf::from(Self::LOCAL_FILE);
        match Self::load_from_path(&local)? {
            Some(config) => Ok(Some(config)),
            None => Self::load_from_path(Self::config_path()),
        }
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/rmd-pretext");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn resolve(base: &Path, path: &Path) -> PathBuf {
        let path = Self::expand_path(path).unwrap_or_else(|| path.to_path_buf());
        if path.is_absolute() {
            path
        } else {
            base.join(path)
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
