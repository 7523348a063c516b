// webpify/src/core/mod.rs
mod matcher;
mod tracker;

pub use matcher::FileMatcher;
pub use tracker::{WorkGuard, WorkTracker};

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_DIRECTORIES: [&str; 2] = ["/var/www/uploads", "/var/www/assets"];
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    WebP,
    Png,
    Jpeg,
}

impl OutputFormat {
    /// File name suffix written after the dot, e.g. `webp`.
    pub fn suffix(&self) -> &'static str {
        match self {
            OutputFormat::WebP => "webp",
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            OutputFormat::WebP => image::ImageFormat::WebP,
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub directories: Vec<PathBuf>,
    pub extensions: Vec<String>,
    pub clean: bool,
    pub format: OutputFormat,
    pub threads: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            directories: DEFAULT_DIRECTORIES.iter().map(PathBuf::from).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            clean: false,
            format: OutputFormat::WebP,
            threads: 0,
        }
    }
}

impl ConvertConfig {
    /// Only the extension list can stop a run; bad roots fail per walk.
    pub fn validate(&self) -> Result<()> {
        FileMatcher::new(&self.extensions, self.format.suffix())?;
        Ok(())
    }

    /// Roots to walk, with empty entries (e.g. from `--dir /a,`) dropped.
    pub fn roots(&self) -> Vec<PathBuf> {
        let roots: Vec<PathBuf> = self
            .directories
            .iter()
            .filter(|dir| {
                let empty = dir.as_os_str().is_empty();
                if empty {
                    log::warn!("Ignoring empty entry in directory list");
                }
                !empty
            })
            .cloned()
            .collect();

        if roots.is_empty() {
            log::warn!("No directories to walk");
        }

        roots
    }
}

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid extension pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid extension: {0:?}")]
    InvalidExtension(String),

    #[error("Failed to create thread pool: {0}")]
    ThreadPool(String),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConverterError>;

pub fn validate_config(config: &ConvertConfig) -> Result<()> {
    config.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ConvertConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extensions, vec!["png", "jpg", "jpeg"]);
        assert_eq!(config.directories.len(), 2);
        assert!(!config.clean);
        assert_eq!(config.format, OutputFormat::WebP);
    }

    #[test]
    fn test_empty_directory_entries_are_not_fatal() {
        let config = ConvertConfig {
            directories: vec![PathBuf::new(), PathBuf::from("/srv/a"), PathBuf::new()],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.roots(), vec![PathBuf::from("/srv/a")]);
    }

    #[test]
    fn test_empty_directory_list_is_not_fatal() {
        let config = ConvertConfig {
            directories: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.roots().is_empty());
    }

    #[test]
    fn test_malformed_extensions_rejected() {
        let config = ConvertConfig {
            extensions: vec!["png".to_string(), String::new()],
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConverterError::InvalidExtension(_))
        ));
    }

    #[test]
    fn test_format_suffixes() {
        assert_eq!(OutputFormat::WebP.suffix(), "webp");
        assert_eq!(OutputFormat::Jpeg.image_format(), image::ImageFormat::Jpeg);
    }
}
