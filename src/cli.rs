// webpify/src/cli.rs
use crate::core::{ConvertConfig, OutputFormat};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "webpify")]
#[command(about = "Concurrently walk directories and convert images to WebP", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directories to search in, comma separated
    #[arg(
        short,
        long = "dir",
        visible_alias = "directories",
        value_delimiter = ',',
        default_value = "/var/www/uploads,/var/www/assets"
    )]
    pub directories: Vec<PathBuf>,

    /// Delete the source image after a successful conversion
    #[arg(long)]
    pub clean: bool,

    /// Extensions to process, comma separated and without the dot
    #[arg(
        short,
        long = "ext",
        visible_alias = "extensions",
        value_delimiter = ',',
        default_value = "png,jpg,jpeg"
    )]
    pub extensions: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "webp")]
    pub format: Format,

    /// Number of worker threads (0 = one per CPU)
    #[arg(short, long, default_value = "0")]
    pub threads: usize,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Webp,
    Png,
    Jpeg,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Webp => OutputFormat::WebP,
            Format::Png => OutputFormat::Png,
            Format::Jpeg => OutputFormat::Jpeg,
        }
    }
}

impl From<&Cli> for ConvertConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            directories: cli.directories.clone(),
            extensions: cli.extensions.clone(),
            clean: cli.clean,
            format: cli.format.into(),
            threads: cli.threads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["webpify"]);
        let config = ConvertConfig::from(&cli);
        let defaults = ConvertConfig::default();

        assert_eq!(config.directories, defaults.directories);
        assert_eq!(config.extensions, defaults.extensions);
        assert!(!config.clean);
        assert_eq!(config.format, OutputFormat::WebP);
    }

    #[test]
    fn test_comma_separated_lists() {
        let cli = Cli::parse_from([
            "webpify",
            "--dir",
            "/a,/b,/c",
            "--ext",
            "gif,BMP",
            "--clean",
        ]);

        assert_eq!(
            cli.directories,
            vec![PathBuf::from("/a"), PathBuf::from("/b"), PathBuf::from("/c")]
        );
        assert_eq!(cli.extensions, vec!["gif", "BMP"]);
        assert!(cli.clean);
    }

    #[test]
    fn test_long_aliases() {
        let cli = Cli::parse_from([
            "webpify",
            "--directories",
            "/srv",
            "--extensions",
            "tif",
            "--format",
            "jpeg",
        ]);

        assert_eq!(cli.directories, vec![PathBuf::from("/srv")]);
        assert_eq!(cli.extensions, vec!["tif"]);
        assert_eq!(OutputFormat::from(cli.format), OutputFormat::Jpeg);
    }
}
