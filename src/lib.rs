mod cli;
mod core;
mod processors;

pub use crate::cli::{Cli, Format};
pub use crate::core::{
    validate_config, ConvertConfig, ConverterError, FileMatcher, OutputFormat, Result,
    WorkGuard, WorkTracker, DEFAULT_DIRECTORIES, DEFAULT_EXTENSIONS,
};
pub use crate::processors::{Codec, ConversionOutcome, ConversionTask, Coordinator, ImageCodec};

pub mod prelude {
    pub use crate::{
        Codec, ConversionTask, ConvertConfig, Coordinator, FileMatcher, ImageCodec, WorkTracker,
    };
}
