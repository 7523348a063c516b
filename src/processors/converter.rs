// webpify/src/processors/converter.rs
use super::codec::Codec;
use crate::core::ConverterError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    ReadFailed,
    ConvertFailed,
    WriteFailed,
    Converted { source_removed: bool },
}

impl ConversionOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionOutcome::Converted { .. })
    }
}

/// One file to convert: read, re-encode, write, then optionally remove the
/// source. Every step logs its own failure; nothing is retried or rolled back.
#[derive(Debug, Clone)]
pub struct ConversionTask {
    source: PathBuf,
    destination: PathBuf,
    clean: bool,
}

impl ConversionTask {
    pub fn new(source: PathBuf, destination: PathBuf, clean: bool) -> Self {
        Self {
            source,
            destination,
            clean,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn run(&self, codec: &dyn Codec) -> ConversionOutcome {
        log::info!("[processing] {}", self.source.display());

        let data = match std::fs::read(&self.source) {
            Ok(data) => data,
            Err(source) => {
                log::error!(
                    "{}",
                    ConverterError::Read {
                        path: self.source.clone(),
                        source,
                    }
                );
                return ConversionOutcome::ReadFailed;
            }
        };

        let encoded = match codec.convert(&data) {
            Ok(encoded) => encoded,
            Err(e) => {
                log::error!("Failed to convert {}: {}", self.source.display(), e);
                return ConversionOutcome::ConvertFailed;
            }
        };

        if let Err(source) = std::fs::write(&self.destination, &encoded) {
            log::error!(
                "{}",
                ConverterError::Write {
                    path: self.destination.clone(),
                    source,
                }
            );
            return ConversionOutcome::WriteFailed;
        }

        log::debug!(
            "Wrote {} ({} -> {} bytes)",
            self.destination.display(),
            data.len(),
            encoded.len()
        );

        // Source and destination are the same file here.
        if !self.clean || self.source == self.destination {
            return ConversionOutcome::Converted {
                source_removed: false,
            };
        }

        match std::fs::remove_file(&self.source) {
            Ok(()) => ConversionOutcome::Converted {
                source_removed: true,
            },
            Err(source) => {
                log::warn!(
                    "{}",
                    ConverterError::Remove {
                        path: self.source.clone(),
                        source,
                    }
                );
                ConversionOutcome::Converted {
                    source_removed: false,
                }
            }
        }
    }
}
