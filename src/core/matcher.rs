// webpify/src/core/matcher.rs
use super::{ConverterError, Result};
use regex::bytes::Regex;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Decides which files get converted and where their output goes.
///
/// The extension list compiles to one case-insensitive pattern anchored at
/// the end of the file name, e.g. `(?i)\.(png|jpg|jpeg)$`. The matched
/// suffix is swapped for `.` + the target suffix to build the destination.
/// Names are matched as raw bytes, so non-UTF-8 file names are eligible too.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    pattern: Regex,
    replacement: String,
}

impl FileMatcher {
    pub fn new<S: AsRef<str>>(extensions: &[S], target_suffix: &str) -> Result<Self> {
        if extensions.is_empty() {
            return Err(ConverterError::InvalidExtension(
                "extension list is empty".to_string(),
            ));
        }

        let mut alternatives = Vec::with_capacity(extensions.len());
        for ext in extensions {
            let raw = ext.as_ref();
            let ext = raw.trim();
            let ext = ext.strip_prefix('.').unwrap_or(ext);
            if ext.is_empty() || ext.contains(['/', '\\']) {
                return Err(ConverterError::InvalidExtension(raw.to_string()));
            }
            alternatives.push(regex::escape(ext));
        }

        let pattern = Regex::new(&format!(r"(?i)\.({})$", alternatives.join("|")))?;
        log::debug!("Compiled file pattern: {}", pattern.as_str());

        Ok(Self {
            pattern,
            replacement: format!(".{}", target_suffix),
        })
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.pattern.is_match(name.as_encoded_bytes()))
            .unwrap_or(false)
    }

    /// Sibling path with the matched extension replaced, or `None` when the
    /// path is not eligible.
    pub fn destination_of(&self, path: &Path) -> Option<PathBuf> {
        let name = path.file_name()?;
        let found = self.pattern.find(name.as_encoded_bytes())?;
        let mut new_name = stem_before(name, found.start())?;
        new_name.push(&self.replacement);
        Some(path.with_file_name(new_name))
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

// `at` always points at the ASCII dot of the match, a valid split point.
#[cfg(unix)]
fn stem_before(name: &OsStr, at: usize) -> Option<OsString> {
    use std::os::unix::ffi::OsStrExt;

    Some(OsStr::from_bytes(&name.as_encoded_bytes()[..at]).to_os_string())
}

#[cfg(not(unix))]
fn stem_before(name: &OsStr, at: usize) -> Option<OsString> {
    name.to_str()
        .and_then(|name| name.get(..at))
        .map(OsString::from)
}
