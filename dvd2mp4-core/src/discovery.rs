//! File discovery module for finding DVD title VOBs to convert.
//!
//! A ripped DVD folder (usually `VIDEO_TS`) mixes the title VOBs holding the
//! actual video with tiny menu and navigation VOBs. Only the top level of the
//! folder is scanned, and files at or below the size threshold are dropped.

use crate::error::{CoreError, CoreResult};

use serde::Serialize;

use std::path::{Path, PathBuf};

/// A VOB file selected for conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VobFile {
    pub path: PathBuf,
    pub size: u64,
}

impl VobFile {
    /// File name for display, lossily converted.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Returns true if the path carries a `.vob` extension (case-insensitive).
#[must_use]
pub fn is_vob_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("vob"))
}

/// Finds VOB files larger than `min_size` bytes in the top level of `input_dir`.
///
/// Results are sorted by file name so `VTS_01_1.VOB` is converted before
/// `VTS_01_2.VOB`.
///
/// # Returns
///
/// * `Ok(Vec<VobFile>)` - The qualifying files, sorted
/// * `Err(CoreError::InputNotFound)` - If `input_dir` does not exist
/// * `Err(CoreError::PathError)` - If `input_dir` is not a directory
/// * `Err(CoreError::NoFilesFound)` - If no file qualifies
///
/// # Examples
///
/// ```rust,no_run
/// use dvd2mp4_core::find_vob_files;
/// use dvd2mp4_core::config::MIN_VOB_SIZE_BYTES;
/// use std::path::Path;
///
/// match find_vob_files(Path::new("/media/dvd/VIDEO_TS"), MIN_VOB_SIZE_BYTES) {
///     Ok(files) => {
///         for file in files {
///             println!("{} ({} bytes)", file.name(), file.size);
///         }
///     }
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn find_vob_files(input_dir: &Path, min_size: u64) -> CoreResult<Vec<VobFile>> {
    if !input_dir.exists() {
        return Err(CoreError::InputNotFound(input_dir.to_path_buf()));
    }
    if !input_dir.is_dir() {
        return Err(CoreError::PathError(format!(
            "'{}' is not a directory",
            input_dir.display()
        )));
    }

    let mut files: Vec<VobFile> = std::fs::read_dir(input_dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if !path.is_file() || !is_vob_file(&path) {
                return None;
            }

            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => {
                    log::warn!("Could not read metadata for {}: {}", path.display(), e);
                    return None;
                }
            };

            if size > min_size {
                Some(VobFile { path, size })
            } else {
                log::debug!(
                    "Ignoring {} ({} bytes): menu or navigation VOB",
                    path.display(),
                    size
                );
                None
            }
        })
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }

    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_vob_file() {
        assert!(is_vob_file(Path::new("VTS_01_1.VOB")));
        assert!(is_vob_file(Path::new("vts_01_1.vob")));
        assert!(is_vob_file(Path::new("/dvd/VIDEO_TS/Vts_02_1.Vob")));
        assert!(!is_vob_file(Path::new("VTS_01_0.IFO")));
        assert!(!is_vob_file(Path::new("VTS_01_0.BUP")));
        assert!(!is_vob_file(Path::new("VOB")));
        assert!(!is_vob_file(Path::new("")));
    }

    #[test]
    fn test_vob_file_name() {
        let file = VobFile {
            path: PathBuf::from("/dvd/VIDEO_TS/VTS_01_1.VOB"),
            size: 42,
        };
        assert_eq!(file.name(), "VTS_01_1.VOB");
    }
}
