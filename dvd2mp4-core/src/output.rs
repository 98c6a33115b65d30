//! Output organization: where converted files go and what they are called.
//!
//! Converted files land in a `Converted_MP4` folder placed next to the chosen
//! DVD folder, so converting `/media/dvd/VIDEO_TS` writes into
//! `/media/dvd/Converted_MP4`.

use crate::error::{CoreError, CoreResult};

use std::fs;
use std::path::{Path, PathBuf};

/// Name of the folder created beside the input folder.
pub const OUTPUT_DIR_NAME: &str = "Converted_MP4";

/// Extension of converted files.
pub const OUTPUT_EXTENSION: &str = "mp4";

/// Returns the sibling output folder for `input_dir`.
///
/// A bare relative name such as `VIDEO_TS` resolves against `.`. An input
/// without a parent (a filesystem root) gets the folder inside it.
pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    match input_dir.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new(".").join(OUTPUT_DIR_NAME),
        Some(parent) => parent.join(OUTPUT_DIR_NAME),
        None => input_dir.join(OUTPUT_DIR_NAME),
    }
}

/// Maps a VOB path to its MP4 path inside `output_dir` (`VTS_01_1.VOB` ->
/// `VTS_01_1.mp4`).
pub fn output_path_for(input_path: &Path, output_dir: &Path) -> CoreResult<PathBuf> {
    let stem = input_path.file_stem().ok_or_else(|| {
        CoreError::PathError(format!(
            "Failed to get filename stem for {}",
            input_path.display()
        ))
    })?;

    let mut name = stem.to_os_string();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    Ok(output_dir.join(name))
}

/// Creates the output folder (and any missing parents). Existing folders are fine.
pub fn prepare_output_dir(output_dir: &Path) -> CoreResult<()> {
    fs::create_dir_all(output_dir).map_err(|e| {
        CoreError::PathError(format!(
            "Failed to create output directory '{}': {}",
            output_dir.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir_is_sibling() {
        let out = default_output_dir(Path::new("/media/dvd/VIDEO_TS"));
        assert_eq!(out, PathBuf::from("/media/dvd/Converted_MP4"));
    }

    #[test]
    fn test_default_output_dir_for_root() {
        let out = default_output_dir(Path::new("/"));
        assert_eq!(out, PathBuf::from("/Converted_MP4"));
    }

    #[test]
    fn test_default_output_dir_for_bare_relative_name() {
        let out = default_output_dir(Path::new("VIDEO_TS"));
        assert_eq!(out, PathBuf::from(".").join("Converted_MP4"));
    }

    #[test]
    fn test_default_output_dir_for_relative_nested_path() {
        let out = default_output_dir(Path::new("MOVIE/VIDEO_TS"));
        assert_eq!(out, PathBuf::from("MOVIE").join("Converted_MP4"));
    }

    #[test]
    fn test_output_path_for_replaces_extension() {
        let out = output_path_for(
            Path::new("/dvd/VIDEO_TS/VTS_01_1.VOB"),
            Path::new("/dvd/Converted_MP4"),
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("/dvd/Converted_MP4/VTS_01_1.mp4"));
    }

    #[test]
    fn test_output_path_for_without_filename_errors() {
        let result = output_path_for(Path::new("/"), Path::new("/out"));
        assert!(matches!(result, Err(CoreError::PathError(_))));
    }

    #[test]
    fn test_prepare_output_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a").join(OUTPUT_DIR_NAME);
        prepare_output_dir(&out).unwrap();
        prepare_output_dir(&out).unwrap();
        assert!(out.is_dir());
    }
}
