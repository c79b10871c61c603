use std::fs;
use std::path::{Path, PathBuf};

use crate::{ConvertOptions, parsing::Conversion};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a source document and return its content
pub fn read_source(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write a PreTeXt document, creating parent directories as needed
pub fn write_document(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}

/// Read and convert one source file
pub fn convert_file(input: &Path, options: &ConvertOptions) -> Result<Conversion, IoError> {
    let source = read_source(input)?;
    Ok(crate::parsing::convert(&source, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_directories() {
        // Given an output path below directories that don't exist yet
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pretext/source/ch1.ptx");

        // When writing the document
        write_document(&path, "<chapter/>").unwrap();

        // Then the file exists with the content
        assert_eq!(read_source(&path).unwrap(), "<chapter/>");
    }

    #[test]
    fn test_missing_source_is_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.Rmd");

        let err = read_source(&missing).unwrap_err();

        assert!(matches!(err, IoError::NotFound(p) if p == missing));
    }

    #[test]
    fn test_convert_file_reads_and_converts() {
        // Given a small source file
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("intro.Rmd");
        fs::write(&path, "## Start\n\nHello *there*.\n").unwrap();

        // When converting it
        let conversion = convert_file(&path, &ConvertOptions::default()).unwrap();

        // Then the section and paragraph are present
        let section = conversion.document.sections().next().unwrap();
        assert_eq!(section.title, "Start");
        assert_eq!(section.blocks().count(), 1);
        assert!(conversion.diagnostics.is_clean());
    }
}
