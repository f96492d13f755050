//! Byte sources feeding the decoder.
//!
//! # Responsibility
//! - Resolve the CLI input argument into a readable source.
//! - Keep I/O out of `evolution_core`.

use std::io::Read;
use std::path::PathBuf;

/// Input argument that selects stdin.
pub const STDIN_ARG: &str = "-";

/// Supplier of raw feed bytes.
pub trait ByteSource {
    fn read_bytes(&self) -> std::io::Result<Vec<u8>>;
    /// Short label used in logs and error messages.
    fn describe(&self) -> String;
}

/// Feed input named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    pub fn from_arg(arg: &str) -> Self {
        if arg.trim() == STDIN_ARG {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }
}

impl ByteSource for InputSource {
    fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        match self {
            Self::File(path) => std::fs::read(path),
            Self::Stdin => {
                let mut buffer = Vec::new();
                std::io::stdin().lock().read_to_end(&mut buffer)?;
                Ok(buffer)
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "<stdin>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteSource, InputSource};
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn dash_selects_stdin() {
        assert_eq!(InputSource::from_arg("-"), InputSource::Stdin);
        assert_eq!(
            InputSource::from_arg("feed.json"),
            InputSource::File(PathBuf::from("feed.json"))
        );
    }

    #[test]
    fn file_source_reads_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"commit\":\"x\"}").unwrap();

        let source = InputSource::File(file.path().to_path_buf());
        assert_eq!(source.read_bytes().unwrap(), b"{\"commit\":\"x\"}");
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = InputSource::File(dir.path().join("missing.json"));
        assert!(source.read_bytes().is_err());
    }
}
