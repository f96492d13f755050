use evolution_core::{DecodeError, EncodeError};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CliError {
    Read {
        source_name: String,
        error: std::io::Error,
    },
    Decode(DecodeError),
    Encode(EncodeError),
    Write(std::io::Error),
    ProposalNotFound(String),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { source_name, error } => {
                write!(f, "failed to read `{source_name}`: {error}")
            }
            Self::Decode(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "{err}"),
            Self::Write(err) => write!(f, "failed to write output: {err}"),
            Self::ProposalNotFound(id) => write!(f, "proposal not found: {id}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { error, .. } => Some(error),
            Self::Decode(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Write(err) => Some(err),
            Self::ProposalNotFound(_) => None,
        }
    }
}

impl From<DecodeError> for CliError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<EncodeError> for CliError {
    fn from(value: EncodeError) -> Self {
        Self::Encode(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Write(value)
    }
}
