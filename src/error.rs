use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    ConfigRead(std::io::Error),         // reading the parameters file failed
    ConfigParse(serde_json::Error),     // the parameters file is not valid JSON for `Parameters`
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigRead(e) => write!(f, "config read error: {e}"),
            Error::ConfigParse(e) => write!(f, "config parse error: {e}"),
            Error::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{name}`: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ConfigRead(e) => Some(e),
            Error::ConfigParse(e) => Some(e),
            Error::InvalidParameter { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::ConfigRead(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::ConfigParse(e)
    }
}
