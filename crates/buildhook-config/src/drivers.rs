use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Invalid driver kind: {kind}")]
    InvalidDriverKind { kind: String },
}

/// Controller channel driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchDriver {
    Null,
    Tcp,
}

impl FromStr for DispatchDriver {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "null" => Ok(Self::Null),
            "tcp" => Ok(Self::Tcp),
            _ => Err(DriverError::InvalidDriverKind { kind: s.into() }),
        }
    }
}
