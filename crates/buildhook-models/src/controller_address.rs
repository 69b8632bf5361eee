use std::str::FromStr;

use thiserror::Error;

/// Controller address error.
#[allow(missing_docs)]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerAddressError {
    /// Address is not of the `host:port` form.
    #[error("Invalid controller address, expected 'host:port': {}", address)]
    InvalidControllerAddress { address: String },
}

/// Build controller address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerAddress {
    host: String,
    port: u16,
}

impl ControllerAddress {
    /// Creates a new address.
    pub fn new<T: Into<String>>(host: T, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl std::fmt::Display for ControllerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for ControllerAddress {
    type Err = ControllerAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ControllerAddressError::InvalidControllerAddress { address: s.into() };

        let (host, port) = s.rsplit_once(':').ok_or_else(invalid)?;
        if host.is_empty() {
            return Err(invalid());
        }

        let port = port.parse::<u16>().map_err(|_| invalid())?;
        Ok(Self::new(host, port))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_valid() {
        let address = ControllerAddress::from_str("localhost:9989").unwrap();
        assert_eq!(address.host(), "localhost");
        assert_eq!(address.port(), 9989);
        assert_eq!(address.to_string(), "localhost:9989");
    }

    #[test]
    fn parse_invalid() {
        for value in ["localhost", ":9989", "localhost:port", "localhost:99999"] {
            assert_eq!(
                ControllerAddress::from_str(value),
                Err(ControllerAddressError::InvalidControllerAddress {
                    address: value.into()
                })
            );
        }
    }
}
