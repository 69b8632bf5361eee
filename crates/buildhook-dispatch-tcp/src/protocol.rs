use buildhook_dispatch_interface::DispatchError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct Request<'a, P> {
    pub id: u64,
    pub method: &'a str,
    pub params: &'a P,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginParams<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Reply {
    pub id: u64,
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl Reply {
    /// Check the reply answers `expected_id`, then split acknowledgment from
    /// remote error.
    pub fn into_outcome(self, expected_id: u64) -> Result<Option<String>, DispatchError> {
        if self.id != expected_id {
            return Err(DispatchError::ProtocolError {
                reason: format!("expected reply {expected_id}, got {}", self.id),
            });
        }

        match (self.ok, self.error) {
            (_, Some(error)) => Ok(Some(error)),
            (true, None) => Ok(None),
            (false, None) => Err(DispatchError::ProtocolError {
                reason: format!("reply {} is neither ok nor an error", self.id),
            }),
        }
    }
}
