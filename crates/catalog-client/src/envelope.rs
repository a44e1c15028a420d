//! Backend response envelope.
//!
//! Every endpoint answers `{ "errCode": 0, "errMessage"?: "...", "data"?: T }`.
//! `errCode == 0` is success; anything else is a domain error whose message
//! is meant for the operator.

use serde::Deserialize;

use crate::error::ClientError;

/// Response envelope of the catalog backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// `0` on success.
    pub err_code: i64,
    /// Human-readable message, usually present on failure.
    #[serde(alias = "message")]
    pub err_message: Option<String>,
    /// Payload, if the endpoint returns one.
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Whether the backend reported success.
    pub fn is_success(&self) -> bool {
        self.err_code == 0
    }

    /// Convert into the payload, or a [`ClientError::Backend`].
    pub fn into_result(self, endpoint: &str) -> Result<Option<T>, ClientError> {
        if self.is_success() {
            return Ok(self.data);
        }
        Err(ClientError::Backend {
            endpoint: endpoint.to_string(),
            err_code: self.err_code,
            message: self.err_message,
        })
    }
}

/// Best-effort extraction of `errMessage` from an error body.
pub(crate) fn message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|env| env.err_message)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_yields_data() {
        let env: ApiEnvelope<Vec<i32>> =
            serde_json::from_str(r#"{"errCode":0,"data":[1,2]}"#).unwrap();
        assert_eq!(env.into_result("x").unwrap(), Some(vec![1, 2]));
    }

    #[test]
    fn nonzero_code_is_backend_error() {
        let env: ApiEnvelope<()> =
            serde_json::from_str(r#"{"errCode":2,"errMessage":"Priority already used"}"#).unwrap();
        let err = env.into_result("PUT /api/announcements/5/lifecycle").unwrap_err();
        assert_eq!(err.user_message(), "Priority already used");
    }

    #[test]
    fn message_alias_and_extraction() {
        assert_eq!(
            message_from_body(r#"{"errCode":1,"message":"Token expired"}"#).as_deref(),
            Some("Token expired")
        );
        assert_eq!(message_from_body("<html>502</html>"), None);
        assert_eq!(message_from_body(r#"{"errCode":1,"errMessage":"  "}"#), None);
    }
}
