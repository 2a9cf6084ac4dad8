//! User claims carried by backend access tokens

use base64::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid token format")]
    InvalidTokenFormat,
    #[error("Token payload is not valid base64: {0}")]
    InvalidPayloadEncoding(#[from] base64::DecodeError),
    #[error("Token payload is not a valid claims object: {0}")]
    InvalidClaims(#[from] serde_json::Error),
}

/// User attributes decoded from an access token
///
/// Field names on the wire follow the backend's token layout. The claims are read, never
/// verified: the signature part of the token is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    /// Backend user id
    pub id: i64,
    /// Name shown in the dashboard
    #[serde(rename = "nombre")]
    pub display_name: String,
    pub email: String,
    /// National document number
    #[serde(rename = "documento")]
    pub document_id: String,
    #[serde(rename = "foto_perfil")]
    pub profile_photo_url: String,
    #[serde(rename = "tipo_usuario")]
    pub user_type: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Expiration time as epoch seconds
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl UserClaims {
    /// Decodes claims from the payload segment of a JWT-shaped token.
    ///
    /// Accepts both padded and unpadded URL-safe base64, as issuers differ in that regard.
    pub fn decode(token: &str) -> Result<Self, Error> {
        let mut segments = token.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(Error::InvalidTokenFormat);
        };

        let payload = BASE64_URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        serde_json::from_slice(&payload).map_err(Into::into)
    }

    /// Checks if the claims expired at the given point in time
    ///
    /// Sub-second precision of `now` counts, so claims expire right after their `exp` second.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let seconds = now.timestamp();
        self.expires_at < seconds || (self.expires_at == seconds && now.timestamp_subsec_nanos() > 0)
    }

    /// Expiration time, if representable
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}
