use serde::{Deserialize, Serialize};

/// Type of JWT: access or refresh.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Payload of an access token. Carries name/email so handlers can show who
/// is calling without a store lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,     // user ID
    pub name: String,    // display name
    pub email: String,   // login email
    pub iat: i64,        // issued at (unix timestamp)
    pub nbf: i64,        // not valid before
    pub exp: i64,        // expires at
    pub iss: String,     // issuer
    pub kind: TokenKind, // always Access
}

/// Payload of a refresh token: identity only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub iss: String,
    pub kind: TokenKind, // always Refresh
}
