//! Credentials and token encoding.

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Username and password pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl Credentials {
    /// Create credentials
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// How a request authenticates
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Auth {
    /// Anonymous
    #[default]
    None,
    /// HTTP Basic with username and password
    Basic(Credentials),
    /// Server-issued token, sent as Basic `base64("<token>:")`
    Token(String),
}

impl Auth {
    /// Basic auth from a username and password
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic(Credentials::new(username, password))
    }

    /// Token auth from the raw token
    #[must_use]
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    pub(crate) fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::None => request,
            Self::Basic(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            Self::Token(token) => {
                request.header(reqwest::header::AUTHORIZATION, auth_header(&encode_token(token)))
            }
        }
    }
}

impl From<Credentials> for Auth {
    fn from(creds: Credentials) -> Self {
        Self::Basic(creds)
    }
}

/// Encode a raw token the way the service expects it: `base64("<token>:")`
#[must_use]
pub fn encode_token(token: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("{token}:"))
}

/// `Authorization` header value for an already encoded token
#[must_use]
pub fn auth_header(encoded: &str) -> String {
    format!("Basic {encoded}")
}
