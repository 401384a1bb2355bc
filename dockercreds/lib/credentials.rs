use std::fmt;

use getset::Getters;

use crate::utils::IDENTITY_TOKEN_USERNAME;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Credentials for a container registry, as resolved from the docker config.
///
/// A registry login carries either a password or an identity token, never both.
/// The two are kept in a single [`DockerSecret`] so that invariant can't be broken.
#[derive(Clone, PartialEq, Eq, Getters)]
pub struct DockerCredentials {
    /// The username to authenticate as.
    #[getset(get = "pub")]
    username: String,

    /// The password or identity token.
    #[getset(get = "pub")]
    secret: DockerSecret,
}

/// The secret half of a [`DockerCredentials`].
#[derive(Clone, PartialEq, Eq)]
pub enum DockerSecret {
    /// A plain password for basic authentication.
    Password(String),

    /// An identity (refresh) token to be exchanged for a registry bearer token.
    IdentityToken(String),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl DockerCredentials {
    /// Creates credentials that authenticate with a password.
    pub fn with_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: DockerSecret::Password(password.into()),
        }
    }

    /// Creates credentials that authenticate with an identity token.
    pub fn with_identity_token(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: DockerSecret::IdentityToken(token.into()),
        }
    }

    /// Builds credentials from a credential helper's `Username`/`Secret` pair.
    ///
    /// A username of `<token>` marks the secret as an identity token.
    pub fn from_helper_pair(username: String, secret: String) -> Self {
        if username == IDENTITY_TOKEN_USERNAME {
            Self::with_identity_token(username, secret)
        } else {
            Self::with_password(username, secret)
        }
    }

    /// The password, if these credentials carry one.
    pub fn password(&self) -> Option<&str> {
        match &self.secret {
            DockerSecret::Password(password) => Some(password),
            DockerSecret::IdentityToken(_) => None,
        }
    }

    /// The identity token, if these credentials carry one.
    pub fn identity_token(&self) -> Option<&str> {
        match &self.secret {
            DockerSecret::IdentityToken(token) => Some(token),
            DockerSecret::Password(_) => None,
        }
    }

    /// Renders the credentials as a credential helper would print them for `get`.
    ///
    /// Identity tokens are reported under the `<token>` username, as the protocol requires.
    pub fn to_helper_json(&self) -> serde_json::Value {
        let username = match &self.secret {
            DockerSecret::Password(_) => self.username.as_str(),
            DockerSecret::IdentityToken(_) => IDENTITY_TOKEN_USERNAME,
        };

        serde_json::json!({
            "Username": username,
            "Secret": self.secret.expose(),
        })
    }
}

impl DockerSecret {
    /// The raw secret value regardless of its kind.
    pub fn expose(&self) -> &str {
        match self {
            DockerSecret::Password(value) | DockerSecret::IdentityToken(value) => value,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Debug for DockerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DockerCredentials")
            .field("username", &self.username)
            .field("secret", &self.secret)
            .finish()
    }
}

impl fmt::Debug for DockerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DockerSecret::Password(_) => f.write_str("Password(<redacted>)"),
            DockerSecret::IdentityToken(_) => f.write_str("IdentityToken(<redacted>)"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
