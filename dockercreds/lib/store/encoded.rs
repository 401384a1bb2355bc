use std::{
    fmt,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD, Engine};
use getset::Getters;

use crate::{DockerCredentials, DockerCredsError, DockerCredsResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Credentials stored inline in the `auths` section of the docker config.
#[derive(Clone, PartialEq, Eq, Getters)]
pub struct EncodedStore {
    /// Base64 of `username:password`, or of a bare username when paired with an identity token.
    auth: String,

    /// The `identitytoken` stored next to `auth`, if any.
    identity_token: Option<String>,

    /// The config the entry came from, for error messages.
    #[getset(get = "pub")]
    config_path: PathBuf,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl EncodedStore {
    /// Creates a store over one `auths` entry.
    pub fn new(
        auth: impl Into<String>,
        identity_token: Option<String>,
        config_path: impl AsRef<Path>,
    ) -> Self {
        Self {
            auth: auth.into(),
            identity_token,
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Decodes the stored credentials. `registry` is only used in error messages.
    ///
    /// The `username:password` split is authoritative. The identity token only comes into play when
    /// the split leaves no password: either `username:` or a bare `username` with no separator.
    pub fn get_credentials(&self, registry: &str) -> DockerCredsResult<DockerCredentials> {
        let decoded = STANDARD
            .decode(self.auth.trim())
            .map_err(|e| self.malformed(registry, format!("auth is not valid base64: {}", e)))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| self.malformed(registry, "auth is not valid UTF-8"))?;

        match (decoded.split_once(':'), self.identity_token.as_deref()) {
            (Some(("", _)), _) => Err(self.malformed(registry, "auth has an empty username")),
            (Some((username, "")), Some(token)) => {
                Ok(DockerCredentials::with_identity_token(username, token))
            }
            (Some((_, "")), None) => Err(self.malformed(registry, "auth has an empty password")),
            (Some((username, password)), _) => {
                Ok(DockerCredentials::with_password(username, password))
            }
            (None, Some(token)) if !decoded.is_empty() => {
                Ok(DockerCredentials::with_identity_token(decoded.as_str(), token))
            }
            (None, _) => Err(self.malformed(
                registry,
                "auth has no username:password separator and no identity token",
            )),
        }
    }

    fn malformed(&self, registry: &str, reason: impl fmt::Display) -> DockerCredsError {
        DockerCredsError::MalformedConfig(format!(
            "{} for registry '{}' in docker config '{}'",
            reason,
            registry,
            self.config_path.display()
        ))
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Debug for EncodedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedStore")
            .field("auth", &"<redacted>")
            .field("identity_token", &self.identity_token.as_ref().map(|_| "<redacted>"))
            .field("config_path", &self.config_path)
            .finish()
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
