use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use getset::Getters;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{system::FileSystem, DockerCredsError, DockerCredsResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The credential-related parts of a docker `config.json`.
///
/// Only the fields needed to pick a credential source are read; everything else in the file is
/// ignored. `null` values are kept apart from missing ones because docker treats a `null` helper
/// name as a broken config rather than an absent one.
///
/// Per-registry entries are kept as raw JSON and only type-checked when that registry is looked
/// up, so a broken entry for one registry doesn't affect the others.
#[derive(Debug, Default, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct DockerConfig {
    /// Per-registry credential helpers, e.g. `{"gcr.io": "gcloud"}`.
    #[serde(default)]
    cred_helpers: Option<HashMap<String, Value>>,

    /// The default credential store, e.g. `"desktop"`.
    #[serde(default, deserialize_with = "deserialize_present")]
    creds_store: Option<Option<String>>,

    /// Inline credentials keyed by registry.
    #[serde(default)]
    auths: Option<HashMap<String, Value>>,

    /// Where the document was read from.
    #[serde(skip)]
    #[getset(get = "pub")]
    path: PathBuf,
}

/// One entry of the `auths` section.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AuthEntry {
    /// Base64 of `username:password`, or of a bare username when an identity token is used.
    #[serde(default)]
    auth: Option<String>,

    /// An identity token stored alongside `auth`.
    #[serde(default)]
    identitytoken: Option<String>,
}

/// What the config says about a single key that may be present, null, or set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigValue<'a> {
    /// The key isn't there.
    Missing,

    /// The key is there with a `null` value.
    Null,

    /// The key is there with a string value.
    Set(&'a str),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl DockerConfig {
    /// Parses a docker config from its JSON text.
    pub fn parse(contents: &str, path: &Path) -> DockerCredsResult<Self> {
        let mut config: Self = serde_json::from_str(contents).map_err(|e| {
            DockerCredsError::MalformedConfig(format!(
                "unable to parse docker config '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.path = path.to_path_buf();
        Ok(config)
    }

    /// Reads and parses the docker config at `path`.
    pub async fn load(fs: &dyn FileSystem, path: &Path) -> DockerCredsResult<Self> {
        if !fs.is_file(path).await {
            return Err(DockerCredsError::ConfigNotFound(format!(
                "docker config '{}' doesn't exist",
                path.display()
            )));
        }

        let contents = fs.read_to_string(path).await.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => DockerCredsError::MalformedConfig(format!(
                "docker config '{}' is not valid UTF-8",
                path.display()
            )),
            _ => DockerCredsError::ConfigNotFound(format!(
                "unable to read docker config '{}': {}",
                path.display(),
                e
            )),
        })?;

        Self::parse(&contents, path)
    }

    /// The credential helper configured for `registry` under `credHelpers`.
    ///
    /// Fails if the entry is neither a string nor `null`.
    pub fn cred_helper(&self, registry: &str) -> DockerCredsResult<ConfigValue<'_>> {
        match self.cred_helpers.as_ref().and_then(|helpers| helpers.get(registry)) {
            None => Ok(ConfigValue::Missing),
            Some(Value::Null) => Ok(ConfigValue::Null),
            Some(Value::String(helper)) => Ok(ConfigValue::Set(helper)),
            Some(other) => Err(DockerCredsError::MalformedConfig(format!(
                "credHelper for host '{}' in docker config '{}' must be a string, found {}",
                registry,
                self.path.display(),
                json_type(other)
            ))),
        }
    }

    /// The default credential store under `credsStore`.
    pub fn creds_store(&self) -> ConfigValue<'_> {
        match &self.creds_store {
            None => ConfigValue::Missing,
            Some(None) => ConfigValue::Null,
            Some(Some(store)) => ConfigValue::Set(store),
        }
    }

    /// The `auths` entry for `registry`, matched exactly.
    ///
    /// Fails if the entry isn't an object with string `auth` and `identitytoken` fields.
    pub fn auth_entry(&self, registry: &str) -> DockerCredsResult<Option<AuthEntry>> {
        let Some(value) = self.auths.as_ref().and_then(|auths| auths.get(registry)) else {
            return Ok(None);
        };

        AuthEntry::deserialize(value).map(Some).map_err(|e| {
            DockerCredsError::MalformedConfig(format!(
                "invalid auths entry for registry '{}' in docker config '{}': {}",
                registry,
                self.path.display(),
                e
            ))
        })
    }

    /// Whether the config has any of `credHelpers`, `credsStore` or `auths`.
    pub fn has_credential_sections(&self) -> bool {
        self.cred_helpers.is_some() || self.creds_store.is_some() || self.auths.is_some()
    }
}

impl AuthEntry {
    /// The base64 `auth` value.
    pub fn auth(&self) -> Option<&str> {
        self.auth.as_deref()
    }

    /// The identity token, ignoring an empty one.
    pub fn identity_token(&self) -> Option<&str> {
        self.identitytoken.as_deref().filter(|token| !token.is_empty())
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Wraps any value that is present in the document, including `null`, in `Some`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
