//! Resolving credentials for a registry from the docker config.

use std::path::{Path, PathBuf};

use crate::{
    config::{resolve_config_path, ConfigValue, DockerConfig},
    locator::ExecutableLocator,
    store::{CredStore, EncodedStore, HelperContext, NativeStore},
    system::{
        Environment, FileSystem, LocalEnvironment, LocalFileSystem, LocalProcessRunner,
        ProcessRunner,
    },
    DockerCredentials, DockerCredsError, DockerCredsResult,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Resolves registry credentials the way the docker CLI does.
///
/// The provider reads the docker config on every call and keeps no state between calls, so a
/// single instance can be shared across tasks.
///
/// ## Example
///
/// ```no_run
/// use dockercreds::CredsProvider;
///
/// #[tokio::main]
/// async fn main() -> dockercreds::DockerCredsResult<()> {
///     let creds = CredsProvider::new().get_credentials("ghcr.io").await?;
///     println!("logging in as {}", creds.username());
///     Ok(())
/// }
/// ```
pub struct CredsProvider<F = LocalFileSystem, P = LocalProcessRunner, E = LocalEnvironment> {
    /// Reads the config and probes for helper executables.
    fs: F,

    /// Runs native credential helpers.
    runner: P,

    /// Supplies `DOCKER_CONFIG`, the home directory and the search path.
    env: E,

    /// Finds helper executables. Detected from `env` at construction.
    locator: ExecutableLocator,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl CredsProvider {
    /// Creates a provider backed by the local disk, real child processes and the process
    /// environment.
    pub fn new() -> Self {
        Self::with_capabilities(LocalFileSystem, LocalProcessRunner, LocalEnvironment)
    }
}

impl<F, P, E> CredsProvider<F, P, E>
where
    F: FileSystem,
    P: ProcessRunner,
    E: Environment,
{
    /// Creates a provider over explicit capabilities.
    pub fn with_capabilities(fs: F, runner: P, env: E) -> Self {
        let locator = ExecutableLocator::from_env(&env);
        Self {
            fs,
            runner,
            env,
            locator,
        }
    }

    /// Replaces the executable locator detected from the environment.
    pub fn with_locator(mut self, locator: ExecutableLocator) -> Self {
        self.locator = locator;
        self
    }

    /// The locator used to find credential helpers.
    pub fn locator(&self) -> &ExecutableLocator {
        &self.locator
    }

    /// Where the docker config is expected to be.
    pub fn config_path(&self) -> DockerCredsResult<PathBuf> {
        resolve_config_path(&self.env)
    }

    /// Finds `name` on the search path.
    pub async fn locate(&self, name: &str) -> Option<PathBuf> {
        self.locator.locate(name, &self.fs).await
    }

    /// Reads the docker config and picks the credential source for `registry` without using it.
    pub async fn select_store(&self, registry: &str) -> DockerCredsResult<CredStore> {
        check_registry(registry)?;

        let config_path = self.config_path()?;
        let config = DockerConfig::load(&self.fs, &config_path).await?;

        select_store(&config, registry, &config_path)
    }

    /// Gets the credentials for `registry`.
    pub async fn get_credentials(&self, registry: &str) -> DockerCredsResult<DockerCredentials> {
        let store = self.select_store(registry).await?;

        let ctx = HelperContext {
            runner: &self.runner,
            fs: &self.fs,
            locator: &self.locator,
        };

        store.get_credentials(registry, &ctx).await
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Gets the credentials for `registry` using the local docker config and credential helpers.
pub async fn get_credentials(registry: &str) -> DockerCredsResult<DockerCredentials> {
    CredsProvider::new().get_credentials(registry).await
}

/// Picks the credential source for `registry`.
///
/// A registry-specific helper beats the default store, which beats inline `auths`.
pub fn select_store(
    config: &DockerConfig,
    registry: &str,
    config_path: &Path,
) -> DockerCredsResult<CredStore> {
    match config.cred_helper(registry)? {
        ConfigValue::Set(helper) => {
            tracing::debug!("using credential helper '{}' for {}", helper, registry);
            return Ok(CredStore::Native(NativeStore::new(helper)));
        }
        ConfigValue::Null => {
            return Err(DockerCredsError::MalformedConfig(format!(
                "name of the credHelper for host '{}' was not set in docker config '{}'",
                registry,
                config_path.display()
            )));
        }
        ConfigValue::Missing => {}
    }

    match config.creds_store() {
        ConfigValue::Set(helper) => {
            tracing::debug!("using credential store '{}' for {}", helper, registry);
            return Ok(CredStore::Native(NativeStore::new(helper)));
        }
        ConfigValue::Null => {
            return Err(DockerCredsError::MalformedConfig(format!(
                "name of the credsStore was not set in docker config '{}'",
                config_path.display()
            )));
        }
        ConfigValue::Missing => {}
    }

    if let Some(entry) = config.auth_entry(registry)? {
        let auth = entry.auth().ok_or_else(|| {
            DockerCredsError::MalformedConfig(format!(
                "no auth value specified for registry '{}' in docker config '{}'",
                registry,
                config_path.display()
            ))
        })?;

        tracing::debug!("using inline auth for {}", registry);
        return Ok(CredStore::Encoded(EncodedStore::new(
            auth,
            entry.identity_token().map(str::to_string),
            config_path,
        )));
    }

    if !config.has_credential_sections() {
        return Err(DockerCredsError::MalformedConfig(format!(
            "unable to find credential information in docker config '{}'",
            config_path.display()
        )));
    }

    Err(DockerCredsError::CredentialsNotFound(format!(
        "no matching auth specified for registry '{}' in docker config '{}'",
        registry,
        config_path.display()
    )))
}

fn check_registry(registry: &str) -> DockerCredsResult<()> {
    if registry.is_empty() {
        return Err(DockerCredsError::InvalidArgument(
            "registry must not be empty".to_string(),
        ));
    }

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Default for CredsProvider {
    fn default() -> Self {
        Self::new()
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
