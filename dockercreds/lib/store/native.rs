use std::{io, path::PathBuf};

use getset::Getters;
use serde::Deserialize;

use crate::{
    utils::{CREDENTIAL_HELPER_GET, CREDENTIAL_HELPER_PREFIX},
    DockerCredentials, DockerCredsError, DockerCredsResult,
};

use super::HelperContext;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Credentials held by a native credential helper such as `docker-credential-desktop`.
///
/// [See the docker credential helper protocol][protocol]
///
/// [protocol]: https://docs.docker.com/engine/reference/commandline/login/#credential-helper-protocol
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct NativeStore {
    /// The helper name as written in the config, e.g. `desktop`.
    helper_name: String,
}

/// What a helper prints on stdout for a successful `get`.
#[derive(Deserialize)]
struct HelperResponse {
    #[serde(rename = "Username")]
    username: Option<String>,

    #[serde(rename = "Secret")]
    secret: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl NativeStore {
    /// Creates a store backed by the helper `docker-credential-<helper_name>`.
    pub fn new(helper_name: impl Into<String>) -> Self {
        Self {
            helper_name: helper_name.into(),
        }
    }

    /// The executable name of the helper.
    pub fn program_name(&self) -> String {
        format!("{}{}", CREDENTIAL_HELPER_PREFIX, self.helper_name)
    }

    /// Asks the helper for the credentials of `registry`.
    ///
    /// A fresh helper process is started for every call.
    pub async fn get_credentials(
        &self,
        registry: &str,
        ctx: &HelperContext<'_>,
    ) -> DockerCredsResult<DockerCredentials> {
        let program_name = self.program_name();

        // Fall back to the bare name and let the OS search for it.
        let program = match ctx.locator.locate(&program_name, ctx.fs).await {
            Some(path) => path,
            None => {
                tracing::debug!("{} not found on the search path", program_name);
                PathBuf::from(&program_name)
            }
        };

        tracing::debug!(
            "running {} {} for {}",
            program.display(),
            CREDENTIAL_HELPER_GET,
            registry
        );

        let output = ctx
            .runner
            .run(&program, &[CREDENTIAL_HELPER_GET], Some(registry))
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => DockerCredsError::HelperExecutionFailure {
                    message: format!(
                        "unable to execute the '{}' executable for registry '{}'. Be sure that \
                         Docker is installed and that its bin location is specified in your \
                         environment's path",
                        program_name, registry
                    ),
                    source: e,
                },
                _ => DockerCredsError::HelperExecutionFailure {
                    message: format!(
                        "unable to start '{}' for registry '{}'",
                        program_name, registry
                    ),
                    source: e,
                },
            })?;

        if !output.success() {
            let diagnostics = if output.stderr.trim().is_empty() {
                output.stdout.trim()
            } else {
                output.stderr.trim()
            };

            tracing::debug!("{} exited with {:?}", program_name, output.exit_code);
            return Err(DockerCredsError::CredentialsNotFound(format!(
                "'{} {}' failed for registry '{}': {}",
                program_name, CREDENTIAL_HELPER_GET, registry, diagnostics
            )));
        }

        let response: HelperResponse = serde_json::from_str(&output.stdout).map_err(|e| {
            DockerCredsError::InvalidHelperOutput(format!(
                "output of '{}' for registry '{}' is not a JSON object: {}",
                program_name, registry, e
            ))
        })?;

        let missing = |field: &str| {
            DockerCredsError::InvalidHelperOutput(format!(
                "output of '{}' for registry '{}' doesn't contain '{}'",
                program_name, registry, field
            ))
        };

        let username = response.username.ok_or_else(|| missing("Username"))?;
        let secret = response.secret.ok_or_else(|| missing("Secret"))?;

        Ok(DockerCredentials::from_helper_pair(username, secret))
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
