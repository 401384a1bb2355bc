//! `dockercreds::error` is a module containing error utilities for the dockercreds project.

use std::io;

use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result of a dockercreds-related operation.
pub type DockerCredsResult<T> = Result<T, DockerCredsError>;

/// An error that occurred while resolving registry credentials.
#[derive(pretty_error_debug::Debug, Error)]
pub enum DockerCredsError {
    /// The registry identifier passed by the caller was empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The docker config file could not be found or read.
    #[error("docker config not found: {0}")]
    ConfigNotFound(String),

    /// The docker config was found but does not contain usable credential information.
    #[error("malformed docker config: {0}")]
    MalformedConfig(String),

    /// No credentials exist for the registry, or the credential helper refused to provide them.
    #[error("credentials not found: {0}")]
    CredentialsNotFound(String),

    /// The credential helper executable could not be started.
    #[error("credential helper execution failed: {message}")]
    HelperExecutionFailure {
        /// What went wrong, including the helper program name.
        message: String,

        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The credential helper exited successfully but printed something we can't use.
    #[error("invalid credential helper output: {0}")]
    InvalidHelperOutput(String),
}
