//! `dockercreds` resolves container registry credentials from the local docker config.
//!
//! # Overview
//!
//! Registry clients need a username and a password or identity token before they can pull or push.
//! Docker keeps those in `~/.docker/config.json` (or `$DOCKER_CONFIG/config.json`), either inline
//! or behind a native credential helper. This crate reads the config and returns the credentials
//! without the caller having to know where they came from.
//!
//! A credential source is picked for each registry in this order:
//!
//! - `credHelpers[registry]`: a registry-specific helper such as `docker-credential-gcloud`
//! - `credsStore`: the default helper such as `docker-credential-desktop`
//! - `auths[registry]`: base64-encoded `username:password`, optionally with an `identitytoken`
//!
//! Helpers are run with the
//! [credential helper protocol](https://docs.docker.com/engine/reference/commandline/login/#credential-helper-protocol):
//! `docker-credential-<name> get` with the registry on stdin and a `{"Username", "Secret"}` JSON
//! object on stdout. A `Username` of `<token>` means the secret is an identity token.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> dockercreds::DockerCredsResult<()> {
//!     let creds = dockercreds::get_credentials("registry-1.docker.io").await?;
//!     match creds.identity_token() {
//!         Some(_) => println!("{} uses an identity token", creds.username()),
//!         None => println!("{} uses a password", creds.username()),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Locating and parsing the docker config
//! - [`locator`] - Finding helper executables on the search path
//! - [`store`] - Native helper and inline credential sources
//! - [`system`] - File, process and environment capabilities
//! - [`cli`] - Command-line arguments for the `dockercreds` binary
//! - [`utils`] - Environment variable names and docker path and protocol constants

#![warn(missing_docs)]

mod credentials;
mod error;
mod provider;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub mod cli;
pub mod config;
pub mod locator;
pub mod store;
pub mod system;
pub mod utils;

pub use credentials::*;
pub use error::*;
pub use provider::*;
