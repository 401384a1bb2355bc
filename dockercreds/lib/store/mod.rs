//! The places credentials can come from once the docker config has been read.

mod encoded;
mod native;

use crate::{
    locator::ExecutableLocator,
    system::{FileSystem, ProcessRunner},
    DockerCredentials, DockerCredsResult,
};

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use encoded::*;
pub use native::*;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The credential source picked for a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredStore {
    /// A native credential helper from `credHelpers` or `credsStore`.
    Native(NativeStore),

    /// Inline credentials from `auths`.
    Encoded(EncodedStore),
}

/// The host capabilities a native helper needs to run.
#[derive(Clone, Copy)]
pub struct HelperContext<'a> {
    /// Runs the helper process.
    pub runner: &'a dyn ProcessRunner,

    /// Used to probe the search path.
    pub fs: &'a dyn FileSystem,

    /// Finds the helper executable.
    pub locator: &'a ExecutableLocator,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl CredStore {
    /// Fetches the credentials for `registry` from this store.
    pub async fn get_credentials(
        &self,
        registry: &str,
        ctx: &HelperContext<'_>,
    ) -> DockerCredsResult<DockerCredentials> {
        match self {
            CredStore::Native(store) => store.get_credentials(registry, ctx).await,
            CredStore::Encoded(store) => store.get_credentials(registry),
        }
    }
}
