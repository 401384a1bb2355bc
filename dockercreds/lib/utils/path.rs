//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The sub directory of the user's home where docker keeps its config.
pub const DOCKER_CONFIG_SUBDIR: &str = ".docker";

/// The filename of the docker config.
pub const DOCKER_CONFIG_FILENAME: &str = "config.json";

/// Prefix of every native credential helper executable, e.g. `docker-credential-desktop`.
pub const CREDENTIAL_HELPER_PREFIX: &str = "docker-credential-";

/// The helper command that retrieves credentials for a server.
pub const CREDENTIAL_HELPER_GET: &str = "get";

/// A username of `<token>` means the accompanying secret is an identity token.
///
/// See <https://docs.docker.com/engine/reference/commandline/login/#credential-helper-protocol>
pub const IDENTITY_TOKEN_USERNAME: &str = "<token>";
