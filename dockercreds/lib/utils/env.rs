//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Environment variable that overrides the directory holding the docker config.
pub const DOCKER_CONFIG_ENV_VAR: &str = "DOCKER_CONFIG";

/// Environment variable listing the directories searched for executables.
pub const PATH_ENV_VAR: &str = "PATH";

/// Environment variable listing the executable extensions probed on Windows.
pub const PATHEXT_ENV_VAR: &str = "PATHEXT";
