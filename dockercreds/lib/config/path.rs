use std::path::PathBuf;

use crate::{
    system::Environment,
    utils::{DOCKER_CONFIG_ENV_VAR, DOCKER_CONFIG_FILENAME, DOCKER_CONFIG_SUBDIR},
    DockerCredsError, DockerCredsResult,
};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Resolves where the docker config lives.
///
/// `$DOCKER_CONFIG/config.json` wins if `DOCKER_CONFIG` is set to a non-empty value, otherwise
/// `~/.docker/config.json` is used.
pub fn resolve_config_path(env: &dyn Environment) -> DockerCredsResult<PathBuf> {
    if let Some(config_dir) = env.var(DOCKER_CONFIG_ENV_VAR).filter(|dir| !dir.is_empty()) {
        tracing::debug!("using {} from {}", DOCKER_CONFIG_FILENAME, DOCKER_CONFIG_ENV_VAR);
        return Ok(PathBuf::from(config_dir).join(DOCKER_CONFIG_FILENAME));
    }

    let home_dir = env.home_dir().ok_or_else(|| {
        DockerCredsError::ConfigNotFound(format!(
            "{} is not set and the user's home directory could not be determined",
            DOCKER_CONFIG_ENV_VAR
        ))
    })?;

    Ok(home_dir
        .join(DOCKER_CONFIG_SUBDIR)
        .join(DOCKER_CONFIG_FILENAME))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
