use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD, Engine};
use dockercreds::{
    locator::{ExecutableLocator, SearchPolicy},
    store::{CredStore, NativeStore},
    system::{Environment, LocalFileSystem, LocalProcessRunner, ProcessOutput, ProcessRunner},
    CredsProvider, DockerCredentials, DockerCredsError,
};
use serial_test::serial;
use tempfile::{tempdir, TempDir};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// An environment with only the variables a test sets and no home directory.
struct TestEnv(HashMap<&'static str, String>);

/// A runner that must never be called.
struct NoProcesses;

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[test_log::test(tokio::test)]
async fn test_provider_reads_inline_auth_from_docker_config_dir() -> anyhow::Result<()> {
    let config_dir = tempdir()?;
    write_config(
        &config_dir,
        serde_json::json!({
            "auths": {
                "dummyRegistry.io": { "auth": STANDARD.encode("foo:bar") },
                "token.example.com": {
                    "auth": STANDARD.encode("00000000-0000-0000-0000-000000000000:"),
                    "identitytoken": "tokenstring"
                }
            }
        }),
    )
    .await?;

    let provider = CredsProvider::with_capabilities(
        LocalFileSystem,
        NoProcesses,
        TestEnv::docker_config(&config_dir),
    );

    assert_eq!(provider.config_path()?, config_dir.path().join("config.json"));

    let creds = provider.get_credentials("dummyRegistry.io").await?;
    assert_eq!(creds, DockerCredentials::with_password("foo", "bar"));

    let creds = provider.get_credentials("token.example.com").await?;
    assert_eq!(creds.username(), "00000000-0000-0000-0000-000000000000");
    assert_eq!(creds.password(), None);
    assert_eq!(creds.identity_token(), Some("tokenstring"));

    match provider.get_credentials("other.example.com").await {
        Err(DockerCredsError::CredentialsNotFound(msg)) => {
            assert!(msg.contains("other.example.com"))
        }
        other => panic!("expected CredentialsNotFound, got {:?}", other),
    }

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_provider_missing_config_file() -> anyhow::Result<()> {
    let config_dir = tempdir()?;
    let provider = CredsProvider::with_capabilities(
        LocalFileSystem,
        NoProcesses,
        TestEnv::docker_config(&config_dir),
    );

    assert!(matches!(
        provider.get_credentials("ghcr.io").await,
        Err(DockerCredsError::ConfigNotFound(_))
    ));

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_provider_invalid_config_json() -> anyhow::Result<()> {
    let config_dir = tempdir()?;
    tokio::fs::write(config_dir.path().join("config.json"), "{\"auths\": ").await?;

    let provider = CredsProvider::with_capabilities(
        LocalFileSystem,
        NoProcesses,
        TestEnv::docker_config(&config_dir),
    );

    assert!(matches!(
        provider.get_credentials("ghcr.io").await,
        Err(DockerCredsError::MalformedConfig(_))
    ));

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_provider_non_utf8_config() -> anyhow::Result<()> {
    let config_dir = tempdir()?;
    let config_path = config_dir.path().join("config.json");
    tokio::fs::write(&config_path, [0xff, 0xfe, b'{', b'}']).await?;

    let provider = CredsProvider::with_capabilities(
        LocalFileSystem,
        NoProcesses,
        TestEnv::docker_config(&config_dir),
    );

    match provider.get_credentials("ghcr.io").await {
        Err(DockerCredsError::MalformedConfig(msg)) => {
            assert!(msg.contains(&config_path.display().to_string()))
        }
        other => panic!("expected MalformedConfig, got {:?}", other),
    }

    Ok(())
}

#[test_log::test(tokio::test)]
async fn test_provider_skips_broken_entries_of_other_registries() -> anyhow::Result<()> {
    let config_dir = tempdir()?;
    write_config(
        &config_dir,
        serde_json::json!({
            "credHelpers": { "broken.example.com": 5 },
            "auths": {
                "other.io": { "auth": 5 },
                "registry.example.com": { "auth": STANDARD.encode("alice:secret") }
            }
        }),
    )
    .await?;

    let provider = CredsProvider::with_capabilities(
        LocalFileSystem,
        NoProcesses,
        TestEnv::docker_config(&config_dir),
    );

    let creds = provider.get_credentials("registry.example.com").await?;
    assert_eq!(creds, DockerCredentials::with_password("alice", "secret"));

    assert!(matches!(
        provider.get_credentials("broken.example.com").await,
        Err(DockerCredsError::MalformedConfig(_))
    ));

    Ok(())
}

#[cfg(unix)]
#[test_log::test(tokio::test)]
#[serial]
async fn test_provider_runs_native_helper_from_path() -> anyhow::Result<()> {
    let config_dir = tempdir()?;
    let bin_dir = tempdir()?;
    write_config(&config_dir, serde_json::json!({ "credsStore": "fake" })).await?;

    // Echo the registry read from stdin back as the username.
    write_helper(
        &bin_dir,
        "docker-credential-fake",
        r#"#!/bin/sh
[ "$1" = "get" ] || exit 2
registry=$(cat)
printf '{"ServerURL":"%s","Username":"user@%s","Secret":"s3cret"}' "$registry" "$registry"
"#,
    )?;

    let mut env = TestEnv::docker_config(&config_dir);
    env.0.insert("PATH", bin_dir.path().display().to_string());
    let provider = CredsProvider::with_capabilities(LocalFileSystem, LocalProcessRunner, env);

    assert_eq!(
        provider.select_store("ghcr.io").await?,
        CredStore::Native(NativeStore::new("fake"))
    );
    assert_eq!(
        provider.locate("docker-credential-fake").await,
        Some(bin_dir.path().join("docker-credential-fake"))
    );

    let creds = provider.get_credentials("ghcr.io").await?;
    assert_eq!(creds, DockerCredentials::with_password("user@ghcr.io", "s3cret"));

    Ok(())
}

#[cfg(unix)]
#[test_log::test(tokio::test)]
#[serial]
async fn test_provider_native_helper_failures() -> anyhow::Result<()> {
    let config_dir = tempdir()?;
    let bin_dir = tempdir()?;
    write_config(
        &config_dir,
        serde_json::json!({
            "credHelpers": {
                "denied.example.com": "denied",
                "token.example.com": "token",
                "missing.example.com": "missing"
            }
        }),
    )
    .await?;

    write_helper(
        &bin_dir,
        "docker-credential-denied",
        "#!/bin/sh\necho 'credentials not found in native keychain' >&2\nexit 1\n",
    )?;
    write_helper(
        &bin_dir,
        "docker-credential-token",
        "#!/bin/sh\ncat >/dev/null\necho '{\"Username\":\"<token>\",\"Secret\":\"refresh\"}'\n",
    )?;

    let provider = CredsProvider::with_capabilities(
        LocalFileSystem,
        LocalProcessRunner,
        TestEnv::docker_config(&config_dir),
    )
    .with_locator(ExecutableLocator::new([bin_dir.path()], SearchPolicy::unix()));

    match provider.get_credentials("denied.example.com").await {
        Err(DockerCredsError::CredentialsNotFound(msg)) => {
            assert!(msg.contains("credentials not found in native keychain"))
        }
        other => panic!("expected CredentialsNotFound, got {:?}", other),
    }

    let creds = provider.get_credentials("token.example.com").await?;
    assert_eq!(creds.identity_token(), Some("refresh"));
    assert_eq!(creds.password(), None);

    assert!(matches!(
        provider.get_credentials("missing.example.com").await,
        Err(DockerCredsError::HelperExecutionFailure { .. })
    ));

    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Functions: Helpers
//--------------------------------------------------------------------------------------------------

async fn write_config(dir: &TempDir, config: serde_json::Value) -> anyhow::Result<()> {
    tokio::fs::write(dir.path().join("config.json"), config.to_string()).await?;
    Ok(())
}

#[cfg(unix)]
fn write_helper(dir: &TempDir, name: &str, script: &str) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join(name);
    std::fs::write(&path, script)?;
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl TestEnv {
    fn docker_config(dir: &TempDir) -> Self {
        Self(HashMap::from([(
            "DOCKER_CONFIG",
            dir.path().display().to_string(),
        )]))
    }
}

impl Environment for TestEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        None
    }
}

#[async_trait::async_trait]
impl ProcessRunner for NoProcesses {
    async fn run(
        &self,
        program: &Path,
        _args: &[&str],
        _stdin: Option<&str>,
    ) -> io::Result<ProcessOutput> {
        panic!("unexpected helper invocation: {}", program.display())
    }
}
