use std::{
    io,
    path::{Path, PathBuf},
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// What a finished process left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// The exit code, or `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,

    /// Everything the process wrote to stdout.
    pub stdout: String,

    /// Everything the process wrote to stderr.
    pub stderr: String,
}

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// Trait for the read-only file access needed to load the docker config and probe for executables.
#[async_trait::async_trait]
pub trait FileSystem: Send + Sync {
    /// Returns `true` if `path` exists and is a regular file.
    async fn is_file(&self, path: &Path) -> bool;

    /// Reads the whole file at `path` as UTF-8 text.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Trait for running an external program to completion.
#[async_trait::async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs `program` with `args`, writing `stdin` to it if given, and waits for it to exit.
    ///
    /// Failing to start the program is reported as an [`io::Error`]; a program that starts and then
    /// fails is reported through [`ProcessOutput::exit_code`].
    async fn run(
        &self,
        program: &Path,
        args: &[&str],
        stdin: Option<&str>,
    ) -> io::Result<ProcessOutput>;
}

/// Trait for reading the process environment.
pub trait Environment: Send + Sync {
    /// Returns the value of the environment variable `key`, if set and valid unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns the current user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl ProcessOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
