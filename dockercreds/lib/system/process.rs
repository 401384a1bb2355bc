use std::{io, path::Path, process::Stdio};

use tokio::{io::AsyncWriteExt, process::Command};

use super::{ProcessOutput, ProcessRunner};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// `CREATE_NO_WINDOW` process creation flag.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Runs programs as child processes of the current process.
///
/// The child is awaited without a timeout, so a helper that never exits blocks the caller. Dropping
/// the returned future kills the child.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProcessRunner;

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

#[async_trait::async_trait]
impl ProcessRunner for LocalProcessRunner {
    async fn run(
        &self,
        program: &Path,
        args: &[&str],
        stdin: Option<&str>,
    ) -> io::Result<ProcessOutput> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        let mut child = command.spawn()?;
        tracing::trace!("spawned {} (pid {:?})", program.display(), child.id());

        if let Some(input) = stdin {
            let mut child_stdin = child
                .stdin
                .take()
                .ok_or_else(|| io::Error::other("child stdin was not captured"))?;

            // The helper may exit without reading everything we send.
            match child_stdin.write_all(input.as_bytes()).await {
                Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
                    drop(child_stdin);
                    if let Err(kill_err) = child.kill().await {
                        tracing::warn!("failed to kill {}: {}", program.display(), kill_err);
                    }
                    return Err(e);
                }
                _ => {}
            }

            // Close stdin so the helper sees EOF.
            drop(child_stdin);
        }

        let output = child.wait_with_output().await?;
        tracing::trace!("{} exited with {}", program.display(), output.status);

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
