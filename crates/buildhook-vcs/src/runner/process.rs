use std::{process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::Command,
};
use tracing::{debug, trace};

use super::{CommandOutput, CommandRunner, CommandSpec};
use crate::{Result, VcsError};

/// Runs commands as child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessCommandRunner {
    _private: (),
}

impl ProcessCommandRunner {
    /// Creates a process command runner.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

#[async_trait]
impl CommandRunner for ProcessCommandRunner {
    #[tracing::instrument(skip_all, fields(command = %command.display(), workdir = %command.workdir.display()))]
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutput> {
        debug!(message = "Running command");

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| VcsError::SpawnError {
                command: command.display(),
                source: e,
            })?;

        let stdout = child.stdout.take().ok_or_else(|| missing_pipe(command))?;
        let stderr = child.stderr.take().ok_or_else(|| missing_pipe(command))?;
        let finish = async {
            let (stdout, stderr) = collect_output(stdout, stderr, command).await?;

            // Closed pipes count as silence while the process lingers.
            let status = tokio::time::timeout(command.timeout, child.wait())
                .await
                .map_err(|_| timed_out(command, command.timeout))?
                .map_err(|e| VcsError::IoError {
                    path: command.workdir.clone(),
                    source: e,
                })?;

            Ok::<_, VcsError>((stdout, stderr, status))
        };

        // Dropping `child` on any early return kills the process.
        let (stdout, stderr, status) = match command.max_time {
            Some(max_time) => tokio::time::timeout(max_time, finish)
                .await
                .map_err(|_| timed_out(command, max_time))??,
            None => finish.await?,
        };

        let exit_code = status.code().unwrap_or(-1);
        debug!(exit_code = exit_code, message = "Command finished");

        Ok(CommandOutput {
            exit_code,
            stdout,
            stderr,
        })
    }
}

#[derive(Clone, Copy)]
enum Pipe {
    Stdout,
    Stderr,
}

/// Read both pipes to the end, failing when neither produces anything for
/// `command.timeout`.
async fn collect_output<O, E>(stdout: O, stderr: E, command: &CommandSpec) -> Result<(String, String)>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut stdout_lines = BufReader::new(stdout).split(b'\n');
    let mut stderr_lines = BufReader::new(stderr).split(b'\n');
    let mut captured_stdout = String::new();
    let mut captured_stderr = String::new();
    let mut stdout_done = false;
    let mut stderr_done = false;

    while !(stdout_done && stderr_done) {
        let (pipe, segment) = tokio::time::timeout(command.timeout, async {
            tokio::select! {
                segment = stdout_lines.next_segment(), if !stdout_done => (Pipe::Stdout, segment),
                segment = stderr_lines.next_segment(), if !stderr_done => (Pipe::Stderr, segment),
            }
        })
        .await
        .map_err(|_| timed_out(command, command.timeout))?;

        let segment = segment.map_err(|e| VcsError::IoError {
            path: command.workdir.clone(),
            source: e,
        })?;

        match (pipe, segment) {
            (Pipe::Stdout, Some(line)) => append_line(&mut captured_stdout, &line),
            (Pipe::Stderr, Some(line)) => {
                trace!(line = %String::from_utf8_lossy(&line), message = "stderr");
                append_line(&mut captured_stderr, &line);
            }
            (Pipe::Stdout, None) => stdout_done = true,
            (Pipe::Stderr, None) => stderr_done = true,
        }
    }

    Ok((captured_stdout, captured_stderr))
}

fn append_line(buffer: &mut String, line: &[u8]) {
    buffer.push_str(&String::from_utf8_lossy(line));
    buffer.push('\n');
}

fn timed_out(command: &CommandSpec, timeout: Duration) -> VcsError {
    VcsError::CommandTimeout {
        command: command.display(),
        timeout,
    }
}

fn missing_pipe(command: &CommandSpec) -> VcsError {
    VcsError::IoError {
        path: command.workdir.clone(),
        source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "output pipe unavailable"),
    }
}
