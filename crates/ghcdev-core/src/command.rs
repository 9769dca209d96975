//! Command execution utilities.
//!
//! External tools (git, make) are long-running blocking calls from the
//! invocation's point of view: each is awaited to completion, no timeout is
//! imposed, and output is captured in full.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::{Error, Fix};

/// Captured output from a command execution.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code (0 = success)
    pub exit_code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// How long the command took
    pub duration: Duration,
}

impl CommandOutput {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external commands with captured output.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    /// Working directory for commands
    working_dir: Option<PathBuf>,
    /// Additional environment variables
    env: Vec<(String, String)>,
}

/// Render a program + args as a single display string for error messages.
pub fn render_command(program: impl AsRef<OsStr>, args: &[impl AsRef<OsStr>]) -> String {
    let mut rendered = program.as_ref().to_string_lossy().into_owned();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&arg.as_ref().to_string_lossy());
    }
    rendered
}

impl CommandRunner {
    /// Create a new command runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working directory for subsequent commands.
    pub fn with_working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Add an environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Run a command and capture output.
    ///
    /// A missing executable maps to [`Error::ToolMissing`]; a nonzero exit
    /// code is not an error at this layer (see [`CommandRunner::run_checked`]).
    #[instrument(skip(self, args), fields(program = %program.as_ref().to_string_lossy()))]
    pub async fn run<S, I, A>(&self, program: S, args: I) -> Result<CommandOutput, Error>
    where
        S: AsRef<OsStr>,
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let program_ref = program.as_ref();
        let args_vec: Vec<_> = args
            .into_iter()
            .map(|a| a.as_ref().to_os_string())
            .collect();

        debug!(
            "running: {} {:?}",
            program_ref.to_string_lossy(),
            args_vec
        );

        let mut cmd = Command::new(program_ref);
        cmd.args(&args_vec)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        let start = Instant::now();

        let output = cmd.output().await.map_err(|e| {
            let program_str = program_ref.to_string_lossy().to_string();
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ToolMissing {
                    tool: program_str,
                    source: Some(Box::new(e)),
                    fixes: vec![Fix::with_command(
                        "Check your environment for missing tools",
                        "ghcdev doctor",
                    )],
                }
            } else {
                Error::Io {
                    message: format!("failed to execute {program_str}"),
                    path: None,
                    source: e,
                }
            }
        })?;

        let duration = start.elapsed();
        let exit_code = output.status.code().unwrap_or(-1);

        debug!(
            exit_code = exit_code,
            duration_ms = duration.as_millis(),
            "command completed"
        );

        Ok(CommandOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration,
        })
    }

    /// Run a command, mapping a nonzero exit to [`Error::ExternalTool`]
    /// labeled with the given stage.
    pub async fn run_checked<S, I, A>(
        &self,
        stage: &str,
        program: S,
        args: I,
    ) -> Result<CommandOutput, Error>
    where
        S: AsRef<OsStr>,
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let args_vec: Vec<_> = args.into_iter().collect();
        let command = render_command(&program, &args_vec);
        let output = self.run(program, args_vec).await?;

        if !output.success() {
            return Err(Error::ExternalTool {
                stage: stage.to_string(),
                command,
                exit_code: Some(output.exit_code),
                stdout: output.stdout,
                stderr: output.stderr,
                fixes: vec![],
            });
        }

        Ok(output)
    }
}
