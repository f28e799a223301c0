use std::{
    io,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
    time::Duration,
};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt as _;

use super::result::*;
use crate::config::Toolchain;
use crate::lang::{CommandLine, Language, LanguageAdapter};
use crate::workspace::Workspace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub workspace_root: PathBuf,
    pub compile_timeout: Duration,
    pub run_timeout: Duration,
    pub toolchain: Toolchain,
}

impl RunnerConfig {
    pub const DEFAULT_COMPILE_TIME_LIMIT: Duration = Duration::from_secs(10);
    pub const DEFAULT_EXEC_TIME_LIMIT: Duration = Duration::from_secs(5);

    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            compile_timeout: Self::DEFAULT_COMPILE_TIME_LIMIT,
            run_timeout: Self::DEFAULT_EXEC_TIME_LIMIT,
            toolchain: Toolchain::default(),
        }
    }
}

/// Runs code once against one stdin.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, language: Language, code: &str, stdin: &str) -> ExecutionOutcome;
}

/// Compiles and runs submissions as child processes inside per-attempt workspaces.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    cfg: RunnerConfig,
}

#[derive(Debug)]
struct ProcessOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

#[derive(Debug)]
enum ProcessResult {
    Exited(ProcessOutput),
    TimedOut,
    SpawnFailed(io::Error),
    /// Spawned, but talking to it over the pipes failed.
    Communication(io::Error),
}

impl ProcessRunner {
    pub fn new(cfg: RunnerConfig) -> Self {
        Self { cfg }
    }

    pub fn compile_time_limit(mut self, limit: Duration) -> Self {
        self.cfg.compile_timeout = limit;
        self
    }

    pub fn execution_time_limit(mut self, limit: Duration) -> Self {
        self.cfg.run_timeout = limit;
        self
    }

    pub fn toolchain(mut self, toolchain: Toolchain) -> Self {
        self.cfg.toolchain = toolchain;
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.cfg
    }

    /// Like [`Executor::execute`], but takes an unparsed language tag.
    /// Unknown tags never touch the filesystem.
    pub async fn execute_tag(&self, language: &str, code: &str, stdin: &str) -> ExecutionOutcome {
        match Language::parse(language) {
            Ok(lang) => self.execute(lang, code, stdin).await,
            Err(e) => ExecutionOutcome::failure(OutcomeKind::UnsupportedLanguage, e.to_string()),
        }
    }

    async fn execute_in(
        &self,
        ws: &Workspace,
        adapter: &dyn LanguageAdapter,
        code: &str,
        stdin: &str,
    ) -> ExecutionOutcome {
        if let Err(e) = adapter.materialize(ws, code) {
            return ExecutionOutcome::failure(OutcomeKind::SystemError, e.to_string());
        }

        if let Some(cmd) = adapter.compile_command(ws, &self.cfg.toolchain) {
            if let Err(outcome) = self.compile(&cmd, ws.dir()).await {
                return outcome;
            }
        }

        let cmd = adapter.run_command(ws, &self.cfg.toolchain);
        self.run(&cmd, ws.dir(), stdin).await
    }

    async fn compile(&self, cmd: &CommandLine, cwd: &Path) -> Result<(), ExecutionOutcome> {
        log::debug!("Compiling: {}", cmd);
        match spawn_and_wait(cmd, cwd, None, self.cfg.compile_timeout).await {
            ProcessResult::Exited(out) if out.status.success() => Ok(()),
            ProcessResult::Exited(out) => {
                // javac reports some errors on stdout.
                let diagnostic = if out.stderr.trim().is_empty() {
                    out.stdout
                } else {
                    out.stderr
                };
                Err(ExecutionOutcome::failure(
                    OutcomeKind::CompilationError,
                    diagnostic,
                ))
            }
            ProcessResult::TimedOut => Err(ExecutionOutcome::failure(
                OutcomeKind::CompilationError,
                format!(
                    "Compilation timed out after {}ms",
                    self.cfg.compile_timeout.as_millis()
                ),
            )),
            ProcessResult::SpawnFailed(e) => Err(ExecutionOutcome::failure(
                OutcomeKind::SystemError,
                format!("Failed to spawn '{}': {}", cmd.program.to_string_lossy(), e),
            )),
            ProcessResult::Communication(e) => Err(ExecutionOutcome::failure(
                OutcomeKind::SystemError,
                format!("Failed to communicate with compiler: {}", e),
            )),
        }
    }

    async fn run(&self, cmd: &CommandLine, cwd: &Path, stdin: &str) -> ExecutionOutcome {
        log::debug!("Running: {}", cmd);
        match spawn_and_wait(cmd, cwd, Some(stdin), self.cfg.run_timeout).await {
            ProcessResult::Exited(out) if out.status.success() => {
                ExecutionOutcome::success(out.stdout, out.stderr)
            }
            ProcessResult::Exited(out) => {
                let diagnostic = if out.stderr.is_empty() {
                    format!("Process exited with {}", out.status)
                } else {
                    out.stderr
                };
                ExecutionOutcome::failure(OutcomeKind::RuntimeError, diagnostic)
            }
            ProcessResult::TimedOut => ExecutionOutcome::time_limit_exceeded(),
            ProcessResult::SpawnFailed(e) => ExecutionOutcome::failure(
                OutcomeKind::RuntimeError,
                format!("Failed to spawn '{}': {}", cmd.program.to_string_lossy(), e),
            ),
            ProcessResult::Communication(e) => ExecutionOutcome::failure(
                OutcomeKind::RuntimeError,
                format!("Failed to communicate with subprocess: {}", e),
            ),
        }
    }
}

#[async_trait]
impl Executor for ProcessRunner {
    async fn execute(&self, language: Language, code: &str, stdin: &str) -> ExecutionOutcome {
        let ws = match Workspace::create(&self.cfg.workspace_root) {
            Ok(ws) => ws,
            Err(e) => return ExecutionOutcome::failure(OutcomeKind::SystemError, e.to_string()),
        };
        self.execute_in(&ws, language.adapter(), code, stdin).await
        // `ws` is dropped (and removed) here, whichever branch produced the outcome.
    }
}

/// Spawns `cmd`, feeds it `stdin`, and collects both output streams.
/// The child is killed and reaped if it outlives `limit`.
async fn spawn_and_wait(
    cmd: &CommandLine,
    cwd: &Path,
    stdin: Option<&str>,
    limit: Duration,
) -> ProcessResult {
    let mut command = cmd.to_command();
    command
        .current_dir(cwd)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    // Own process group, so that whatever the program forks is killed with it.
    #[cfg(unix)]
    command.process_group(0);

    let mut proc = match command.spawn() {
        Ok(proc) => proc,
        Err(e) => return ProcessResult::SpawnFailed(e),
    };
    let pgid = proc.id();

    let child_stdin = proc.stdin.take();
    let (Some(mut stdout), Some(mut stderr)) = (proc.stdout.take(), proc.stderr.take()) else {
        let _ = proc.kill().await;
        return ProcessResult::Communication(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "Failed to open stdout/stderr",
        ));
    };

    let mut stdout_buf = Vec::new();
    let mut stderr_buf = Vec::new();
    let input = stdin.unwrap_or_default().as_bytes();

    let res = {
        let fut_stdin = async move {
            if let Some(mut w) = child_stdin {
                match w.write_all(input).await {
                    // The program may exit without reading its input.
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                    Err(e) => return Err(e),
                    Ok(()) => {}
                }
                drop(w); // closes the pipe so the child sees EOF
            }
            Ok(())
        };
        let fut_stdout = tokio::io::copy(&mut stdout, &mut stdout_buf);
        let fut_stderr = tokio::io::copy(&mut stderr, &mut stderr_buf);
        let fut_exit_status = proc.wait();

        tokio::time::timeout(limit, async {
            tokio::try_join!(fut_stdin, fut_stdout, fut_stderr, fut_exit_status)
        })
        .await
    };

    match res {
        Err(_elapsed) => {
            kill_process_group(pgid);
            proc.kill()
                .await
                .unwrap_or_else(|e| log::warn!("Failed to kill timed out process: {:#}", e));
            ProcessResult::TimedOut
        }
        Ok(Err(e)) => {
            kill_process_group(pgid);
            let _ = proc.kill().await;
            ProcessResult::Communication(e)
        }
        Ok(Ok((_, _, _, status))) => ProcessResult::Exited(ProcessOutput {
            status,
            stdout: String::from_utf8_lossy(&stdout_buf).into(),
            stderr: String::from_utf8_lossy(&stderr_buf).into(),
        }),
    }
}

/// Must be called before the group leader is reaped.
#[cfg(unix)]
fn kill_process_group(pgid: Option<u32>) {
    let Some(pgid) = pgid else {
        return
    };
    // SAFETY: kill(2) has no memory-safety preconditions.
    let ret = unsafe { libc::kill(-(pgid as libc::pid_t), libc::SIGKILL) };
    if ret != 0 {
        log::debug!(
            "kill(-{}) failed: {}",
            pgid,
            io::Error::last_os_error()
        );
    }
}

#[cfg(not(unix))]
fn kill_process_group(_: Option<u32>) {}
