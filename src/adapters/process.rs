use crate::domain::model::{ProcessOutcome, ToolInvocation};
use crate::domain::ports::ProcessRunner;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Spawns the search tool with its own output streams discarded.
#[derive(Debug, Clone, Default)]
pub struct TokioProcessRunner {
    timeout: Option<Duration>,
}

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, invocation: &ToolInvocation) -> ProcessOutcome {
        let mut command = Command::new(&invocation.program);
        command
            .args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => return ProcessOutcome::LaunchFailure(e.to_string()),
        };
        tracing::debug!(
            "Spawned {} (pid {:?}) for {}",
            invocation.program,
            child.id(),
            invocation.sequence_path.display()
        );

        let status = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    if let Err(e) = child.kill().await {
                        tracing::warn!("Failed to kill timed out {}: {}", invocation.program, e);
                    }
                    return ProcessOutcome::TimedOut(limit);
                }
            },
            None => child.wait().await,
        };

        match status {
            Ok(status) if status.success() => ProcessOutcome::Success,
            Ok(status) => ProcessOutcome::ExitFailure(status.code()),
            Err(e) => ProcessOutcome::LaunchFailure(e.to_string()),
        }
    }
}
