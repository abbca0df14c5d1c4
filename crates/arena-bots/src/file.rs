//! External-process bot transport
//!
//! Every question runs the executable once: the question JSON is passed as
//! the only argument and written as one line to stdin, and the process's
//! stdout is parsed as the reply.

use arena_core::message::{deserialize, serialize};
use arena_core::{ArenaError, Question, Reply, Result};
use arena_engine::Bot;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Bot backed by an executable on disk
pub struct FileBot {
    path: String,
    name: String,
}

impl FileBot {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            name: format!("file://{}", path),
        }
    }
}

#[async_trait]
impl Bot for FileBot {
    async fn send_message(&mut self, question: &Question) -> Result<Reply> {
        let payload = serialize(question)?;
        let argument = String::from_utf8_lossy(&payload).into_owned();
        debug!("Executing {} with {}", self.path, argument);

        let mut child = Command::new(&self.path)
            .arg(&argument)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ArenaError::Transport(format!("Failed to execute {}: {}", self.path, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            let mut line = payload;
            line.push(b'\n');
            match stdin.write_all(&line).await {
                Ok(()) => {}
                // The bot only looked at its argument and exited
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                Err(e) => {
                    return Err(ArenaError::Transport(format!(
                        "Failed to write to {}: {}",
                        self.path, e
                    )));
                }
            }
            // Dropping stdin sends EOF
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ArenaError::Transport(format!("Failed to wait for {}: {}", self.path, e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            warn!("{} stderr: {}", self.path, stderr.trim());
        }

        if !output.status.success() {
            return Err(ArenaError::Transport(format!(
                "{} exited with {}",
                self.path, output.status
            )));
        }

        debug!("{} replied {}", self.path, String::from_utf8_lossy(&output.stdout).trim());
        let reply = deserialize(output.stdout.trim_ascii())?;
        Ok(reply)
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn name(&self) -> &str {
        &self.name
    }
}
