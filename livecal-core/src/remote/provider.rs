//! Provider subprocess calls.
//!
//! Every call spawns `livecal-provider-<name>`, writes one JSON request line
//! to its stdin and reads one JSON response line back. Credentials are the
//! provider's business; the `[remote]` table rides along in every request.

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;
use tokio::process::Command as Process;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{LiveCalError, LiveCalResult};
use crate::remote::protocol::{ProviderCommand, Request, Response};

const CALL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Provider(String);

impl Provider {
    pub fn from_name(name: &str) -> Self {
        Provider(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn binary_name(&self) -> String {
        format!("livecal-provider-{}", self.0)
    }

    fn locate(&self) -> LiveCalResult<PathBuf> {
        let binary_name = self.binary_name();
        which::which(&binary_name).map_err(|_| LiveCalError::ProviderNotInstalled(binary_name))
    }

    /// Run `cmd` against the provider, bounded by `CALL_TIMEOUT`.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> LiveCalResult<C::Response> {
        let line = encode_request(cmd)?;
        let binary = self.locate()?;
        debug!(provider = %self.0, command = ?C::command(), "calling provider");

        let output = timeout(CALL_TIMEOUT, exchange(&binary, &line))
            .await
            .map_err(|_| LiveCalError::ProviderTimeout(CALL_TIMEOUT.as_secs()))??;

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string());
            return Err(LiveCalError::Provider(format!(
                "{} exited with {code}",
                self.binary_name()
            )));
        }

        parse_response(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Serialize `cmd` as a newline-terminated request line.
pub(crate) fn encode_request<C: ProviderCommand>(cmd: C) -> LiveCalResult<String> {
    let params =
        serde_json::to_value(cmd).map_err(|e| LiveCalError::Serialization(e.to_string()))?;
    let request = Request {
        command: C::command(),
        params,
    };
    let mut line =
        serde_json::to_string(&request).map_err(|e| LiveCalError::Serialization(e.to_string()))?;
    line.push('\n');
    Ok(line)
}

async fn exchange(binary: &Path, line: &str) -> LiveCalResult<Output> {
    let mut child = Process::new(binary)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| LiveCalError::Provider(format!("cannot start {}: {e}", binary.display())))?;

    // stdin is dropped after the write, which ends the request
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(line.as_bytes()).await?;
    }

    Ok(child.wait_with_output().await?)
}

/// Decode a provider's stdout into the command's response type.
pub(crate) fn parse_response<R: DeserializeOwned>(stdout: &str) -> LiveCalResult<R> {
    let line = stdout.trim();
    if line.is_empty() {
        return Err(LiveCalError::Provider("Provider returned no response".into()));
    }

    let response: Response<R> = serde_json::from_str(line)
        .map_err(|e| LiveCalError::Provider(format!("Failed to parse response: {}", e)))?;

    match response {
        Response::Success { data } => Ok(data),
        Response::Error { error } => Err(LiveCalError::Provider(error)),
    }
}
