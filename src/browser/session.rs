use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::browser::Driver;
use crate::error::PipelineError;

/// The Playwright sidecar script, shipped inside the binary and written to a
/// temp path at launch so the tool works from any working directory.
const SIDECAR_SOURCE: &str = include_str!("browser_server.js");
const SIDECAR_NAME: &str = "qaforge_browser_server.js";

/// Request sent to the sidecar over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BrowserRequest {
    Navigate {
        cmd: &'static str,
        url: String,
    },
    Plain {
        cmd: &'static str,
    },
    Action {
        cmd: &'static str,
        action: &'static str,
        selector: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        timeout_ms: Option<u64>,
    },
    Query {
        cmd: &'static str,
        selector: String,
    },
    Screenshot {
        cmd: &'static str,
        path: String,
    },
    Sleep {
        cmd: &'static str,
        ms: u64,
    },
}

/// Response received from the sidecar over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BrowserResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<String>>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A live browser session backed by a long-lived Node.js Playwright process.
///
/// Commands are sent as NDJSON over stdin, responses read from stdout.
/// One session maps to exactly one browser; sessions are never pooled.
pub struct BrowserSession {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
    released: bool,
}

impl BrowserSession {
    /// Launch a fresh browser session.
    pub fn launch() -> Result<Self, PipelineError> {
        let script = materialize_sidecar()?;

        let mut child = Command::new("node")
            .arg(&script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PipelineError::SubprocessSpawn {
                script: SIDECAR_NAME.into(),
                source: e,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| PipelineError::SessionIo("failed to capture sidecar stdin".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| PipelineError::SessionIo("failed to capture sidecar stdout".into()))?;

        let mut reader = BufReader::new(stdout);

        // Wait for the ready signal before accepting commands.
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| PipelineError::SessionIo(format!("failed to read ready signal: {e}")))?;
        let response: BrowserResponse =
            serde_json::from_str(line.trim()).map_err(|e| PipelineError::Json {
                context: "sidecar ready signal".into(),
                source: e,
            })?;
        if !response.ok || response.ready != Some(true) {
            return Err(PipelineError::SessionProtocol {
                command: "launch".into(),
                error: response
                    .error
                    .unwrap_or_else(|| "no ready signal from sidecar".into()),
            });
        }

        log::debug!("browser session launched");
        Ok(BrowserSession {
            child,
            stdin,
            reader,
            released: false,
        })
    }

    fn send(&mut self, request: &BrowserRequest) -> Result<BrowserResponse, PipelineError> {
        let json = serde_json::to_string(request).map_err(|e| PipelineError::Json {
            context: "BrowserRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{json}")
            .map_err(|e| PipelineError::SessionIo(format!("failed to write to sidecar: {e}")))?;
        self.stdin
            .flush()
            .map_err(|e| PipelineError::SessionIo(format!("failed to flush sidecar stdin: {e}")))?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| PipelineError::SessionIo(format!("failed to read from sidecar: {e}")))?;

        if line.trim().is_empty() {
            return Err(PipelineError::SessionIo(
                "empty response from sidecar (process may have died)".into(),
            ));
        }

        serde_json::from_str(line.trim()).map_err(|e| PipelineError::Json {
            context: "sidecar response".into(),
            source: e,
        })
    }

    fn send_ok(
        &mut self,
        request: &BrowserRequest,
        command: &str,
    ) -> Result<BrowserResponse, PipelineError> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(PipelineError::SessionProtocol {
                command: command.into(),
                error: response.error.unwrap_or_else(|| "unknown error".into()),
            });
        }
        Ok(response)
    }
}

impl Driver for BrowserSession {
    fn navigate(&mut self, url: &str) -> Result<(), PipelineError> {
        log::debug!("navigate {url}");
        self.send_ok(
            &BrowserRequest::Navigate {
                cmd: "navigate",
                url: url.to_string(),
            },
            "navigate",
        )?;
        Ok(())
    }

    fn page_source(&mut self) -> Result<String, PipelineError> {
        let response = self.send_ok(&BrowserRequest::Plain { cmd: "source" }, "source")?;
        response.html.ok_or_else(|| PipelineError::SessionProtocol {
            command: "source".into(),
            error: "no html in response".into(),
        })
    }

    fn links(&mut self) -> Result<Vec<String>, PipelineError> {
        let response = self.send_ok(&BrowserRequest::Plain { cmd: "links" }, "links")?;
        Ok(response.links.unwrap_or_default())
    }

    fn click(&mut self, selector: &str) -> Result<(), PipelineError> {
        self.send_ok(
            &BrowserRequest::Action {
                cmd: "action",
                action: "click",
                selector: selector.to_string(),
                value: None,
                timeout_ms: None,
            },
            "click",
        )?;
        Ok(())
    }

    fn fill(&mut self, selector: &str, value: &str) -> Result<(), PipelineError> {
        self.send_ok(
            &BrowserRequest::Action {
                cmd: "action",
                action: "fill",
                selector: selector.to_string(),
                value: Some(value.to_string()),
                timeout_ms: None,
            },
            "fill",
        )?;
        Ok(())
    }

    fn wait_for(&mut self, selector: &str, timeout_ms: u64) -> Result<(), PipelineError> {
        self.send_ok(
            &BrowserRequest::Action {
                cmd: "action",
                action: "wait_for",
                selector: selector.to_string(),
                value: None,
                timeout_ms: Some(timeout_ms),
            },
            "wait_for",
        )?;
        Ok(())
    }

    fn query_text(&mut self, selector: &str) -> Result<Option<String>, PipelineError> {
        let response = self.send_ok(
            &BrowserRequest::Query {
                cmd: "query_text",
                selector: selector.to_string(),
            },
            "query_text",
        )?;
        Ok(response.text)
    }

    fn query_visible(&mut self, selector: &str) -> Result<bool, PipelineError> {
        let response = self.send_ok(
            &BrowserRequest::Query {
                cmd: "query_visible",
                selector: selector.to_string(),
            },
            "query_visible",
        )?;
        Ok(response.visible.unwrap_or(false))
    }

    fn query_count(&mut self, selector: &str) -> Result<u32, PipelineError> {
        let response = self.send_ok(
            &BrowserRequest::Query {
                cmd: "query_count",
                selector: selector.to_string(),
            },
            "query_count",
        )?;
        Ok(response.count.unwrap_or(0))
    }

    fn current_url(&mut self) -> Result<String, PipelineError> {
        let response =
            self.send_ok(&BrowserRequest::Plain { cmd: "current_url" }, "current_url")?;
        response.url.ok_or_else(|| PipelineError::SessionProtocol {
            command: "current_url".into(),
            error: "no url in response".into(),
        })
    }

    fn sleep(&mut self, ms: u64) -> Result<(), PipelineError> {
        self.send_ok(&BrowserRequest::Sleep { cmd: "sleep", ms }, "sleep")?;
        Ok(())
    }

    fn screenshot(&mut self, path: &str) -> Result<(), PipelineError> {
        self.send_ok(
            &BrowserRequest::Screenshot {
                cmd: "screenshot",
                path: path.to_string(),
            },
            "screenshot",
        )?;
        Ok(())
    }

    fn quit(&mut self) -> Result<(), PipelineError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        // Best-effort: the process may already be gone.
        let _ = self.send(&BrowserRequest::Plain { cmd: "quit" });
        let _ = self.child.wait();
        log::debug!("browser session released");
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let _ = self.quit();
    }
}

/// Write the embedded sidecar script into the system temp dir.
fn materialize_sidecar() -> Result<PathBuf, PipelineError> {
    let path = std::env::temp_dir().join(SIDECAR_NAME);
    std::fs::write(&path, SIDECAR_SOURCE)?;
    Ok(path)
}
