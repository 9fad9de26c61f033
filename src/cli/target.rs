use std::path::PathBuf;
use std::time::Duration;

use url::Url;

// ============================================================================
// Target validation — reject unreachable or malformed targets up front
// ============================================================================

const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "Mozilla/5.0";

/// Validate a target before any planning work starts.
///
/// `file` URLs must resolve to an existing local file. `http`/`https` URLs
/// must answer a GET with a non-error status. Any other scheme is rejected.
pub fn validate_target(target: &str) -> Result<(), String> {
    let url = Url::parse(target).map_err(|e| format!("invalid URL '{target}': {e}"))?;

    match url.scheme() {
        "file" => validate_file_target(&url),
        "http" | "https" => validate_http_target(target),
        other => Err(format!("unsupported URL scheme: {other}")),
    }
}

fn validate_file_target(url: &Url) -> Result<(), String> {
    let path = file_url_path(url);
    if path.is_file() {
        Ok(())
    } else {
        Err(format!("local file not found: {}", path.display()))
    }
}

// `Url::to_file_path` refuses host-carrying file URLs; retry with the host
// cleared so percent-escapes in the path are still decoded, then fall back
// to the raw path (stripping the leading slash before a Windows drive
// letter) as a last resort.
fn file_url_path(url: &Url) -> PathBuf {
    if let Ok(path) = url.to_file_path() {
        return path;
    }

    let mut hostless = url.clone();
    if hostless.set_host(None).is_ok() {
        if let Ok(path) = hostless.to_file_path() {
            return path;
        }
    }

    let mut raw = url.path();
    if cfg!(windows) {
        if let Some(stripped) = raw.strip_prefix('/') {
            if stripped.len() >= 2 && stripped.as_bytes()[1] == b':' {
                raw = stripped;
            }
        }
    }
    PathBuf::from(raw)
}

fn validate_http_target(target: &str) -> Result<(), String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REACHABILITY_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| format!("http client setup failed: {e}"))?;

    client
        .get(target)
        .send()
        .and_then(|r| r.error_for_status())
        .map(|_| ())
        .map_err(|e| format!("target unreachable: {e}"))
}
