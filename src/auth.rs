use std::fmt;

use tracing::debug;

use crate::config::GitHubConfig;
use crate::error::{NavError, Result};

/// API token. `Debug` never shows the secret.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }

    pub fn masked(&self) -> String {
        mask_token(&self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

/// First and last four characters of a token, or "***" when it is too short to reveal any.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Try to run a CLI command and capture stdout as a token
fn try_cli_token(command: &str) -> Option<String> {
    let output = std::process::Command::new("sh")
        .args(["-c", command])
        .output()
        .ok()?;

    if output.status.success() {
        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !token.is_empty() {
            return Some(token);
        }
    }
    None
}

fn env_token(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Resolve the API token, trying in order:
/// 1. the configured environment variable
/// 2. the configured CLI command
pub fn resolve_credential(config: &GitHubConfig) -> Result<Credential> {
    if let Some(token) = env_token(&config.token_env) {
        debug!(var = %config.token_env, "using token from environment");
        return Ok(Credential::new(token));
    }

    if let Some(cmd) = config
        .token_command
        .as_deref()
        .filter(|c| !c.trim().is_empty())
    {
        if let Some(token) = try_cli_token(cmd) {
            debug!(command = %cmd, "using token from command");
            return Ok(Credential::new(token));
        }
    }

    Err(NavError::Auth(format!(
        "no GitHub token found. Set {} or configure a token_command",
        config.token_env
    )))
}
