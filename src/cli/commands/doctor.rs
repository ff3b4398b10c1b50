//! Doctor command - verify configuration and credentials.

use crate::config::Settings;
use console::style;

#[derive(PartialEq)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

/// Check result for a single item.
struct CheckResult {
    name: String,
    status: CheckStatus,
    message: String,
    hint: Option<String>,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };
        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);
        if let Some(hint) = &self.hint {
            println!("      {}", style(hint).dim());
        }
    }
}

/// Run configuration checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    println!("\n{}", style("Titt configuration check").bold().underlined());
    println!();

    let checks = vec![
        check_github_token(settings),
        check_youtube_key(settings),
        CheckResult::ok(
            "config path",
            &Settings::default_config_path().display().to_string(),
        ),
    ];

    let mut failed = false;
    for check in &checks {
        check.print();
        failed |= check.status == CheckStatus::Error;
    }
    println!();

    if failed {
        anyhow::bail!("some checks failed");
    }
    Ok(())
}

fn check_github_token(settings: &Settings) -> CheckResult {
    match settings.require_github_token() {
        Ok(_) => CheckResult::ok("GITHUB_TOKEN", "set"),
        Err(_) => CheckResult::error(
            "GITHUB_TOKEN",
            "not set",
            "GitHub tools cannot run. Export GITHUB_TOKEN or add it to config.toml.",
        ),
    }
}

fn check_youtube_key(settings: &Settings) -> CheckResult {
    // Not fatal: search degrades to empty results without a key.
    match &settings.youtube.api_key {
        Some(k) if !k.is_empty() => CheckResult::ok("YOUTUBE_API_KEY", "set"),
        _ => CheckResult::warning(
            "YOUTUBE_API_KEY",
            "not set",
            "Search and channel tools will fail upstream. Export YOUTUBE_API_KEY.",
        ),
    }
}
