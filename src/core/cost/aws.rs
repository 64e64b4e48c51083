use anyhow::{Context, Result};
use std::time::Duration;

use crate::core::config::AwsSettings;
use crate::core::process::{run_command, which};

const AWS_BIN: &str = "aws";

/// Thin wrapper over the `aws` CLI that applies the configured profile,
/// region and timeout to every call.
#[derive(Debug, Clone)]
pub struct AwsCli {
    settings: AwsSettings,
    timeout: Duration,
}

impl AwsCli {
    pub fn new(settings: AwsSettings, timeout: Duration) -> Self {
        Self { settings, timeout }
    }

    /// Fail unless the `aws` binary is on PATH.
    pub fn ensure_installed(&self) -> Result<()> {
        match which(AWS_BIN) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "found aws cli");
                Ok(())
            }
            None => anyhow::bail!("required tool `{}` not found in PATH", AWS_BIN),
        }
    }

    /// Verify the current credentials with STS.
    pub async fn check_auth(&self) -> Result<()> {
        let identity = self
            .run(&["sts", "get-caller-identity", "--output", "json"])
            .await
            .context("AWS authentication check failed")?;
        tracing::debug!(%identity, "authenticated");
        Ok(())
    }

    /// Run `aws <args>` with the global options appended.
    pub async fn run(&self, args: &[&str]) -> Result<String> {
        let full = self.args_with_globals(args);
        let refs: Vec<&str> = full.iter().map(String::as_str).collect();
        run_command(AWS_BIN, &refs, self.timeout).await
    }

    fn args_with_globals(&self, args: &[&str]) -> Vec<String> {
        let mut full: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        if let Some(profile) = &self.settings.profile {
            full.push("--profile".to_string());
            full.push(profile.clone());
        }
        if let Some(region) = &self.settings.region {
            full.push("--region".to_string());
            full.push(region.clone());
        }
        full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globals_are_appended_when_set() {
        let cli = AwsCli::new(
            AwsSettings {
                profile: Some("billing".into()),
                region: Some("us-east-1".into()),
            },
            Duration::from_secs(1),
        );
        assert_eq!(
            cli.args_with_globals(&["sts", "get-caller-identity"]),
            vec![
                "sts",
                "get-caller-identity",
                "--profile",
                "billing",
                "--region",
                "us-east-1"
            ]
        );
    }

    #[test]
    fn no_globals_by_default() {
        let cli = AwsCli::new(AwsSettings::default(), Duration::from_secs(1));
        assert_eq!(cli.args_with_globals(&["ce"]), vec!["ce"]);
    }
}
