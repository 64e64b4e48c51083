use crate::core::cost::aws::AwsCli;

/// Looks up the human-readable name of an account.
#[allow(async_fn_in_trait)]
pub trait AccountNameLookup {
    /// Returns `None` when the account cannot be resolved.
    async fn lookup(&self, account_id: &str) -> Option<String>;
}

/// AWS Organizations via `aws organizations describe-account`.
pub struct AwsOrganizations<'a> {
    aws: &'a AwsCli,
}

impl<'a> AwsOrganizations<'a> {
    pub fn new(aws: &'a AwsCli) -> Self {
        Self { aws }
    }
}

impl AccountNameLookup for AwsOrganizations<'_> {
    async fn lookup(&self, account_id: &str) -> Option<String> {
        let result = self
            .aws
            .run(&[
                "organizations",
                "describe-account",
                "--account-id",
                account_id,
                "--query",
                "Account.Name",
                "--output",
                "text",
            ])
            .await;

        match result {
            Ok(name) => parse_name(&name),
            Err(e) => {
                tracing::debug!(account_id, error = %format!("{:#}", e), "account name lookup failed");
                None
            }
        }
    }
}

/// `--output text` prints "None" for a null query result.
fn parse_name(output: &str) -> Option<String> {
    let name = output.trim();
    if name.is_empty() || name == "None" {
        None
    } else {
        Some(name.to_string())
    }
}
