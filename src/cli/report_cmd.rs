use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::output::Palette;
use crate::cli::renderer;
use crate::core::config::AppConfig;
use crate::core::cost::aws::AwsCli;
use crate::core::cost::cache::{self, NameCache};
use crate::core::cost::names::{AccountNameLookup, AwsOrganizations};
use crate::core::cost::source::{AwsCostExplorer, CostDataSource};
use crate::core::report::Report;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub days: u32,
    pub use_cache: bool,
    pub cache_dir: PathBuf,
    pub palette: Palette,
}

/// Fetch, resolve, classify and print the cost report.
pub async fn run(opts: &ReportOptions, config: &AppConfig) -> Result<()> {
    let aws = AwsCli::new(
        config.aws.clone(),
        std::time::Duration::from_secs(config.settings.timeout_secs),
    );
    aws.ensure_installed()?;
    aws.check_auth().await?;

    let name_cache = if opts.use_cache {
        open_cache(&opts.cache_dir, &mut std::io::stderr())
    } else {
        None
    };

    let end = Local::now().date_naive();
    let start = end - Duration::days(i64::from(opts.days));

    let source = AwsCostExplorer::new(&aws);
    let lookup = AwsOrganizations::new(&aws);
    let report = build_report(&source, &lookup, name_cache.as_ref(), start, end).await?;

    println!("{}", renderer::render_report(&report, &opts.palette));
    Ok(())
}

/// Open the name cache, or print one warning to `warn_to` and carry on without one.
fn open_cache(dir: &Path, warn_to: &mut impl Write) -> Option<NameCache> {
    match NameCache::open(dir) {
        Ok(cache) => {
            tracing::debug!(dir = %cache.dir().display(), "name cache ready");
            Some(cache)
        }
        Err(e) => {
            tracing::debug!(dir = %dir.display(), "name cache disabled");
            let _ = writeln!(warn_to, "warning: {:#}; continuing without name cache", e);
            None
        }
    }
}

/// Fetch the window and resolve each distinct account name once.
///
/// Every date in `start..end` gets a column even when the source reports
/// nothing for it. `end` is exclusive, as in Cost Explorer.
pub async fn build_report<S, L>(
    source: &S,
    lookup: &L,
    name_cache: Option<&NameCache>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Report>
where
    S: CostDataSource,
    L: AccountNameLookup,
{
    let mut table = source.fetch(start, end).await?;
    table.add_window(start, end);

    let mut names: HashMap<String, String> = HashMap::new();
    for account_id in table.account_ids() {
        let name = cache::resolve(name_cache, lookup, &account_id).await;
        names.insert(account_id, name);
    }

    Ok(Report::build(&table, &names))
}
