use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use pagesel_cli::render::transition_table;
use pagesel_cli::runner::run_script;
use pagesel_cli::script::parse_script;
use pagesel_cli::types::BrowseReport;
use pagesel_core::{BrowsingSession, VecProvider};
use pagesel_model::{IgnoredEventLogging, SessionOptions};
use tracing::{debug, info};

use crate::cli::BrowseArgs;

pub fn run_explain() -> Result<()> {
    println!("{}", transition_table());
    Ok(())
}

pub fn run_browse(args: &BrowseArgs) -> Result<BrowseReport> {
    let script_text = match &args.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("read script {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("read script from stdin")?;
            text
        }
    };
    let script = parse_script(&script_text).context("parse script")?;
    debug!(commands = script.len(), "script parsed");

    let mut provider = build_provider(args)?;
    info!(total_count = provider.total_count(), "collection ready");

    let options = SessionOptions::new()
        .with_page_size(args.page_size)
        .with_ignored_events(if args.quiet_ignored {
            IgnoredEventLogging::Silent
        } else {
            IgnoredEventLogging::Debug
        });
    let mut session = BrowsingSession::new(options).context("start session")?;
    let report = run_script(&mut session, &mut provider, &script).context("run script")?;
    Ok(report)
}

fn build_provider(args: &BrowseArgs) -> Result<VecProvider> {
    let provider = match &args.source {
        Some(path) => {
            let bytes =
                fs::read(path).with_context(|| format!("read source {}", path.display()))?;
            VecProvider::from_json(&bytes)
                .with_context(|| format!("decode source {}", path.display()))?
        }
        None => VecProvider::numbered(args.items),
    };
    Ok(provider.with_failing_pages(args.fail_pages.iter().copied()))
}
