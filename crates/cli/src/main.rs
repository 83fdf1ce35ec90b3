//! Run one group manager cycle from a JSON scenario file.
//!
//! ```text
//! groupmgr scenario.json
//! GROUPMGR_SUPERUSER=@admin groupmgr --settings-from-env scenario.json
//! ```
//!
//! The resulting view (or the reason nothing can be shown) is printed to
//! stdout as JSON. Logs go to stderr.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

use groupmgr_auth::{GroupManager, ManagerError, ManagerView, ToggleBatch};
use groupmgr_core::{GroupName, UserName};
use groupmgr_infra::{ConfigResolver, Directive, InMemoryDirectory, Settings};
use groupmgr_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "groupmgr", about = "Evaluate a group manager cycle")]
struct Args {
    /// Scenario file (JSON).
    scenario: PathBuf,

    /// Take settings from GROUPMGR_* environment variables instead of the file.
    #[arg(long)]
    settings_from_env: bool,

    /// Human-readable logs instead of JSON.
    #[arg(long, env = "GROUPMGR_PRETTY_LOGS")]
    pretty_logs: bool,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    #[serde(default)]
    settings: Settings,
    page_id: String,
    /// The tag as written on the page; absent means a placeholder.
    #[serde(default)]
    directive: Option<String>,
    #[serde(default)]
    pages: BTreeMap<String, String>,
    users: Vec<groupmgr_auth::UserRecord>,
    requester: RequesterInput,
    #[serde(default)]
    toggles: ToggleBatch,
}

#[derive(Debug, Deserialize)]
struct RequesterInput {
    name: UserName,
    #[serde(default)]
    groups: BTreeSet<GroupName>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Report {
    Rendered(ManagerView),
    Denied { message: String },
    Nothing { reason: String },
}

impl From<Result<ManagerView, ManagerError>> for Report {
    fn from(value: Result<ManagerView, ManagerError>) -> Self {
        match value {
            Ok(view) => Report::Rendered(view),
            Err(err) if err.renders_nothing() => Report::Nothing {
                reason: err.to_string(),
            },
            Err(err) => Report::Denied {
                message: err.to_string(),
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.pretty_logs {
        groupmgr_observability::tracing::init(LogFormat::Pretty);
    } else {
        groupmgr_observability::init();
    }

    let raw = std::fs::read_to_string(&args.scenario)
        .with_context(|| format!("reading scenario {}", args.scenario.display()))?;
    let mut scenario: Scenario = serde_json::from_str(&raw).context("parsing scenario")?;

    let file_settings = std::mem::take(&mut scenario.settings);
    let settings = if args.settings_from_env {
        Settings::from_env().context("reading settings from environment")?
    } else {
        file_settings
    };

    let report = Report::from(run(&settings, scenario));
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run(settings: &Settings, scenario: Scenario) -> Result<ManagerView, ManagerError> {
    let inline = match scenario.directive.as_deref() {
        Some(tag) => Some(Directive::parse(tag)?),
        None => None,
    };

    let config = ConfigResolver::new(settings).resolve(inline.as_ref(), &scenario.page_id, &scenario.pages)?;
    let requester = settings.requester(scenario.requester.name, scenario.requester.groups);
    tracing::debug!(requester = %requester.name, superuser = requester.is_superuser, "resolved requester");

    let manager = GroupManager::new(InMemoryDirectory::new(scenario.users));
    manager.run(&config, &requester, &scenario.toggles)
}
