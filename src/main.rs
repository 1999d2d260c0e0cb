//! edifice-auth - operator tool for the Edifice login interceptor.
//!
//! Runs the same interception flow a host server runs on login, so the
//! configured endpoints and secret can be checked against the live service.
//!
//! ```text
//! edifice-auth [CONFIG] init
//! edifice-auth [CONFIG] check <uuid>...
//! ```
//!
//! Log verbosity follows `RUST_LOG`; `EDIFICE_LOG_FORMAT=json` switches to
//! one JSON object per line.

use anyhow::Context;
use edifice_auth::config::Config;
use edifice_auth::{ConnectionAttempt, EdificeAuth, ProfileId};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "edifice-auth.toml";

const LOG_FORMAT_ENV: &str = "EDIFICE_LOG_FORMAT";

const USAGE: &str = "usage: edifice-auth [CONFIG] init
       edifice-auth [CONFIG] check <uuid>...";

enum Command {
    Init,
    Check(Vec<String>),
}

fn parse_args(mut args: Vec<String>) -> Option<(String, Command)> {
    let config_path = match args.first().map(String::as_str) {
        Some("init") | Some("check") | None => DEFAULT_CONFIG_PATH.to_string(),
        Some(_) => args.remove(0),
    };

    let mut rest = args.into_iter();
    let command = match rest.next().as_deref() {
        Some("init") => Command::Init,
        Some("check") => {
            let ids: Vec<String> = rest.collect();
            if ids.is_empty() {
                return None;
            }
            Command::Check(ids)
        }
        _ => return None,
    };
    Some((config_path, command))
}

fn json_logs(format: Option<&str>) -> bool {
    format.is_some_and(|f| f.trim().eq_ignore_ascii_case("json"))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if json_logs(std::env::var(LOG_FORMAT_ENV).ok().as_deref()) {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let Some((config_path, command)) = parse_args(std::env::args().skip(1).collect()) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    info!(version = edifice_auth::VERSION, path = %config_path, "Starting edifice-auth");
    let config = Config::load_or_init(&config_path);

    let ids = match command {
        Command::Init => {
            config.warn_insecure();
            return Ok(());
        }
        Command::Check(ids) => ids,
    };

    let profiles = ids
        .iter()
        .map(|raw| {
            raw.parse::<ProfileId>()
                .with_context(|| format!("invalid profile id: {raw}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let auth = Arc::new(EdificeAuth::from_config(&config)?);

    let handles: Vec<_> = profiles
        .into_iter()
        .map(|profile| {
            let auth = Arc::clone(&auth);
            tokio::spawn(async move {
                let mut attempt = ConnectionAttempt::new(profile);
                let outcome = auth.on_login(&mut attempt).await;
                (profile, outcome, attempt)
            })
        })
        .collect();

    for handle in handles {
        let (profile, outcome, attempt) = handle.await?;
        let message = attempt
            .message()
            .map(|m| m.to_plain())
            .unwrap_or_default();
        println!("{profile}\t{}\t{message}", outcome.kind());
    }

    Ok(())
}
