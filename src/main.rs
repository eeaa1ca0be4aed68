//! pathgate
//!
//! Checks which request paths a user may reach under a set of group rules.

use clap::Parser;
use pathgate::{
    PathAuthorizer, SharedWhitelist,
    access_control::StaticWhitelist,
    config::{AppConfig, LogFormat, load_config, load_path_validator},
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// pathgate - group-based request path authorization
#[derive(Parser, Debug)]
#[command(name = "pathgate")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "PATHGATE_CONFIG")]
    config: Option<String>,

    /// Path to the group rules document (overrides the configuration file)
    #[arg(short, long, env = "PATHGATE_RULES")]
    rules: Option<String>,

    /// Additional whitelisted username (repeatable)
    #[arg(short, long = "whitelist")]
    whitelist: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PATHGATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Only compile the rules and report
    #[arg(long)]
    check: bool,

    /// Username to check
    #[arg(required_unless_present = "check")]
    username: Option<String>,

    /// Request paths to check
    paths: Vec<String>,
}

fn init_logging(config: &AppConfig, level_override: Option<&str>) {
    let level = level_override.unwrap_or(config.logging.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn build_authorizer(config: &AppConfig, args: &Args) -> anyhow::Result<PathAuthorizer> {
    let whitelist = StaticWhitelist::new(
        config
            .whitelist
            .usernames
            .iter()
            .chain(args.whitelist.iter())
            .cloned(),
    );
    info!(usernames = whitelist.len(), "Loaded whitelist");

    let rules = args.rules.as_deref().or(config.rules.as_deref());
    let validator = load_path_validator(rules, SharedWhitelist::new(whitelist))?;

    Ok(PathAuthorizer::new(validator, config.policy.unmatched))
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    init_logging(&config, args.log_level.as_deref());

    info!(version = env!("CARGO_PKG_VERSION"), "Starting pathgate");

    let authorizer = build_authorizer(&config, &args)
        .inspect_err(|e| error!(error = %e, "Failed to build path validator"))?;

    if args.check {
        println!(
            "rules ok: {} group(s), unmatched users: {:?}",
            authorizer.validator().len(),
            authorizer.unmatched_policy()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let Some(username) = args.username.as_deref() else {
        return Ok(ExitCode::SUCCESS);
    };

    println!(
        "{}: requires validation: {}",
        username,
        authorizer.requires_validation(username)
    );

    let mut all_allowed = true;
    for path in &args.paths {
        let decision = authorizer.authorize(username, path);
        let verdict = if decision.is_allowed() { "allow" } else { "deny" };
        println!("{} {} ({})", verdict, path, decision);
        all_allowed &= decision.is_allowed();
    }

    Ok(if all_allowed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
