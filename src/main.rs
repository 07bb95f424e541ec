use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use navguard_core::navigation::{load_menu, validate_menu};
use navguard_core::session::{EnvTokenSource, StaticTokenSource, TokenSource};
use navguard_core::{telemetry, AdminGrant, AuthorizationVerdict, Config, SessionAuthorizer};
use serde::Serialize;
use tracing::info;

/// Inspect what a session token unlocks in the navigation menu
#[derive(Debug, Parser)]
#[command(name = "navguard", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the admin verdict for a token
    Resolve {
        /// Session token (defaults to the variable named by NAVGUARD_TOKEN_VAR)
        #[arg(long)]
        token: Option<String>,
    },
    /// Print the admin verdict and the visible menu for a token
    Menu {
        /// Session token (defaults to the variable named by NAVGUARD_TOKEN_VAR)
        #[arg(long)]
        token: Option<String>,
        /// Menu description file (defaults to NAVGUARD_MENU_PATH)
        #[arg(long)]
        menu: Option<String>,
        /// Reject menus with duplicate sibling labels or malformed permissions
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Serialize)]
struct ResolveOutput<'a> {
    verdict: AuthorizationVerdict,
    grant: Option<AdminGrant>,
    subject: Option<&'a str>,
    display_name: Option<&'a str>,
}

fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    telemetry::init(&config.telemetry);

    let cli = Cli::parse();
    println!("{}", run(cli.command, &config)?);

    Ok(())
}

/// Execute one subcommand and render its JSON report
fn run(command: Command, config: &Config) -> Result<String> {
    let authorizer = SessionAuthorizer::new(config);

    match command {
        Command::Resolve { token } => {
            let source = token_source(config, token);
            let view = authorizer.evaluate(&*source, &[]);
            let output = ResolveOutput {
                verdict: view.verdict,
                grant: view.grant,
                subject: view.subject.as_deref(),
                display_name: view.display_name.as_deref(),
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
        Command::Menu {
            token,
            menu,
            validate,
        } => {
            let menu_path = menu
                .or_else(|| config.navigation.menu_path.clone())
                .context("No menu file given: pass --menu or set NAVGUARD_MENU_PATH")?;
            let menu = load_menu(&menu_path)?;
            if validate {
                validate_menu(&menu)?;
                info!(path = %menu_path, "menu description is valid");
            }

            let source = token_source(config, token);
            let view = authorizer.evaluate(&*source, &menu);
            Ok(serde_json::to_string_pretty(&view)?)
        }
    }
}

fn token_source(config: &Config, token: Option<String>) -> Box<dyn TokenSource> {
    match token {
        Some(token) => Box::new(StaticTokenSource::new(Some(token))),
        None => Box::new(EnvTokenSource::new(config.session.token_var.clone())),
    }
}
