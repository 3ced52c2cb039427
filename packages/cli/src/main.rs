#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal client for the emergency alert backend.
//!
//! Citizens compose and submit incident reports interactively; admins
//! browse the overview, alerts, users, insights, and risk map once logged
//! in. Run without a subcommand to pick an action from a menu.
//!
//! Uses `indicatif-log-bridge` (via [`emergency_alert_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and the in-flight spinner never fight for the terminal.

mod account;
mod admin;
mod context;
mod feed;
mod render;
mod submit;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dialoguer::Select;
use emergency_alert_session::{Role, ThemeMode};

use crate::context::Context;

/// Submit and administer emergency alerts.
#[derive(Parser)]
#[command(name = "emergency_alert")]
#[command(about = "Submit and administer emergency alerts")]
struct Cli {
    /// TOML config file (default: `$EMERGENCY_ALERT_CONFIG`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding config and `$API_BASE_URL`.
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Session file, overriding config.
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Subcommand to execute. Omit for an interactive menu.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Compose and submit an incident report.
    Submit,

    /// List alerts.
    Alerts {
        /// Only active alerts.
        #[arg(long)]
        active: bool,

        /// Read the real-time feed instead of the historical store.
        #[arg(long)]
        realtime: bool,
    },

    /// Admin console. Requires an admin session.
    Admin {
        #[command(subcommand)]
        action: admin::AdminAction,
    },

    /// Log in and store the session.
    Login {
        /// Role to log in as (admin, police, ngo, citizen).
        #[arg(long, value_parser = parse_role)]
        role: Option<Role>,

        /// User id.
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Clear the stored session.
    Logout,

    /// Show or switch the light/dark theme. Toggles when no mode is given.
    Theme {
        /// Mode to switch to (light, dark).
        #[arg(value_parser = parse_theme)]
        mode: Option<ThemeMode>,
    },
}

fn parse_role(value: &str) -> Result<Role, String> {
    value.parse().map_err(|_| format!("unknown role {value:?}"))
}

fn parse_theme(value: &str) -> Result<ThemeMode, String> {
    value.parse().map_err(|_| format!("unknown theme {value:?}"))
}

/// Actions offered by the interactive menu.
enum Action {
    Submit,
    Alerts,
    ActiveAlerts,
    Login,
    Logout,
    ToggleTheme,
}

impl Action {
    const ALL: &[Self] = &[
        Self::Submit,
        Self::Alerts,
        Self::ActiveAlerts,
        Self::Login,
        Self::Logout,
        Self::ToggleTheme,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Submit => "Report an incident",
            Self::Alerts => "Browse alerts",
            Self::ActiveAlerts => "Browse active alerts",
            Self::Login => "Log in",
            Self::Logout => "Log out",
            Self::ToggleTheme => "Toggle light/dark theme",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = emergency_alert_cli_utils::init_logger();
    let cli = Cli::parse();

    let mut ctx = Context::load(
        cli.config.as_deref(),
        cli.api_base_url,
        cli.session_file,
        multi,
    )?;

    let command = match cli.command {
        Some(command) => command,
        None => pick_command(&ctx)?,
    };

    match command {
        Commands::Submit => submit::run(&ctx).await,
        Commands::Alerts { active, realtime } => feed::run(&ctx, active, realtime).await,
        Commands::Admin { action } => admin::run(&ctx, action).await,
        Commands::Login { role, user_id } => account::login(&mut ctx, role, user_id),
        Commands::Logout => account::logout(&mut ctx),
        Commands::Theme { mode } => account::theme(&mut ctx, mode),
    }
}

/// Prompts for an action when no subcommand was given.
fn pick_command(ctx: &Context) -> Result<Commands, Box<dyn std::error::Error>> {
    println!("Community Alert Threat System");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();
    let idx = Select::with_theme(ctx.prompt_theme().as_ref())
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(match Action::ALL[idx] {
        Action::Submit => Commands::Submit,
        Action::Alerts => Commands::Alerts {
            active: false,
            realtime: false,
        },
        Action::ActiveAlerts => Commands::Alerts {
            active: true,
            realtime: false,
        },
        Action::Login => Commands::Login {
            role: None,
            user_id: None,
        },
        Action::Logout => Commands::Logout,
        Action::ToggleTheme => Commands::Theme { mode: None },
    })
}
