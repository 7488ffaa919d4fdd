// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Orbitah command-line client.
//!
//! Restores the stored session and language, then runs one command
//! against the Orbitah API.

mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Commands, LanguageCommands};
use orbitah_client::{
    config::{Config, LogFormat},
    i18n::{Language, Message},
    models::User,
    services::Page,
    time_utils::format_minutes,
    validation::{LoginForm, RegisterForm},
    views::{self, FormOutcome},
    ClientContext,
};
use std::io::BufRead;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long a command waits for geolocation to refine the language.
const GEOLOCATION_WAIT: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(config.log_format);
    tracing::debug!(api_base_url = %config.api_base_url, "Starting Orbitah client");

    let ctx = ClientContext::new(config).context("Failed to initialize client")?;

    let locale = ctx.locale.initialize();
    let session = ctx.session.restore().await;
    if let Some(refinement) = locale.refinement {
        if tokio::time::timeout(GEOLOCATION_WAIT, refinement).await.is_err() {
            tracing::debug!("Geolocation still pending, keeping default language");
        }
    }
    tracing::debug!(authenticated = session.user.is_some(), "Session restored");

    run(&ctx, cli.command).await
}

async fn run(ctx: &ClientContext, command: Commands) -> anyhow::Result<()> {
    let language = ctx.locale.current_language();

    match command {
        Commands::Login { email, password } => {
            let form = LoginForm {
                email,
                password: password_or_stdin(password)?,
            };
            let outcome = views::submit_login(&ctx.session, language, &form).await;
            report(outcome, language)
        }
        Commands::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let password = password_or_stdin(password)?;
            let form = RegisterForm {
                username,
                email,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
            };
            let outcome = views::submit_register(&ctx.session, language, &form).await;
            report(outcome, language)
        }
        Commands::Logout => {
            ctx.session.logout();
            println!("{}", Message::SignedOut.localize(language));
            Ok(())
        }
        Commands::Whoami => {
            let user = require_user(ctx, language)?;
            println!("{} <{}> ({})", user.username, user.email, user.id);
            Ok(())
        }
        Commands::Dashboard => {
            let user = require_user(ctx, language)?;
            println!("{}", Message::Loading.localize(language));
            let dashboard = ctx.dashboard.load(&user).await?;
            print!("{}", views::render_dashboard(&dashboard, language));
            Ok(())
        }
        Commands::Language { command } => match command {
            None | Some(LanguageCommands::List) => {
                print!("{}", views::render_language_switcher(language));
                Ok(())
            }
            Some(LanguageCommands::Set { code }) => {
                let language = ctx.locale.change_language(&code)?;
                println!(
                    "{}",
                    Message::LanguageChanged {
                        native_name: language.native_name
                    }
                    .localize(language)
                );
                Ok(())
            }
        },
        Commands::Goals => {
            let user = require_user(ctx, language)?;
            let goals = ctx.api.list_goals(Page::default()).await?;
            println!("{}", Message::Goals.localize(language));
            for goal in goals.iter().filter(|g| g.involves(&user.id)) {
                let mark = if goal.is_completed() { "✓" } else { "·" };
                println!(" {mark} {} [{}, {}]", goal.title, goal.kind, goal.status);
            }
            Ok(())
        }
        Commands::Groups => {
            require_user(ctx, language)?;
            let groups = ctx.api.list_groups(Page::default()).await?;
            println!("{}", Message::Groups.localize(language));
            if groups.is_empty() {
                println!("  {}", Message::GroupsEmpty.localize(language));
            }
            for group in &groups {
                println!("  {} [{}] ({})", group.name, group.code, group.members.len());
            }
            Ok(())
        }
        Commands::Focus => {
            let user = require_user(ctx, language)?;
            let sessions = ctx.api.list_focus_sessions(Page::default()).await?;
            println!("{}", Message::FocusSessions.localize(language));
            for session in sessions.iter().filter(|s| s.user_id == user.id) {
                println!(
                    "  {} {} {}",
                    session.started_at.format("%Y-%m-%d %H:%M"),
                    session.method,
                    format_minutes(session.duration)
                );
            }
            Ok(())
        }
        Commands::Achievements => {
            let user = require_user(ctx, language)?;
            let achievements = ctx.api.list_achievements(Page::default()).await?;
            let exploration = match ctx.api.get_exploration_state(&user.id).await {
                Ok(state) => Some(state),
                Err(e) if e.is_not_found() => None,
                Err(e) => return Err(e.into()),
            };
            println!("{}", Message::Achievements.localize(language));
            for achievement in &achievements {
                let unlocked = exploration
                    .as_ref()
                    .is_some_and(|e| e.has_achievement(&achievement.code));
                let mark = if unlocked { "★" } else { "☆" };
                println!("  {mark} {}", achievement.name);
            }
            Ok(())
        }
        Commands::Exploration => {
            let user = require_user(ctx, language)?;
            println!("{}", Message::Exploration.localize(language));
            match ctx.api.get_exploration_state(&user.id).await {
                Ok(state) => {
                    println!(
                        "  {}",
                        Message::ExplorationSummary {
                            unlocked: state.unlocked_locations.len()
                        }
                        .localize(language)
                    );
                    for location in &state.unlocked_locations {
                        println!("  · {location}");
                    }
                }
                Err(e) if e.is_not_found() => {
                    println!("  {}", Message::ExplorationNotStarted.localize(language));
                }
                Err(e) => return Err(e.into()),
            }
            Ok(())
        }
    }
}

fn require_user(ctx: &ClientContext, language: &Language) -> anyhow::Result<User> {
    match ctx.session.user() {
        Some(user) => Ok(user),
        None => bail!(Message::NotSignedIn.localize(language)),
    }
}

fn report(outcome: FormOutcome, language: &Language) -> anyhow::Result<()> {
    match outcome {
        FormOutcome::Submitted(user) => {
            println!(
                "{}",
                Message::Welcome {
                    username: &user.username
                }
                .localize(language)
            );
            Ok(())
        }
        FormOutcome::Invalid(messages) => {
            for m in &messages {
                eprintln!("{}: {}", m.field, m.message);
            }
            bail!("{} invalid field(s)", messages.len())
        }
        FormOutcome::Failed(message) => bail!(message),
    }
}

fn password_or_stdin(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Initialize logging to stderr: human-readable by default, JSON on request.
fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("orbitah_client=info,warn"));

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
