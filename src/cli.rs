// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "orbitah")]
#[command(version)]
#[command(about = "Orbitah productivity game client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long, env = "ORBITAH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long, env = "ORBITAH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Defaults to the password
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show the dashboard
    Dashboard,
    /// Show or change the interface language
    Language {
        #[command(subcommand)]
        command: Option<LanguageCommands>,
    },
    /// List your goals
    Goals,
    /// List study groups
    Groups,
    /// List your focus sessions
    Focus,
    /// List achievements
    Achievements,
    /// Show your exploration progress
    Exploration,
}

#[derive(Subcommand)]
pub enum LanguageCommands {
    /// Lists supported languages
    List,
    /// Switches language
    Set {
        /// Language code, e.g. "es"
        #[arg(value_name = "CODE")]
        code: String,
    },
}
