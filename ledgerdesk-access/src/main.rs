// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! LedgerDesk CLI
//!
//! A command-line client session: log in against the gateway, keep the
//! session on disk, and ask what the signed-in identity may see and do.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ledgerdesk_access::guard::{self, Decision, Requirement};
use ledgerdesk_access::page::PageView;
use ledgerdesk_access::registry::ModuleRegistry;
use ledgerdesk_access::session::{ClientConfig, Credentials, FileStore, HttpAuthenticator, Session};

#[derive(Debug, Parser)]
#[command(name = "ledgerdesk", about = "LedgerDesk command-line session", version)]
struct Cli {
    #[arg(
        long,
        env = "LEDGERDESK_SERVER",
        default_value = "http://127.0.0.1:8080",
        help = "Base URL of the LedgerDesk gateway"
    )]
    server: String,

    #[arg(
        long = "state-dir",
        env = "LEDGERDESK_STATE_DIR",
        default_value = ".ledgerdesk",
        help = "Directory holding the stored session"
    )]
    state_dir: PathBuf,

    #[arg(long = "timeout-secs", default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "LEDGERDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// List modules visible in navigation
    Modules,
    /// Open a module page by route
    Open { route: String },
    /// Check a requirement: "public", "admin-only" or a permission tag
    Check { requirement: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut session = Session::restore(FileStore::new(&cli.state_dir));
    let registry = ModuleRegistry::builtin();

    match cli.command {
        Command::Login { email, password } => {
            let config = ClientConfig {
                base_url: cli.server,
                timeout_seconds: cli.timeout_secs,
            };
            run_login(&mut session, config, Credentials::new(email, password)).await
        }
        Command::Logout => {
            session.logout();
            println!("Logged out");
            ExitCode::SUCCESS
        }
        Command::Whoami => run_whoami(&session),
        Command::Modules => {
            for module in session.visible_modules(&registry) {
                println!("{}\t{}", module.title, module.route);
            }
            ExitCode::SUCCESS
        }
        Command::Open { route } => match session.open_page(&registry, &route) {
            PageView::Render(module) => {
                println!("{}", module.title);
                ExitCode::SUCCESS
            }
            view => {
                println!("{}", view.notice().unwrap_or_default());
                ExitCode::FAILURE
            }
        },
        Command::Check { requirement } => run_check(&session, &requirement),
    }
}

async fn run_login(
    session: &mut Session<FileStore>,
    config: ClientConfig,
    credentials: Credentials,
) -> ExitCode {
    let authenticator = match HttpAuthenticator::new(config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    match session.login(&authenticator, &credentials).await {
        Ok(identity) => {
            println!("Logged in as {} ({})", identity.name, identity.role);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = %e, "Login failed");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run_whoami(session: &Session<FileStore>) -> ExitCode {
    match session.current_identity() {
        Some(identity) => {
            println!("{} <{}>", identity.name, identity.email);
            println!("id: {}", identity.id);
            println!("role: {}", identity.role);
            let permissions: Vec<_> = identity.permissions.iter().map(|p| p.as_str()).collect();
            println!("permissions: {}", permissions.join(", "));
            ExitCode::SUCCESS
        }
        None => {
            println!("Not logged in");
            ExitCode::FAILURE
        }
    }
}

fn run_check(session: &Session<FileStore>, requirement: &str) -> ExitCode {
    let requirement: Requirement = match requirement.parse() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match guard::evaluate(session.current_identity(), requirement) {
        Decision::Granted => {
            println!("granted");
            ExitCode::SUCCESS
        }
        Decision::Denied(reason) => {
            println!("denied: {}", reason);
            ExitCode::FAILURE
        }
    }
}
