mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use shopino::catalog::{Department, UnknownDepartment};
use shopino::forms::{LoginForm, RegisterForm, format_phone_input};
use shopino::{AuthError, AuthorityClient, AuthorityConfig, FileStore, SessionState};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no state file location; pass --state-path or set SHOPINO_STATE_PATH")]
    MissingStatePath,
    #[error("{}", .0.user_message())]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Department(#[from] UnknownDepartment),
}

#[derive(Parser, Debug)]
#[command(name = "shopino", about = "Shopino storefront session CLI")]
struct Cli {
    #[arg(long, env = "SHOPINO_API_BASE_URL", global = true)]
    base_url: Option<String>,

    #[arg(long, env = "SHOPINO_STATE_PATH", global = true, help = "Where the signed-in session is persisted")]
    state_path: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SHOPINO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SHOPINO_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Sign out locally and tell the backend.
    Logout,
    /// Validate the stored session and show who is signed in.
    Whoami,
    /// Show the account menu for the current session.
    Account,
    /// Show the header's mobile menu for the current session.
    Header,
    /// Show the category menu for one department, or all of them.
    Menu { department: Option<String> },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Menu { department } => run_menu(department.as_deref()),
        command => {
            let session = build_session(cli.base_url.as_deref(), cli.state_path)?;
            run_session_command(&session, command).await
        }
    }
}

async fn run_session_command(session: &SessionState, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let user = session.login(&LoginForm::new(email, password)).await?;
            println!("Welcome back to Shopino, {}!", render::name_or_email(&user));
        }
        Command::Register { username, email, password, phone } => {
            let form = RegisterForm { username, email, password, phone: format_phone_input(&phone) };
            let user = session.register(&form).await?;
            println!("Account created successfully! Welcome to Shopino, {}!", render::name_or_email(&user));
        }
        Command::Logout => {
            session.logout().await;
            println!("Signed out.");
        }
        Command::Whoami => {
            let status = session.initialize().await;
            print!("{}", render::whoami(&status));
        }
        Command::Account => {
            let status = session.initialize().await;
            print!("{}", render::account_menu(&status));
        }
        Command::Header => {
            let status = session.initialize().await;
            print!("{}", render::header_menu(&status));
        }
        Command::Menu { department } => run_menu(department.as_deref())?,
    }
    Ok(())
}

fn run_menu(department: Option<&str>) -> Result<(), CliError> {
    let departments = match department {
        Some(raw) => vec![raw.parse::<Department>()?],
        None => Department::ALL.to_vec(),
    };
    for department in departments {
        print!("{}", render::category_menu(department));
    }
    Ok(())
}

fn build_session(base_url: Option<&str>, state_path: Option<PathBuf>) -> Result<SessionState, CliError> {
    let mut config = AuthorityConfig::from_env();
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url);
    }
    let state_path = state_path.or_else(FileStore::default_path).ok_or(CliError::MissingStatePath)?;
    tracing::debug!(base_url = %config.base_url, state_path = %state_path.display(), "session configured");

    let authority = AuthorityClient::new(&config)?;
    let store = FileStore::new(state_path);
    Ok(SessionState::new(Arc::new(authority), Arc::new(store), config.timeouts.validate()))
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
