//! PeerSkill CLI - terminal client for the peer-to-peer skill exchange.
//!
//! This is the main binary entry point. See the `peerskill` library for the
//! core functionality.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use peerskill::notifications::ToastEvent;
use peerskill::pages::{self, profile::ProfileEdits};
use peerskill::prompt::TerminalPrompter;
use peerskill::server::types::SignupForm;
use peerskill::tags::parse_tag_list;
use peerskill::{AppContext, Config, Page, Theme};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// Global allocator configured per M-MIMALLOC-APPS guideline.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// CLI
#[derive(Parser)]
#[command(name = "peerskill")]
#[command(version)]
#[command(about = "Trade skills with your peers from the terminal")]
struct Cli {
    /// Answer yes to every confirmation
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    /// API base URL (overrides config and PEERSKILL_ENV)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in
    Login {
        /// Account email
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account
    Signup {
        /// Display name
        #[arg(long)]
        name: String,
        /// Account email
        #[arg(long)]
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Phone or other contact detail
        #[arg(long, default_value = "")]
        contact: String,
        /// Year of study
        #[arg(long, default_value = "")]
        year: String,
        /// Branch or department
        #[arg(long, default_value = "")]
        branch: String,
        /// Avatar name or image path
        #[arg(long, default_value = "")]
        avatar: String,
        /// Comma-separated skills you can teach
        #[arg(long, default_value = "")]
        teach: String,
        /// Comma-separated skills you want to learn
        #[arg(long, default_value = "")]
        learn: String,
    },
    /// Sign out and forget all local state
    Logout,
    /// Landing page
    Home,
    /// Your dashboard
    Dashboard,
    /// Search peers (no query lists random peers)
    Search {
        /// Name or skill to look for
        #[arg(default_value = "")]
        query: String,
    },
    /// Ask the community to teach you a skill
    RequestSkill {
        /// Skill you want to learn
        skill: String,
    },
    /// Schedule a session with a peer
    Schedule {
        /// Peer email
        peer: String,
        /// What the session is about
        #[arg(long, default_value = "")]
        topic: String,
        /// Date, e.g. 2026-10-20
        #[arg(long, default_value = "")]
        date: String,
        /// Time, e.g. 18:00
        #[arg(long, default_value = "")]
        time: String,
    },
    /// Rate a peer (1-5 stars)
    Rate {
        /// Peer email
        peer: String,
        /// Stars, 1 to 5
        rating: u8,
    },
    /// Show or edit your profile
    Profile {
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New contact detail
        #[arg(long)]
        contact: Option<String>,
        /// New year of study
        #[arg(long)]
        year: Option<String>,
        /// New branch or department
        #[arg(long)]
        branch: Option<String>,
        /// New avatar name or image path
        #[arg(long)]
        avatar: Option<String>,
        /// Comma-separated skills to add to what you teach
        #[arg(long)]
        add_teach: Option<String>,
        /// Skill to stop teaching (repeatable)
        #[arg(long)]
        remove_teach: Vec<String>,
        /// Comma-separated skills to add to what you want to learn
        #[arg(long)]
        add_learn: Option<String>,
        /// Skill to stop learning (repeatable)
        #[arg(long)]
        remove_learn: Vec<String>,
    },
    /// Moderation console
    Admin {
        #[command(subcommand)]
        action: Option<AdminAction>,
    },
    /// Show notifications as they arrive
    Watch,
    /// Switch theme (light or dark; toggles when omitted)
    Theme {
        /// `light` or `dark`
        theme: Option<String>,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum AdminAction {
    /// List users, requests and sessions
    Show,
    /// Set a student's points
    Points {
        /// Student email
        email: String,
        /// New point total
        points: i64,
    },
    /// Delete a user
    Delete {
        /// Email of the account to delete
        email: String,
    },
}

impl Commands {
    /// Page the command runs on.
    fn page(&self) -> Page {
        match self {
            Self::Login { .. } => Page::Login,
            Self::Signup { .. } => Page::Signup,
            Self::Dashboard
            | Self::Search { .. }
            | Self::RequestSkill { .. }
            | Self::Schedule { .. }
            | Self::Rate { .. } => Page::Dashboard,
            Self::Profile { .. } => Page::EditProfile,
            Self::Admin { .. } => Page::Admin,
            Self::Logout | Self::Home | Self::Watch | Self::Theme { .. } | Self::Config => Page::Home,
        }
    }
}

fn init_logging() -> Result<()> {
    let mut builder = if let Ok(path) = std::env::var("PEERSKILL_LOG_FILE") {
        let log_file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create log file at {path}"))?;
        let mut builder =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
        builder
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
    };

    builder.format_timestamp_secs().init();
    Ok(())
}

fn read_password(given: Option<String>) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }

    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Prints toasts until Ctrl-C.
async fn watch(app: &AppContext) -> Result<()> {
    let mut events = app.toasts.subscribe();
    let Some(poller) = app.start_notifications() else {
        println!("Not signed in. Sign in first: peerskill login <email>");
        return Ok(());
    };

    println!("Watching notifications (Ctrl-C to stop)...");
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            event = events.recv() => match event {
                Ok(ToastEvent::Shown { message, .. }) => println!("* {message}"),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => log::warn!("Missed {skipped} toast event(s)"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    poller.shutdown().await;
    Ok(())
}

async fn run(app: &AppContext, page: Page, command: Commands) -> Result<()> {
    match command {
        Commands::Home
        | Commands::Dashboard
        | Commands::Admin {
            action: None | Some(AdminAction::Show),
        } => pages::show(app, page).await?,
        Commands::Login { email, password } => {
            let password = read_password(password)?;
            pages::login::submit(app, &email, &password).await?;
        }
        Commands::Signup {
            name,
            email,
            password,
            contact,
            year,
            branch,
            avatar,
            teach,
            learn,
        } => {
            let form = SignupForm {
                name,
                email,
                contact,
                password: read_password(password)?,
                study_year: year,
                branch,
                avatar,
                teach: parse_tag_list(&teach),
                learn: parse_tag_list(&learn),
            };
            pages::signup::submit(app, form).await?;
        }
        Commands::Logout => {
            pages::account::logout(app)?;
        }
        Commands::Search { query } => pages::dashboard::search(app, &query).await?,
        Commands::RequestSkill { skill } => pages::dashboard::request_skill(app, &skill).await?,
        Commands::Schedule {
            peer,
            topic,
            date,
            time,
        } => pages::dashboard::schedule(app, &peer, &topic, &date, &time).await?,
        Commands::Rate { peer, rating } => pages::dashboard::rate(app, &peer, rating).await?,
        Commands::Profile {
            name,
            contact,
            year,
            branch,
            avatar,
            add_teach,
            remove_teach,
            add_learn,
            remove_learn,
        } => {
            let edits = ProfileEdits {
                name,
                contact,
                study_year: year,
                branch,
                avatar,
                add_teach,
                remove_teach,
                add_learn,
                remove_learn,
            };
            let has_edits = edits.name.is_some()
                || edits.contact.is_some()
                || edits.study_year.is_some()
                || edits.branch.is_some()
                || edits.avatar.is_some()
                || edits.add_teach.is_some()
                || edits.add_learn.is_some()
                || !edits.remove_teach.is_empty()
                || !edits.remove_learn.is_empty();

            if has_edits {
                pages::profile::edit(app, &edits).await?;
            } else {
                pages::show(app, page).await?;
            }
        }
        Commands::Admin {
            action: Some(AdminAction::Points { email, points }),
        } => pages::admin::update_points(app, &email, points).await?,
        Commands::Admin {
            action: Some(AdminAction::Delete { email }),
        } => pages::admin::delete_user(app, &email).await?,
        Commands::Watch => watch(app).await?,
        Commands::Theme { theme } => {
            let theme = theme.map(|t| t.parse::<Theme>()).transpose()?;
            let theme = pages::account::set_theme(app, theme)?;
            println!("Theme: {theme}");
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&app.config)?);
            println!("API:   {}", app.api.gate().base_url());
            println!("State: {}", Config::state_path()?.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.api_base_url = Some(url);
    }
    let session = Config::open_session()?;
    let prompter = Arc::new(TerminalPrompter::new(cli.yes));
    let app = AppContext::new(config, session, prompter)?;

    let page = cli.command.page();
    log::info!(
        "peerskill v{} on page {page} ({})",
        env!("CARGO_PKG_VERSION"),
        peerskill::env::Environment::current()
    );

    // Every invocation is a page load: poll once when signed in
    let watching = matches!(cli.command, Commands::Watch);
    let mut poller = if watching { None } else { app.start_notifications() };

    run(&app, page, cli.command).await?;
    pages::follow_redirects(&app).await?;

    if !watching && poller.is_none() {
        // Signed in during this run
        poller = app.start_notifications();
    }
    if let Some(poller) = poller {
        for message in app.finish_notifications(poller).await {
            println!("* {message}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn page_of(args: &[&str]) -> Page {
        let mut argv = vec!["peerskill"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command.page()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_every_command_and_argument_has_help() {
        fn check(cmd: &clap::Command) {
            for sub in cmd.get_subcommands() {
                assert!(sub.get_about().is_some(), "`{}` has no help", sub.get_name());
                for arg in sub.get_arguments() {
                    assert!(
                        arg.get_help().is_some(),
                        "`{} {}` has no help",
                        sub.get_name(),
                        arg.get_id()
                    );
                }
                check(sub);
            }
        }
        check(&Cli::command());
    }

    #[test]
    fn test_commands_resolve_to_their_page() {
        assert_eq!(page_of(&["login", "ada@example.com", "--password", "pw"]), Page::Login);
        assert_eq!(page_of(&["dashboard"]), Page::Dashboard);
        assert_eq!(page_of(&["rate", "bo@example.com", "4"]), Page::Dashboard);
        assert_eq!(page_of(&["profile", "--name", "Ada"]), Page::EditProfile);
        assert_eq!(page_of(&["admin"]), Page::Admin);
        assert_eq!(page_of(&["admin", "points", "bo@example.com", "30"]), Page::Admin);
        assert_eq!(page_of(&["theme", "dark"]), Page::Home);
    }
}
