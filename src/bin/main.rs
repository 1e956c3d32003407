use std::future::Future;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use feedline::config::{self, FEED_CONTAINER, PROFILE_CONTAINER};
use feedline::templates::profile_fields;
use feedline::{
    auth, bootstrap, posts, users, App, Dialogs, FeedApi, FileStorage, HttpClient, Outcome,
    Session,
};

#[derive(Parser)]
#[command(name = "feedline")]
#[command(about = "Command-line client for the feed service", long_about = None)]
struct Cli {
    /// API base URL (default: $FEEDLINE_API_BASE_URL or http://localhost:8000/api)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Where the logged-in user is kept between runs
    #[arg(long, value_name = "FILE")]
    session_file: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short, long)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Login {
        email: String,
        password: String,
    },
    Signup {
        username: String,
        email: String,
        password: String,
        /// Repeat of the password (defaults to the password)
        #[arg(long)]
        confirm: Option<String>,
    },
    Logout,
    /// Render the feed
    Feed,
    /// Render the profile of the logged-in user
    Profile,
    Post {
        content: String,
    },
    Like {
        post_id: i64,
    },
    Comment {
        post_id: i64,
        content: String,
    },
    DeletePost {
        post_id: i64,
    },
    DeleteComment {
        comment_id: i64,
        /// Post the comment belongs to
        post_id: i64,
    },
    DeleteAccount,
    Health,
}

/// Confirms on stdin, alerts on stderr.
struct TerminalDialogs {
    assume_yes: bool,
}

impl Dialogs for TerminalDialogs {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{} [y/N] ", message);
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }

    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

fn print_container(app: &App, id: &str) {
    if let Some(container) = app.document().container(id) {
        println!("{}", container.html());
    }
}

fn print_profile(app: &App) {
    if let Some(user) = app.current_user() {
        for (id, _) in profile_fields(&user) {
            if let Some(value) = app.document().field(id) {
                println!("{}: {}", id, value);
            }
        }
    }
    if let Some(count) = app.document().field(config::PROFILE_POST_COUNT) {
        println!("{}: {}", config::PROFILE_POST_COUNT, count);
    }
    print_container(app, PROFILE_CONTAINER);
}

fn report(app: &App, outcome: Outcome) -> anyhow::Result<()> {
    {
        let doc = app.document();
        for (id, message) in doc.visible_notices() {
            eprintln!("[{}] {}", id, message);
        }
        if let Some(location) = doc.location() {
            log::info!("Navigated to {}", location);
        }
    }
    match outcome {
        Outcome::Completed => Ok(()),
        Outcome::Skipped(skip) => bail!("nothing done: {:?}", skip),
        Outcome::Failed(e) => Err(e.into()),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let base_url = cli.base_url.unwrap_or_else(config::api_base_url);
    let session_file = cli
        .session_file
        .unwrap_or_else(|| PathBuf::from(config::session_file()));
    log::debug!("Using {} with session {}", base_url, session_file.display());

    let client = Arc::new(HttpClient::new(base_url));
    let session = Session::new(Arc::new(FileStorage::new(session_file)));
    let dialogs = Arc::new(TerminalDialogs { assume_yes: cli.yes });
    let app = App::new(client.clone(), session, dialogs);

    match cli.command {
        Command::Health => {
            let health = client.health().await.context("health check failed")?;
            println!("{} {}", health.status, health.message);
            Ok(())
        }
        Command::Login { email, password } => {
            let outcome = auth::login(&app, &email, &password).await;
            if let Some(user) = app.current_user() {
                println!("Logged in as {} ({})", user.username, user.id);
            }
            report(&app, outcome)
        }
        Command::Signup {
            username,
            email,
            password,
            confirm,
        } => {
            let confirm = confirm.unwrap_or_else(|| password.clone());
            let outcome = auth::signup(&app, &username, &email, &password, &confirm).await;
            if let Some(user) = app.current_user() {
                println!("Signed up as {} ({})", user.username, user.id);
            }
            report(&app, outcome)
        }
        Command::Logout => {
            let outcome = auth::logout(&app);
            report(&app, outcome)
        }
        Command::Feed => {
            let (_, outcome) = bootstrap(&app, config::FEED_PAGE).await;
            print_container(&app, FEED_CONTAINER);
            report(&app, outcome)
        }
        Command::Profile => {
            let (_, outcome) = bootstrap(&app, config::PROFILE_PAGE).await;
            print_profile(&app);
            report(&app, outcome)
        }
        Command::DeleteAccount => {
            let outcome = users::delete_account(&app).await;
            report(&app, outcome)
        }
        Command::Post { content } => {
            feed_action(&app, posts::create_post(&app, &content)).await
        }
        Command::Like { post_id } => feed_action(&app, posts::like(&app, post_id)).await,
        Command::Comment { post_id, content } => {
            feed_action(&app, posts::add_comment(&app, post_id, &content)).await
        }
        Command::DeletePost { post_id } => {
            feed_action(&app, posts::delete_post(&app, post_id)).await
        }
        Command::DeleteComment {
            comment_id,
            post_id,
        } => feed_action(&app, posts::delete_comment(&app, comment_id, post_id)).await,
    }
}

/// Load the feed, run one action against it and print the result.
async fn feed_action(app: &App, action: impl Future<Output = Outcome>) -> anyhow::Result<()> {
    let (_, loaded) = bootstrap(app, config::FEED_PAGE).await;
    if !loaded.is_completed() {
        return report(app, loaded);
    }
    let outcome = action.await;
    print_container(app, FEED_CONTAINER);
    report(app, outcome)
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
