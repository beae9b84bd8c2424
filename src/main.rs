use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use carecorner::api::client::ForumClient;
use carecorner::api::models::{Category, CategoryFilter};
use carecorner::app::controller::App;
use carecorner::app::state::{CommentOutcome, PostDraft};
use carecorner::config::Config;
use carecorner::moderation::KINDNESS_WARNING;
use carecorner::output::terminal;
use carecorner::session::SessionStore;

/// Care Corner: a peer-support community forum, from your terminal.
///
/// Share what's on your mind, anonymously if you like, and support others
/// with kind replies.
#[derive(Parser)]
#[command(name = "carecorner", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted (the prompt does not hide what you type)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted (the prompt does not hide what you type)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Browse posts, optionally filtered by category
    Posts {
        /// "All" or one of: Mental Health, Career, Academics, Relationships, General
        #[arg(long, default_value = "All")]
        category: CategoryFilter,
    },

    /// Show a post and its comments
    Show { post_id: i64 },

    /// Share a new post
    Post {
        #[arg(long)]
        category: Category,
        #[arg(long)]
        content: String,
        /// Defaults to "Untitled"
        #[arg(long)]
        title: Option<String>,
        /// Hide your name on this post
        #[arg(long)]
        anonymous: bool,
    },

    /// Reply to a post
    Comment {
        post_id: i64,
        /// The comment text
        text: String,
    },

    /// Delete one of your posts
    Delete {
        post_id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show your posts and the responses they received
    Dashboard,

    /// Check text against the moderation filter without posting it
    Check { text: String },

    /// List the active flagged terms
    Terms,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("carecorner=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let filter = config.build_filter()?;

    // Policy commands need neither the backend nor a session.
    match &cli.command {
        Commands::Check { text } => {
            match filter.first_match(text) {
                Some(term) => {
                    info!(term, "Flagged term matched");
                    println!("{}", "flagged".red().bold());
                }
                None => println!("{}", "clean".green().bold()),
            }
            return Ok(());
        }
        Commands::Terms => {
            println!("{}", format!("=== Flagged terms ({}) ===", filter.len()).bold());
            for term in filter.terms() {
                println!("  {term}");
            }
            return Ok(());
        }
        _ => {}
    }

    let backend = Arc::new(ForumClient::new(&config.api_url)?);
    let mut app = App::new(
        backend,
        Box::new(filter),
        SessionStore::new(config.session_path.clone()),
    );
    app.check_auth();

    match cli.command {
        Commands::Signup {
            name,
            email,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let user = app.signup(&name, &email, &password).await?;
            println!("Welcome to Care Corner, {}!", user.name.bold());
        }

        Commands::Login { email, password } => {
            let password = password_or_prompt(password)?;
            let user = app.login(&email, &password).await?;
            println!("Welcome back, {}!", user.name.bold());
        }

        Commands::Logout => {
            app.logout()?;
            println!("Logged out.");
        }

        Commands::Whoami => match app.current_user() {
            Some(user) => println!("{} (user #{})", user.name.bold(), user.user_id),
            None => println!("Not logged in. Run `carecorner login` to sign in."),
        },

        Commands::Posts { category } => {
            app.set_category(category);
            let listing = app.load_posts().await?;
            terminal::display_post_list(&listing);
        }

        Commands::Show { post_id } => {
            let post = app.show_post(post_id).await?;
            terminal::display_post_detail(&post);
        }

        Commands::Post {
            category,
            content,
            title,
            anonymous,
        } => {
            let post = app
                .submit_post(PostDraft {
                    title,
                    category: Some(category),
                    content,
                    is_anonymous: anonymous,
                })
                .await?;
            println!("{} (post #{})", "Your post has been shared.".green(), post.id);
        }

        Commands::Comment { post_id, text } => match app.submit_comment(post_id, &text).await? {
            CommentOutcome::Empty => anyhow::bail!("Please enter a comment."),
            CommentOutcome::Rejected => {
                terminal::flash_warning(KINDNESS_WARNING, config.warning_delay).await;
                anyhow::bail!("Comment was not posted.");
            }
            CommentOutcome::Posted(post) => terminal::display_post_detail(&post),
        },

        Commands::Delete { post_id, yes } => {
            if !yes
                && !confirm(
                    "Are you sure you want to delete this post? This action cannot be undone.",
                )?
            {
                println!("Cancelled.");
                return Ok(());
            }
            app.delete_post(post_id).await?;
            println!("{}", "Post deleted successfully!".green());
        }

        Commands::Dashboard => {
            let summary = app.load_dashboard().await?;
            terminal::display_dashboard(&summary);
        }

        // Handled before the backend was set up
        Commands::Check { .. } | Commands::Terms => {}
    }

    Ok(())
}

/// Use the password flag if given, else read one line from stdin.
///
/// Input is echoed; pipe the password in to keep it off the screen.
fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    io::stderr().flush().ok();
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(question: &str) -> Result<bool> {
    eprint!("{question} [y/N] ");
    io::stderr().flush().ok();
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read confirmation")?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
