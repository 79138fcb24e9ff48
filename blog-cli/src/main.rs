use anyhow::{Context, Result};
use blog_client::listing::{EMPTY_MESSAGE, LOADING_MESSAGE};
use blog_client::{
    ClientConfig, HttpClient, ImageUpload, ListDisplay, ListOutcome, PostComposer, PostEntry,
    PostListView, Route, Session, StatusSync, SubmitOutcome,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

mod logging;
mod token_store;

use token_store::TokenStore;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL, overrides BLOG_BACKEND_URL
    #[arg(short, long)]
    server: Option<String>,

    #[arg(long)]
    token_file: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a session token issued by the backend
    Login {
        #[arg(short, long)]
        token: String,
    },

    Logout,

    Status,

    /// Create a post, then show the listing
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        content: String,

        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    List,

    /// Flip a post between published and hidden
    Toggle {
        #[arg(short, long)]
        id: i64,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = match cli.server {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env(),
    };
    let token_store = TokenStore::new(cli.token_file)?;
    let session = token_store.load_session()?;

    match cli.command {
        Commands::Login { token } => {
            if Session::authenticated(token.as_str()).token().is_none() {
                println!("{}", "❌ Token must not be empty".red());
                std::process::exit(1);
            }
            token_store.save_token(&token)?;
            println!("✅ Token saved to {:?}", token_store.path());
        }

        Commands::Logout => {
            if token_store.clear_token()? {
                println!("✅ Token file removed");
            } else {
                println!("No token to remove");
            }
        }

        Commands::Status => match session.token() {
            Some(token) => {
                let prefix: String = token.as_str().chars().take(6).collect();
                println!("🔑 Token file: {:?}", token_store.path());
                println!("   Token: {}...", prefix);
                println!("   Backend: {}", config.base_url());
            }
            None => {
                println!("❌ No token found");
                println!("   Please login first: blog-cli login --token <token>");
            }
        },

        Commands::Create {
            title,
            content,
            image,
        } => {
            let client = HttpClient::new(config);
            let mut composer = PostComposer::new();
            composer.set_title(title);
            composer.set_content(content);
            if let Some(path) = image {
                composer.set_image(Some(read_image(&path)?));
            }

            match composer.submit(&client, &session).await {
                SubmitOutcome::Navigate(route) => {
                    println!("{}", "✅ Post created".green());
                    println!("→ {}", route);
                    show_listing(&client, &session).await;
                }
                SubmitOutcome::Redirect(route) => redirect(route),
                SubmitOutcome::Failed(message) => {
                    println!("{}", format!("❌ {}", message).red());
                    std::process::exit(1);
                }
                SubmitOutcome::Ignored => {}
            }
        }

        Commands::List => {
            let client = HttpClient::new(config);
            show_listing(&client, &session).await;
        }

        Commands::Toggle { id } => {
            let client = HttpClient::new(config);
            let mut view = PostListView::new();
            finish_or_exit(view.load(&client, &session).await, &view);

            if !view.posts().iter().any(|entry| entry.post.id == id) {
                println!("{}", format!("❌ Post #{} not found in listing", id).red());
                std::process::exit(1);
            }

            let outcome = view.change_post_status(&client, &session, id).await;
            finish_or_exit(outcome, &view);
            render(&view);
        }
    }

    Ok(())
}

fn read_image(path: &Path) -> Result<ImageUpload> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read image {:?}", path))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageUpload::new(file_name, bytes))
}

async fn show_listing(client: &HttpClient, session: &Session) {
    let mut view = PostListView::new();
    let outcome = view.load(client, session).await;
    finish_or_exit(outcome, &view);
    render(&view);
}

fn finish_or_exit(outcome: ListOutcome, view: &PostListView) {
    match outcome {
        ListOutcome::Ready => {}
        ListOutcome::Redirect(route) => redirect(route),
        ListOutcome::Failed(_) => {
            render(view);
            std::process::exit(1);
        }
    }
}

fn redirect(route: Route) -> ! {
    println!("{}", "🔒 Not signed in".yellow());
    println!("→ {}", route);
    println!("   Please login first: blog-cli login --token <token>");
    std::process::exit(1);
}

fn render(view: &PostListView) {
    match view.display() {
        ListDisplay::Loading => println!("{}", LOADING_MESSAGE),
        ListDisplay::Error(message) => println!("{}", format!("❌ {}", message).red()),
        ListDisplay::Empty => println!("{}", EMPTY_MESSAGE),
        ListDisplay::Cards(cards) => {
            println!("{}", "Published Posts".bold());
            println!();
            for entry in cards {
                render_card(entry);
            }
        }
    }
}

fn render_card(entry: &PostEntry) {
    let status = match entry.sync {
        StatusSync::Committed => entry.status_label().normal(),
        StatusSync::Pending => format!("{} (saving)", entry.status_label()).yellow(),
        StatusSync::Reverted => format!("{} (change rejected)", entry.status_label()).red(),
    };

    println!("[{}] {}", entry.post.id, entry.post.title.bold());
    println!("    {}", entry.byline().dimmed());
    if !entry.post.image.is_empty() {
        println!("    Image: {}", entry.post.image);
    }
    println!("    {}", entry.summary_html());
    println!("    Status: {}", status);
    println!("    View details: {}", entry.detail_route());
    println!();
}
