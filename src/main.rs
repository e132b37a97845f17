use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use portal::config::{ConfigError, PortalConfig};
use portal::host::RecordingNavigator;
use portal::net::ApiError;
use portal::net::client::CSRF_COOKIE;
use portal::net::types::{PageQuery, ProfileInput, SortOrder};
use portal::state::ListPage;
use portal::{AppMode, Portal, PortalError};
use reqwest::Url;
use reqwest::cookie::Jar;
use serde_json::{Value, json};

const ACCESS_COOKIE: &str = "access_token_cookie";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Portal(#[from] PortalError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("not logged in")]
    NotLoggedIn,
    #[error("could not render output as JSON: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "portal", about = "Historic sites portal client")]
struct Cli {
    #[arg(long, env = "PORTAL_API_BASE")]
    api_base: Option<String>,

    #[arg(long, env = "PORTAL_ACCESS_TOKEN")]
    access_token: Option<String>,

    #[arg(long, env = "PORTAL_CSRF_TOKEN")]
    csrf_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the startup mode derived from `/flags`.
    Flags,
    /// Load and print the current user.
    Me,
    Reviews(PageArgs),
    Favorites(PageArgs),
    UpdateProfile {
        #[arg(long)]
        name: String,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    Favorite(FavoriteCommand),
    /// Run the navigation guard for a path.
    Navigate { location: String },
    /// Finish a login the way `/auth/callback` does.
    Callback {
        #[arg(long)]
        next: Option<String>,
    },
    Logout,
}

#[derive(Args, Debug)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = PageQuery::DEFAULT_PER_PAGE)]
    per_page: u32,
    #[arg(long, default_value = "desc")]
    order: SortOrder,
}

#[derive(Args, Debug)]
struct FavoriteCommand {
    #[command(subcommand)]
    command: FavoriteSubcommand,
}

#[derive(Subcommand, Debug)]
enum FavoriteSubcommand {
    Add { site_id: i64 },
    Remove { site_id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = PortalConfig::from_env()?;
    if let Some(raw) = cli.api_base.as_deref() {
        config = config.with_api_base(raw)?;
    }

    let jar = Arc::new(Jar::default());
    seed_cookies(&jar, &config, cli.access_token.as_deref(), cli.csrf_token.as_deref());

    let navigator = Arc::new(RecordingNavigator::new());
    let portal = Portal::connect(config, jar, navigator.clone())?;

    let result = run(&portal, cli.command).await;
    for visit in navigator.visits() {
        eprintln!("navigate -> {visit}");
    }
    result
}

async fn run(portal: &Portal, command: Command) -> Result<(), CliError> {
    let store = portal.store();
    match command {
        Command::Flags => {
            let rendered = match portal.start().await {
                AppMode::Main { reviews_enabled } => json!({ "mode": "main", "reviews_enabled": reviews_enabled }),
                AppMode::Maintenance { message } => json!({ "mode": "maintenance", "message": message }),
            };
            print_json(&rendered)
        }
        Command::Me => {
            store.load_user().await;
            let user = store.user().await.ok_or(CliError::NotLoggedIn)?;
            print_json(&serde_json::to_value(user)?)
        }
        Command::Reviews(args) => {
            store.load_my_reviews(args.query()).await;
            print_json(&render_page(&store.reviews().await))
        }
        Command::Favorites(args) => {
            store.load_my_favorites(args.query()).await;
            print_json(&render_page(&store.favorites().await))
        }
        Command::UpdateProfile { name, last_name, avatar } => {
            let user = store.update_profile(ProfileInput { name, last_name, avatar }).await?;
            print_json(&serde_json::to_value(user)?)
        }
        Command::Favorite(favorite) => {
            match favorite.command {
                FavoriteSubcommand::Add { site_id } => store.add_favorite(site_id).await?,
                FavoriteSubcommand::Remove { site_id } => store.remove_favorite(site_id).await?,
            }
            println!("ok");
            Ok(())
        }
        Command::Navigate { location } => {
            let decision = portal.navigate(&location).await;
            println!("{decision:?}");
            Ok(())
        }
        Command::Callback { next } => {
            println!("{}", portal.guard().complete_login(next.as_deref()).await);
            Ok(())
        }
        Command::Logout => {
            store.logout().await;
            println!("ok");
            Ok(())
        }
    }
}

impl PageArgs {
    fn query(&self) -> PageQuery {
        PageQuery::new(self.page, self.order, self.per_page)
    }
}

/// Stand in for the cookies a browser would carry after the OAuth callback.
fn seed_cookies(jar: &Jar, config: &PortalConfig, access: Option<&str>, csrf: Option<&str>) {
    let Ok(url) = Url::parse(&format!("{}/", config.api_url())) else {
        return;
    };
    if let Some(token) = access {
        jar.add_cookie_str(&format!("{ACCESS_COOKIE}={token}; Path=/"), &url);
    }
    if let Some(token) = csrf {
        jar.add_cookie_str(&format!("{CSRF_COOKIE}={token}; Path=/"), &url);
    }
}

fn render_page(page: &ListPage) -> Value {
    json!({ "total": page.total, "items": page.items })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
