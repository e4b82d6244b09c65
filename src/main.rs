//! EduBot CLI
//!
//! Terminal host for the EduBot pages:
//! - Sign in and out
//! - Show the dashboard and generate learning content
//! - Edit the profile and send feedback
//! - Print a default config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use edubot::auth::{clear_session, store_session_token, AuthGate, AuthProvider, GateOutcome};
use edubot::config::generate_default_config;
use edubot::pages::theme::{load_theme, save_theme};
use edubot::pages::{
    DashboardController, FeedbackController, GenerateOutcome, Notifier, ProfileController,
    SaveOutcome, SubmitOutcome, Theme,
};
use edubot::{
    AbortController, BackendClient, Config, FileStore, GenerationPipeline, KeyValueStore,
    SelectedFile, SupabaseAuth, SupabaseStorage,
};

#[derive(Parser)]
#[command(name = "edubot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AI learning assistant: flashcards, quizzes and summaries from your notes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/edubot/config.toml or ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Local data directory, overrides the config
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a session token after checking it with the identity provider
    Login {
        /// Access token issued by the provider
        token: String,
    },

    /// Forget the stored session token
    Logout,

    /// Show who the stored session belongs to
    Whoami,

    /// Show the dashboard overview
    Dashboard,

    /// Click a feature card (ai-tutor, flashcards, games, summary, avatar)
    Feature {
        action: String,
    },

    /// Generate learning content from text or a file
    Generate {
        /// Feature card to use
        #[arg(short, long, default_value = "summary")]
        feature: String,
        /// Text to learn from
        #[arg(short, long)]
        text: Option<String>,
        /// Document to upload instead of text
        #[arg(short = 'F', long)]
        file: Option<PathBuf>,
    },

    /// Show or toggle the theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },

    /// Send or list feedback
    Feedback {
        #[command(subcommand)]
        action: FeedbackAction,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    Show,
    Toggle,
}

#[derive(Subcommand)]
pub enum ProfileAction {
    Show,
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
        /// Accent color, e.g. #00d4ff
        #[arg(long)]
        color: Option<String>,
        /// dark or light
        #[arg(long)]
        theme: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum FeedbackAction {
    Submit {
        /// Stars, 1 to 5
        #[arg(short, long)]
        rating: u8,
        /// Feedback type (bug, feature, content, other)
        #[arg(short = 'T', long = "type")]
        kind: String,
        #[arg(short, long)]
        message: String,
        /// Screenshot to attach
        #[arg(short = 'F', long)]
        file: Option<PathBuf>,
    },
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.local.data_dir = dir.to_string_lossy().to_string();
    }

    init_logging(&config);

    match cli.command {
        Commands::Login { token } => {
            let store = open_store(&config)?;
            let provider = SupabaseAuth::new(config.identity_provider())?;
            let user = provider
                .get_user(&token)
                .await
                .context("Token was not accepted")?;
            store_session_token(store.as_ref(), &token)?;
            println!(
                "Logged in as {}",
                user.display_name().unwrap_or_else(|| user.id.clone())
            );
        }

        Commands::Logout => {
            let store = open_store(&config)?;
            clear_session(store.as_ref())?;
            println!("Logged out");
        }

        Commands::Whoami => {
            let store = open_store(&config)?;
            let gate = auth_gate(&config)?;
            match gate.check(store.as_ref()).await {
                GateOutcome::Authenticated { user, display_name } => {
                    println!("{}", display_name.unwrap_or(user.id));
                    if let Some(email) = user.email {
                        println!("{}", email);
                    }
                }
                GateOutcome::Redirect { to, .. } => {
                    eprintln!("Not logged in. Sign in at {}", to);
                    std::process::exit(1);
                }
            }
        }

        Commands::Dashboard => {
            let store = open_store(&config)?;
            let page = open_dashboard(&config, store).await?;
            print_dashboard(&page);
        }

        Commands::Feature { action } => {
            let store = open_store(&config)?;
            let mut page = open_dashboard(&config, store).await?;
            let selected = page.handle_feature_click(&action);
            print_notices(page.notifier());
            if selected.is_some() {
                println!("{}", page.view().generator.title);
            }
        }

        Commands::Generate {
            feature,
            text,
            file,
        } => {
            let store = open_store(&config)?;
            let abort = Arc::new(AbortController::new());
            let mut page = open_dashboard(&config, store)
                .await?
                .with_abort_controller(abort.clone());

            if page.handle_feature_click(&feature).is_none() {
                print_notices(page.notifier());
                std::process::exit(1);
            }
            if let Some(text) = text {
                page.set_source_text(text);
            }
            if let Some(path) = file {
                let selected = SelectedFile::read(&path)
                    .await
                    .with_context(|| format!("Failed to read {:?}", path))?;
                page.attach_file(selected);
            }

            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("Interrupted, aborting generation");
                    abort.abort();
                }
            });

            let outcome = page.generate().await;
            print_notices(page.notifier());
            if let Some(result) = page.result() {
                println!("{}", result.text());
            }
            if !matches!(outcome, GenerateOutcome::Rendered(_)) {
                std::process::exit(1);
            }
        }

        Commands::Theme { action } => {
            let store = open_store(&config)?;
            let theme = match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => load_theme(store.as_ref()),
                ThemeAction::Toggle => {
                    let theme = load_theme(store.as_ref()).toggled();
                    save_theme(store.as_ref(), theme)?;
                    theme
                }
            };
            println!("{} {}", theme.icon(), theme);
        }

        Commands::Profile { action } => {
            let store = open_store(&config)?;
            let mut page = ProfileController::new(store);
            if let Some(ProfileAction::Set {
                name,
                email,
                role,
                color,
                theme,
            }) = action
            {
                if let Some(name) = name {
                    page.input_name(name);
                }
                if let Some(email) = email {
                    page.input_email(email);
                }
                if let Some(role) = role {
                    page.change_role(role);
                }
                if let Some(color) = color {
                    page.input_accent_color(color);
                }
                if let Some(theme) = theme {
                    page.select_theme(Theme::parse(&theme));
                }

                if let SaveOutcome::Rejected(message) = page.save()? {
                    eprintln!("✗ {}", message);
                    std::process::exit(1);
                }
                print_notices(page.notifier());
            }

            let view = page.view();
            println!("{} ({})", view.display_name, view.display_role);
            println!("Email:   {}", view.email_input);
            println!("Accent:  {}", view.color_label);
            println!("Theme:   {}", view.theme);
            println!();
            println!("Flashcards completed: {}", view.stats.flashcards_completed);
            println!("Games played:         {}", view.stats.games_played);
            println!("Learning streak:      {}", view.stats.learning_streak);
            println!("Last session:         {}", view.stats.last_session);
        }

        Commands::Feedback { action } => {
            let store = open_store(&config)?;
            let mut page =
                FeedbackController::new(store).with_submit_delay(config.submit_delay());
            match action {
                FeedbackAction::Submit {
                    rating,
                    kind,
                    message,
                    file,
                } => {
                    page.click_star(rating);
                    page.set_type(kind);
                    page.input_message(&message);
                    if let Some(path) = file {
                        let selected = SelectedFile::read(&path)
                            .await
                            .with_context(|| format!("Failed to read {:?}", path))?;
                        page.attach_file(selected);
                    }

                    match page.submit().await? {
                        SubmitOutcome::Submitted(record) => {
                            println!("Thank you! Feedback sent ({}★, {})", record.rating, record.kind);
                        }
                        SubmitOutcome::Rejected(message) => {
                            eprintln!("✗ {}", message);
                            std::process::exit(1);
                        }
                        SubmitOutcome::Ignored => {}
                    }
                }
                FeedbackAction::List => {
                    let records = page.records()?;
                    if records.is_empty() {
                        println!("No feedback sent yet.");
                    }
                    for record in records {
                        println!(
                            "{}  {}★  {:<8} {}",
                            record.timestamp, record.rating, record.kind, record.message
                        );
                    }
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("edubot={}", config.logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn open_store(config: &Config) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    let store = FileStore::open(config.data_dir())
        .with_context(|| format!("Failed to open local store in {}", config.local.data_dir))?;
    Ok(Arc::new(store))
}

fn auth_gate(config: &Config) -> anyhow::Result<AuthGate> {
    let provider = Arc::new(SupabaseAuth::new(config.identity_provider())?);
    Ok(AuthGate::new(provider).login_url(config.auth.login_url.clone()))
}

/// Build the dashboard and pass it through the login gate when required
async fn open_dashboard(
    config: &Config,
    store: Arc<dyn KeyValueStore>,
) -> anyhow::Result<DashboardController> {
    let backend = Arc::new(BackendClient::new(config.backend())?);
    let objects = Arc::new(SupabaseStorage::new(config.object_storage())?);
    let pipeline = GenerationPipeline::new(backend, objects, config.pipeline());

    let mut page = DashboardController::new(store, pipeline);
    if config.auth.require_login {
        page = page.with_gate(auth_gate(config)?);
    }

    if let Some(GateOutcome::Redirect { to, reason }) = page.authenticate().await {
        tracing::debug!(?reason, "Dashboard gate redirected");
        bail!("Not logged in. Sign in at {} and run `edubot login <token>`", to);
    }
    Ok(page)
}

fn print_dashboard(page: &DashboardController) {
    let view = page.view();
    println!("Welcome back, {}! {}", view.user_name, view.theme_icon);
    println!();
    println!("Progress:          {}", view.progress.label);
    println!("Streak:            {} days", view.streak);
    println!("Hours learned:     {}", view.total_hours);
    println!("Courses completed: {}", view.courses_completed);
    println!();
    println!("Recent activity:");
    for activity in &view.activities {
        println!("  {} {:<32} {}", activity.icon, activity.title, activity.time);
    }
}

fn print_notices(notifier: &Notifier) {
    for notice in notifier.history() {
        eprintln!("{} {}", notice.kind.icon(), notice.message);
    }
}
