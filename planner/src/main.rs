use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use planner::api::{ApiState, api_router};
use planner::auth::{Auth, NewUser};
use planner::config::{AdminSeed, Config, redact_db_url};
use planner::entity::app_user::Role;
use planner::validation;
use sea_orm::Database;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "planner", about = "Wedding Planner - event booking API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API (default)
    Serve,
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an account
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue)]
        admin: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env first so RUST_LOG from it applies
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    tracing::info!(database = %redact_db_url(&config.database_url), "connecting to database");

    let db = Database::connect(&config.database_url).await?;
    Migrator::up(&db, None).await?;

    tracing::info!("database initialized");

    let auth = Arc::new(Auth::new(db.clone()));

    match cli.command {
        None | Some(Commands::Serve) => serve(auth, db, config).await?,
        Some(Commands::User { action }) => handle_user_action(&auth, action).await?,
    }

    Ok(())
}

/// Creates the first admin when the store is empty.
async fn seed_admin(auth: &Auth, seed: &AdminSeed) -> Result<(), Box<dyn std::error::Error>> {
    if auth.count_users().await? > 0 {
        return Ok(());
    }

    let Some(password) = seed.password.as_deref() else {
        tracing::error!(
            "No users exist and WP_ADMIN_PASSWORD is not set. \
             Set it to a strong password before starting."
        );
        std::process::exit(1);
    };

    tracing::warn!(username = %seed.username, "No users found, seeding default admin");
    auth.create_user(NewUser {
        username: &seed.username,
        email: &seed.email,
        password,
        full_name: Some("Administrator"),
        role: Role::Admin,
    })
    .await?;
    Ok(())
}

async fn serve(
    auth: Arc<Auth>,
    db: sea_orm::DatabaseConnection,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    seed_admin(&auth, &config.admin_seed).await?;

    let state = ApiState {
        auth,
        db,
        jwt_secret: config.jwt_secret_or_random(),
        session_hours: config.session_hours,
    };

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "API online");

    axum::serve(listener, api_router(state, &config.cors_allowed_origins)).await?;
    Ok(())
}

async fn handle_user_action(
    auth: &Auth,
    action: UserAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        UserAction::Create {
            username,
            email,
            password,
            full_name,
            admin,
        } => {
            let username = validation::length("Username", &username, 3, 80)?;
            let email = validation::email("Email", &email)?;
            validation::password(&password, &password)?;

            let role = if admin { Role::Admin } else { Role::Client };
            auth.create_user(NewUser {
                username: &username,
                email: &email,
                password: &password,
                full_name: full_name.as_deref(),
                role,
            })
            .await?;
            tracing::info!(username = %username, ?role, "Created user");
        }
    }
    Ok(())
}
