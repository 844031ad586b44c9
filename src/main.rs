use std::path::PathBuf;

use clap::{Parser, Subcommand};
use diagnoser::{db::Db, names, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// SQLite database URL; the file is created when missing.
    #[arg(long, env, default_value = "sqlite://diagnoser.db")]
    database_url: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:5000")]
    address: String,

    /// Directory quiz images are stored in.
    #[arg(long, env, default_value = "uploads")]
    upload_dir: PathBuf,

    /// When set, replaces the password of the `admin` user at startup.
    #[arg(long, env, hide_env_values = true)]
    admin_password: Option<String>,

    /// Mark cookies `Secure` (serve over HTTPS only).
    #[arg(long, env)]
    secure_cookies: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert the demo quiz and the admin user, then exit.
    Seed,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "axum=info,diagnoser=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    // Schema creation and evolution run here; a failure aborts startup.
    let db = Db::new(&args.database_url).await?;

    if let Some(Command::Seed) = args.command {
        let quiz_id = diagnoser::seed::seed(&db).await?;
        tracing::info!("demo quiz available at {}", names::quiz_url(quiz_id));
        return Ok(());
    }

    if let Some(password) = args.admin_password.as_deref().filter(|p| !p.is_empty()) {
        if !db
            .set_admin_password(names::DEFAULT_ADMIN_USERNAME, password)
            .await?
        {
            tracing::warn!(
                "ADMIN_PASSWORD is set but no `{}` user exists; run `diagnoser seed` first",
                names::DEFAULT_ADMIN_USERNAME
            );
        }
    }

    tokio::fs::create_dir_all(&args.upload_dir).await?;

    let state = AppState::new(db, args.upload_dir, args.secure_cookies);
    let app = diagnoser::router(state);

    let address = args.address.parse::<std::net::SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("listening on http://{address}");
    axum::serve(listener, app).await?;

    Ok(())
}
