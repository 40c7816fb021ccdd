use clap::Parser;
use quizgen::{
    db::Db,
    names,
    services::{GeminiClient, GenerationService},
    AppState,
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// libSQL server address, or `file:<path>` for a local database.
    #[arg(long, env, default_value = "file:quizgen.db")]
    database_url: String,

    /// libSQL authentication token (remote databases only).
    #[arg(long, env)]
    auth_token: Option<String>,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,

    /// Gemini API key. Without it the generation endpoints answer with a configuration error.
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    google_api_key: Option<String>,

    /// Gemini model used for quiz and title generation.
    #[arg(long, env = "GEMINI_MODEL", default_value = names::DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,tower_http=info,quizgen=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let db = Db::new(args.database_url, args.auth_token).await?;

    let generation = match args.google_api_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => Some(GenerationService::new(GeminiClient::new(key, args.model)?)),
        None => {
            tracing::warn!("GOOGLE_API_KEY is not set; quiz generation is disabled");
            None
        }
    };

    let app = quizgen::router(AppState { db, generation });

    let address = args.address.parse::<std::net::SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("listening on {address}");
    axum::serve(listener, app).await?;

    Ok(())
}
