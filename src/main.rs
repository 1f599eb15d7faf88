use std::path::PathBuf;

use clap::Parser;
use stores_course::{
    content::Catalog,
    names,
    simulation::{GeminiClient, SimulationService, DEFAULT_API_BASE, DEFAULT_MODEL},
    AppState,
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The address to bind to.
    #[arg(short, long, env, default_value = names::DEFAULT_ADDRESS)]
    address: String,

    /// Course catalog JSON to serve instead of the built-in course.
    #[arg(long, env = "COURSE_CONTENT")]
    content: Option<PathBuf>,

    /// Gemini model used by the vigilance simulator.
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the Gemini API.
    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Environment variable holding the Gemini API key, read on every request.
    #[arg(long, default_value = names::DEFAULT_API_KEY_VAR)]
    api_key_var: String,

    /// Interface language.
    #[arg(long, env, default_value = names::DEFAULT_LOCALE)]
    locale: String,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "stores_course=debug,axum=info".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();
    rust_i18n::set_locale(&args.locale);

    let catalog = match &args.content {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin()?,
    };
    tracing::info!("loaded {} course modules", catalog.len());

    let provider = GeminiClient::new(args.api_base, args.model);
    tracing::info!("vigilance simulator uses model {}", provider.model());
    let simulator = SimulationService::new(provider, args.api_key_var);

    if std::env::var(simulator.api_key_var()).is_err() {
        tracing::warn!(
            "{} is not set; the vigilance simulator will report a configuration error",
            simulator.api_key_var()
        );
    }

    let app = stores_course::router(AppState::new(catalog, simulator));

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
