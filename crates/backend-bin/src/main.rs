use anyhow::Context;
use bankauth_backend::{
    config::{LogFormat, Settings, DEFAULT_CONFIG_FILE},
    router,
    seed::{demo_customers, seed_customer, SeedCustomer},
    storage::{CustomerStore, FlatFileCustomerStore, InMemoryCustomerStore},
    AppState,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bankauth-server", version, about = "Bank customer login service")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the login API (default)
    Serve {
        /// Serve two in-memory demo customers instead of the customers file
        #[arg(long)]
        demo: bool,
    },
    /// Upsert the customer described by SEED_CUSTOMER_* variables
    Seed,
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match settings.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load_from(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    init_tracing(&settings);

    match cli.command.unwrap_or(Command::Serve { demo: false }) {
        Command::Serve { demo } => serve(settings, demo).await,
        Command::Seed => seed(&settings).await,
    }
}

async fn serve(settings: Settings, demo: bool) -> anyhow::Result<()> {
    let store: Arc<dyn CustomerStore> = if demo {
        info!("serving in-memory demo customers");
        let customers = tokio::task::spawn_blocking(demo_customers).await?;
        Arc::new(InMemoryCustomerStore::new(customers))
    } else {
        info!(path = %settings.customers_path.display(), "serving customers file");
        Arc::new(FlatFileCustomerStore::new(&settings.customers_path))
    };

    let addr = settings.bind_addr;
    let state = Arc::new(AppState::new(store, settings));
    let app = router::create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn seed(settings: &Settings) -> anyhow::Result<()> {
    let customer = SeedCustomer::from_env()?;
    let store = FlatFileCustomerStore::new(&settings.customers_path);
    let stored = seed_customer(&store, &customer).await?;
    info!(email = %stored.email, subject_id = %stored.subject_id, "seeded customer");
    Ok(())
}
