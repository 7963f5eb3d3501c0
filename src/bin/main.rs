use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG: &str = "tmdb-relay.yaml";

#[derive(Parser, Debug)]
#[command(name = "tmdb-relay-server")]
#[command(about = "JSON proxy in front of the TMDB API", long_about = None)]
struct Args {
    /// Config file; the default one is optional.
    #[arg(short, long)]
    config: Option<String>,

    #[arg(short, long)]
    debug: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.debug {
        "tmdb_relay=debug,tower_http=debug"
    } else {
        "tmdb_relay=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let explicit = args.config.is_some();
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG);

    if let Err(e) = tmdb_relay::run(config_path, explicit).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
