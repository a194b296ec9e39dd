use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "horror-oracle-server")]
#[command(about = "Horror movie oracle backend", long_about = None)]
struct Args {
    /// Optional yaml config file; environment variables override it.
    #[arg(short, long)]
    config: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "horror_oracle=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match horror_oracle::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(port) = args.port {
        config.listen.port = port.to_string();
    }

    if let Err(e) = horror_oracle::run(config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
