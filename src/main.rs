use std::process::ExitCode;

use cart_watch::config::{self, ConfigOverrides};
use cart_watch::runner;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Checks a product page once and alerts when it can be added to the cart.
#[derive(Parser)]
#[command(name = "cart-watch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Product page to check (overrides PRODUCT_URL)
    #[arg(long, value_name = "URL")]
    target: Option<String>,

    /// Alert webhook (overrides DISCORD_WEBHOOK_URL)
    #[arg(long, value_name = "URL")]
    webhook: Option<String>,

    /// Run the check but log the alert instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Validate configuration, print the summary and exit
    #[arg(long)]
    check_config: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            target_url: self.target.clone(),
            webhook_url: self.webhook.clone(),
            dry_run: self.dry_run,
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` drives the filter.
fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_format {
        "json" => builder.json().init(),
        _ => builder.init(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let loaded = config::load_from_env(&cli.overrides());
    init_tracing(
        loaded
            .as_ref()
            .map(|config| config.log_format.as_str())
            .unwrap_or("text"),
    );

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration, no check was run");
            return ExitCode::FAILURE;
        }
    };
    config.print_summary();

    if cli.check_config {
        tracing::info!("Configuration OK");
        return ExitCode::SUCCESS;
    }

    match runner::run(config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = format!("{e:#}"), "Run aborted");
            ExitCode::FAILURE
        }
    }
}
