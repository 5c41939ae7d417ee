use anyhow::Result;
use clap::Parser;

use shopping_cart_cli::{
    cli::{args::Args, session::CliApp},
    utils::config::Config,
};

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    tracing::info!("🛒 Shopping Cart CLI starting...");

    let config = Config::from_env().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let app = CliApp::new(&config, args.catalog.as_deref())?;
    app.run(args)?;

    tracing::info!("🛒 Shopping Cart CLI stopped");
    Ok(())
}
