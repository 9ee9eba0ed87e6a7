use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;

use panopticon::{api, init_logger, Config, Recorder};

#[tokio::main]
async fn main() {
    let config = Config::parse();
    init_logger();

    if let Err(e) = run(&config).await {
        log::error!("SERVER_FAILED error={:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: &Config) -> anyhow::Result<()> {
    let recorder = Recorder::connect(config).await?;
    recorder.provision_schema().await?;

    let addr = config.listen_addr().context("Invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not bind {}", addr))?;

    log::info!("SERVER_LISTENING addr={} driver={}", addr, config.db_driver);

    axum::serve(
        listener,
        api::router(recorder).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server failed")?;
    Ok(())
}
