use anyhow::Context;
use relay_ox::{LogSettings, startup, telemetry};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Some(warning) = startup::load_dotenv() {
        eprintln!("WARN: {warning}");
    }

    telemetry::init(&LogSettings::from_env());

    let dispatcher = match startup::startup(|name| std::env::var(name).ok()) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            eprintln!("ERROR: {e}");
            eprintln!("Set them in the environment or in a .env file and restart.");
            std::process::exit(1);
        }
    };

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            shutdown.cancel();
        }
    });

    dispatcher
        .run(shutdown)
        .await
        .context("telegram dispatcher stopped")?;

    info!("relay-ox stopped");
    Ok(())
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received, stopping");
}
