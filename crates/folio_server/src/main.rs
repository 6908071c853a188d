#![forbid(unsafe_code)]

use folio_server::{build_router, AppState, ServerConfig};
use log::{error, info};
use std::process::ExitCode;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    let base_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("folio-server: cannot resolve working directory: {err}");
            return ExitCode::FAILURE;
        }
    };
    let config = ServerConfig::from_env(base_dir);

    let logging = match &config.log_dir {
        Some(log_dir) => folio_core::init_logging(config.log_level.as_str(), log_dir),
        None => folio_core::init_stderr_logging(config.log_level.as_str()),
    };
    if let Err(err) = logging {
        eprintln!("folio-server: logging init failed: {err}");
        return ExitCode::FAILURE;
    }

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(
                "event=server_bind module=server status=error addr={} error={}",
                config.bind_addr, err
            );
            return ExitCode::FAILURE;
        }
    };
    info!(
        "event=server_start module=server status=ok addr={} data_file={}",
        config.bind_addr,
        config.data_file.display()
    );

    let app = build_router(AppState::from_config(&config));
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
    {
        error!("event=server_stop module=server status=error error={}", err);
        return ExitCode::FAILURE;
    }

    info!("event=server_stop module=server status=ok");
    ExitCode::SUCCESS
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
