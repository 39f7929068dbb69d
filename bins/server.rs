use std::process::ExitCode;

use configs::AppConfig;
use tracing::{error, info, warn};

/// Resolves on Ctrl+C; the server then stops accepting and drains in-flight requests.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(event = "signal_handler_failed", error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

fn main() -> ExitCode {
    // .env 必须先于日志初始化加载，LOG_FORMAT / RUST_LOG 才会生效
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    std::panic::set_hook(Box::new(|info| {
        error!(event = "panic", pid = std::process::id(), message = %info, "unhandled panic");
    }));

    // 配置只加载一次：运行时线程数与服务本身共用同一份
    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", error = %e, "cannot load configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = cfg.server.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        version = env!("CARGO_PKG_VERSION"),
        backend = ?cfg.store.backend,
        database = %cfg.store.database_name,
        threads = cfg.server.worker_threads.unwrap_or_default(),
        "home services starting"
    );

    match rt.block_on(server::run(cfg, shutdown_signal())) {
        Ok(()) => {
            info!(event = "stop", "server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(event = "run_failed", error = %e, "server exited with error");
            ExitCode::FAILURE
        }
    }
}
