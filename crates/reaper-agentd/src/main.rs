mod cli;
mod metrics;

use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use reaper_core::Reaper;
use reaper_kube::KubeCluster;
use reaper_observe::{init_local_offset, init_logger};
use reaper_prometheus::PrometheusMetrics;

use crate::cli::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // offset detection only works while the process is single-threaded
    init_local_offset();
    init_logger(&args.logger_config())?;
    info!(version = env!("CARGO_PKG_VERSION"), "reaper-agentd starting");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(args))
}

async fn run(args: Args) -> anyhow::Result<()> {
    let cluster = KubeCluster::new(args.kube_config()?)?;
    info!(api_server = cluster.base_url(), "kubernetes client ready");

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    let mut reaper = Reaper::new(Arc::new(cluster), args.reaper_config());
    let mut server = None;
    if let Some(addr) = args.metrics_addr {
        let prom = Arc::new(PrometheusMetrics::new()?);
        let listener = metrics::bind(addr).await?;
        reaper = reaper.with_metrics(prom.clone());
        server = Some(tokio::spawn(metrics::serve(listener, prom, shutdown.clone())));
    }

    let result = reaper.run(shutdown.clone()).await;
    shutdown.cancel();

    if let Some(handle) = server {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "metrics endpoint failed"),
            Err(e) => warn!(error = %e, "metrics endpoint task panicked"),
        }
    }

    if let Err(e) = &result {
        error!(error = %e, "reaper stopped");
    }
    Ok(result?)
}

/// Cancel `token` on SIGINT or SIGTERM.
async fn shutdown_on_signal(token: CancellationToken) {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {}
        _ = terminate => {}
    }

    info!("shutdown requested, finishing current cycle");
    token.cancel();
}
