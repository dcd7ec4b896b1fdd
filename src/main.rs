//! CLI for thinbroker
//!
//! Subcommands:
//! - `server`: run the HTTP (and optionally WebSocket) broker
//! - `bench`: hammer a running broker with publishes and report latencies

use clap::Parser;
use std::sync::Arc;
use thinbroker::bench::{self, BenchConfig};
use thinbroker::broker::Broker;
use thinbroker::config::{Settings, load_config};
use thinbroker::transport::{start_http_server, start_websocket_server};
use thinbroker::utils::logging;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "thinbroker", version, about)]
enum Command {
    /// Start the broker
    Server,
    /// Run the load generator against a running broker
    Bench {
        /// Base URL of the broker, e.g. http://127.0.0.1:3000
        url: String,
        /// Number of concurrent workers
        #[arg(default_value_t = 4)]
        tasks: usize,
        /// Publishes sent by each worker
        #[arg(default_value_t = 100)]
        messages: usize,
        /// Topic to publish to
        #[arg(long, default_value = "/bench")]
        topic: String,
    },
}

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cmd = Command::parse();

    let result = match cmd {
        Command::Server => match load_config() {
            Ok(settings) => {
                logging::init(&settings.log.level);
                run_server(settings).await
            }
            Err(e) => {
                logging::init("info");
                Err(e.into())
            }
        },
        Command::Bench {
            url,
            tasks,
            messages,
            topic,
        } => {
            logging::init("info");
            run_bench(BenchConfig {
                url,
                tasks,
                messages_per_task: messages,
                topic,
            })
            .await
        }
    };

    if let Err(e) = result {
        error!("Fatal: {e}");
        std::process::exit(1);
    }
}

async fn run_server(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let broker = Arc::new(Broker::new());
    let http = start_http_server(&settings.server.host, settings.server.port, broker.clone());

    if settings.websocket.enabled {
        let ws_addr = format!("{}:{}", settings.websocket.host, settings.websocket.port);
        tokio::select! {
            res = http => res?,
            res = start_websocket_server(ws_addr, broker) => {
                res?;
                error!("WebSocket server exited unexpectedly.");
            }
        }
    } else {
        http.await?;
    }

    info!("Broker stopped.");
    Ok(())
}

async fn run_bench(config: BenchConfig) -> Result<(), Box<dyn std::error::Error>> {
    let report = bench::run(&config).await?;
    let ms = |pct: f64| report.percentile(pct).as_secs_f64() * 1000.0;

    println!("requests: {}", report.requests());
    println!("failures: {}", report.failures);
    println!("p50: {:.2} ms", ms(50.0));
    println!("p90: {:.2} ms", ms(90.0));
    println!("p99: {:.2} ms", ms(99.0));
    Ok(())
}
