use std::path::PathBuf;

use clap::Parser;

use tessera::config::{load_config, ServerConfig};
use tessera::observability::{logging, metrics};
use tessera::{App, Context};

#[derive(Parser)]
#[command(name = "tessera")]
#[command(about = "Demo server for the tessera router", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("tessera v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_bytes = config.listener.max_body_bytes,
        request_timeout_secs = config.timeouts.request_secs,
        pool_max_idle = config.pool.max_idle,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let address = config.listener.bind_address.clone();
    let app = build_app(config);
    tracing::info!(routes = app.routes().len(), "Routes registered");

    app.listen(&address).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_app(config: ServerConfig) -> App {
    let mut app = App::with_config(config);

    // GET / --> "Hello, World!"
    app.get("/", |c: &mut Context| {
        c.status(200).write("Hello, World!");
    });

    // GET /v1/hello/john/and/doe --> "Hello john and doe"
    let mut v1 = app.group("/v1", |c: &mut Context| {
        c.write("Hello ");
        c.next();
    });
    v1.get("/hello/:param/and/:param2", |c: &mut Context| {
        let body = format!("{} and {}", c.params("param"), c.params("param2"));
        c.status(200).write(body);
    });

    // GET /greet?name=jane --> "Hi jane"
    app.get("/greet", |c: &mut Context| {
        let body = format!("Hi {}", c.query("name", "stranger"));
        c.send_string(body);
    });

    app
}
