use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{info, warn};
use weather_dash::assets::PageImages;
use weather_dash::config::{DashboardConfig, ServerConfig};
use weather_dash::logging::init_tracing;
use weather_dash::{OpenMeteoClient, WeatherDashError, WeatherSource, export, page, web};

#[derive(Parser, Debug)]
#[command(
    name = "weather-dash",
    version,
    about = "Kentucky weather dashboard: a week of Open-Meteo history and forecasts in the browser"
)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reactive dashboard that re-fetches on every control change (default)
    Serve(ServerArgs),
    /// Fetch all cities once and serve a self-contained snapshot page
    Export {
        #[command(flatten)]
        server: ServerArgs,
        /// Write the snapshot to this file instead of serving it
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct ServerArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    /// Do not open a browser tab
    #[arg(long)]
    no_browser: bool,
}

impl ServerArgs {
    fn apply(&self, server: &ServerConfig) -> ServerConfig {
        ServerConfig {
            host: self.host.clone().unwrap_or_else(|| server.host.clone()),
            port: self.port.unwrap_or(server.port),
            open_browser: server.open_browser && !self.no_browser,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await.inspect_err(|e| {
        if let Some(err) = e.chain().find_map(|c| c.downcast_ref::<WeatherDashError>()) {
            eprintln!("{}", err.user_message());
        }
    })
}

async fn run(cli: Cli) -> Result<()> {
    let config = DashboardConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    init_tracing(&config.logging, cli.verbose)?;
    info!("weather-dash {}", weather_dash::VERSION);

    let source: Arc<dyn WeatherSource> = Arc::new(
        OpenMeteoClient::new(&config.weather).context("Failed to create weather client")?,
    );
    let images = PageImages::load(&config.assets.dir);

    match cli.command.unwrap_or(Command::Serve(ServerArgs::default())) {
        Command::Serve(args) => {
            let server = args.apply(&config.server);
            let page = page::dashboard_shell(&config.cities, &config.default_city, &images)?;
            let app = web::router(web::AppState {
                source,
                cities: Arc::new(config.cities.clone()),
                default_city: config.default_city.clone(),
                page: Arc::new(page),
            });

            let listener = web::bind_listener(&server.host, server.port).await?;
            open_browser(&listener, &server);
            web::serve(listener, app).await
        }
        Command::Export { server: args, output } => {
            let snapshot =
                export::collect_snapshot(source.as_ref(), &config.cities, &config.default_city)
                    .await;
            let document = export::render_document(&snapshot, &images)?;

            if let Some(path) = output {
                export::write_document(&path, &document)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                return Ok(());
            }

            let server = args.apply(&config.server);
            let listener = web::bind_listener(&server.host, server.port).await?;
            open_browser(&listener, &server);
            web::serve(listener, export::router(Arc::new(document))).await
        }
    }
}

fn open_browser(listener: &TcpListener, server: &ServerConfig) {
    if !server.open_browser {
        return;
    }
    let url = match listener.local_addr() {
        Ok(addr) if addr.ip().is_unspecified() => format!("http://localhost:{}/", addr.port()),
        Ok(addr) => format!("http://{addr}/"),
        Err(e) => {
            warn!("Cannot determine server address: {}", e);
            return;
        }
    };
    if let Err(e) = webbrowser::open(&url) {
        warn!("Failed to open browser at {}: {}", url, e);
    }
}
