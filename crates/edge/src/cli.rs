// crates/edge/src/cli.rs

use crate::{router, view, view::Kind, Error};
use adapt::{CdnImageBuilder, InMemoryContentStore, SanityClient};
use chrono::Utc;
use clap::{builder::ValueHint, Args, Parser, Subcommand};
use domain::{setting::Settings, Locale};
use serve::{
    service::ContentService,
    source::{ContentSource, ImageUrlBuilder},
};
use std::{net::SocketAddr, path::PathBuf, process::ExitCode, sync::Arc, time::Duration};
use tracing::{error, info};

pub type Result<T> = std::result::Result<T, Error>;

/// Site content CLI
#[tokio::main(flavor = "multi_thread")]
#[tracing::instrument(skip_all)]
pub async fn start() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch(cmd) => do_fetch(&cli.source, cmd).await,
        Commands::Count => do_count(&cli.source).await,
        Commands::Serve => do_serve(&cli.source).await,
    };

    result.map_or_else(
        |e| {
            error!("Command failed: {}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
        |_| ExitCode::SUCCESS,
    )
}

#[tracing::instrument(skip_all)]
async fn do_fetch(source: &SourceArgs, cmd: FetchCmd) -> Result<()> {
    let process = boot(source)?;
    let locale = Locale::from_segment(&cmd.lang);
    let view = view::resolve(process.service(), cmd.kind, locale, cmd.slug.as_deref()).await?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

#[tracing::instrument(skip_all)]
async fn do_count(source: &SourceArgs) -> Result<()> {
    let process = boot(source)?;
    println!("{}", process.service().blog_count().await?);
    Ok(())
}

#[tracing::instrument(skip_all)]
async fn do_serve(source: &SourceArgs) -> Result<()> {
    let process = boot(source)?;

    let then = Utc::now();
    let process = process.start_server().await?;
    info!(
        "Server started in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    process.run_until_shutdown().await
}

/// Settings, then the adapters and the cached service built from them.
fn boot(source: &SourceArgs) -> Result<StartProcess<ServiceReady>> {
    let then = Utc::now();
    let process = StartProcess::<CommandIssued>::parse_settings_file(source)?;
    info!(
        "Settings parsed in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );

    let then = Utc::now();
    let process = process.inject_dependencies(source.fixtures.as_deref())?;
    info!(
        "Dependencies injected in {} milliseconds",
        Utc::now().timestamp_millis() - then.timestamp_millis()
    );
    Ok(process)
}

#[derive(Parser, Debug)]
#[command(name = "sitecontent", version, about = "Localized site content command-line tool")]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Settings file (or set SITE_SETTINGS)
    #[arg(
        long,
        global = true,
        env = "SITE_SETTINGS",
        default_value = "settings.toml",
        value_hint = ValueHint::FilePath
    )]
    pub settings: PathBuf,

    /// Serve content from a dataset export instead of the remote store
    /// (JSON array or NDJSON; or set SITE_FIXTURES)
    #[arg(long, global = true, env = "SITE_FIXTURES", value_hint = ValueHint::FilePath)]
    pub fixtures: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one resolved view model as JSON
    Fetch(FetchCmd),
    /// Print the number of published blog posts
    Count,
    /// Start the JSON HTTP API
    Serve,
}

#[derive(Parser, Debug)]
pub struct FetchCmd {
    /// View model to resolve
    #[arg(value_enum)]
    pub kind: Kind,

    /// Slug, for `project` and `blog-post`
    pub slug: Option<String>,

    /// Locale code; anything unrecognised falls back to Polish
    #[arg(long, default_value = "pl")]
    pub lang: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Start process state machine
// ─────────────────────────────────────────────────────────────────────────────

trait ProcessState {}

struct CommandIssued;

struct SettingsLoaded {
    settings: Settings,
}

struct ServiceReady {
    settings: Settings,
    service: Arc<ContentService>,
}

struct ServerStarted {
    addr: SocketAddr,
    server: tokio::task::JoinHandle<std::io::Result<()>>,
}

impl ProcessState for CommandIssued {}
impl ProcessState for SettingsLoaded {}
impl ProcessState for ServiceReady {}
impl ProcessState for ServerStarted {}

struct StartProcess<S: ProcessState> {
    state: S,
}

impl StartProcess<CommandIssued> {
    #[tracing::instrument(skip_all)]
    fn parse_settings_file(source: &SourceArgs) -> Result<StartProcess<SettingsLoaded>> {
        let path = &source.settings;

        // Ensure file exists
        if !path.exists() {
            return Err(Error::Config(format!(
                "settings file not found at {}",
                path.display()
            )));
        }

        // Read the file
        let text = std::fs::read_to_string(path).map_err(|err| {
            Error::Config(format!("Failed reading {}: {}", path.display(), err))
        })?;

        // Deserialize
        let settings: Settings = toml::from_str(&text).map_err(|err| {
            Error::Config(format!("Invalid settings at {}: {}", path.display(), err))
        })?;

        Ok(StartProcess {
            state: SettingsLoaded { settings },
        })
    }
}

impl StartProcess<SettingsLoaded> {
    /// Remote store by default; the fixture store when an export is given.
    #[tracing::instrument(skip_all)]
    fn inject_dependencies(
        self,
        fixtures: Option<&std::path::Path>,
    ) -> Result<StartProcess<ServiceReady>> {
        let settings = self.state.settings;

        let source: Arc<dyn ContentSource> = match fixtures {
            Some(path) => {
                info!("Using content fixtures at {}", path.display());
                Arc::new(InMemoryContentStore::from_path(path)?)
            }
            None => {
                info!(
                    "Using content store {}/{}",
                    settings.content.project_id, settings.content.dataset
                );
                Arc::new(SanityClient::new(&settings.content))
            }
        };
        let images: Arc<dyn ImageUrlBuilder> =
            Arc::new(CdnImageBuilder::new(&settings.content, &settings.images));

        let revalidate = Duration::from_secs(settings.cache.revalidate_secs);
        let service = Arc::new(ContentService::new(source, images, revalidate));

        Ok(StartProcess {
            state: ServiceReady { settings, service },
        })
    }
}

impl StartProcess<ServiceReady> {
    fn service(&self) -> &ContentService {
        &self.state.service
    }

    #[tracing::instrument(skip_all)]
    async fn start_server(self) -> Result<StartProcess<ServerStarted>> {
        let server = &self.state.settings.server;
        let addr = SocketAddr::new(server.ip, server.port);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let app = router::build(self.state.service.clone());

        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
        });

        info!("Listening on http://{}", addr);
        Ok(StartProcess {
            state: ServerStarted { addr, server },
        })
    }
}

impl StartProcess<ServerStarted> {
    #[tracing::instrument(skip_all)]
    async fn run_until_shutdown(self) -> Result<()> {
        let addr = self.state.addr;
        match self.state.server.await {
            Ok(res) => res?,
            Err(join) => return Err(Error::Config(format!("server task failed: {join}"))),
        }
        info!("Server on {} stopped", addr);
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
    }
}
