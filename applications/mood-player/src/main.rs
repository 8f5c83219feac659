/// Mood Player - terminal client
use clap::Parser;
use mood_catalog::CatalogLoader;
use mood_core::{MoodKey, MoodTable, Realtime, Track};
use mood_player::{
    prefs::{JsonFileStore, Preferences},
    router::Router,
    simulated::{SimulatedAudio, DEFAULT_TRACK_LENGTH},
    terminal::{parse_line, TerminalCanvas, TerminalView, HELP},
    Command, MoodPlayer, PlayerConfig, PlayerOptions, PlayerServices,
};
use mood_server_client::{MoodServerClient, ServerConfig, WsRealtime};
use mood_visuals::Viewport;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mood-player")]
#[command(about = "Mood-based music player with listen-together rooms", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start directly in this mood
    #[arg(short, long)]
    mood: Option<MoodKey>,

    /// Start URL (the `mood` query or fragment picks the mood)
    #[arg(long)]
    url: Option<String>,

    /// Thin out the particle background and skip crossfades and volume ramps
    #[arg(long)]
    reduced_motion: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout belongs to the player
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "mood_player=info,mood_playback=info,mood_rooms=info,mood_catalog=info,mood_server_client=warn"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = PlayerConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.ui.initial_url = url;
    }
    if cli.reduced_motion {
        config.ui.reduced_motion = true;
    }
    config.validate()?;

    let initial_url = match cli.mood {
        Some(mood) => {
            let mut router = Router::new(&config.ui.initial_url)?;
            router.set_mood(mood);
            router.url().to_string()
        }
        None => config.ui.initial_url.clone(),
    };

    tracing::info!("Starting Mood Player");
    tracing::info!("Assets: {}", config.assets.base_url);
    tracing::info!("Backend: {}", config.backend.api_url);

    let asset_base = config.asset_base()?;
    let catalog = CatalogLoader::new(asset_base.clone());
    let table = MoodTable::with_fallback(Track::fallback(&asset_base));

    let backend = Arc::new(MoodServerClient::new(ServerConfig::new(&config.backend.api_url))?);
    let realtime: Option<Arc<dyn Realtime>> = match config.realtime_url() {
        Some(url) => Some(Arc::new(WsRealtime::new(url)?)),
        None => {
            tracing::info!("No realtime URL configured, listen-together disabled");
            None
        }
    };

    let prefs = Preferences::new(Box::new(JsonFileStore::open(&config.storage.path)));
    let (audio, audio_events) = SimulatedAudio::new(DEFAULT_TRACK_LENGTH);

    let services = PlayerServices {
        backend,
        realtime,
        audio: Box::new(audio),
        audio_events,
        view: Box::new(TerminalView::new(std::io::stdout())),
        canvas: Box::new(TerminalCanvas::new()),
        prefs,
    };
    let options = PlayerOptions {
        initial_url,
        reduced_motion: config.ui.reduced_motion,
        viewport: Viewport::new(config.ui.viewport_width, config.ui.viewport_height),
        ..PlayerOptions::default()
    };

    let mut player = MoodPlayer::new(table, services, options)?;
    player.start(Some(&catalog)).await;

    let (commands, rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(commands.clone());
    spawn_ctrl_c(commands);

    player.run(rx).await;

    tracing::info!("Bye");
    Ok(())
}

/// Read commands from stdin, one per line
///
/// End of input closes the channel, which stops the player.
fn spawn_stdin_reader(commands: mpsc::UnboundedSender<Command>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read stdin");
                    break;
                }
            };

            if line.trim().eq_ignore_ascii_case("help") {
                println!("{}", HELP);
                continue;
            }

            match parse_line(&line) {
                Some(command) => {
                    if commands.send(command).is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => println!("? {}  (help でコマンド一覧)", line.trim()),
            }
        }
    });
}

fn spawn_ctrl_c(commands: mpsc::UnboundedSender<Command>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = commands.send(Command::Quit);
        }
    });
}
