//! Alarm Timer - A terminal countdown timer with a repeating alarm
//! 
//! This is the main entry point for the alarm-timer application.

use tokio::{
    sync::{mpsc, watch},
    time::Instant,
};
use tracing::{error, info, warn};

use alarm_timer::{
    audio::build_player,
    cli::{render::HELP, Command},
    config::Config,
    state::{AlarmController, CountdownEngine, Session},
    tasks::{display_task, session_task, spawn_input_thread},
    utils::{format_clock, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout only carries the status display
    tracing_subscriber::fmt()
        .with_env_filter(format!("alarm_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting alarm-timer v1.0.0");

    let mut engine = CountdownEngine::new();
    engine.set_duration(config.initial_duration());
    info!(
        "Configuration: duration={}, sound={}, audio={:?}",
        format_clock(engine.configured_duration()),
        config.sound,
        config.audio
    );

    let alarm = AlarmController::new(build_player(config.audio), config.sound);
    let mut session = Session::new(engine, alarm);
    if config.start && !session.start(Instant::now()) {
        warn!("Cannot start a countdown with a zero duration");
    }

    if !config.json {
        eprintln!("{}", HELP);
    }

    let (command_tx, command_rx) = mpsc::channel(32);
    let (update_tx, update_rx) = watch::channel(session.snapshot());

    let display = tokio::spawn(display_task(
        update_rx,
        config.output_format(),
        std::io::stdout(),
    ));
    let mut session_handle = tokio::spawn(session_task(session, command_rx, update_tx));
    spawn_input_thread(command_tx.clone())?;

    let interrupted = tokio::select! {
        result = &mut session_handle => {
            if let Err(e) = result {
                error!("Session loop failed: {}", e);
            }
            false
        }
        _ = shutdown_signal() => true,
    };

    if interrupted {
        info!("Shutdown signal received");
        if command_tx.send(Command::Quit).await.is_ok() {
            if let Err(e) = session_handle.await {
                error!("Session loop failed: {}", e);
            }
        }
    }

    if let Err(e) = display.await {
        error!("Display task failed: {}", e);
    }

    info!("alarm-timer stopped");
    Ok(())
}
