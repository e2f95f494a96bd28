//! Status display task

use std::io::Write;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    cli::{render, OutputFormat},
    state::Snapshot,
};

fn show<W: Write>(out: &mut W, snapshot: &Snapshot, format: OutputFormat) -> bool {
    match writeln!(out, "{}", render(snapshot, format)).and_then(|_| out.flush()) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to write status: {}", e);
            false
        }
    }
}

/// Write the current snapshot, then every change until the session loop ends.
///
/// Only status lines go to `out`, one per snapshot.
pub async fn display_task<W: Write>(
    mut updates: watch::Receiver<Snapshot>,
    format: OutputFormat,
    mut out: W,
) {
    let initial = updates.borrow_and_update().clone();
    if !show(&mut out, &initial, format) {
        return;
    }

    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        if !show(&mut out, &snapshot, format) {
            break;
        }
    }
    debug!("Display task finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        audio::{BellPlayer, SoundId},
        cli::Command,
        state::{AlarmController, CountdownEngine, Session},
        tasks::session_task,
    };
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };
    use tokio::{sync::mpsc, time::sleep};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn bytes(&self) -> Vec<u8> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_json_status_stays_clean_while_the_bell_rings() {
        let bell = Captured::default();
        let status = Captured::default();

        let alarm = AlarmController::new(
            Box::new(BellPlayer::with_writer(bell.clone())),
            SoundId::Beep,
        );
        let mut engine = CountdownEngine::new();
        engine.set_duration(1);
        let session = Session::new(engine, alarm);

        let (commands, command_rx) = mpsc::channel(8);
        let (update_tx, update_rx) = watch::channel(session.snapshot());
        let display = tokio::spawn(display_task(update_rx, OutputFormat::Json, status.clone()));
        let handle = tokio::spawn(session_task(session, command_rx, update_tx));

        commands.send(Command::Start).await.unwrap();
        sleep(Duration::from_secs(4)).await;
        commands.send(Command::Help).await.unwrap();
        commands.send(Command::Quit).await.unwrap();
        handle.await.unwrap();
        display.await.unwrap();

        assert!(bell.bytes().contains(&0x07));

        let text = String::from_utf8(status.bytes()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.len() >= 3);
        for line in &lines {
            let value: serde_json::Value = serde_json::from_str(line)
                .unwrap_or_else(|e| panic!("not JSON ({}): {:?}", e, line));
            assert!(value.get("phase").is_some());
        }
        assert!(lines.iter().any(|line| line.contains(r#""ringing":true"#)));
    }
}
