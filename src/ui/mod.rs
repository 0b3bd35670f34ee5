//! Terminal front-end.
//!
//! A single event queue feeds the loop: key presses from the input thread and
//! finished clipboard reads from blocking tasks. Each event is applied in full
//! before the next one is taken, then the screen is redrawn.

mod app;
mod input;
mod render;
mod terminal;

pub use app::{App, Effect};

use crate::calculator::ClipboardError;
use anyhow::{Context, Result};
use crossterm::event::Event as TermEvent;
use std::io;
use terminal::TerminalGuard;
use tracing::{debug, info};

enum Event {
    Terminal(TermEvent),
    PasteResolved(Result<String, ClipboardError>),
    InputFailed(io::Error),
}

/// Run the calculator until the user quits.
pub fn run(app: App) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    let result = runtime.block_on(event_loop(app));
    // A clipboard read may still be blocked; don't wait for it.
    runtime.shutdown_background();
    result
}

fn spawn_input_thread(tx: flume::Sender<Event>) {
    std::thread::spawn(move || {
        loop {
            let event = match crossterm::event::read() {
                Ok(event) => Event::Terminal(event),
                Err(e) => {
                    let _ = tx.send(Event::InputFailed(e));
                    return;
                }
            };
            if tx.send(event).is_err() {
                return;
            }
        }
    });
}

async fn event_loop(mut app: App) -> Result<()> {
    let _guard = TerminalGuard::enter().context("Failed to set up terminal")?;
    let mut out = io::stdout();

    let (tx, rx) = flume::unbounded();
    spawn_input_thread(tx.clone());
    info!("calculator started");

    render::draw(&mut out, &app)?;

    while let Ok(event) = rx.recv_async().await {
        match event {
            Event::Terminal(TermEvent::Key(key)) => {
                let Some(shortcut) = input::shortcut_for(&key) else {
                    continue;
                };

                match app.handle_key(&shortcut) {
                    Effect::None => {}
                    Effect::Quit => break,
                    Effect::ReadClipboard => {
                        let clipboard = app.clipboard();
                        let tx = tx.clone();
                        tokio::task::spawn_blocking(move || {
                            let _ = tx.send(Event::PasteResolved(clipboard.read_text()));
                        });
                    }
                }
            }
            Event::Terminal(TermEvent::Paste(text)) => app.paste_text(&text),
            Event::Terminal(TermEvent::Resize(columns, rows)) => {
                debug!(columns, rows, "resized");
            }
            Event::Terminal(_) => continue,
            Event::PasteResolved(result) => app.on_paste_resolved(result),
            Event::InputFailed(e) => {
                app.finish();
                return Err(e).context("Failed to read terminal input");
            }
        }

        render::draw(&mut out, &app)?;
    }

    app.finish();
    info!("calculator stopped");
    Ok(())
}
