use std::{
    io::{self, Stdout},
    sync::Once,
};

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{debug, warn};

static RESTORE_ON_PANIC: Once = Once::new();

/// Alternate screen owned by an overlay session. Raw mode is undone when the
/// session ends, whether it returns normally or panics.
pub struct OverlayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl OverlayTerminal {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let terminal = execute!(io::stdout(), EnterAlternateScreen)
            .context("failed to enter alternate screen")
            .and_then(|()| {
                Terminal::new(CrosstermBackend::new(io::stdout()))
                    .context("failed to initialize terminal")
            });
        let terminal = match terminal {
            Ok(terminal) => terminal,
            Err(err) => {
                leave();
                return Err(err);
            }
        };
        RESTORE_ON_PANIC.call_once(|| {
            let previous = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                leave();
                previous(info);
            }));
        });
        debug!("overlay session took the terminal");
        Ok(Self { terminal })
    }

    pub fn render(&mut self, draw: impl FnOnce(&mut Frame<'_>)) -> Result<()> {
        self.terminal
            .draw(draw)
            .context("failed to draw overlay")?;
        Ok(())
    }

    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.terminal
            .resize(Rect::new(0, 0, width, height))
            .context("failed to resize terminal")
    }
}

impl Drop for OverlayTerminal {
    fn drop(&mut self) {
        if let Err(err) = self.terminal.show_cursor() {
            warn!(error = %err, "cursor could not be restored");
        }
        leave();
        debug!("overlay session released the terminal");
    }
}

fn leave() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}
