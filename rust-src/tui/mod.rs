//! Terminal UI for the interactive timer.

mod app;
mod input;
mod render;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub use app::App;


/// Upper bound on how long the loop waits for input between redraws.
const FRAME_RATE: Duration = Duration::from_millis(100);


/// Take over the terminal and run `app` until the user quits.
pub fn run(mut app: App) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}


fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| render::render_ui(f, app))?;

        let now = Instant::now();
        let timeout = app
            .timer
            .scheduler()
            .time_until_next(now)
            .map_or(FRAME_RATE, |until_tick| until_tick.min(FRAME_RATE));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key, Instant::now());
            }
        }

        app.update(Instant::now());

        let cues = app.take_cues();
        if cues > 0 {
            let backend = terminal.backend_mut();
            for _ in 0..cues {
                backend.write_all(b"\x07")?;
            }
            backend.flush()?;
        }

        if app.should_quit {
            tracing::info!("Timer closed");
            return Ok(());
        }
    }
}
