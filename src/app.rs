//! Application orchestration for the palette explorer.
//!
//! Wires the event loop, palette state, persistence, and rendering together.
//! Key bindings mutate the atomic state or the injected store; every frame is
//! drawn from a snapshot, so the render path stays pure.

use std::{
    future::Future,
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use smol::{future::FutureExt, Task};

use crate::{
    colors::{contrast_color, theme, Rgb},
    error::HuechordResult,
    event::{Event, EventHandler},
    harmony::generate_palette_id,
    palette::{Palette, Swatch},
    state::{AtomicState, PaletteSnapshot, PaletteState},
    store::PaletteStore,
    tui::Tui,
};

/// The palette explorer application
pub struct App {
    /// Terminal interface manager
    tui: Tui<PaletteState>,
    /// Event handling system
    events: Arc<EventHandler>,
    /// Saved-palette repository
    store: Box<dyn PaletteStore>,
    /// Event polling rate
    tick_rate: Duration,
    /// Background task handles
    tasks: Vec<Task<HuechordResult<()>>>,
}

impl App {
    /// Creates a new application instance.
    ///
    /// The saved-palette history is loaded from the store up front so the
    /// first frame already shows it.
    pub fn new(
        state: PaletteState,
        store: Box<dyn PaletteStore>,
        tick_rate: Duration,
    ) -> HuechordResult<Self> {
        state.set_saved(store.load_all()?);
        let tui = Tui::new(state)?;

        Ok(Self {
            tui,
            events: Arc::new(EventHandler::new()),
            store,
            tick_rate,
            tasks: Vec::new(),
        })
    }

    /// Spawns a background task
    pub fn spawn<F>(&mut self, future: F) -> HuechordResult<()>
    where
        F: Future<Output = HuechordResult<()>> + Send + 'static,
    {
        let task = smol::spawn(future);
        self.tasks.push(task);
        Ok(())
    }

    /// Runs the application event loop
    pub async fn run(&mut self) -> HuechordResult<()> {
        let events = self.events.clone();
        let tick_rate = self.tick_rate;
        self.spawn(async move { events.run(tick_rate).await })?;

        while self.tui.state().is_running() {
            // Non-blocking event check
            if let Some(event) = self.events.try_recv()? {
                match event {
                    Event::Quit => {
                        self.tui.state().quit();
                        break;
                    }
                    Event::Key(key) => {
                        if self.handle_key(key.code)? {
                            break;
                        }
                    }
                    Event::Resize(..) => {}
                }
            }

            self.tui.render(render)?;

            // Yield to other tasks
            smol::future::yield_now().await;
        }

        self.events.stop();
        self.cleanup_tasks().await;

        Ok(())
    }

    /// Apply a key binding; returns true when the app should exit
    fn handle_key(&self, code: KeyCode) -> HuechordResult<bool> {
        let state = self.tui.state();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                state.quit();
                return Ok(true);
            }
            KeyCode::Char(' ') | KeyCode::Tab => state.cycle_harmony(),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => state.increase_count(),
            KeyCode::Char('-') | KeyCode::Down => state.decrease_count(),
            KeyCode::Char('r') => state.randomize_seed(),
            KeyCode::Char('s') => self.save_current()?,
            KeyCode::Char('d') => self.delete_last_saved()?,
            _ => {}
        }
        Ok(false)
    }

    /// Persist the currently displayed palette and record it in the history
    fn save_current(&self) -> HuechordResult<()> {
        let state = self.tui.state();
        let snapshot = state.snapshot();
        if snapshot.generated.is_empty() {
            // Nothing to save: the seed failed to parse or count is zero
            return Ok(());
        }

        let palette = Palette {
            id: generate_palette_id(),
            name: None,
            harmony: snapshot.harmony,
            base_colors: snapshot.base_colors,
            generated_colors: snapshot.generated,
            timestamp_ms: unix_millis(),
        };

        self.store.upsert(&palette)?;
        state.record_saved(palette);
        Ok(())
    }

    /// Remove the most recently saved palette from history and store
    fn delete_last_saved(&self) -> HuechordResult<()> {
        if let Some(id) = self.tui.state().pop_saved() {
            self.store.delete(&id)?;
        }
        Ok(())
    }

    /// Cleanup background tasks
    async fn cleanup_tasks(&mut self) {
        let tasks = std::mem::take(&mut self.tasks);
        for task in tasks {
            match task
                .or(async {
                    smol::Timer::after(Duration::from_secs(1)).await;
                    Ok(())
                })
                .await
            {
                Ok(_) => {}
                Err(e) => eprintln!("Task cleanup error: {}", e),
            }
        }
    }

    /// Returns a reference to the TUI
    pub fn tui(&self) -> &Tui<PaletteState> {
        &self.tui
    }

    /// Returns a reference to the event handler
    pub fn events(&self) -> &EventHandler {
        &self.events
    }

    /// Returns the current tick rate
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// Draw one frame of the explorer from a state snapshot
pub fn render(snapshot: &PaletteSnapshot, area: Rect, frame: &mut Frame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(snapshot, chunks[0], frame);
    render_swatches(&snapshot.generated, chunks[1], frame);
    render_saved(&snapshot.saved, chunks[2], frame);
    render_help(chunks[3], frame);
}

fn render_header(snapshot: &PaletteSnapshot, area: Rect, frame: &mut Frame<'_>) {
    let seed = snapshot
        .base_colors
        .first()
        .map_or_else(|| "none".to_string(), |s| s.hex.clone());
    let seed_color = Rgb::from_hex(&seed).unwrap_or(theme::TEXT_PRIMARY);

    let line = Line::from(vec![
        Span::styled("seed ", Style::default().fg(theme::TEXT_SECONDARY.to_ratatui())),
        Span::styled(seed, Style::default().fg(seed_color.to_ratatui())),
        Span::styled("  rule ", Style::default().fg(theme::TEXT_SECONDARY.to_ratatui())),
        Span::styled(
            snapshot.harmony.label(),
            Style::default().fg(theme::ACCENT.to_ratatui()),
        ),
        Span::styled("  count ", Style::default().fg(theme::TEXT_SECONDARY.to_ratatui())),
        Span::styled(
            snapshot.count.to_string(),
            Style::default().fg(theme::TEXT_PRIMARY.to_ratatui()),
        ),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("huechord")
            .style(
                Style::default()
                    .fg(theme::BORDER.to_ratatui())
                    .bg(theme::BASE.to_ratatui()),
            ),
    );
    frame.render_widget(header, area);
}

fn render_swatches(generated: &[Swatch], area: Rect, frame: &mut Frame<'_>) {
    if generated.is_empty() {
        let empty = Paragraph::new("no palette: seed color did not parse")
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme::WARNING.to_ratatui())
                    .bg(theme::BASE.to_ratatui()),
            );
        frame.render_widget(empty, area);
        return;
    }

    let constraints: Vec<Constraint> = generated
        .iter()
        .map(|_| Constraint::Ratio(1, generated.len() as u32))
        .collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (swatch, cell) in generated.iter().zip(cells.iter()) {
        let bg = Rgb::from_hex(&swatch.hex).unwrap_or(theme::BASE);
        let fg = Rgb::from_hex(contrast_color(&swatch.hex)).unwrap_or(Rgb::new(0, 0, 0));

        let mut lines = vec![Line::default(), Line::from(swatch.hex.clone())];
        if let Some(name) = &swatch.name {
            lines.push(Line::from(name.clone()));
        }

        let cell_widget = Paragraph::new(lines).alignment(Alignment::Center).style(
            Style::default()
                .fg(fg.to_ratatui())
                .bg(bg.to_ratatui()),
        );
        frame.render_widget(cell_widget, *cell);
    }
}

fn render_saved(saved: &[Palette], area: Rect, frame: &mut Frame<'_>) {
    let visible = usize::from(area.height.saturating_sub(2));

    let lines: Vec<Line> = saved
        .iter()
        .take(visible)
        .map(|palette| {
            let mut spans = vec![Span::styled(
                format!("{:<14} {:<14}", short_id(&palette.id), palette.harmony.label()),
                Style::default().fg(theme::TEXT_SECONDARY.to_ratatui()),
            )];
            for swatch in &palette.generated_colors {
                let color = Rgb::from_hex(&swatch.hex).unwrap_or(theme::TEXT_PRIMARY);
                spans.push(Span::styled(
                    "\u{2588}\u{2588}",
                    Style::default().fg(color.to_ratatui()),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("saved")
            .style(
                Style::default()
                    .fg(theme::BORDER.to_ratatui())
                    .bg(theme::BASE.to_ratatui()),
            ),
    );
    frame.render_widget(list, area);
}

fn render_help(area: Rect, frame: &mut Frame<'_>) {
    let help = Paragraph::new("space: rule  +/-: count  r: random seed  s: save  d: delete  q: quit")
        .style(Style::default().fg(theme::TEXT_SECONDARY.to_ratatui()));
    frame.render_widget(help, area);
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(12)]
}
