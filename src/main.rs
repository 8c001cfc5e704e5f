//! apidash - terminal dashboard for a backend API
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - per-endpoint fetch state
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use apidash::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use apidash::messages::ui_events::key_to_ui_event;
use apidash::ui::{
    centered_rect, error_paragraph, format_payload, highlight_json, settle_footer, skeleton_lines,
    status_badge, status_color,
};
use apidash::{
    ApiClient, AppActor, AppState, Config, EndpointKey, FetchStatus, NetworkActor,
    NetworkCommand, NetworkResponse, RenderState, UiEvent,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Resolve configuration before touching the terminal so errors stay readable
    let config = Config::load().context("loading configuration")?;
    let base_url = config.base_url()?;
    tracing::info!(%base_url, "Starting {} v{}", APP_NAME, APP_VERSION);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(ApiClient::new(base_url.clone()), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(base_url), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.show_help) {
                    let quit = event == UiEvent::Quit;
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Cards
            Constraint::Length(4), // API information
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(f, state, main_chunks[0]);
    draw_cards(f, state, main_chunks[1]);
    draw_api_info(f, main_chunks[2]);
    draw_status_bar(f, state, main_chunks[3]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let refreshed = state
        .last_refresh
        .map(|t| format!("  refreshed {}", t.with_timezone(&chrono::Local).format("%H:%M:%S")))
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(state.base_url.clone(), Style::default().fg(Color::Cyan)),
        Span::styled(refreshed, Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", APP_NAME))
        .title_style(Style::default().bold())
        .title_bottom(Line::from(" r: Refresh All Data ").right_aligned());

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_cards(f: &mut Frame, state: &RenderState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut cells = Vec::with_capacity(EndpointKey::ALL.len());
    for row in rows.iter() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        cells.extend(cols.iter().copied());
    }

    for (key, cell) in EndpointKey::ALL.into_iter().zip(cells) {
        draw_card(f, state, key, cell);
    }
}

fn draw_card(f: &mut Frame, state: &RenderState, key: EndpointKey, area: Rect) {
    let record = state.dashboard.record(key);
    let status = record.status();
    let is_selected = state.selected == key;

    let border_style = if is_selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(status_color(&status))
    };

    let title = Line::from(vec![
        Span::raw(format!(" {} ", key.icon())),
        Span::styled(format!("{} ", key.title()), Style::default().bold()),
        status_badge(&status),
        Span::raw(" "),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
        .title_bottom(Line::from(settle_footer(record)).right_aligned());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let description = Paragraph::new(format!("API endpoint: {}{}", state.base_url, key.path()))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(description, chunks[0]);

    let body_area = chunks[1];
    match status {
        FetchStatus::Loading => {
            f.render_widget(Paragraph::new(skeleton_lines(body_area.width)), body_area);
        }
        FetchStatus::Failed(message) => {
            f.render_widget(error_paragraph(message), body_area);
        }
        FetchStatus::Success(payload) => {
            let lines = highlight_json(&format_payload(payload));
            let body = Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((state.scroll_for(key), 0));
            f.render_widget(body, body_area);
        }
    }
}

fn draw_api_info(f: &mut Frame, area: Rect) {
    let items: Vec<Line> = EndpointKey::ALL
        .iter()
        .map(|key| {
            Line::from(vec![
                Span::styled(" GET ", Style::default().fg(Color::Green).bold()),
                Span::raw(format!("{:<8}", key.path())),
                Span::styled(format!(" → {}()", key.operation()), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let block = |title: &'static str| Block::default().borders(Borders::TOP).title(title);
    f.render_widget(
        Paragraph::new(items[..2].to_vec()).block(block(" API Information ")),
        halves[0],
    );
    f.render_widget(Paragraph::new(items[2..].to_vec()).block(block("")), halves[1]);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let loading = state.dashboard.loading_count();
    let status = if loading > 0 {
        format!(" Loading {}/{}... | r:refresh | q:quit ", loading, EndpointKey::ALL.len())
    } else {
        String::from(" Tab:card | ↑/↓:scroll | f:refresh card | r:refresh all | ?:help | q:quit ")
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 50, area);

    let help_text = r#"
 API DASHBOARD - Keyboard Shortcuts

 CARDS
   Tab / → / l        Next card
   Shift+Tab / ← / h  Previous card
   ↑ / ↓ / k / j      Scroll selected card

 FETCHING
   r                  Refresh all endpoints
   f / Enter          Refresh selected card

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
