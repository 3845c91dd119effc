mod app;
mod catalog;
mod config;
mod event;
mod session;
mod ui;

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing_subscriber::EnvFilter;

use app::App;
use config::Config;
use event::{AppEvent, EventHandler};
use session::practice::Phase;
use ui::components::flashcard::FlashCard;
use ui::components::progress_bar::ProgressBar;
use ui::components::row_grid::RowGrid;
use ui::components::summary::SummaryPanel;
use ui::layout::{AppLayout, pack_hint_lines};

#[derive(Parser)]
#[command(name = "katadrill", version, about = "Terminal katakana flashcard trainer")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Rows to preselect, e.g. vowels,ka,sa"
    )]
    rows: Vec<String>,

    #[arg(short, long, help = "Preselect every character")]
    all: bool,

    #[arg(short, long, help = "Milliseconds to show feedback before advancing")]
    delay_ms: Option<u64>,

    #[arg(long, help = "Print the character rows and exit")]
    list_rows: bool,

    #[arg(long, help = "Write logs here instead of the cache directory")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_rows {
        print_rows();
        return Ok(());
    }

    init_logging(cli.log_file.clone());

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "config unreadable, using defaults");
        Config::default()
    });
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(delay) = cli.delay_ms {
        config.advance_delay_ms = delay;
    }
    for id in &cli.rows {
        let row = catalog::parse_row(id)?;
        config.default_rows.push(row.id.to_string());
    }
    config.normalize();

    let theme = ui::theme::Theme::load(&config.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.theme, "unknown theme, using default");
        ui::theme::Theme::default()
    });

    let mut app = App::new(config, theme);
    if cli.all {
        app.select_all();
    }
    if let Ok((width, _)) = crossterm::terminal::size() {
        app.set_viewport_width(width);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));

    tracing::info!("katadrill started");
    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(?err, "event loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Logs go to a file; stderr belongs to the alternate screen while the UI runs.
fn init_logging(path: Option<PathBuf>) {
    let path = path.unwrap_or_else(|| {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("katadrill")
            .join("katadrill.log")
    });
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("logging disabled: cannot open {}: {err}", path.display());
            return;
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn print_rows() {
    for row in catalog::rows() {
        let members: Vec<String> = row
            .members
            .iter()
            .map(|e| format!("{} {}", e.glyph, e.romaji))
            .collect();
        println!("{:<7} {:<16} {}", row.id, row.label, members.join("  "));
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick(_) => {}
            AppEvent::Resize => {
                if let Ok((width, _)) = crossterm::terminal::size() {
                    app.set_viewport_width(width);
                }
            }
        }
        // Steady typing can starve ticks, so the timer is checked after every event.
        app.on_tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.phase() {
        Phase::Selection => handle_selection_key(app, key),
        Phase::Practice => app.handle_answer_key(key, Instant::now()),
        Phase::Complete => handle_complete_key(app, key),
    }
}

fn handle_selection_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1, 0),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(0, -1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(0, 1),
        KeyCode::Char(' ') => app.toggle_focused_char(),
        KeyCode::Char('r') => app.toggle_focused_row(),
        KeyCode::Char('a') => app.select_all(),
        KeyCode::Char('c') => app.clear_all(),
        KeyCode::Enter => app.start_practice(),
        _ => {}
    }
}

fn handle_complete_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.practice_again(),
        KeyCode::Char('s') | KeyCode::Esc => app.choose_different_rows(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.phase() {
        Phase::Selection => render_selection(frame, app),
        Phase::Practice => render_practice(frame, app),
        Phase::Complete => render_complete(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " カタカナ katadrill ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info.to_string(),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .block(Block::default().style(Style::default().bg(colors.header_bg())));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, hints: &[&str]) {
    let colors = &app.theme.colors;
    let lines: Vec<Line> = pack_hint_lines(hints, area.width as usize)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.muted()))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_selection(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let selection = app.controller.selection();
    let layout = AppLayout::new(frame.area(), 2);

    let count = selection.len();
    let info = format!(
        " | Select rows to practice | {count} character{}",
        if count == 1 { "" } else { "s" }
    );
    render_header(frame, app, layout.header, &info);

    let columns = layout.tier.grid_columns();
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(1)])
        .split(layout.main);
    frame.render_widget(
        RowGrid::new(selection, app.cursor, columns, &app.theme),
        sections[0],
    );

    let status = match app.notice {
        Some(notice) => Span::styled(
            format!("  {notice}"),
            Style::default().fg(colors.warning()).add_modifier(Modifier::BOLD),
        ),
        None if app.controller.can_start() => Span::styled(
            format!("  [Enter] Start practice ({count})"),
            Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled(
            "  Select characters to start",
            Style::default().fg(colors.muted()),
        ),
    };
    frame.render_widget(Paragraph::new(Line::from(status)), sections[1]);

    render_footer(
        frame,
        app,
        layout.footer,
        &[
            "[arrows/hjkl] Move",
            "[Space] Toggle char",
            "[r] Toggle row",
            "[a] Select all",
            "[c] Clear",
            "[q] Quit",
        ],
    );
}

fn render_practice(frame: &mut ratatui::Frame, app: &App) {
    let Some(session) = app.controller.session() else {
        return;
    };
    let layout = AppLayout::new(frame.area(), 1);
    let score = session.score();

    let info = format!(
        " | {} / {} | Score {} / {}",
        session.position() + 1,
        session.len(),
        score.correct,
        score.total
    );
    render_header(frame, app, layout.header, &info);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1), Constraint::Min(8)])
        .split(layout.main);

    let progress = ProgressBar::new("Progress", session.progress_percent() / 100.0, &app.theme)
        .caption(format!("Score {} / {}", score.correct, score.total));
    frame.render_widget(progress, sections[0]);

    let card = FlashCard::new(session.current(), session.feedback(), &app.input, &app.theme)
        .hint(session.hint())
        .reveal_answer(app.config.reveal_answer_on_miss)
        .tall(layout.tier.tall_card(frame.area().height));
    frame.render_widget(card, sections[2]);

    render_footer(
        frame,
        app,
        layout.footer,
        &["[Enter] Submit", "[Tab] Hint", "[Esc] Back to selection"],
    );
}

fn render_complete(frame: &mut ratatui::Frame, app: &App) {
    let Some(summary) = app.controller.summary() else {
        return;
    };
    let layout = AppLayout::new(frame.area(), 1);
    let info = format!(" | {} characters practiced", summary.score.total);
    render_header(frame, app, layout.header, &info);

    let centered = ui::layout::centered_rect(50, 60, 40, 14, layout.main);
    frame.render_widget(SummaryPanel::new(&summary, &app.theme), centered);
}
