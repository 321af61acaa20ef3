use std::{fs::File, io, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tuichords::app::App;
use tuichords::config::{Cli, Settings};
use tuichords::report::Report;
use tuichords::{ui, ChordView, Dictionary};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    let settings = cli.settings()?;
    info!(root = %settings.root, chord_type = %settings.chord_type, inversion = settings.inversion, "starting");

    if let Some(format) = cli.print {
        let view = ChordView::new(&Dictionary, &settings.root, &settings.chord_type, settings.inversion);
        let out = Report::new(&view, &settings.keyboard).render(format)?;
        print!("{out}");
        if !out.ends_with('\n') { println!(); }
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let result = run(&mut terminal, settings);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    if let Err(e) = result { eprintln!("Error: {:?}", e); }
    Ok(())
}

/// Logs go to `--log-file` if given, to stderr in print mode, and nowhere
/// while the interactive view owns the terminal.
fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if cli.print.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, settings: Settings) -> Result<()> {
    let mut app = App::new(Box::new(Dictionary), settings);

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    // Global quit
                    KeyCode::Esc | KeyCode::Char('q') => app.quit(),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

                    // Focus
                    KeyCode::Tab  | KeyCode::Down => app.focus_next(),
                    KeyCode::BackTab | KeyCode::Up => app.focus_prev(),

                    // Selection within the focused row
                    KeyCode::Left  => app.select_left(),
                    KeyCode::Right => app.select_right(),

                    KeyCode::Char('s') => app.toggle_spelling(),
                    KeyCode::Char(c) if c.is_ascii_digit() => app.select_inversion_digit(c),

                    _ => {}
                },
                _ => {}
            }
        }
        if app.should_quit { break; }
    }

    info!("quit");
    Ok(())
}
