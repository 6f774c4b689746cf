use anyhow::{Context, Result};
use inline_editor::app::default_user_dir;
use inline_editor::config::ConfigManager;
use inline_editor::logging::init_logging;
use inline_editor::App;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{
            DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
            EnableFocusChange, EnableMouseCapture, KeyboardEnhancementFlags,
            PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
        },
        execute,
        terminal::{
            EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
            supports_keyboard_enhancement,
        },
    },
};
use std::io::stdout;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Optional initial value as the first argument
    let initial_value = std::env::args().nth(1).unwrap_or_default();

    let user_dir = default_user_dir();
    std::fs::create_dir_all(&user_dir)
        .with_context(|| format!("Failed to create {}", user_dir.display()))?;

    let mut config_manager = ConfigManager::new(&user_dir);
    let config_error = config_manager.load().err();
    let mut config = config_manager.into_config();

    let log_path = init_logging(&config.logging, &user_dir)?;
    if let Some(e) = config_error {
        warn!(error = %e, "config could not be loaded, using defaults");
    }
    info!(log = %log_path.display(), value = %initial_value, "starting inline-edit");

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        EnableBracketedPaste
    )?;

    // Real key releases need the kitty keyboard protocol
    let mut pushed_flags = false;
    if !config.editor.synthesize_key_up {
        if supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            pushed_flags = true;
        } else {
            warn!("terminal cannot report key releases, synthesizing key-up events");
            config.editor.synthesize_key_up = true;
        }
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_config(initial_value, config, user_dir);
    let result = app.run(&mut terminal).await;

    if pushed_flags {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange,
        DisableBracketedPaste,
        ratatui::crossterm::cursor::Show
    )?;

    match result {
        Ok(()) => {
            // The final value goes to stdout so the tool composes in scripts
            println!("{}", app.value);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(e)
        }
    }
}
