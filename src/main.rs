//! Nonspecial Snake entry point
//!
//! Owns the terminal and the outer session loop: start screen, play, pause,
//! game over, and back again. The simulation never restarts itself; every
//! new game is a fresh `GameState`.

use std::io::{self, Stdout, stdout};
use std::process::ExitCode;
use std::time::Duration;

use crossterm::event::{self, Event};

use nonspecial_snake::platform::{Command, FrameClock, InputQueue, TerminalGuard, map_key};
use nonspecial_snake::renderer::{
    TerminalRenderer, game_over_screen, pause_screen, settings_error_screen, start_screen,
};
use nonspecial_snake::sim::{GameOverReason, GameState, TickOutcome};
use nonspecial_snake::{GameConfig, Settings, SettingsError};

/// How a menu screen was left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Play,
    StartScreen,
    Quit,
}

/// How a played session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    GameOver { score: u64, reason: GameOverReason },
    StartScreen,
    Quit,
}

/// Game host holding the renderer and the current session's configuration
struct Game {
    config: GameConfig,
    renderer: TerminalRenderer<Stdout>,
}

impl Game {
    fn new() -> Self {
        let config = GameConfig::default();
        Self {
            config,
            renderer: TerminalRenderer::new(stdout(), config.grid),
        }
    }

    /// Outer session loop; settings are re-read before every session
    fn run(&mut self) -> io::Result<()> {
        let mut show_start = true;
        loop {
            match load_config() {
                Ok(config) => self.apply_config(config),
                Err(e) => {
                    if self.settings_error_menu(&e)? == MenuChoice::Quit {
                        return Ok(());
                    }
                    show_start = true;
                    continue;
                }
            }

            if show_start && self.start_menu()? == MenuChoice::Quit {
                return Ok(());
            }

            match self.play_session()? {
                SessionEnd::Quit => return Ok(()),
                SessionEnd::StartScreen => show_start = true,
                SessionEnd::GameOver { score, reason } => {
                    match self.game_over_menu(score, reason)? {
                        MenuChoice::Play => show_start = false,
                        MenuChoice::StartScreen => show_start = true,
                        MenuChoice::Quit => return Ok(()),
                    }
                }
            }
        }
    }

    fn apply_config(&mut self, config: GameConfig) {
        log_config(&config);
        self.config = config;
        self.renderer.set_grid(config.grid);
    }

    /// Shown until the settings file validates or the player quits
    fn settings_error_menu(&mut self, error: &SettingsError) -> io::Result<MenuChoice> {
        self.renderer.draw_screen(&settings_error_screen(error))?;
        loop {
            match wait_for_command()? {
                Command::Confirm => return Ok(MenuChoice::Play),
                Command::Quit => return Ok(MenuChoice::Quit),
                _ => {}
            }
        }
    }

    fn start_menu(&mut self) -> io::Result<MenuChoice> {
        self.renderer.draw_screen(&start_screen(&self.config))?;
        loop {
            match wait_for_command()? {
                Command::Confirm => return Ok(MenuChoice::Play),
                Command::Quit => return Ok(MenuChoice::Quit),
                _ => {}
            }
        }
    }

    fn game_over_menu(&mut self, score: u64, reason: GameOverReason) -> io::Result<MenuChoice> {
        self.renderer.draw_screen(&game_over_screen(score, reason))?;
        loop {
            match wait_for_command()? {
                Command::Confirm => return Ok(MenuChoice::Play),
                Command::Back => return Ok(MenuChoice::StartScreen),
                Command::Quit => return Ok(MenuChoice::Quit),
                _ => {}
            }
        }
    }

    /// Pause overlay; ticks are not invoked until it returns
    fn pause_menu(&mut self) -> io::Result<MenuChoice> {
        self.renderer.draw_overlay(&pause_screen())?;
        loop {
            match wait_for_command()? {
                Command::Pause => return Ok(MenuChoice::Play),
                Command::Back => return Ok(MenuChoice::StartScreen),
                Command::Quit => return Ok(MenuChoice::Quit),
                _ => {}
            }
        }
    }

    /// Play one session until it ends or the player leaves
    fn play_session(&mut self) -> io::Result<SessionEnd> {
        let seed = rand::random::<u64>();
        let mut state = GameState::new(self.config, seed);
        let mut input = InputQueue::new();
        let mut clock = FrameClock::new();

        self.renderer.draw_screen(&[])?;
        self.renderer.draw_snapshot(&state.snapshot())?;

        loop {
            // Collect input until the next tick is due
            while !clock.is_due(state.speed) {
                let timeout = clock.time_until_tick(state.speed);
                if !event::poll(timeout)? {
                    break;
                }
                let Event::Key(key) = event::read()? else {
                    continue;
                };
                match map_key(&key) {
                    Some(Command::Steer(dir)) => input.push(dir),
                    Some(Command::Pause) => match self.pause_menu()? {
                        MenuChoice::Play => {
                            self.renderer.draw_snapshot(&state.snapshot())?;
                            clock.mark();
                        }
                        MenuChoice::StartScreen => return Ok(SessionEnd::StartScreen),
                        MenuChoice::Quit => return Ok(SessionEnd::Quit),
                    },
                    Some(Command::Back) => return Ok(SessionEnd::StartScreen),
                    Some(Command::Quit) => return Ok(SessionEnd::Quit),
                    Some(Command::Confirm) | None => {}
                }
            }

            clock.mark();
            let result = state.advance(input.next());

            for event in &result.events {
                log::debug!("tick {}: {:?}", state.time_ticks, event);
            }
            self.renderer.draw_snapshot(&result.snapshot)?;

            if let TickOutcome::GameOver(reason) = result.outcome {
                // Leave the final frame up briefly before the game over screen
                std::thread::sleep(Duration::from_millis(400));
                drain_events()?;
                return Ok(SessionEnd::GameOver {
                    score: result.snapshot.score,
                    reason,
                });
            }
        }
    }
}

fn load_config() -> Result<GameConfig, SettingsError> {
    Settings::load()
        .and_then(|settings| settings.to_config())
        .inspect_err(|e| log::error!("Invalid settings: {}", e))
}

fn log_config(config: &GameConfig) {
    log::info!(
        "Config: grid={}x{}, bombs={} ({}), golden apples={}",
        config.grid.width,
        config.grid.height,
        config.bombs_enabled,
        config.bomb_behavior.as_str(),
        config.golden_apple_enabled
    );
}

/// Block until a mapped key is pressed
fn wait_for_command() -> io::Result<Command> {
    loop {
        if let Event::Key(key) = event::read()? {
            if let Some(command) = map_key(&key) {
                return Ok(command);
            }
        }
    }
}

/// Discard keys pressed while the final frame was shown
fn drain_events() -> io::Result<()> {
    while event::poll(Duration::ZERO)? {
        event::read()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Nonspecial Snake starting...");

    let result = TerminalGuard::enter().and_then(|_guard| Game::new().run());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
