//! Static screens: start, pause and game over

use super::frame::reason_text;
use crate::sim::GameOverReason;
use crate::{GameConfig, SettingsError};

/// Emphasis of a screen line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Title,
    Body,
    Prompt,
}

/// One centered line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub tone: Tone,
}

impl Line {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    fn body(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Body)
    }
}

pub const GAME_TITLE: &str = "very non-special snake game!!!1!";
pub const DEVELOPER: &str = "Itamar Itzhaki";
pub const REPOSITORY: &str = "https://github.com/CMOSfail/nonspecial-snake";

pub fn start_screen(config: &GameConfig) -> Vec<Line> {
    let mut lines = vec![
        Line::new(GAME_TITLE, Tone::Title),
        Line::body(format!("Developer: {}", DEVELOPER)),
        Line::body(format!("Git Repo: {}", REPOSITORY)),
        Line::body(""),
        Line::body("Instructions:"),
        Line::body("Objective: Control the snake to eat apples and grow longer."),
        Line::body("Controls:"),
        Line::body("- Move Left: Arrow Left or 'A'"),
        Line::body("- Move Right: Arrow Right or 'D'"),
        Line::body("- Move Up: Arrow Up or 'W'"),
        Line::body("- Move Down: Arrow Down or 'S'"),
        Line::body("- Pause Game: Space Bar"),
        Line::body("- Exit to Start Screen: Esc Key"),
        Line::body("- Quit: Q"),
        Line::body(""),
        Line::body("Special Items:"),
    ];

    if config.golden_apple_enabled {
        lines.push(Line::body("- Golden Apples: Grant extra points and length."));
    }
    if config.bombs_enabled {
        lines.push(Line::body(format!(
            "- Bombs: Avoid them! They {}.",
            match config.bomb_behavior {
                crate::BombBehavior::EndGame => "end the game",
                crate::BombBehavior::HalveLength => "cut your length in half",
            }
        )));
    }

    lines.push(Line::body(""));
    lines.push(Line::new("Press ENTER to play!!!", Tone::Prompt));
    lines
}

pub fn pause_screen() -> Vec<Line> {
    vec![
        Line::new("Game Paused", Tone::Prompt),
        Line::body("Press Space to Resume or Esc to Exit"),
    ]
}

/// Shown instead of the start screen while `settings.json` is invalid
pub fn settings_error_screen(error: &SettingsError) -> Vec<Line> {
    vec![
        Line::new("Invalid settings", Tone::Title),
        Line::body(error.to_string()),
        Line::body(""),
        Line::new("Fix settings.json, then press Enter to retry or Q to quit", Tone::Prompt),
    ]
}

pub fn game_over_screen(score: u64, reason: GameOverReason) -> Vec<Line> {
    vec![
        Line::new("Game Over!", Tone::Prompt),
        Line::body(reason_text(reason)),
        Line::body(format!("Score: {}", score)),
        Line::body("Press Enter to Play Again or Esc to Exit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BombBehavior;

    #[test]
    fn test_start_screen_reflects_config() {
        let config = GameConfig {
            bomb_behavior: BombBehavior::EndGame,
            golden_apple_enabled: false,
            ..GameConfig::default()
        };
        let lines = start_screen(&config);
        assert_eq!(lines[0].tone, Tone::Title);
        assert_eq!(lines.last().map(|l| l.tone), Some(Tone::Prompt));
        assert!(lines.iter().any(|l| l.text.contains("end the game")));
        assert!(!lines.iter().any(|l| l.text.contains("Golden")));
        assert_eq!(lines[1].text, "Developer: Itamar Itzhaki");
        assert!(lines[2].text.ends_with(REPOSITORY));
        assert!(lines.iter().any(|l| l.text == "- Move Down: Arrow Down or 'S'"));
    }

    #[test]
    fn test_settings_error_names_problem() {
        let lines = settings_error_screen(&SettingsError::InvalidBombBehavior(7));
        assert_eq!(lines[0].text, "Invalid settings");
        assert!(lines[1].text.contains("got 7"));
        assert_eq!(lines.last().map(|l| l.tone), Some(Tone::Prompt));
    }

    #[test]
    fn test_game_over_shows_score() {
        let lines = game_over_screen(17, GameOverReason::Bomb);
        assert!(lines.iter().any(|l| l.text == "Score: 17"));
        assert!(lines.iter().any(|l| l.text == "You hit a bomb!"));
    }
}
