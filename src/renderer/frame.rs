//! Snapshot to glyph grid

use crate::sim::{GameOverReason, GamePhase, Snapshot};

/// What occupies one grid cell on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    SnakeHead,
    SnakeBody,
    Food,
    GoldenApple,
    Bomb,
}

/// Rows of glyphs, `grid.height` rows of `grid.width` cells.
///
/// Items are drawn first and the snake on top; cells outside the grid are
/// ignored.
pub fn compose_frame(snapshot: &Snapshot) -> Vec<Vec<Glyph>> {
    let grid = snapshot.grid;
    let mut rows = vec![vec![Glyph::Empty; grid.width as usize]; grid.height as usize];

    let mut put = |cell: glam::IVec2, glyph: Glyph| {
        if grid.contains(cell) {
            rows[cell.y as usize][cell.x as usize] = glyph;
        }
    };

    for &bomb in &snapshot.bombs {
        put(bomb, Glyph::Bomb);
    }
    if let Some(golden) = snapshot.golden_apple {
        put(golden, Glyph::GoldenApple);
    }
    if let Some(food) = snapshot.food {
        put(food, Glyph::Food);
    }
    for (i, &segment) in snapshot.snake.iter().enumerate().rev() {
        put(
            segment,
            if i == 0 {
                Glyph::SnakeHead
            } else {
                Glyph::SnakeBody
            },
        );
    }

    rows
}

/// Status line drawn above the grid
pub fn hud_line(snapshot: &Snapshot) -> String {
    let status = match snapshot.phase {
        GamePhase::Idle => "  Press a direction to start",
        GamePhase::Running => "",
        GamePhase::GameOver => "  Game Over",
    };
    format!(
        "Score: {}  Length: {}  Speed: {:.1}{}",
        snapshot.score,
        snapshot.snake.len(),
        snapshot.speed,
        status
    )
}

/// Short human description of why a session ended
pub fn reason_text(reason: GameOverReason) -> &'static str {
    match reason {
        GameOverReason::SelfCollision => "You ran into yourself!",
        GameOverReason::Bomb => "You hit a bomb!",
        GameOverReason::BoardFull => "No room left on the board!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Grid;
    use glam::IVec2;

    fn snapshot() -> Snapshot {
        Snapshot {
            grid: Grid::new(4, 3),
            snake: vec![IVec2::new(1, 1), IVec2::new(0, 1)],
            food: Some(IVec2::new(3, 0)),
            golden_apple: Some(IVec2::new(2, 2)),
            bombs: vec![IVec2::new(0, 0)],
            score: 3,
            speed: 10.0,
            phase: GamePhase::Running,
        }
    }

    #[test]
    fn test_compose_places_everything() {
        let rows = compose_frame(&snapshot());
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 4));
        assert_eq!(rows[0][0], Glyph::Bomb);
        assert_eq!(rows[0][3], Glyph::Food);
        assert_eq!(rows[1][1], Glyph::SnakeHead);
        assert_eq!(rows[1][0], Glyph::SnakeBody);
        assert_eq!(rows[2][2], Glyph::GoldenApple);
        assert_eq!(rows[2][0], Glyph::Empty);
    }

    #[test]
    fn test_hud_line() {
        let line = hud_line(&snapshot());
        assert_eq!(line, "Score: 3  Length: 2  Speed: 10.0");

        let idle = Snapshot {
            phase: GamePhase::Idle,
            ..snapshot()
        };
        assert!(hud_line(&idle).ends_with("Press a direction to start"));
    }
}
