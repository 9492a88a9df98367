//! Toroidal grid geometry and free-cell placement
//!
//! Every entity lives on an integer cell. Movement off one edge re-enters on the
//! opposite edge, so there are no walls to collide with.

use glam::IVec2;
use rand::Rng;

use crate::consts::MAX_SPAWN_ATTEMPTS;

/// Grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "grid must have at least one cell");
        Self { width, height }
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Center cell, where a new snake starts
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.width / 2, self.height / 2)
    }

    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Wrap any coordinate back onto the grid
    #[inline]
    pub fn wrap(&self, cell: IVec2) -> IVec2 {
        IVec2::new(cell.x.rem_euclid(self.width), cell.y.rem_euclid(self.height))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| IVec2::new(x, y)))
    }

    /// Uniformly random cell (may be occupied)
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> IVec2 {
        IVec2::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }

    /// Find a random cell for which `occupied` is false.
    ///
    /// Tries rejection sampling first. If every attempt lands on an occupied
    /// cell, scans the grid for free cells and picks one of them uniformly.
    /// Returns `None` only when the grid has no free cell at all.
    pub fn find_free_cell<R, F>(&self, rng: &mut R, occupied: F) -> Option<IVec2>
    where
        R: Rng,
        F: Fn(IVec2) -> bool,
    {
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let cell = self.random_cell(rng);
            if !occupied(cell) {
                return Some(cell);
            }
        }

        let free: Vec<IVec2> = self.cells().filter(|&c| !occupied(c)).collect();
        log::debug!(
            "Rejection sampling failed, scanned {} free cells out of {}",
            free.len(),
            self.area()
        );
        if free.is_empty() {
            return None;
        }
        Some(free[rng.random_range(0..free.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_wrap_all_edges() {
        let grid = Grid::new(64, 36);
        assert_eq!(grid.wrap(IVec2::new(64, 10)), IVec2::new(0, 10));
        assert_eq!(grid.wrap(IVec2::new(-1, 10)), IVec2::new(63, 10));
        assert_eq!(grid.wrap(IVec2::new(5, 36)), IVec2::new(5, 0));
        assert_eq!(grid.wrap(IVec2::new(5, -1)), IVec2::new(5, 35));
        assert_eq!(grid.wrap(IVec2::new(12, 7)), IVec2::new(12, 7));
    }

    #[test]
    fn test_cells_cover_grid() {
        let grid = Grid::new(4, 3);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), grid.area());
        assert!(cells.iter().all(|&c| grid.contains(c)));
        assert_eq!(cells[0], IVec2::new(0, 0));
        assert_eq!(cells[11], IVec2::new(3, 2));
    }

    #[test]
    fn test_free_cell_avoids_occupied() {
        let grid = Grid::new(8, 8);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let cell = grid.find_free_cell(&mut rng, |c| c.x < 7).unwrap();
            assert_eq!(cell.x, 7);
        }
    }

    #[test]
    fn test_free_cell_falls_back_to_scan() {
        // Only one free cell out of 10_000: sampling almost surely misses it
        let grid = Grid::new(100, 100);
        let target = IVec2::new(42, 17);
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(grid.find_free_cell(&mut rng, |c| c != target), Some(target));
    }

    #[test]
    fn test_free_cell_full_grid() {
        let grid = Grid::new(3, 3);
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(grid.find_free_cell(&mut rng, |_| true), None);
    }
}
