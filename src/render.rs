use tracing::debug;

use crate::config::RenderConfig;
use crate::grid::GridMatrix;
use crate::surface::Rect;
use crate::surface::Surface;

/// What a call to [`draw_grid`] ended up doing to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// The grid had the expected shape. `filled` squares were painted.
    Drawn { filled: usize },

    /// The grid did not have the expected shape, so the surface was left blank
    ShapeMismatch,
}

/// Paint `grid` onto `surface`.
///
/// The surface is always resized to the full canvas first, which clears it. Cells are only
/// painted when the grid has exactly the shape `config` expects; anything else (including an
/// empty grid) leaves the surface blank.
pub fn draw_grid<S>(surface: &mut S, grid: &GridMatrix, config: &RenderConfig) -> DrawOutcome
where
    S: Surface + ?Sized,
{
    let (width, height) = config.canvas_size();
    surface.resize(width, height);

    let Some((_, cols)) = config.expected_shape().filter(|&shape| grid.has_shape(shape)) else {
        debug!(
            rows = grid.row_count(),
            cols = grid.column_count(),
            size = config.cell_size(),
            "grid shape mismatch, nothing drawn"
        );
        return DrawOutcome::ShapeMismatch;
    };

    let filled = paint_cells(surface, grid, cols, config.cell_pixels());
    debug!(filled, "grid drawn");

    DrawOutcome::Drawn { filled }
}

/// Fill a `side` by `side` square for every alive cell, reading at most `cols` cells per row.
/// Returns the number of squares filled.
pub(crate) fn paint_cells<S>(surface: &mut S, grid: &GridMatrix, cols: usize, side: u32) -> usize
where
    S: Surface + ?Sized,
{
    let mut filled = 0;

    for (x, y) in grid.alive_cells(cols) {
        let (x, y) = (x as u32 * side, y as u32 * side);
        surface.fill_rect(Rect::square(x, y, side));
        filled += 1;
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Recorder;

    #[test]
    fn all_dead_grid_draws_nothing() {
        let config = RenderConfig::new(1, 16).unwrap();
        let grid = GridMatrix::dead(64, 128);
        let mut surface = Recorder::new();

        let outcome = draw_grid(&mut surface, &grid, &config);

        assert_eq!(outcome, DrawOutcome::Drawn { filled: 0 });
        assert_eq!(surface.size(), (256, 128));
        assert!(surface.is_blank());
    }

    #[test]
    fn single_cell_at_size_two() {
        let config = RenderConfig::new(2, 16).unwrap();
        let mut grid = GridMatrix::dead(32, 64);
        grid.set(0, 0, true);
        let mut surface = Recorder::new();

        let outcome = draw_grid(&mut surface, &grid, &config);

        assert_eq!(outcome, DrawOutcome::Drawn { filled: 1 });
        assert_eq!(surface.rects(), &[Rect::square(0, 0, 4)]);
    }

    #[test]
    fn cells_land_at_scaled_positions() {
        let config = RenderConfig::new(4, 16).unwrap();
        let mut grid = GridMatrix::dead(16, 32);
        grid.set(3, 1, true);
        grid.set(31, 15, true);
        let mut surface = Recorder::new();

        draw_grid(&mut surface, &grid, &config);

        assert_eq!(
            surface.rects(),
            &[Rect::square(24, 8, 8), Rect::square(248, 120, 8)]
        );
    }

    #[test]
    fn empty_grid_is_a_mismatch() {
        let config = RenderConfig::default();
        let mut surface = Recorder::new();

        let outcome = draw_grid(&mut surface, &GridMatrix::empty(), &config);

        assert_eq!(outcome, DrawOutcome::ShapeMismatch);
        assert_eq!(surface.size(), (256, 128));
        assert!(surface.is_blank());
    }

    #[test]
    fn transposed_grid_is_a_mismatch() {
        let config = RenderConfig::default();
        let mut grid = GridMatrix::dead(128, 64);
        grid.set(0, 0, true);
        let mut surface = Recorder::new();

        assert_eq!(
            draw_grid(&mut surface, &grid, &config),
            DrawOutcome::ShapeMismatch
        );
        assert!(surface.is_blank());
    }

    #[test]
    fn mismatch_clears_previous_frame() {
        let config = RenderConfig::new(2, 16).unwrap();
        let mut grid = GridMatrix::dead(32, 64);
        grid.set(5, 5, true);
        let mut surface = Recorder::new();

        draw_grid(&mut surface, &grid, &config);
        assert!(!surface.is_blank());

        draw_grid(&mut surface, &GridMatrix::empty(), &config);
        assert!(surface.is_blank());
        assert_eq!(surface.resizes(), 2);
    }

    #[test]
    fn non_dividing_size_never_draws() {
        let config = RenderConfig::new(3, 16).unwrap();
        let mut grid = GridMatrix::dead(21, 42);
        grid.set(0, 0, true);
        let mut surface = Recorder::new();

        assert_eq!(
            draw_grid(&mut surface, &grid, &config),
            DrawOutcome::ShapeMismatch
        );
    }

    #[test]
    fn short_rows_after_the_first_are_tolerated() {
        let config = RenderConfig::new(32, 16).unwrap();
        let grid = GridMatrix::from(vec![vec![false, false, false, true], vec![true]]);
        let mut surface = Recorder::new();

        let outcome = draw_grid(&mut surface, &grid, &config);

        assert_eq!(outcome, DrawOutcome::Drawn { filled: 2 });
        assert_eq!(
            surface.rects(),
            &[Rect::square(192, 0, 64), Rect::square(0, 64, 64)]
        );
    }
}
