use rand::Rng;

use crate::grid::GridMatrix;
use crate::render;
use crate::surface::Surface;

/// Side length of an icon, in pixels
pub const ICON_SIZE: u32 = 64;

/// Side length of one icon cell, in pixels
pub const ICON_CELL_SIZE: u32 = 16;

/// Icon cells along each side
const ICON_CELLS: usize = (ICON_SIZE / ICON_CELL_SIZE) as usize;

/// `.#..`
/// `..#.`
/// `###.`
/// `....`
const GLIDER: [(usize, usize); 5] = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

/// The four control buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Clear,
    Randomize,
    Glider,
    Refresh,
}

impl Icon {
    pub const ALL: [Icon; 4] = [Icon::Clear, Icon::Randomize, Icon::Glider, Icon::Refresh];

    /// The control endpoint this button hits before refreshing. `Refresh` only refreshes.
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            Icon::Clear => Some("/clear"),
            Icon::Randomize => Some("/randomize"),
            Icon::Glider => Some("/glider"),
            Icon::Refresh => None,
        }
    }

    /// The icon as a 4x4 grid of cells. Only `Randomize` uses `rng`.
    pub fn pattern<R: Rng + ?Sized>(&self, rng: &mut R) -> GridMatrix {
        let mut grid = GridMatrix::dead(ICON_CELLS, ICON_CELLS);

        match self {
            Icon::Clear => {}
            Icon::Randomize => {
                for y in 0..ICON_CELLS {
                    for x in 0..ICON_CELLS {
                        grid.set(x, y, rng.gen_bool(0.5));
                    }
                }
            }
            Icon::Glider => {
                for (x, y) in GLIDER {
                    grid.set(x, y, true);
                }
            }
            Icon::Refresh => {
                let last = ICON_CELLS - 1;

                for i in 0..ICON_CELLS {
                    grid.set(i, 0, true);
                    grid.set(i, last, true);
                    grid.set(0, i, true);
                    grid.set(last, i, true);
                }
            }
        }

        grid
    }

    /// Clear `surface` to a single icon and draw this icon on it
    pub fn draw<S, R>(&self, surface: &mut S, rng: &mut R) -> usize
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        surface.resize(ICON_SIZE, ICON_SIZE);

        let pattern = self.pattern(rng);
        render::paint_cells(surface, &pattern, ICON_CELLS, ICON_CELL_SIZE)
    }
}

/// Draw the clear, randomize, glider and refresh icons, in that order, onto `surfaces`
pub fn draw_buttons<S, R>(surfaces: &mut [S; 4], rng: &mut R)
where
    S: Surface,
    R: Rng + ?Sized,
{
    for (icon, surface) in Icon::ALL.iter().zip(surfaces.iter_mut()) {
        icon.draw(surface, rng);
    }
}
