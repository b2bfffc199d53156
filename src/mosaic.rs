//! Fading-square mosaic drawn under the pointer.
//!
//! [`Mosaic::tick`] runs once per display frame. It clears the surface,
//! maybe spawns one square near the pointer, then ages every square and
//! paints the survivors.

use crate::config::MosaicConfig;
use crate::pointer::PointerCell;
use rand::Rng;

/// One transient mosaic square. `x`/`y` are the top-left corner on the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Square {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub life: f64,
    pub decay: f64,
}

impl Square {
    pub fn alpha(&self) -> f64 {
        self.opacity * self.life
    }

    /// Returns `false` once the square has run out of life.
    fn age(&mut self) -> bool {
        self.life -= self.decay;
        self.life > 0.0
    }
}

/// 2D drawing target sized to the button's layout box.
pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn resize(&mut self, width: u32, height: u32);
    fn clear(&mut self);
    fn fill_square(&mut self, x: f64, y: f64, side: f64, alpha: f64);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: bool,
    pub expired: usize,
    pub drawn: usize,
}

pub struct Mosaic<R> {
    config: MosaicConfig,
    squares: Vec<Square>,
    rng: R,
}

impl<R: Rng> Mosaic<R> {
    pub fn new(config: MosaicConfig, rng: R) -> Self {
        Self {
            config,
            squares: Vec::new(),
            rng,
        }
    }

    pub fn config(&self) -> &MosaicConfig {
        &self.config
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn insert(&mut self, square: Square) {
        self.squares.push(square);
    }

    pub fn clear(&mut self) {
        self.squares.clear();
    }

    /// Samples a candidate cell inside the `2R` square around the pointer and
    /// keeps it only when the cell centre falls inside the radius.
    pub fn spawn_attempt(&mut self, pointer_x: f64, pointer_y: f64) -> Option<Square> {
        let radius = self.config.spawn_radius;
        let cell = self.config.cell_size;

        let x = snap_to_grid(pointer_x + between(&mut self.rng, -radius, radius), cell);
        let y = snap_to_grid(pointer_y + between(&mut self.rng, -radius, radius), cell);

        let half = cell / 2.0;
        let distance = (x + half - pointer_x).hypot(y + half - pointer_y);
        if distance >= radius {
            return None;
        }

        let (opacity_min, opacity_max) = self.config.opacity_range;
        let (decay_min, decay_max) = self.config.decay_range;

        Some(Square {
            x,
            y,
            opacity: between(&mut self.rng, opacity_min, opacity_max),
            life: 1.0,
            decay: between(&mut self.rng, decay_min, decay_max),
        })
    }

    pub fn tick<S: Surface + ?Sized>(&mut self, pointer: &PointerCell, surface: &mut S) -> TickReport {
        surface.clear();

        let mut report = TickReport::default();

        if pointer.hovering && self.rng.gen::<f64>() < self.config.spawn_probability {
            if let Some(square) = self.spawn_attempt(pointer.x, pointer.y) {
                self.squares.push(square);
                report.spawned = true;
            }
        }

        let side = self.config.cell_size;
        let before = self.squares.len();
        self.squares.retain_mut(|square| {
            if !square.age() {
                return false;
            }
            surface.fill_square(square.x, square.y, side, square.alpha());
            true
        });

        report.drawn = self.squares.len();
        report.expired = before - report.drawn;
        report
    }
}

pub fn snap_to_grid(value: f64, cell: f64) -> f64 {
    (value / cell).floor() * cell
}

fn between<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + rng.gen::<f64>() * (max - min)
}

#[cfg(test)]
pub(crate) mod recording {
    use super::Surface;

    /// Surface that remembers what the last frame painted.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub width: u32,
        pub height: u32,
        pub clears: usize,
        pub fills: Vec<(f64, f64, f64, f64)>,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.width = width;
            self.height = height;
        }

        fn clear(&mut self) {
            self.clears += 1;
            self.fills.clear();
        }

        fn fill_square(&mut self, x: f64, y: f64, side: f64, alpha: f64) {
            self.fills.push((x, y, side, alpha));
        }
    }
}
