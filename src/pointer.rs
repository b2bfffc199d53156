//! Pointer tracking for the mosaic button.
//!
//! Two slots are kept apart on purpose: [`PointerCell`] is read by the
//! animation loop every frame and never causes a re-render, while
//! [`GlowState`] is render state that positions the glow and mask layers.

/// Off-surface position used whenever the pointer is not over the button.
pub const POINTER_SENTINEL: (f64, f64) = (-1000.0, -1000.0);

/// Pointer data consulted by the simulation on each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerCell {
    pub x: f64,
    pub y: f64,
    pub hovering: bool,
}

impl Default for PointerCell {
    fn default() -> Self {
        Self {
            x: POINTER_SENTINEL.0,
            y: POINTER_SENTINEL.1,
            hovering: false,
        }
    }
}

impl PointerCell {
    pub fn enter(&mut self) {
        self.hovering = true;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn leave(&mut self) {
        self.hovering = false;
        self.x = POINTER_SENTINEL.0;
        self.y = POINTER_SENTINEL.1;
    }
}

/// Render-side pointer data for the declarative overlays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowState {
    pub x: f64,
    pub y: f64,
    pub visible: bool,
}

impl Default for GlowState {
    fn default() -> Self {
        Self {
            x: POINTER_SENTINEL.0,
            y: POINTER_SENTINEL.1,
            visible: false,
        }
    }
}

impl GlowState {
    pub fn opacity(&self) -> f64 {
        if self.visible {
            1.0
        } else {
            0.0
        }
    }

    pub fn moved(self, x: f64, y: f64) -> Self {
        Self { x, y, visible: true }
    }

    pub fn shown(self) -> Self {
        Self { visible: true, ..self }
    }

    pub fn hidden(self) -> Self {
        Self { visible: false, ..self }
    }
}

/// Bounding box origin of the interactive container in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
}

pub fn relative_position(bounds: Bounds, client_x: f64, client_y: f64) -> (f64, f64) {
    (client_x - bounds.left, client_y - bounds.top)
}

/// Applies a pointer-move to both slots. `bounds` is `None` when the
/// container is not mounted, in which case nothing changes.
pub fn on_pointer_move(
    bounds: Option<Bounds>,
    client_x: f64,
    client_y: f64,
    pointer: &mut PointerCell,
    glow: GlowState,
) -> Option<GlowState> {
    let (x, y) = relative_position(bounds?, client_x, client_y);
    pointer.move_to(x, y);
    Some(glow.moved(x, y))
}

pub fn on_pointer_enter(pointer: &mut PointerCell, glow: GlowState) -> GlowState {
    pointer.enter();
    glow.shown()
}

pub fn on_pointer_leave(pointer: &mut PointerCell, glow: GlowState) -> GlowState {
    pointer.leave();
    glow.hidden()
}
