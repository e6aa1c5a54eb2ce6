//! Press-once latch

/// Fires once per discrete press.
///
/// Holding the key keeps it quiet; it re-arms only after a frame in which
/// the key is observed released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTrigger {
    was_pressed: bool,
}

impl EdgeTrigger {
    pub const fn new() -> Self {
        Self { was_pressed: false }
    }

    /// Feed this frame's key state; returns `true` on the press edge only.
    pub fn fire(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        fired
    }
}
