//! Pointer input decoupled from DOM events. A click maps to the primary
//! action, a context-menu press to the secondary one.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub trait PointerActions {
    type Command;

    fn on_primary_action(&mut self, point: Point) -> Option<Self::Command>;

    fn on_secondary_action(&mut self, point: Point) -> Option<Self::Command>;
}
