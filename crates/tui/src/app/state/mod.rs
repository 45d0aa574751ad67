pub(crate) mod input;
pub(crate) mod panel;
pub(crate) mod render;
pub(crate) mod windows;

pub(crate) use input::InputState;
pub(crate) use panel::{
    grid_cell, Activation, CategoryEntry, CategoryPanel, MoveDirection, PanelFocus, GRID_COLUMNS,
};
pub(crate) use render::{HitMap, HitTarget, StatusKind, StatusMessage};
pub(crate) use windows::{WindowId, WindowManager};
#[cfg(test)]
pub(crate) use windows::ROOT_WINDOW;
