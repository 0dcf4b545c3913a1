// Library crate: the editor core, testable without a window.
// GUI-specific modules (app, ui, viewport panel and renderer) remain in the binary crate.

pub mod command;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod play;
pub mod state;
pub mod validation;

/// Viewport math shared with the binary: camera, drawables, picking, gizmo.
/// The panel and the painter-based renderer stay in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod drawable;
    pub mod gizmo;
    pub mod picking;
}
