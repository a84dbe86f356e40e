//! Rendering module
//!
//! The simulation never draws. Each frame a [`FrameView`] snapshot is taken
//! from the session and handed to a [`Renderer`]; in the browser that is the
//! Canvas2D renderer, which draws images from a load-once [`AssetCache`].

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod view;

pub use assets::AssetCache;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use view::{BACKGROUND_ASSET, DEAD_MAMMOTH_ASSET, FrameView, MAMMOTH_ASSET, Sprite};

/// Draws one frame. Stateless from the simulation's point of view.
pub trait Renderer {
    fn draw(&mut self, frame: &FrameView<'_>);
}
