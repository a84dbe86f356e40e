//! Read-only frame snapshot handed to renderers

use glam::Vec2;

use crate::sim::GameSession;

pub const MAMMOTH_ASSET: &str = "mammoth.png";
pub const DEAD_MAMMOTH_ASSET: &str = "dead.png";
pub const BACKGROUND_ASSET: &str = "background.png";

/// One image placed on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite<'a> {
    pub asset: &'a str,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Everything needed to draw one frame, back to front
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView<'a> {
    /// Fills the viewport
    pub background: Sprite<'a>,
    /// Buildings in spawn order
    pub obstacles: Vec<Sprite<'a>>,
    pub mammoth: Sprite<'a>,
    pub alive: bool,
}

impl<'a> FrameView<'a> {
    pub fn capture(session: &'a GameSession) -> Self {
        let viewport = session.viewport();
        let catalog = session.catalog();

        let obstacles = session
            .obstacles()
            .iter()
            .filter_map(|o| {
                catalog.get(o.variant).map(|v| Sprite {
                    asset: v.asset.as_str(),
                    pos: o.pos,
                    size: o.size,
                })
            })
            .collect();

        let mammoth = session.mammoth();
        let asset = if mammoth.alive {
            MAMMOTH_ASSET
        } else {
            DEAD_MAMMOTH_ASSET
        };

        Self {
            background: Sprite {
                asset: BACKGROUND_ASSET,
                pos: Vec2::ZERO,
                size: Vec2::new(viewport.width, viewport.height),
            },
            obstacles,
            mammoth: Sprite {
                asset,
                pos: mammoth.pos,
                size: mammoth.size,
            },
            alive: mammoth.alive,
        }
    }
}
