//! Canvas2D renderer (browser only)

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::assets::AssetCache;
use super::view::{BACKGROUND_ASSET, DEAD_MAMMOTH_ASSET, FrameView, MAMMOTH_ASSET, Sprite};
use super::Renderer;
use crate::sim::Catalog;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    images: AssetCache<HtmlImageElement>,
    /// Prefix prepended to asset names when building image URLs
    base_url: String,
    size: (f64, f64),
}

impl CanvasRenderer {
    /// Grab the 2D context and start loading every image the game can show
    pub fn new(canvas: &HtmlCanvasElement, catalog: &Catalog, base_url: &str) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let mut renderer = Self {
            ctx,
            images: AssetCache::new(),
            base_url: base_url.to_string(),
            size: (canvas.width() as f64, canvas.height() as f64),
        };

        let names = [MAMMOTH_ASSET, DEAD_MAMMOTH_ASSET, BACKGROUND_ASSET]
            .into_iter()
            .chain(catalog.iter().map(|(_, v)| v.asset.as_str()));
        let base = renderer.base_url.clone();
        renderer.images.preload(names, |name| load_image(&base, name));
        log::info!("Preloading {} images", renderer.images.len());

        Some(renderer)
    }

    fn draw_sprite(&mut self, sprite: &Sprite<'_>) {
        let base = &self.base_url;
        let Some(img) = self.images.get_or_load(sprite.asset, |name| load_image(base, name)) else {
            return;
        };
        // Images still loading draw nothing
        if !img.complete() {
            return;
        }
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            sprite.pos.x as f64,
            sprite.pos.y as f64,
            sprite.size.x as f64,
            sprite.size.y as f64,
        );
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, frame: &FrameView<'_>) {
        self.ctx.clear_rect(0.0, 0.0, self.size.0, self.size.1);
        self.draw_sprite(&frame.background);
        for sprite in &frame.obstacles {
            self.draw_sprite(sprite);
        }
        self.draw_sprite(&frame.mammoth);
    }
}

fn load_image(base_url: &str, name: &str) -> Option<HtmlImageElement> {
    let img = HtmlImageElement::new().ok()?;
    img.set_src(&format!("{}{}", base_url, name));
    Some(img)
}
