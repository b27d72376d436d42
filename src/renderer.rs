use std::collections::{HashMap, HashSet};

use anyhow::{Result, anyhow};
use kenburns::{KenBurnsView, Slide};
use raylib::prelude::*;

/// Draws a view's layers into a render texture. Each layer's image is
/// uploaded once and its texture dropped when the layer goes away.
#[derive(Default)]
pub struct Renderer {
    textures: HashMap<u64, Texture2D>,
}

impl Renderer {
    fn sync(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, view: &KenBurnsView<Image>) -> Result<()> {
        let live: HashSet<u64> = view.layers().map(Slide::id).collect();
        self.textures.retain(|id, _| live.contains(id));

        for slide in view.layers() {
            if self.textures.contains_key(&slide.id()) {
                continue;
            }
            let texture = rl
                .load_texture_from_image(thread, slide.image())
                .map_err(|e| anyhow!("failed to create texture for image {}: {}", slide.index(), e))?;
            self.textures.insert(slide.id(), texture);
        }
        Ok(())
    }

    pub fn draw(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        framebuffer: &mut RenderTexture2D,
        view: &KenBurnsView<Image>,
    ) -> Result<()> {
        self.sync(rl, thread, view)?;
        let textures = &self.textures;

        rl.draw_texture_mode(thread, framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(thread);
            d.clear_background(Color::BLACK);

            // Back to front, the incoming image fades in over the outgoing one
            for slide in view.layers() {
                let Some(texture) = textures.get(&slide.id()) else {
                    continue;
                };
                let placement = slide.placement();
                let alpha = (slide.alpha() * 255.0).round() as u8;

                d.draw_texture_pro(
                    texture,
                    Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                    placement.dest,
                    placement.origin,
                    placement.rotation,
                    Color::new(255, 255, 255, alpha),
                );
            }
        });
        Ok(())
    }
}
