//! GL textures holding tile media, keyed by tile.

use crate::error::{EditorError, Result};
use crate::tile::TileId;
use glow::HasContext;
use std::collections::HashMap;
use std::sync::Arc;

/// A tile's media texture; stretched over the sprite rect when drawn
#[derive(Debug, Clone, Copy)]
pub struct SpriteTexture {
    pub texture: glow::Texture,
}

pub struct TextureCache {
    gl: Arc<glow::Context>,
    textures: HashMap<TileId, SpriteTexture>,
}

impl TextureCache {
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self {
            gl,
            textures: HashMap::new(),
        }
    }

    pub fn get(&self, id: &TileId) -> Option<SpriteTexture> {
        self.textures.get(id).copied()
    }

    /// Upload tightly packed RGBA pixels, reusing the tile's texture if it has one
    pub fn upload(&mut self, id: &TileId, width: u32, height: u32, rgba: &[u8]) -> Result<()> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() < expected {
            return Err(EditorError::Gl(format!(
                "texture data for {id} is {} bytes, expected {expected}",
                rgba.len()
            )));
        }

        let texture = match self.textures.get(id) {
            Some(existing) => existing.texture,
            None => unsafe {
                let tex = self
                    .gl
                    .create_texture()
                    .map_err(|e| EditorError::Gl(format!("Failed to create texture: {e}")))?;
                self.gl.bind_texture(glow::TEXTURE_2D, Some(tex));
                // LINEAR: photos and video get scaled with the camera
                self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
                self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
                self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
                self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
                tex
            },
        };

        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(&rgba[..expected]),
            );
            self.gl.bind_texture(glow::TEXTURE_2D, None);
        }

        self.textures.insert(id.clone(), SpriteTexture { texture });
        Ok(())
    }
}

impl Drop for TextureCache {
    fn drop(&mut self) {
        unsafe {
            for (_, sprite) in self.textures.drain() {
                self.gl.delete_texture(sprite.texture);
            }
        }
    }
}
