//! Label bitmaps and billboard sizing.

use glam::{Vec2, Vec3};

use crate::api::types::LabelTextureId;
use crate::core::scene::Scene;
use crate::renderer::traits::{LabelBitmap, LabelRasterizer, RasterError};

/// Owns every rasterized label bitmap. Bitmaps are never evicted.
#[derive(Debug, Default)]
pub struct LabelTextureStore {
    bitmaps: Vec<LabelBitmap>,
}

impl LabelTextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bitmap: LabelBitmap) -> Result<LabelTextureId, RasterError> {
        if !bitmap.is_well_formed() {
            return Err(RasterError::BadBitmap {
                width: bitmap.width,
                height: bitmap.height,
                len: bitmap.rgba.len(),
            });
        }
        self.bitmaps.push(bitmap);
        Ok(LabelTextureId(self.bitmaps.len() as u32 - 1))
    }

    pub fn get(&self, id: LabelTextureId) -> Option<&LabelBitmap> {
        self.bitmaps.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.bitmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bitmaps.is_empty()
    }
}

/// Rasterize every label that has no bitmap yet.
/// Failures are logged and the label stays untextured, so the renderer skips it.
/// Returns the number of labels rasterized.
pub fn rasterize_pending(
    scene: &mut Scene,
    store: &mut LabelTextureStore,
    rasterizer: &mut dyn LabelRasterizer,
) -> usize {
    let mut done = 0;
    for entity in scene.iter_mut() {
        let Some(label) = entity.label.as_mut() else { continue };
        if !label.needs_raster() {
            continue;
        }
        match rasterizer.rasterize(label).and_then(|bmp| store.add(bmp)) {
            Ok(id) => {
                label.texture = Some(id);
                done += 1;
            }
            Err(e) => {
                log::error!("label '{}' (entity {}): {}", label.text, entity.id.0, e);
                label.raster_failed = true;
            }
        }
    }
    done
}

/// Distance-attenuated billboard size.
///
/// The width shrinks as `1 / distance` and never exceeds `max_width`; the
/// height follows the canvas aspect ratio with the same cap applied.
pub fn billboard_scale(distance: f32, max_width: f32, aspect: f32) -> Vec2 {
    let s = (1.0 / distance).min(max_width);
    Vec2::new(s.min(max_width), (s / aspect).min(max_width / aspect))
}

/// Billboard size for a label at `label_pos` seen from `eye`.
pub fn billboard_scale_from(eye: Vec3, label_pos: Vec3, max_width: f32, aspect: f32) -> Vec2 {
    billboard_scale(eye.distance(label_pos), max_width, aspect)
}
