//! Label rasterization on an off-DOM `<canvas>`.

use orrery_engine::{LabelBitmap, LabelComponent, LabelRasterizer, RasterError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

fn js_err(e: JsValue) -> RasterError {
    RasterError::Draw(format!("{:?}", e))
}

/// Draws labels with the browser's 2D canvas. The canvas is created on first
/// use and reused for every label; it is never attached to the document.
#[derive(Default)]
pub struct CanvasRasterizer {
    surface: Option<(HtmlCanvasElement, CanvasRenderingContext2d)>,
}

impl CanvasRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn surface(&mut self, width: u32, height: u32) -> Result<&CanvasRenderingContext2d, RasterError> {
        if self.surface.is_none() {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| RasterError::Surface("no document".into()))?;
            let canvas = document
                .create_element("canvas")
                .map_err(|e| RasterError::Surface(format!("{:?}", e)))?
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| RasterError::Surface("not a canvas".into()))?;
            let ctx = canvas
                .get_context("2d")
                .map_err(|e| RasterError::Surface(format!("{:?}", e)))?
                .ok_or_else(|| RasterError::Surface("2d context unavailable".into()))?
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| RasterError::Surface("not a 2d context".into()))?;
            self.surface = Some((canvas, ctx));
        }

        let (canvas, ctx) = self
            .surface
            .as_ref()
            .ok_or_else(|| RasterError::Surface("canvas lost".into()))?;
        if canvas.width() != width || canvas.height() != height {
            canvas.set_width(width);
            canvas.set_height(height);
        }
        Ok(ctx)
    }
}

impl LabelRasterizer for CanvasRasterizer {
    fn rasterize(&mut self, label: &LabelComponent) -> Result<LabelBitmap, RasterError> {
        let style = &label.style;
        let (w, h) = (style.canvas_width, style.canvas_height);
        let ctx = self.surface(w, h)?;

        ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        ctx.set_font(&style.font());
        ctx.set_fill_style_str(&label.fill.css());
        ctx.set_stroke_style_str(&label.outline.css());
        ctx.set_line_width(style.outline_width as f64);

        let text = style.fit_text_by(&label.text, |s| match ctx.measure_text(s) {
            Ok(metrics) => metrics.width() as f32,
            Err(_) => style.estimate_width(s),
        });
        if text != label.text {
            log::debug!("label '{}' drawn as '{}'", label.text, text);
        }

        let (x, y) = (style.origin.0 as f64, style.origin.1 as f64);
        ctx.fill_text(&text, x, y).map_err(js_err)?;
        ctx.stroke_text(&text, x, y).map_err(js_err)?;

        let image = ctx
            .get_image_data(0.0, 0.0, w as f64, h as f64)
            .map_err(js_err)?;
        let bitmap = LabelBitmap {
            width: image.width(),
            height: image.height(),
            rgba: image.data().0,
        };
        if !bitmap.is_well_formed() {
            return Err(RasterError::BadBitmap {
                width: bitmap.width,
                height: bitmap.height,
                len: bitmap.rgba.len(),
            });
        }
        Ok(bitmap)
    }
}
