//! Click picking and the details panel.

use orrery_engine::{pick, window_to_ndc, EngineContext};

use crate::asteroid::AsteroidRecord;

pub const INITIAL_PANEL_TEXT: &str =
    "Zoom in and click on an asteroid to show information related to it.";

/// Index of the nearest asteroid under window point (`x`, `y`), if any.
/// Only asteroid meshes are candidates; the Sun and Earth never match.
pub fn pick_asteroid(ctx: &EngineContext, asteroids: &[AsteroidRecord], x: f32, y: f32) -> Option<usize> {
    let viewport = ctx.viewport();
    let ndc = window_to_ndc(x, y, viewport.x, viewport.y);
    let ray = ctx.camera.ray_from_ndc(ndc);
    let hit = pick(&ctx.scene, &ctx.geometries, &ray, asteroids.iter().map(|a| a.mesh))?;
    asteroids.iter().position(|a| a.mesh == hit.entity)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Panel markup for one asteroid. Distances and speeds are shown as served.
pub fn details_html(record: &AsteroidRecord) -> String {
    let d = &record.data;
    format!(
        "<h3>{}</h3>\
         <p><strong>Diameter:</strong> {:.2} km</p>\
         <p><strong>Miss Distance:</strong> {} km</p>\
         <p><strong>Relative Velocity:</strong> {} km/s</p>\
         <p><strong>Hazardous:</strong> {}</p>",
        escape_html(&d.name),
        d.diameter_max_km,
        escape_html(&d.miss_distance_text),
        escape_html(&d.relative_velocity_text),
        if d.hazardous { "Yes" } else { "No" },
    )
}
