//! Stroke-outline compositing.
//!
//! The drawing surfaces available to us only know how to fill text, so an
//! outline is approximated by stamping copies of the text in a ring around
//! the anchor point: for a stroke of width `w`, copies are placed at
//! `(w·cos θ, w·sin θ)` for evenly spaced angles. The sample count grows
//! with the width so the ring stays closed, and is capped for performance.
//!
//! Two realizations share the sampling math:
//! - the live canvas stamps the ring as repeated fill passes
//!   ([`render_stroked_text`]);
//! - vertical text rendering and static consumers get the same ring as a
//!   list of shadow offset descriptors ([`shadow_descriptors`]).

use serde::{Deserialize, Serialize};

/// Number of configurable stroke layers.
pub const LAYER_COUNT: usize = 3;

/// Stroke width bounds enforced by the UI controls.
pub const MIN_STROKE_WIDTH: u32 = 1;
pub const MAX_STROKE_WIDTH: u32 = 20;

/// Line box height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

// Canvas ring: 4 samples per width unit, bounded to [16, 64] passes.
const CANVAS_SAMPLES_PER_UNIT: u32 = 4;
const CANVAS_MIN_SAMPLES: u32 = 16;
const CANVAS_MAX_SAMPLES: u32 = 64;

// Shadow-descriptor ring: 2 samples per width unit, bounded to [8, 32].
const SHADOW_SAMPLES_PER_UNIT: u32 = 2;
const SHADOW_MIN_SAMPLES: u32 = 8;
const SHADOW_MAX_SAMPLES: u32 = 32;

/// One configured outline pass.
///
/// Layers live in a fixed-length ordered sequence; index 0 is the innermost
/// stroke, drawn last among strokes and directly under the base fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeLayer {
    pub enabled: bool,
    pub width: u32,
    pub color: String,
}

impl Default for StrokeLayer {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 2,
            color: "#000000".to_string(),
        }
    }
}

/// The three default (disabled) layers created at application start.
pub fn default_layers() -> Vec<StrokeLayer> {
    vec![StrokeLayer::default(); LAYER_COUNT]
}

/// A single shadow offset emitted by the descriptor generator.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowSpec {
    pub dx: f32,
    pub dy: f32,
    pub blur: f32,
    pub color: String,
}

/// Sink for fill-text draw calls.
///
/// `(x, y)` is the center of the line's box; implementations decide how to
/// translate that into their own text origin.
pub trait TextSurface {
    fn fill_text(&mut self, line: &str, x: f32, y: f32, color: &str);
}

/// Ring sample count for the live canvas renderer.
pub fn canvas_sample_count(width: u32) -> u32 {
    width
        .saturating_mul(CANVAS_SAMPLES_PER_UNIT)
        .clamp(CANVAS_MIN_SAMPLES, CANVAS_MAX_SAMPLES)
}

/// Ring sample count for the shadow-descriptor generator.
pub fn shadow_sample_count(width: u32) -> u32 {
    width
        .saturating_mul(SHADOW_SAMPLES_PER_UNIT)
        .clamp(SHADOW_MIN_SAMPLES, SHADOW_MAX_SAMPLES)
}

/// Evenly spaced offsets on a circle of radius `width`.
pub fn ring_offsets(width: u32, samples: u32) -> impl Iterator<Item = (f32, f32)> {
    let radius = width as f32;
    (0..samples).map(move |j| {
        let angle = j as f32 / samples as f32 * std::f32::consts::TAU;
        (radius * angle.cos(), radius * angle.sin())
    })
}

/// Split text into lines and compute the vertical cadence of the block.
///
/// Returns `(lines, line_height, total_height)`.
pub fn line_metrics(text: &str, font_size: f32) -> (Vec<&str>, f32, f32) {
    let lines: Vec<&str> = text.split('\n').collect();
    let line_height = font_size * LINE_HEIGHT_FACTOR;
    let total_height = lines.len() as f32 * line_height;
    (lines, line_height, total_height)
}

/// Emit the full stroke-and-fill draw sequence for `text` onto `surface`.
///
/// The block of lines is vertically centered on `center` and every line
/// shares its horizontal center. Per line, enabled layers are stamped in
/// reverse index order (outermost first), then the base fill goes on top.
/// Empty text emits nothing.
pub fn render_stroked_text(
    surface: &mut dyn TextSurface,
    text: &str,
    center: (f32, f32),
    font_size: f32,
    base_color: &str,
    layers: &[StrokeLayer],
) {
    if text.is_empty() {
        return;
    }

    let (lines, line_height, total_height) = line_metrics(text, font_size);
    let top = center.1 - total_height / 2.0;

    for (i, line) in lines.iter().enumerate() {
        let line_center_y = top + line_height * (i as f32 + 0.5);

        for layer in layers.iter().rev() {
            if !layer.enabled {
                continue;
            }
            let samples = canvas_sample_count(layer.width);
            for (dx, dy) in ring_offsets(layer.width, samples) {
                surface.fill_text(line, center.0 + dx, line_center_y + dy, &layer.color);
            }
        }

        surface.fill_text(line, center.0, line_center_y, base_color);
    }
}

/// Build the shadow-descriptor list equivalent of the stroke effect.
///
/// Descriptors come out outermost layer first, matching the canvas draw
/// order. With no enabled layer this returns `None` — consumers distinguish
/// "no shadow" from an empty shadow list.
pub fn shadow_descriptors(layers: &[StrokeLayer]) -> Option<Vec<ShadowSpec>> {
    if !layers.iter().any(|layer| layer.enabled) {
        return None;
    }

    let mut specs = Vec::new();
    for layer in layers.iter().rev() {
        if !layer.enabled {
            continue;
        }
        let samples = shadow_sample_count(layer.width);
        for (dx, dy) in ring_offsets(layer.width, samples) {
            specs.push(ShadowSpec {
                dx,
                dy,
                blur: 0.0,
                color: layer.color.clone(),
            });
        }
    }
    Some(specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<(String, f32, f32, String)>,
    }

    impl TextSurface for RecordingSurface {
        fn fill_text(&mut self, line: &str, x: f32, y: f32, color: &str) {
            self.calls
                .push((line.to_string(), x, y, color.to_string()));
        }
    }

    fn layer(enabled: bool, width: u32, color: &str) -> StrokeLayer {
        StrokeLayer {
            enabled,
            width,
            color: color.to_string(),
        }
    }

    #[test]
    fn test_canvas_sample_count_clamps() {
        assert_eq!(canvas_sample_count(1), 16); // 4 clamped up
        assert_eq!(canvas_sample_count(5), 20);
        assert_eq!(canvas_sample_count(16), 64);
        assert_eq!(canvas_sample_count(20), 64); // 80 clamped down
        assert_eq!(canvas_sample_count(0), 16); // degenerate width still rings
    }

    #[test]
    fn test_shadow_sample_count_clamps() {
        assert_eq!(shadow_sample_count(1), 8);
        assert_eq!(shadow_sample_count(10), 20);
        assert_eq!(shadow_sample_count(20), 32);
        assert_eq!(shadow_sample_count(0), 8);
    }

    #[test]
    fn test_ring_offsets_radius() {
        for (dx, dy) in ring_offsets(5, 20) {
            let r = (dx * dx + dy * dy).sqrt();
            assert!((r - 5.0).abs() < 1e-4);
        }
        assert_eq!(ring_offsets(5, 20).count(), 20);
    }

    #[test]
    fn test_single_layer_call_count() {
        // One enabled layer of width w: clamp(4w, 16, 64) stroke fills plus
        // one base fill.
        let layers = vec![layer(true, 6, "#ff0000")];
        let mut surface = RecordingSurface::default();
        render_stroked_text(&mut surface, "Hello", (0.0, 0.0), 32.0, "#ffffff", &layers);

        let strokes = surface
            .calls
            .iter()
            .filter(|(_, _, _, c)| c == "#ff0000")
            .count();
        let base = surface
            .calls
            .iter()
            .filter(|(_, _, _, c)| c == "#ffffff")
            .count();
        assert_eq!(strokes, 24);
        assert_eq!(base, 1);
    }

    #[test]
    fn test_disabled_layer_emits_nothing() {
        let enabled_only = vec![layer(true, 3, "#00ff00")];
        let with_disabled = vec![layer(true, 3, "#00ff00"), layer(false, 8, "#0000ff")];

        let mut a = RecordingSurface::default();
        let mut b = RecordingSurface::default();
        render_stroked_text(&mut a, "x", (0.0, 0.0), 24.0, "#ffffff", &enabled_only);
        render_stroked_text(&mut b, "x", (0.0, 0.0), 24.0, "#ffffff", &with_disabled);

        assert!(b.calls.iter().all(|(_, _, _, c)| c != "#0000ff"));
        assert_eq!(a.calls.len(), b.calls.len());
    }

    #[test]
    fn test_composite_order_reverse_index_then_base() {
        let layers = vec![layer(true, 2, "#aa0000"), layer(true, 2, "#00aa00")];
        let mut surface = RecordingSurface::default();
        render_stroked_text(&mut surface, "x", (0.0, 0.0), 24.0, "#ffffff", &layers);

        let last_index1 = surface
            .calls
            .iter()
            .rposition(|(_, _, _, c)| c == "#00aa00")
            .unwrap();
        let first_index0 = surface
            .calls
            .iter()
            .position(|(_, _, _, c)| c == "#aa0000")
            .unwrap();
        let base = surface
            .calls
            .iter()
            .position(|(_, _, _, c)| c == "#ffffff")
            .unwrap();

        assert!(last_index1 < first_index0, "layer 1 must finish before layer 0 starts");
        assert!(base > first_index0, "base fill must come last");
        assert_eq!(base, surface.calls.len() - 1);
    }

    #[test]
    fn test_multiline_repeats_per_line() {
        let layers = vec![layer(true, 1, "#000000")];
        let mut surface = RecordingSurface::default();
        render_stroked_text(
            &mut surface,
            "one\ntwo\nthree",
            (100.0, 100.0),
            20.0,
            "#ffffff",
            &layers,
        );

        // 16 strokes + 1 base per line.
        assert_eq!(surface.calls.len(), 3 * 17);

        // All lines share the horizontal center.
        let base_calls: Vec<_> = surface
            .calls
            .iter()
            .filter(|(_, _, _, c)| c == "#ffffff")
            .collect();
        assert!(base_calls.iter().all(|(_, x, _, _)| *x == 100.0));

        // The block is centered: line cadence is font_size * 1.2.
        let ys: Vec<f32> = base_calls.iter().map(|(_, _, y, _)| *y).collect();
        assert!((ys[1] - ys[0] - 24.0).abs() < 1e-4);
        assert!((ys[2] - ys[1] - 24.0).abs() < 1e-4);
        assert!(((ys[0] + ys[2]) / 2.0 - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_text_is_noop() {
        let layers = vec![layer(true, 4, "#000000")];
        let mut surface = RecordingSurface::default();
        render_stroked_text(&mut surface, "", (0.0, 0.0), 24.0, "#ffffff", &layers);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_shadow_descriptors_no_effect_sentinel() {
        assert_eq!(shadow_descriptors(&default_layers()), None);
        assert_eq!(shadow_descriptors(&[]), None);
    }

    #[test]
    fn test_shadow_descriptors_single_layer() {
        let layers = vec![layer(true, 7, "#123456")];
        let specs = shadow_descriptors(&layers).unwrap();
        assert_eq!(specs.len(), 14); // clamp(2 * 7, 8, 32)
        for spec in &specs {
            assert_eq!(spec.blur, 0.0);
            assert_eq!(spec.color, "#123456");
            let r = (spec.dx * spec.dx + spec.dy * spec.dy).sqrt();
            assert!((r - 7.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_shadow_descriptors_reverse_order() {
        let layers = vec![layer(true, 1, "#aa0000"), layer(true, 1, "#00aa00")];
        let specs = shadow_descriptors(&layers).unwrap();
        assert_eq!(specs.len(), 16);
        assert!(specs[..8].iter().all(|s| s.color == "#00aa00"));
        assert!(specs[8..].iter().all(|s| s.color == "#aa0000"));
    }

    #[test]
    fn test_line_metrics() {
        let (lines, line_height, total) = line_metrics("a\nb", 10.0);
        assert_eq!(lines, vec!["a", "b"]);
        assert!((line_height - 12.0).abs() < 1e-6);
        assert!((total - 24.0).abs() < 1e-6);
    }
}
