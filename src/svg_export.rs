//! SVG vector export.
//!
//! Builds standalone SVG markup for the current preview by extracting glyph
//! outlines from the selected font and emitting them as `<path>` elements.
//! Stroke layers become stroked copies of the text geometry, outermost layer
//! first, underneath the base fill — the same compositing order the live
//! canvas uses.

use font_kit::family_name::FamilyName;
use font_kit::font::Font;
use font_kit::hinting::HintingOptions;
use font_kit::outline::OutlineSink;
use font_kit::properties::Properties;
use font_kit::source::SystemSource;
use pathfinder_geometry::line_segment::LineSegment2F;
use pathfinder_geometry::vector::Vector2F;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::stroke::{StrokeLayer, LINE_HEIGHT_FACTOR};

/// What the exported markup contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    /// Bare geometry, no paint attributes.
    PathOnly,
    /// Filled regions only.
    Fill,
    /// Filled regions plus stroked outline copies.
    FillAndStroke,
}

impl ExportMode {
    pub fn all() -> [ExportMode; 3] {
        [
            ExportMode::PathOnly,
            ExportMode::Fill,
            ExportMode::FillAndStroke,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportMode::PathOnly => "Path only",
            ExportMode::Fill => "Fill",
            ExportMode::FillAndStroke => "Fill + stroke",
        }
    }
}

impl Default for ExportMode {
    fn default() -> Self {
        ExportMode::Fill
    }
}

/// Everything the export service needs to render one document.
#[derive(Debug, Clone)]
pub struct SvgExportRequest {
    pub font_name: String,
    pub text: String,
    pub font_size: f32,
    pub text_color: String,
    pub stroke_layers: Vec<StrokeLayer>,
    pub export_mode: ExportMode,
    pub vertical: bool,
}

/// Generate SVG markup for the request.
///
/// Loads the font, walks every glyph outline into path data, lays lines out
/// horizontally (or as top-to-bottom columns in vertical mode), and wraps
/// the geometry according to the export mode.
pub fn generate_svg(request: &SvgExportRequest) -> Result<String, String> {
    if request.text.trim().is_empty() {
        return Err("Nothing to export: sample text is empty".to_string());
    }

    let font = load_font(&request.font_name)?;
    let metrics = font.metrics();
    let scale = request.font_size / metrics.units_per_em as f32;
    let ascent = metrics.ascent * scale;
    let descent = -metrics.descent * scale;

    let lines: Vec<&str> = request.text.split('\n').collect();
    let line_height = request.font_size * LINE_HEIGHT_FACTOR;
    let max_stroke = request
        .stroke_layers
        .iter()
        .filter(|layer| layer.enabled)
        .map(|layer| layer.width)
        .max()
        .unwrap_or(0) as f32;
    let margin = request.font_size * 0.5 + max_stroke;

    let (paths, width, height) = if request.vertical {
        layout_vertical(&font, &lines, request.font_size, scale, ascent, descent, margin)
    } else {
        layout_horizontal(&font, &lines, scale, line_height, ascent, descent, margin)
    };

    let document = build_svg_document(&paths, request, width, height);
    eprintln!(
        "[generate_svg] {} line(s), mode {:?}, {}x{}",
        lines.len(),
        request.export_mode,
        width.ceil(),
        height.ceil()
    );
    Ok(document)
}

fn load_font(font_name: &str) -> Result<Font, String> {
    let source = SystemSource::new();
    let handle = source
        .select_best_match(
            &[
                FamilyName::Title(font_name.to_string()),
                FamilyName::SansSerif,
            ],
            &Properties::new(),
        )
        .map_err(|e| format!("Font \"{}\" not found: {}", font_name, e))?;
    handle
        .load()
        .map_err(|e| format!("Failed to load font \"{}\": {}", font_name, e))
}

/// Advance of one character in font units; characters without a glyph get a
/// third of an em so spacing stays plausible.
fn char_advance(font: &Font, c: char) -> f32 {
    match font.glyph_for_char(c) {
        Some(glyph_id) => font
            .advance(glyph_id)
            .map(|v| v.x())
            .unwrap_or(font.metrics().units_per_em as f32 / 3.0),
        None => font.metrics().units_per_em as f32 / 3.0,
    }
}

/// Append one glyph's outline (if any) to `d`, positioned at `pen`.
fn append_glyph(font: &Font, c: char, pen: (f32, f32), scale: f32, d: &mut String) {
    let Some(glyph_id) = font.glyph_for_char(c) else {
        return;
    };
    let mut sink = SvgPathSink::new(pen, scale);
    if let Err(e) = font.outline(glyph_id, HintingOptions::None, &mut sink) {
        eprintln!("Failed to outline glyph for {:?}: {}", c, e);
        return;
    }
    d.push_str(&sink.finish());
}

fn layout_horizontal(
    font: &Font,
    lines: &[&str],
    scale: f32,
    line_height: f32,
    ascent: f32,
    descent: f32,
    margin: f32,
) -> (Vec<String>, f32, f32) {
    let line_widths: Vec<f32> = lines
        .iter()
        .map(|line| line.chars().map(|c| char_advance(font, c) * scale).sum())
        .collect();
    let max_width = line_widths.iter().cloned().fold(0.0, f32::max);
    let width = max_width + 2.0 * margin;
    let height = lines.len() as f32 * line_height + 2.0 * margin;

    let mut paths = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let top = margin + i as f32 * line_height;
        let baseline = top + (line_height + ascent - descent) / 2.0;
        let mut pen_x = (width - line_widths[i]) / 2.0;
        let mut d = String::new();
        for c in line.chars() {
            append_glyph(font, c, (pen_x, baseline), scale, &mut d);
            pen_x += char_advance(font, c) * scale;
        }
        paths.push(d);
    }
    (paths, width, height)
}

/// Vertical (top-to-bottom) layout: each line becomes a column, columns run
/// right to left, one character per row.
fn layout_vertical(
    font: &Font,
    lines: &[&str],
    font_size: f32,
    scale: f32,
    ascent: f32,
    descent: f32,
    margin: f32,
) -> (Vec<String>, f32, f32) {
    let row_height = font_size * LINE_HEIGHT_FACTOR;
    let column_width = font_size * LINE_HEIGHT_FACTOR;
    let max_rows = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

    let width = lines.len() as f32 * column_width + 2.0 * margin;
    let height = max_rows as f32 * row_height + 2.0 * margin;

    let mut paths = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let column_center = width - margin - (i as f32 + 0.5) * column_width;
        let mut d = String::new();
        for (j, c) in line.chars().enumerate() {
            let top = margin + j as f32 * row_height;
            let baseline = top + (row_height + ascent - descent) / 2.0;
            let advance = char_advance(font, c) * scale;
            append_glyph(font, c, (column_center - advance / 2.0, baseline), scale, &mut d);
        }
        paths.push(d);
    }
    (paths, width, height)
}

/// Assemble the final document from per-line path data.
fn build_svg_document(paths: &[String], request: &SvgExportRequest, width: f32, height: f32) -> String {
    let mut svg = String::new();
    let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
        width, height, width, height
    );

    let path_elements: Vec<String> = paths
        .iter()
        .filter(|d| !d.is_empty())
        .map(|d| format!(r#"  <path d="{}"/>"#, d))
        .collect();

    match request.export_mode {
        ExportMode::PathOnly => {
            for element in &path_elements {
                let _ = writeln!(svg, "{}", element);
            }
        }
        ExportMode::Fill => {
            let _ = writeln!(svg, r#" <g fill="{}">"#, request.text_color);
            for element in &path_elements {
                let _ = writeln!(svg, " {}", element);
            }
            let _ = writeln!(svg, " </g>");
        }
        ExportMode::FillAndStroke => {
            // Outermost layer first, base fill on top — same order as the
            // live canvas compositing.
            for layer in request.stroke_layers.iter().rev() {
                if !layer.enabled {
                    continue;
                }
                let _ = writeln!(
                    svg,
                    r#" <g fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round">"#,
                    layer.color,
                    layer.width * 2
                );
                for element in &path_elements {
                    let _ = writeln!(svg, " {}", element);
                }
                let _ = writeln!(svg, " </g>");
            }
            let _ = writeln!(svg, r#" <g fill="{}">"#, request.text_color);
            for element in &path_elements {
                let _ = writeln!(svg, " {}", element);
            }
            let _ = writeln!(svg, " </g>");
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// Collects outline commands into SVG path data.
///
/// Font outlines come in font units with y pointing up; the sink scales them
/// and flips y so the data lands in SVG's y-down space at the pen position.
struct SvgPathSink {
    d: String,
    pen: (f32, f32),
    scale: f32,
}

impl SvgPathSink {
    fn new(pen: (f32, f32), scale: f32) -> Self {
        Self {
            d: String::new(),
            pen,
            scale,
        }
    }

    fn map(&self, p: Vector2F) -> (f32, f32) {
        (
            self.pen.0 + p.x() * self.scale,
            self.pen.1 - p.y() * self.scale,
        )
    }

    fn finish(self) -> String {
        self.d
    }
}

impl OutlineSink for SvgPathSink {
    fn move_to(&mut self, to: Vector2F) {
        let (x, y) = self.map(to);
        let _ = write!(self.d, "M {:.2} {:.2} ", x, y);
    }

    fn line_to(&mut self, to: Vector2F) {
        let (x, y) = self.map(to);
        let _ = write!(self.d, "L {:.2} {:.2} ", x, y);
    }

    fn quadratic_curve_to(&mut self, ctrl: Vector2F, to: Vector2F) {
        let (cx, cy) = self.map(ctrl);
        let (x, y) = self.map(to);
        let _ = write!(self.d, "Q {:.2} {:.2} {:.2} {:.2} ", cx, cy, x, y);
    }

    fn cubic_curve_to(&mut self, ctrl: LineSegment2F, to: Vector2F) {
        let (c1x, c1y) = self.map(ctrl.from());
        let (c2x, c2y) = self.map(ctrl.to());
        let (x, y) = self.map(to);
        let _ = write!(
            self.d,
            "C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2} ",
            c1x, c1y, c2x, c2y, x, y
        );
    }

    fn close(&mut self) {
        self.d.push_str("Z ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(mode: ExportMode, layers: Vec<StrokeLayer>) -> SvgExportRequest {
        SvgExportRequest {
            font_name: "Test".to_string(),
            text: "Hi".to_string(),
            font_size: 48.0,
            text_color: "#ffffff".to_string(),
            stroke_layers: layers,
            export_mode: mode,
            vertical: false,
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
    fn test_sink_scales_and_flips_y() {
        let mut sink = SvgPathSink::new((100.0, 200.0), 0.5);
        sink.move_to(Vector2F::new(10.0, 20.0));
        sink.line_to(Vector2F::new(0.0, -40.0));
        sink.close();
        assert_eq!(sink.finish(), "M 105.00 190.00 L 100.00 220.00 Z ");
    }

    #[test]
    fn test_sink_curves() {
        let mut sink = SvgPathSink::new((0.0, 0.0), 1.0);
        sink.quadratic_curve_to(Vector2F::new(1.0, 2.0), Vector2F::new(3.0, 4.0));
        sink.cubic_curve_to(
            LineSegment2F::new(Vector2F::new(1.0, 1.0), Vector2F::new(2.0, 2.0)),
            Vector2F::new(5.0, 5.0),
        );
        let d = sink.finish();
        assert!(d.starts_with("Q 1.00 -2.00 3.00 -4.00 "));
        assert!(d.contains("C 1.00 -1.00 2.00 -2.00 5.00 -5.00 "));
    }

    #[test]
    fn test_document_path_only_has_no_paint() {
        let paths = vec!["M 0 0 L 1 1 Z ".to_string()];
        let svg = build_svg_document(&paths, &request(ExportMode::PathOnly, vec![]), 100.0, 50.0);
        assert!(svg.contains(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50""#));
        assert!(svg.contains("<path d="));
        assert!(!svg.contains("fill="));
        assert!(!svg.contains("stroke="));
    }

    #[test]
    fn test_document_fill_mode() {
        let paths = vec!["M 0 0 Z ".to_string()];
        let svg = build_svg_document(&paths, &request(ExportMode::Fill, vec![]), 10.0, 10.0);
        assert!(svg.contains(r##"<g fill="#ffffff">"##));
        assert!(!svg.contains("stroke="));
    }

    #[test]
    fn test_document_fill_and_stroke_order() {
        let layers = vec![layer(true, 3, "#aa0000"), layer(true, 5, "#00aa00")];
        let paths = vec!["M 0 0 Z ".to_string()];
        let svg = build_svg_document(
            &paths,
            &request(ExportMode::FillAndStroke, layers),
            10.0,
            10.0,
        );

        // Layer 1 (outermost) first, then layer 0, then the fill group.
        let green = svg.find(r##"stroke="#00aa00""##).unwrap();
        let red = svg.find(r##"stroke="#aa0000""##).unwrap();
        let fill = svg.find(r##"<g fill="#ffffff">"##).unwrap();
        assert!(green < red && red < fill);

        // Stroke width straddles the outline: 2x the layer width.
        assert!(svg.contains(r#"stroke-width="10""#));
        assert!(svg.contains(r#"stroke-width="6""#));
    }

    #[test]
    fn test_document_skips_disabled_layers_and_empty_paths() {
        let layers = vec![layer(false, 3, "#aa0000")];
        let paths = vec![String::new()];
        let svg = build_svg_document(
            &paths,
            &request(ExportMode::FillAndStroke, layers),
            10.0,
            10.0,
        );
        assert!(!svg.contains("stroke=\"#aa0000\""));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_generate_rejects_empty_text() {
        let mut req = request(ExportMode::Fill, vec![]);
        req.text = "  \n ".to_string();
        assert!(generate_svg(&req).is_err());
    }

    #[test]
    fn test_export_mode_serde_literals() {
        assert_eq!(
            serde_json::to_string(&ExportMode::PathOnly).unwrap(),
            "\"path_only\""
        );
        assert_eq!(
            serde_json::to_string(&ExportMode::Fill).unwrap(),
            "\"fill\""
        );
        assert_eq!(
            serde_json::to_string(&ExportMode::FillAndStroke).unwrap(),
            "\"fill_and_stroke\""
        );
        let parsed: ExportMode = serde_json::from_str("\"fill_and_stroke\"").unwrap();
        assert_eq!(parsed, ExportMode::FillAndStroke);
    }
}
