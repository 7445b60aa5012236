//! Live preview canvas.
//!
//! A custom element that clears its bounds with the configured background
//! (solid color, or an image stretched to cover) and then paints the sample
//! text through the stroke compositor. Horizontal text goes through the
//! repeated-fill pass; vertical text stacks characters into columns and
//! realizes the stroke effect from the shadow-descriptor list, since the
//! repeated-fill approach is tied to line shaping.

use gpui::{
    fill, point, px, App, Bounds, Corners, Element, ElementId, GlobalElementId, IntoElement,
    LayoutId, Pixels, RenderImage, Rgba, ShapedLine, SharedString, Style, TextRun, Window,
};
use smallvec::smallvec;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::color::parse_color;
use crate::stroke::{self, StrokeLayer, TextSurface, LINE_HEIGHT_FACTOR};

/// Snapshot of the inputs for one render pass.
#[derive(Clone, PartialEq)]
pub struct PreviewParams {
    pub text: String,
    pub font: String,
    pub font_size: f32,
    pub text_color: String,
    pub bg_color: String,
    pub use_bg_image: bool,
    pub stroke_layers: Vec<StrokeLayer>,
    pub vertical: bool,
}

/// What the canvas clears itself with before text is drawn.
pub enum BackgroundFill {
    Solid(Rgba),
    Image(Arc<RenderImage>),
}

/// Pick the background for this pass. A missing or failed image always
/// degrades to the solid color.
pub fn plan_background(
    bg_color: &str,
    use_image: bool,
    image: Option<&Arc<RenderImage>>,
) -> BackgroundFill {
    if use_image {
        if let Some(image) = image {
            return BackgroundFill::Image(image.clone());
        }
    }
    BackgroundFill::Solid(parse_color(bg_color).unwrap_or(crate::theme::OneDarkTheme::editor_background()))
}

/// Decode an image file into the renderer's BGRA frame format.
///
/// Runs on the background executor; failures are reported to the caller,
/// which logs and falls back to the solid background.
pub fn decode_background_image(path: &Path) -> anyhow::Result<Arc<RenderImage>> {
    let image = image::open(path)?;
    let mut rgba = image.to_rgba8();
    // The sprite atlas wants BGRA channel order.
    for pixel in rgba.chunks_exact_mut(4) {
        pixel.swap(0, 2);
    }
    let frame = image::Frame::from_parts(rgba, 0, 0, image::Delay::from_numer_denom_ms(0, 1));
    Ok(Arc::new(RenderImage::new(smallvec![frame])))
}

/// File extensions accepted for background images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// The preview element. Built fresh each frame from a parameter snapshot.
pub struct PreviewCanvas {
    params: PreviewParams,
    background_image: Option<Arc<RenderImage>>,
}

impl PreviewCanvas {
    pub fn new(params: PreviewParams, background_image: Option<Arc<RenderImage>>) -> Self {
        Self {
            params,
            background_image,
        }
    }

    /// Every color a text pass can use: enabled stroke colors plus the base
    /// fill.
    fn pass_colors(params: &PreviewParams) -> Vec<String> {
        let mut colors: Vec<String> = params
            .stroke_layers
            .iter()
            .filter(|layer| layer.enabled)
            .map(|layer| layer.color.clone())
            .collect();
        colors.push(params.text_color.clone());
        colors.dedup();
        colors
    }
}

pub struct PreviewPrepaintState {
    /// (text fragment, color) -> shaped line. Fragments are whole lines in
    /// horizontal mode and single characters in vertical mode.
    shapes: HashMap<(String, String), ShapedLine>,
}

impl IntoElement for PreviewCanvas {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl Element for PreviewCanvas {
    type RequestLayoutState = ();
    type PrepaintState = PreviewPrepaintState;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let mut style = Style::default();
        style.size.width = gpui::relative(1.).into();
        style.size.height = gpui::relative(1.).into();
        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        _bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        let params = &self.params;
        let mut shapes = HashMap::new();
        if params.text.is_empty() {
            return PreviewPrepaintState { shapes };
        }

        let mut font = window.text_style().font();
        if !params.font.is_empty() {
            font.family = SharedString::from(params.font.clone());
        }

        let colors = Self::pass_colors(params);
        let fragments: Vec<String> = if params.vertical {
            params
                .text
                .split('\n')
                .flat_map(|line| line.chars())
                .map(|c| c.to_string())
                .collect()
        } else {
            params.text.split('\n').map(|s| s.to_string()).collect()
        };

        for fragment in fragments {
            for color in &colors {
                let key = (fragment.clone(), color.clone());
                if shapes.contains_key(&key) {
                    continue;
                }
                let rgba = parse_color(color).unwrap_or(gpui::white());
                let run = TextRun {
                    len: fragment.len(),
                    font: font.clone(),
                    color: rgba.into(),
                    background_color: None,
                    underline: None,
                    strikethrough: None,
                };
                let shaped = window.text_system().shape_line(
                    SharedString::from(fragment.clone()),
                    px(params.font_size),
                    &[run],
                    None,
                );
                shapes.insert(key, shaped);
            }
        }

        PreviewPrepaintState { shapes }
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let params = &self.params;

        // Background first: solid color, or the image stretched to cover.
        match plan_background(
            &params.bg_color,
            params.use_bg_image,
            self.background_image.as_ref(),
        ) {
            BackgroundFill::Solid(color) => {
                window.paint_quad(fill(bounds, color));
            }
            BackgroundFill::Image(image) => {
                if let Err(e) =
                    window.paint_image(bounds, Corners::default(), image, 0, false)
                {
                    eprintln!("Failed to paint background image: {:?}", e);
                    let color =
                        parse_color(&params.bg_color).unwrap_or(crate::theme::OneDarkTheme::editor_background());
                    window.paint_quad(fill(bounds, color));
                }
            }
        }

        if params.text.is_empty() {
            return;
        }

        let center = bounds.center();
        let line_height = params.font_size * LINE_HEIGHT_FACTOR;

        if params.vertical {
            self.paint_vertical(bounds, line_height, prepaint, window, cx);
        } else {
            let mut surface = CanvasSurface {
                window,
                cx,
                shapes: &prepaint.shapes,
                line_height: px(line_height),
            };
            stroke::render_stroked_text(
                &mut surface,
                &params.text,
                (f32::from(center.x), f32::from(center.y)),
                params.font_size,
                &params.text_color,
                &params.stroke_layers,
            );
        }
    }
}

impl PreviewCanvas {
    /// Vertical mode: lines become top-to-bottom columns, columns run right
    /// to left, and the stroke ring comes from the shadow-descriptor list.
    fn paint_vertical(
        &self,
        bounds: Bounds<Pixels>,
        cell_size: f32,
        prepaint: &PreviewPrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let params = &self.params;
        let descriptors = stroke::shadow_descriptors(&params.stroke_layers);

        let lines: Vec<&str> = params.text.split('\n').collect();
        let max_rows = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        if max_rows == 0 {
            return;
        }

        let total_width = lines.len() as f32 * cell_size;
        let total_height = max_rows as f32 * cell_size;
        let center = bounds.center();
        let right = f32::from(center.x) + total_width / 2.0;
        let top = f32::from(center.y) - total_height / 2.0;

        for (i, line) in lines.iter().enumerate() {
            let column_x = right - (i as f32 + 0.5) * cell_size;
            for (j, c) in line.chars().enumerate() {
                let cell_y = top + (j as f32 + 0.5) * cell_size;
                let fragment = c.to_string();

                if let Some(descriptors) = &descriptors {
                    for spec in descriptors {
                        self.paint_cell(
                            prepaint,
                            &fragment,
                            &spec.color,
                            column_x + spec.dx,
                            cell_y + spec.dy,
                            cell_size,
                            window,
                            cx,
                        );
                    }
                }
                self.paint_cell(
                    prepaint,
                    &fragment,
                    &params.text_color,
                    column_x,
                    cell_y,
                    cell_size,
                    window,
                    cx,
                );
            }
        }
    }

    fn paint_cell(
        &self,
        prepaint: &PreviewPrepaintState,
        fragment: &str,
        color: &str,
        x: f32,
        y: f32,
        cell_size: f32,
        window: &mut Window,
        cx: &mut App,
    ) {
        let key = (fragment.to_string(), color.to_string());
        if let Some(shaped) = prepaint.shapes.get(&key) {
            let origin = point(
                px(x) - shaped.width / 2.0,
                px(y - cell_size / 2.0),
            );
            shaped.paint(origin, px(cell_size), window, cx).ok();
        }
    }
}

/// Adapter between the compositor's fill-text calls and shaped-line
/// painting. `(x, y)` from the compositor is the center of the line box.
struct CanvasSurface<'a, 'b> {
    window: &'a mut Window,
    cx: &'b mut App,
    shapes: &'a HashMap<(String, String), ShapedLine>,
    line_height: Pixels,
}

impl TextSurface for CanvasSurface<'_, '_> {
    fn fill_text(&mut self, line: &str, x: f32, y: f32, color: &str) {
        let key = (line.to_string(), color.to_string());
        if let Some(shaped) = self.shapes.get(&key) {
            let origin = point(
                px(x) - shaped.width / 2.0,
                px(y) - self.line_height / 2.0,
            );
            shaped
                .paint(origin, self.line_height, self.window, self.cx)
                .ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_decode_missing_image_fails() {
        assert!(decode_background_image(Path::new("/no/such/image.png")).is_err());
    }

    #[test]
    fn test_decode_garbage_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"definitely not a png").unwrap();
        assert!(decode_background_image(&path).is_err());
    }

    #[test]
    fn test_background_falls_back_to_solid_on_failed_load() {
        // An image was requested but never decoded (load failed): the pass
        // still clears with the configured solid color.
        let plan = plan_background("#336699", true, None);
        match plan {
            BackgroundFill::Solid(color) => {
                assert_eq!(crate::color::format_color(color), "#336699");
            }
            BackgroundFill::Image(_) => panic!("expected solid fallback"),
        }
    }

    #[test]
    fn test_background_solid_with_bad_color_string() {
        let plan = plan_background("not-a-color", false, None);
        assert!(matches!(plan, BackgroundFill::Solid(_)));
    }

    #[test]
    fn test_pass_colors_dedup_and_base_last() {
        let params = PreviewParams {
            text: "x".into(),
            font: "Arial".into(),
            font_size: 32.0,
            text_color: "#ffffff".into(),
            bg_color: "#000000".into(),
            use_bg_image: false,
            stroke_layers: vec![
                StrokeLayer {
                    enabled: true,
                    width: 2,
                    color: "#ff0000".into(),
                },
                StrokeLayer {
                    enabled: false,
                    width: 2,
                    color: "#00ff00".into(),
                },
            ],
            vertical: false,
        };
        let colors = PreviewCanvas::pass_colors(&params);
        assert_eq!(colors, vec!["#ff0000".to_string(), "#ffffff".to_string()]);
    }
}
