use gpui::{div, prelude::*, px, Context, Entity, IntoElement, Render, RenderImage, Window};
use std::path::PathBuf;
use std::sync::Arc;

use crate::custom_titlebar::CustomTitlebar;
use crate::font_list::FontList;
use crate::preview_canvas::{decode_background_image, PreviewCanvas, PreviewParams};
use crate::style_panel::StylePanel;
use crate::theme::OneDarkTheme;
use crate::AppState;

/// Main window: titlebar on top, font list on the left, the live preview in
/// the middle, and the styling panel on the right.
pub struct PreviewWindow {
    pub titlebar: Entity<CustomTitlebar>,
    pub font_list: Entity<FontList>,
    pub style_panel: Entity<StylePanel>,
    background_image: Option<Arc<RenderImage>>,
    loaded_image_path: Option<String>,
    failed_image_path: Option<String>,
    loading_image_path: Option<String>,
}

impl PreviewWindow {
    pub fn new(cx: &mut Context<Self>) -> Self {
        let titlebar = cx.new(|_| CustomTitlebar::new("fontpeek"));
        let font_list = cx.new(FontList::new);
        let style_panel = cx.new(StylePanel::new);

        // Any settings change re-renders the preview on the next frame.
        cx.observe_global::<AppState>(|this, cx| {
            this.maybe_load_background(cx);
            cx.notify();
        })
        .detach();

        let mut this = Self {
            titlebar,
            font_list,
            style_panel,
            background_image: None,
            loaded_image_path: None,
            failed_image_path: None,
            loading_image_path: None,
        };
        this.maybe_load_background(cx);
        this
    }

    /// Kick off a background decode when the configured image path changes.
    /// Failures log and leave the canvas on the solid-color path; the failed
    /// path is remembered so a broken file is not re-tried every frame.
    fn maybe_load_background(&mut self, cx: &mut Context<Self>) {
        let doc = &cx.global::<AppState>().doc.app_state;
        if !doc.use_bg_image {
            return;
        }
        let Some(path) = doc.bg_image_path.clone() else {
            return;
        };
        if self.loaded_image_path.as_deref() == Some(path.as_str())
            || self.failed_image_path.as_deref() == Some(path.as_str())
            || self.loading_image_path.as_deref() == Some(path.as_str())
        {
            return;
        }

        self.loading_image_path = Some(path.clone());
        let decode_path = path.clone();
        cx.spawn(async move |this, cx| {
            let result = cx
                .background_executor()
                .spawn(async move { decode_background_image(&PathBuf::from(&decode_path)) })
                .await;

            this.update(cx, |this, cx| {
                match result {
                    Ok(image) => {
                        this.background_image = Some(image);
                        this.loaded_image_path = Some(path.clone());
                    }
                    Err(e) => {
                        eprintln!("Failed to load background image {}: {}", path, e);
                        this.background_image = None;
                        this.failed_image_path = Some(path.clone());
                    }
                }
                this.loading_image_path = None;
                cx.notify();
            })
            .ok();
        })
        .detach();
    }
}

impl Render for PreviewWindow {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let doc = cx.global::<AppState>().doc.app_state.clone();

        let params = PreviewParams {
            text: doc.text.clone(),
            font: doc.font.clone(),
            font_size: doc.font_size,
            text_color: doc.text_color.clone(),
            bg_color: doc.bg_color.clone(),
            use_bg_image: doc.use_bg_image,
            stroke_layers: doc.stroke_layers.clone(),
            vertical: doc.vertical,
        };
        // Only hand the canvas an image that matches the configured path;
        // anything else falls back to the solid fill.
        let background_image = if doc.use_bg_image
            && doc.bg_image_path.as_deref() == self.loaded_image_path.as_deref()
        {
            self.background_image.clone()
        } else {
            None
        };

        // Layout proportions
        let window_bounds = window.bounds();
        let total_width = window_bounds.size.width;
        let titlebar_height = px(37.0);
        let content_height = window_bounds.size.height - titlebar_height;
        let list_width = total_width * 0.22;
        let panel_width = px(340.0);

        div()
            .flex()
            .flex_col()
            .bg(OneDarkTheme::editor_background())
            .size_full()
            // Close the font list's context menu on any click elsewhere
            .on_mouse_down(
                gpui::MouseButton::Left,
                cx.listener(|this, _, _, cx| {
                    this.font_list.update(cx, |font_list, cx| {
                        if font_list.context_menu.is_some() {
                            font_list.context_menu = None;
                            cx.notify();
                        }
                    });
                }),
            )
            .child(self.titlebar.clone())
            .child(
                div()
                    .flex()
                    .flex_row()
                    .w(total_width)
                    .h(content_height)
                    .child(
                        div()
                            .id("font-list-area")
                            .w(list_width)
                            .h_full()
                            .border_r_1()
                            .border_color(OneDarkTheme::border())
                            .child(self.font_list.clone()),
                    )
                    .child(
                        div()
                            .id("preview-area")
                            .flex_1()
                            .h_full()
                            .child(PreviewCanvas::new(params, background_image)),
                    )
                    .child(
                        div()
                            .id("style-panel-area")
                            .w(panel_width)
                            .h_full()
                            .border_l_1()
                            .border_color(OneDarkTheme::border())
                            .child(self.style_panel.clone()),
                    ),
            )
    }
}
