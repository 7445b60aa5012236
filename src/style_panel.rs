use gpui::{div, prelude::*, px, Context, Entity, IntoElement, MouseButton, PathPromptOptions, Render, Window};

use crate::checkbox::{Checkbox, CheckboxEvent, CheckboxState};
use crate::color::parse_color;
use crate::number_input::NumberInput;
use crate::preview_canvas::IMAGE_EXTENSIONS;
use crate::script_export;
use crate::select::{Select, SelectEvent, SelectItem, SelectState};
use crate::settings::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::slider::{Slider, SliderEvent, SliderState};
use crate::stroke::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};
use crate::svg_export::{self, ExportMode, SvgExportRequest};
use crate::text_input::TextInput;
use crate::theme::OneDarkTheme;
use crate::AppState;

/// Export mode entry for the dropdown
#[derive(Clone)]
struct ExportModeItem(ExportMode);

impl SelectItem for ExportModeItem {
    fn display_title(&self) -> String {
        self.0.label().to_string()
    }
}

/// One stroke layer's controls
struct LayerRow {
    enabled: Entity<CheckboxState>,
    width: Entity<SliderState>,
    color: Entity<TextInput>,
}

/// Styling panel: sample text, size, colors, background, stroke layers,
/// vertical mode, and the export controls.
pub struct StylePanel {
    text_input: Entity<TextInput>,
    size_slider: Entity<SliderState>,
    size_input: Entity<NumberInput>,
    text_color_input: Entity<TextInput>,
    bg_color_input: Entity<TextInput>,
    use_bg_image: Entity<CheckboxState>,
    vertical_mode: Entity<CheckboxState>,
    layer_rows: Vec<LayerRow>,
    export_mode_select: Entity<SelectState<ExportModeItem>>,
}

impl StylePanel {
    pub fn new(cx: &mut Context<Self>) -> Self {
        let doc = cx.global::<AppState>().doc.app_state.clone();

        // Sample text (multiline)
        let text_input = cx.new(|cx| {
            let mut input = TextInput::new(cx, "Sample text...");
            input.set_multiline(true);
            input
        });
        cx.observe(&text_input, |_this, input, cx| {
            let content = input.read(cx).content();
            cx.update_global::<AppState, _>(|state, _| {
                if state.doc.app_state.text != content {
                    state.doc.app_state.text = content;
                    state.persist();
                }
            });
        })
        .detach();

        // Font size: slider and numeric input, kept in sync
        let size_slider = cx.new(|_cx| {
            SliderState::new()
                .min(MIN_FONT_SIZE)
                .max(MAX_FONT_SIZE)
                .step(1.0)
                .default_value(doc.font_size)
        });
        cx.subscribe(&size_slider, |this, _, event: &SliderEvent, cx| {
            let SliderEvent::Change(value) = event;
            let size = value.end();
            cx.update_global::<AppState, _>(|state, _| {
                state.doc.app_state.font_size = size;
                state.persist();
            });
            this.size_input.update(cx, |input, cx| {
                input.set_content(format!("{}", size.round() as i64), cx);
            });
        })
        .detach();

        let size_input = cx.new(|cx| NumberInput::new(cx, MIN_FONT_SIZE, MAX_FONT_SIZE));
        cx.observe(&size_input, |this, input, cx| {
            if let Some(size) = input.read(cx).parse_value() {
                cx.update_global::<AppState, _>(|state, _| {
                    if state.doc.app_state.font_size != size {
                        state.doc.app_state.font_size = size;
                        state.persist();
                    }
                });
                this.size_slider.update(cx, |slider, cx| {
                    slider.set_value(size, cx);
                });
            }
        })
        .detach();

        // Colors
        let text_color_input = cx.new(|cx| TextInput::new(cx, "#ffffff"));
        cx.observe(&text_color_input, |_this, input, cx| {
            let content = input.read(cx).content();
            if parse_color(&content).is_some() {
                cx.update_global::<AppState, _>(|state, _| {
                    if state.doc.app_state.text_color != content {
                        state.doc.app_state.text_color = content;
                        state.persist();
                    }
                });
            }
        })
        .detach();

        let bg_color_input = cx.new(|cx| TextInput::new(cx, "#1e1e1e"));
        cx.observe(&bg_color_input, |_this, input, cx| {
            let content = input.read(cx).content();
            if parse_color(&content).is_some() {
                cx.update_global::<AppState, _>(|state, _| {
                    if state.doc.app_state.bg_color != content {
                        state.doc.app_state.bg_color = content;
                        state.persist();
                    }
                });
            }
        })
        .detach();

        // Background image toggle
        let use_bg_image = cx.new(|_cx| CheckboxState::new(doc.use_bg_image));
        cx.subscribe(&use_bg_image, |_this, _, event: &CheckboxEvent, cx| {
            let CheckboxEvent::Change(checked) = event;
            cx.update_global::<AppState, _>(|state, _| {
                state.doc.app_state.use_bg_image = *checked;
                state.persist();
            });
        })
        .detach();

        // Vertical (top-to-bottom) text mode
        let vertical_mode = cx.new(|_cx| CheckboxState::new(doc.vertical));
        cx.subscribe(&vertical_mode, |_this, _, event: &CheckboxEvent, cx| {
            let CheckboxEvent::Change(checked) = event;
            cx.update_global::<AppState, _>(|state, _| {
                state.doc.app_state.vertical = *checked;
                state.persist();
            });
        })
        .detach();

        // Stroke layer rows
        let mut layer_rows = Vec::new();
        for (i, layer) in doc.stroke_layers.iter().enumerate() {
            let enabled = cx.new(|_cx| CheckboxState::new(layer.enabled));
            cx.subscribe(&enabled, move |_this, _, event: &CheckboxEvent, cx| {
                let CheckboxEvent::Change(checked) = event;
                let checked = *checked;
                cx.update_global::<AppState, _>(|state, _| {
                    if let Some(layer) = state.doc.app_state.stroke_layers.get_mut(i) {
                        layer.enabled = checked;
                        state.persist();
                    }
                });
            })
            .detach();

            let width = cx.new(|_cx| {
                SliderState::new()
                    .min(MIN_STROKE_WIDTH as f32)
                    .max(MAX_STROKE_WIDTH as f32)
                    .step(1.0)
                    .default_value(layer.width as f32)
            });
            cx.subscribe(&width, move |_this, _, event: &SliderEvent, cx| {
                let SliderEvent::Change(value) = event;
                let width = value.end().round() as u32;
                cx.update_global::<AppState, _>(|state, _| {
                    if let Some(layer) = state.doc.app_state.stroke_layers.get_mut(i) {
                        layer.width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
                        state.persist();
                    }
                });
            })
            .detach();

            let color = cx.new(|cx| TextInput::new(cx, "#000000"));
            cx.observe(&color, move |_this, input, cx| {
                let content = input.read(cx).content();
                if parse_color(&content).is_some() {
                    cx.update_global::<AppState, _>(|state, _| {
                        if let Some(layer) = state.doc.app_state.stroke_layers.get_mut(i) {
                            if layer.color != content {
                                layer.color = content;
                                state.persist();
                            }
                        }
                    });
                }
            })
            .detach();

            layer_rows.push(LayerRow {
                enabled,
                width,
                color,
            });
        }

        // Export mode dropdown
        let export_mode_select = cx.new(|_cx| {
            SelectState::new(ExportMode::all().map(ExportModeItem).to_vec())
        });
        cx.subscribe(
            &export_mode_select,
            |_this, select, event: &SelectEvent, cx| {
                let SelectEvent::Change(index) = event;
                if let Some(item) = select.read(cx).items().get(*index) {
                    let mode = item.0;
                    cx.update_global::<AppState, _>(|state, _| {
                        if state.doc.app_state.export_mode != mode {
                            state.doc.app_state.export_mode = mode;
                            state.persist();
                        }
                    });
                }
            },
        )
        .detach();

        // Status/flag changes should repaint the panel
        cx.observe_global::<AppState>(|_this, cx| {
            cx.notify();
        })
        .detach();

        let mut this = Self {
            text_input,
            size_slider,
            size_input,
            text_color_input,
            bg_color_input,
            use_bg_image,
            vertical_mode,
            layer_rows,
            export_mode_select,
        };
        this.seed_widgets(&doc, cx);
        this
    }

    /// Push the persisted state into the freshly created widgets.
    fn seed_widgets(&mut self, doc: &crate::settings::AppStateDoc, cx: &mut Context<Self>) {
        let text = doc.text.clone();
        self.text_input.update(cx, |input, cx| {
            input.set_content(text, cx);
        });
        self.size_input.update(cx, |input, cx| {
            input.set_content(format!("{}", doc.font_size.round() as i64), cx);
        });
        let text_color = doc.text_color.clone();
        self.text_color_input.update(cx, |input, cx| {
            input.set_content(text_color, cx);
        });
        let bg_color = doc.bg_color.clone();
        self.bg_color_input.update(cx, |input, cx| {
            input.set_content(bg_color, cx);
        });
        for (row, layer) in self.layer_rows.iter().zip(doc.stroke_layers.iter()) {
            let color = layer.color.clone();
            row.color.update(cx, |input, cx| {
                input.set_content(color, cx);
            });
        }
        let mode_index = ExportMode::all()
            .iter()
            .position(|mode| *mode == doc.export_mode);
        self.export_mode_select.update(cx, |select, cx| {
            select.set_selected_index(mode_index, cx);
        });
    }

    /// Open the background image picker; only image files are accepted.
    fn choose_background_image(&mut self, cx: &mut Context<Self>) {
        let paths = cx.prompt_for_paths(PathPromptOptions {
            files: true,
            directories: false,
            multiple: false,
            prompt: Some("Select a background image".into()),
        });

        cx.spawn(async move |this, cx| {
            if let Ok(Ok(Some(paths))) = paths.await {
                if let Some(path) = paths.first() {
                    let extension = path
                        .extension()
                        .and_then(|e| e.to_str())
                        .map(|e| e.to_lowercase());
                    match extension {
                        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => {
                            let path_string = path.to_string_lossy().to_string();
                            cx.update(|cx| {
                                cx.update_global::<AppState, _>(|state, _| {
                                    state.doc.app_state.bg_image_path = Some(path_string);
                                    state.doc.app_state.use_bg_image = true;
                                    state.persist();
                                });
                            })
                            .ok();
                            this.update(cx, |this, cx| {
                                this.use_bg_image.update(cx, |checkbox, cx| {
                                    checkbox.set_checked(true, cx);
                                });
                            })
                            .ok();
                        }
                        _ => {
                            eprintln!(
                                "Invalid file type. Supported formats: {}",
                                IMAGE_EXTENSIONS.join(", ")
                            );
                        }
                    }
                }
            }
        })
        .detach();
    }

    /// Export the current preview as SVG via a save dialog.
    ///
    /// The button is disabled while an export is outstanding; failures are
    /// surfaced in the status line and re-enable the control.
    fn handle_export_click(&mut self, cx: &mut Context<Self>) {
        let app_state = cx.global::<AppState>();
        if app_state.is_exporting {
            return;
        }
        let doc = &app_state.doc.app_state;
        let request = SvgExportRequest {
            font_name: doc.font.clone(),
            text: doc.text.clone(),
            font_size: doc.font_size,
            text_color: doc.text_color.clone(),
            stroke_layers: doc.stroke_layers.clone(),
            export_mode: doc.export_mode,
            vertical: doc.vertical,
        };

        let default_filename = if doc.font.is_empty() {
            "fontpeek.svg".to_string()
        } else {
            format!("{}.svg", doc.font.to_lowercase().replace(' ', "-"))
        };
        let directory = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| std::path::PathBuf::from("."));

        let path_receiver = cx.prompt_for_new_path(&directory, Some(&default_filename));

        cx.spawn(async move |_this, cx| {
            if let Ok(Ok(Some(output_path))) = path_receiver.await {
                let output_path_str = output_path.to_string_lossy().to_string();

                cx.update(|cx| {
                    cx.update_global::<AppState, _>(|state, _| {
                        state.is_exporting = true;
                    });
                })
                .ok();

                // Generate and write on a background thread
                let export_result = cx
                    .background_executor()
                    .spawn(async move {
                        let markup = svg_export::generate_svg(&request)?;
                        std::fs::write(&output_path, markup)
                            .map_err(|e| format!("Failed to write {}: {}", output_path.display(), e))
                    })
                    .await;

                let status = match export_result {
                    Ok(()) => {
                        println!("SVG export completed: {}", output_path_str);
                        format!("Exported {}", output_path_str)
                    }
                    Err(e) => {
                        eprintln!("SVG export failed: {}", e);
                        format!("Export failed: {}", e)
                    }
                };

                cx.update(|cx| {
                    cx.update_global::<AppState, _>(|state, _| {
                        state.is_exporting = false;
                        state.status = Some(status);
                    });
                })
                .ok();
            }
        })
        .detach();
    }

    /// Save the companion import-helper script, unmodified.
    fn handle_save_script_click(&mut self, cx: &mut Context<Self>) {
        let directory = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        let path_receiver =
            cx.prompt_for_new_path(&directory, Some(script_export::SCRIPT_FILE_NAME));

        cx.spawn(async move |_this, cx| {
            if let Ok(Ok(Some(output_path))) = path_receiver.await {
                let status = match script_export::write_script(&output_path) {
                    Ok(()) => {
                        println!("Import script saved: {}", output_path.display());
                        format!("Saved {}", output_path.display())
                    }
                    Err(e) => {
                        eprintln!("Failed to save import script: {}", e);
                        format!("Script save failed: {}", e)
                    }
                };
                cx.update(|cx| {
                    cx.update_global::<AppState, _>(|state, _| {
                        state.status = Some(status);
                    });
                })
                .ok();
            }
        })
        .detach();
    }

    fn section_label(text: &'static str) -> gpui::Div {
        div()
            .text_xs()
            .text_color(OneDarkTheme::text_muted())
            .child(text)
    }

    fn swatch(color: &str) -> gpui::Div {
        div()
            .size(px(18.0))
            .flex_shrink_0()
            .rounded(px(3.))
            .border_1()
            .border_color(OneDarkTheme::border())
            .bg(parse_color(color).unwrap_or(OneDarkTheme::element_background()))
    }
}

impl Render for StylePanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let app_state = cx.global::<AppState>();
        let is_exporting = app_state.is_exporting;
        let status = app_state.status.clone();
        let font_name = app_state.doc.app_state.font.clone();
        let text_color = app_state.doc.app_state.text_color.clone();
        let bg_color = app_state.doc.app_state.bg_color.clone();
        let layer_colors: Vec<String> = app_state
            .doc
            .app_state
            .stroke_layers
            .iter()
            .map(|layer| layer.color.clone())
            .collect();

        div()
            .flex()
            .flex_col()
            .bg(OneDarkTheme::surface_background())
            .size_full()
            .p_4()
            .gap_3()
            .overflow_hidden()
            .child(Self::section_label("Font"))
            .child(
                div()
                    .text_sm()
                    .text_color(if font_name.is_empty() {
                        OneDarkTheme::text_muted()
                    } else {
                        OneDarkTheme::text()
                    })
                    .child(if font_name.is_empty() {
                        "No font selected".to_string()
                    } else {
                        font_name
                    }),
            )
            .child(Self::section_label("Sample text"))
            .child(div().w_full().child(self.text_input.clone()))
            .child(Self::section_label("Size"))
            .child(
                div()
                    .flex()
                    .flex_row()
                    .items_center()
                    .gap_2()
                    .w_full()
                    .child(div().flex_1().child(Slider::new(&self.size_slider).horizontal()))
                    .child(div().w(px(64.0)).child(self.size_input.clone())),
            )
            .child(
                div()
                    .flex()
                    .flex_row()
                    .gap_4()
                    .w_full()
                    .child(
                        div()
                            .flex()
                            .flex_col()
                            .flex_1()
                            .gap_1()
                            .child(Self::section_label("Text color"))
                            .child(
                                div()
                                    .flex()
                                    .flex_row()
                                    .items_center()
                                    .gap_2()
                                    .child(Self::swatch(&text_color))
                                    .child(div().flex_1().child(self.text_color_input.clone())),
                            ),
                    )
                    .child(
                        div()
                            .flex()
                            .flex_col()
                            .flex_1()
                            .gap_1()
                            .child(Self::section_label("Background"))
                            .child(
                                div()
                                    .flex()
                                    .flex_row()
                                    .items_center()
                                    .gap_2()
                                    .child(Self::swatch(&bg_color))
                                    .child(div().flex_1().child(self.bg_color_input.clone())),
                            ),
                    ),
            )
            .child(
                div()
                    .flex()
                    .flex_row()
                    .items_center()
                    .gap_2()
                    .w_full()
                    .child(Checkbox::new(&self.use_bg_image).label("Background image"))
                    .child(
                        div()
                            .px_2()
                            .py_1()
                            .bg(OneDarkTheme::element_background())
                            .rounded_md()
                            .cursor_pointer()
                            .text_xs()
                            .text_color(OneDarkTheme::text())
                            .hover(|style| style.bg(OneDarkTheme::element_hover()))
                            .on_mouse_down(
                                MouseButton::Left,
                                cx.listener(|this, _, _, cx| {
                                    this.choose_background_image(cx);
                                }),
                            )
                            .child("Choose..."),
                    ),
            )
            .child(Self::section_label("Outline layers"))
            .children(self.layer_rows.iter().enumerate().map(|(i, row)| {
                div()
                    .flex()
                    .flex_row()
                    .items_center()
                    .gap_2()
                    .w_full()
                    .child(Checkbox::new(&row.enabled).label(format!("{}", i + 1)))
                    .child(div().flex_1().child(Slider::new(&row.width).horizontal()))
                    .child(Self::swatch(layer_colors.get(i).map(|s| s.as_str()).unwrap_or("#000000")))
                    .child(div().w(px(80.0)).child(row.color.clone()))
            }))
            .child(Checkbox::new(&self.vertical_mode).label("Vertical text"))
            .child(Self::section_label("Export"))
            .child(Select::new(&self.export_mode_select).placeholder("Export mode"))
            .child(
                div()
                    .flex()
                    .flex_row()
                    .gap_2()
                    .w_full()
                    .child(
                        div()
                            .px_3()
                            .py_1()
                            .rounded_md()
                            .text_xs()
                            .when(!is_exporting, |this| {
                                this.bg(OneDarkTheme::text_accent())
                                    .cursor_pointer()
                                    .text_color(OneDarkTheme::editor_background())
                                    .hover(|style| style.bg(OneDarkTheme::border_focused()))
                            })
                            .when(is_exporting, |this| {
                                this.bg(OneDarkTheme::element_background())
                                    .cursor_not_allowed()
                                    .text_color(OneDarkTheme::text_muted())
                            })
                            .on_mouse_down(
                                MouseButton::Left,
                                cx.listener(|this, _, _, cx| {
                                    this.handle_export_click(cx);
                                }),
                            )
                            .child(if is_exporting {
                                "Exporting..."
                            } else {
                                "Export SVG"
                            }),
                    )
                    .child(
                        div()
                            .px_3()
                            .py_1()
                            .bg(OneDarkTheme::element_background())
                            .rounded_md()
                            .cursor_pointer()
                            .text_xs()
                            .text_color(OneDarkTheme::text())
                            .hover(|style| style.bg(OneDarkTheme::element_hover()))
                            .on_mouse_down(
                                MouseButton::Left,
                                cx.listener(|this, _, _, cx| {
                                    this.handle_save_script_click(cx);
                                }),
                            )
                            .child("Save import script"),
                    ),
            )
            .when_some(status, |el, status| {
                el.child(
                    div()
                        .text_xs()
                        .text_color(OneDarkTheme::text_muted())
                        .child(status),
                )
            })
    }
}
