use gpui::{
    div, prelude::*, px, uniform_list, Context, Entity, IntoElement, MouseButton, Pixels, Point,
    Render, UniformListScrollHandle, Window,
};

use crate::color::parse_color;
use crate::favorites::DEFAULT_CATEGORY_COLOR;
use crate::fonts;
use crate::select::{Select, SelectEvent, SelectState};
use crate::text_input::{self, TextInput};
use crate::theme::OneDarkTheme;
use crate::AppState;

// Indices into the filter dropdown ("All fonts" / "Favorites").
const FILTER_FAVORITES: usize = 1;

/// Height of the custom titlebar, used to convert window coordinates into
/// panel coordinates for the context menu.
const TITLEBAR_HEIGHT: f32 = 37.0;

/// State for the right-click category menu
pub struct ContextMenuState {
    pub position: Point<Pixels>,
    pub font: String,
}

/// Font list panel: search box, all/favorites filter, the font rows, and
/// category management.
pub struct FontList {
    search_input: Entity<TextInput>,
    filter_select: Entity<SelectState<String>>,
    new_category_name: Entity<TextInput>,
    new_category_color: Entity<TextInput>,
    filtered: Vec<usize>,
    scroll_handle: UniformListScrollHandle,
    pub context_menu: Option<ContextMenuState>,
}

impl FontList {
    pub fn new(cx: &mut Context<Self>) -> Self {
        let search_input = cx.new(|cx| TextInput::new(cx, "Search fonts..."));

        // Live filtering as the search text changes
        cx.observe(&search_input, |this, _, cx| {
            this.update_filtered(cx);
        })
        .detach();

        let filter_select = cx.new(|_cx| {
            SelectState::new(vec!["All fonts".to_string(), "Favorites".to_string()])
        });
        cx.subscribe(&filter_select, |this, _, event: &SelectEvent, cx| {
            let SelectEvent::Change(_) = event;
            this.update_filtered(cx);
        })
        .detach();

        let new_category_name = cx.new(|cx| TextInput::new(cx, "New category"));
        let new_category_color = cx.new(|cx| TextInput::new(cx, DEFAULT_CATEGORY_COLOR));

        // Favorites mutations and settings reloads land in the global state;
        // re-filter whenever it changes.
        cx.observe_global::<AppState>(|this, cx| {
            this.update_filtered(cx);
        })
        .detach();

        let mut this = Self {
            search_input,
            filter_select,
            new_category_name,
            new_category_color,
            filtered: Vec::new(),
            scroll_handle: UniformListScrollHandle::new(),
            context_menu: None,
        };
        this.update_filtered(cx);
        this
    }

    /// Recompute the visible font indices from the search text and filter.
    fn update_filtered(&mut self, cx: &mut Context<Self>) {
        let query = self.search_input.read(cx).content();
        let favorites_only =
            self.filter_select.read(cx).selected_index() == Some(FILTER_FAVORITES);

        let app_state = cx.global::<AppState>();
        let mut filtered = fonts::filter_families(&app_state.fonts, &query);
        if favorites_only {
            filtered.retain(|&i| app_state.favorites.is_favorite(&app_state.fonts[i]));
        }
        self.filtered = filtered;
        cx.notify();
    }

    fn select_font(font: String, cx: &mut gpui::App) {
        cx.update_global::<AppState, _>(|state, _| {
            state.doc.app_state.font = font;
            state.persist();
        });
    }

    fn add_category(&mut self, cx: &mut Context<Self>) {
        let name = self.new_category_name.read(cx).content();
        let color_text = self.new_category_color.read(cx).content();
        let color = if parse_color(&color_text).is_some() {
            color_text
        } else {
            DEFAULT_CATEGORY_COLOR.to_string()
        };

        let added = cx.update_global::<AppState, _>(|state, _| {
            let added = state.favorites.add_category(&name, &color);
            if added {
                state.persist();
            }
            added
        });

        if added {
            self.new_category_name.update(cx, |input, cx| input.clear(cx));
            self.new_category_color.update(cx, |input, cx| input.clear(cx));
        } else {
            eprintln!("Cannot create category {:?}", name);
        }
        cx.notify();
    }
}

impl Render for FontList {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let entity = cx.entity();
        let app_state = cx.global::<AppState>();
        let selected_font = app_state.doc.app_state.font.clone();

        // Row data: (name, category color dot)
        let rows: Vec<(String, Option<String>)> = self
            .filtered
            .iter()
            .map(|&i| {
                let name = app_state.fonts[i].clone();
                let dot = app_state
                    .favorites
                    .category_for(&name)
                    .and_then(|category| app_state.favorites.get(category))
                    .map(|category| category.color.clone());
                (name, dot)
            })
            .collect();
        let row_count = rows.len();

        let category_names = app_state.favorites.names();
        let category_rows: Vec<(String, String, bool, usize)> = category_names
            .iter()
            .filter_map(|name| {
                app_state.favorites.get(name).map(|category| {
                    (
                        name.clone(),
                        category.color.clone(),
                        category.enabled,
                        category.fonts.len(),
                    )
                })
            })
            .collect();

        let list_entity = entity.clone();

        div()
            .flex()
            .flex_col()
            .bg(OneDarkTheme::surface_background())
            .size_full()
            .p_3()
            .gap_2()
            .relative()
            .child(
                div()
                    .w_full()
                    .on_action(cx.listener(|this, _: &text_input::Escape, _, cx| {
                        this.search_input.update(cx, |input, cx| input.clear(cx));
                        this.update_filtered(cx);
                    }))
                    .child(self.search_input.clone()),
            )
            .child(Select::new(&self.filter_select).placeholder("All fonts"))
            .child(
                div()
                    .text_xs()
                    .text_color(OneDarkTheme::text_muted())
                    .child(format!("{} fonts", row_count)),
            )
            .child(
                div().id("font-list-container").flex_1().w_full().child(
                    uniform_list("font-list", row_count, move |range, _window, _cx| {
                        range
                            .filter_map(|idx| {
                                rows.get(idx).map(|(name, dot)| {
                                    let is_selected = *name == selected_font;
                                    let font_name = name.clone();
                                    let menu_font = name.clone();
                                    let menu_entity = list_entity.clone();
                                    div()
                                        .w_full()
                                        .h(px(32.0))
                                        .px_3()
                                        .py_1()
                                        .flex()
                                        .flex_row()
                                        .items_center()
                                        .gap_2()
                                        .border_b_1()
                                        .border_color(OneDarkTheme::border())
                                        .cursor_pointer()
                                        .hover(|style| style.bg(OneDarkTheme::element_hover()))
                                        .when(is_selected, |el| {
                                            el.bg(OneDarkTheme::element_selected())
                                        })
                                        .on_mouse_down(MouseButton::Left, move |_, _, cx| {
                                            FontList::select_font(font_name.clone(), cx);
                                        })
                                        .on_mouse_down(
                                            MouseButton::Right,
                                            move |event, _, cx| {
                                                let position = Point {
                                                    x: event.position.x,
                                                    y: event.position.y - px(TITLEBAR_HEIGHT),
                                                };
                                                let font = menu_font.clone();
                                                menu_entity.update(cx, |this, cx| {
                                                    this.context_menu = Some(ContextMenuState {
                                                        position,
                                                        font,
                                                    });
                                                    cx.notify();
                                                });
                                            },
                                        )
                                        .when_some(dot.clone(), |el, color| {
                                            el.child(
                                                div()
                                                    .size(px(8.0))
                                                    .rounded_full()
                                                    .flex_shrink_0()
                                                    .bg(parse_color(&color)
                                                        .unwrap_or(OneDarkTheme::warning())),
                                            )
                                        })
                                        .child(
                                            div()
                                                .text_sm()
                                                .text_color(OneDarkTheme::text())
                                                .font_family(name.clone())
                                                .overflow_hidden()
                                                .child(name.clone()),
                                        )
                                })
                            })
                            .collect()
                    })
                    .track_scroll(self.scroll_handle.clone())
                    .w_full()
                    .h_full(),
                ),
            )
            // Category management
            .child(
                div()
                    .text_xs()
                    .text_color(OneDarkTheme::text_muted())
                    .child("Categories"),
            )
            .children(category_rows.into_iter().map(|(name, color, enabled, count)| {
                let toggle_name = name.clone();
                let remove_name = name.clone();
                div()
                    .w_full()
                    .flex()
                    .flex_row()
                    .items_center()
                    .gap_2()
                    .px_1()
                    .child(
                        // Click the dot row to toggle the category's
                        // participation in the favorites filter.
                        div()
                            .flex()
                            .flex_row()
                            .flex_1()
                            .items_center()
                            .gap_2()
                            .cursor_pointer()
                            .hover(|style| style.bg(OneDarkTheme::element_hover()))
                            .on_mouse_down(MouseButton::Left, move |_, _, cx| {
                                let name = toggle_name.clone();
                                cx.update_global::<AppState, _>(|state, _| {
                                    let enabled = state
                                        .favorites
                                        .get(&name)
                                        .map(|c| c.enabled)
                                        .unwrap_or(false);
                                    state.favorites.set_enabled(&name, !enabled);
                                    state.persist();
                                });
                            })
                            .child(
                                div()
                                    .size(px(8.0))
                                    .rounded_full()
                                    .flex_shrink_0()
                                    .bg(parse_color(&color).unwrap_or(OneDarkTheme::warning())),
                            )
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(if enabled {
                                        OneDarkTheme::text()
                                    } else {
                                        OneDarkTheme::text_muted()
                                    })
                                    .child(format!("{} ({})", name, count)),
                            ),
                    )
                    .child(
                        div()
                            .text_xs()
                            .text_color(OneDarkTheme::text_muted())
                            .cursor_pointer()
                            .hover(|style| style.text_color(OneDarkTheme::error()))
                            .on_mouse_down(MouseButton::Left, move |_, _, cx| {
                                let name = remove_name.clone();
                                cx.update_global::<AppState, _>(|state, _| {
                                    state.favorites.remove_category(&name);
                                    state.persist();
                                });
                            })
                            .child("✕"),
                    )
            }))
            .child(
                div()
                    .w_full()
                    .flex()
                    .flex_row()
                    .gap_2()
                    .items_center()
                    .child(div().flex_1().child(self.new_category_name.clone()))
                    .child(div().w(px(80.0)).child(self.new_category_color.clone()))
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
                                    this.add_category(cx);
                                }),
                            )
                            .child("Add"),
                    ),
            )
            // Render the category assignment menu if active
            .children(self.context_menu.as_ref().map(|menu_state| {
                let font = menu_state.font.clone();
                let assign_entity = entity.clone();
                let mut menu = div()
                    .absolute()
                    .left(menu_state.position.x)
                    .top(menu_state.position.y)
                    .bg(OneDarkTheme::surface_background())
                    .border_1()
                    .border_color(OneDarkTheme::border())
                    .rounded_md()
                    .shadow_lg()
                    .min_w(px(140.0))
                    .occlude()
                    .child(
                        div()
                            .px_3()
                            .py_1()
                            .text_xs()
                            .text_color(OneDarkTheme::text_muted())
                            .child(font.clone()),
                    );

                for category in &category_names {
                    let category = category.clone();
                    let font = font.clone();
                    let entity = assign_entity.clone();
                    menu = menu.child(
                        div()
                            .px_3()
                            .py_1()
                            .cursor_pointer()
                            .text_sm()
                            .text_color(OneDarkTheme::text())
                            .hover(|style| style.bg(OneDarkTheme::element_hover()))
                            .on_mouse_down(MouseButton::Left, move |_, _, cx| {
                                cx.update_global::<AppState, _>(|state, _| {
                                    state.favorites.assign(&font, &category);
                                    state.persist();
                                });
                                entity.update(cx, |this, cx| {
                                    this.context_menu = None;
                                    cx.notify();
                                });
                            })
                            .child(format!("Add to {}", category)),
                    );
                }

                let font = menu_state.font.clone();
                let entity = assign_entity.clone();
                menu.child(
                    div()
                        .px_3()
                        .py_1()
                        .cursor_pointer()
                        .text_sm()
                        .text_color(OneDarkTheme::text())
                        .hover(|style| style.bg(OneDarkTheme::element_hover()))
                        .on_mouse_down(MouseButton::Left, move |_, _, cx| {
                            cx.update_global::<AppState, _>(|state, _| {
                                state.favorites.unassign(&font);
                                state.persist();
                            });
                            entity.update(cx, |this, cx| {
                                this.context_menu = None;
                                cx.notify();
                            });
                        })
                        .child("Remove from category"),
                )
            }))
            // Click anywhere else to close the menu
            .when(self.context_menu.is_some(), |el| {
                el.on_mouse_down(
                    MouseButton::Left,
                    cx.listener(|this, _, _, cx| {
                        this.context_menu = None;
                        cx.notify();
                    }),
                )
            })
    }
}
