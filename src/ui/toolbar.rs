//! Top toolbar: title, Reset View, current selection and detail level.

use super::style::{self, colors};
use super::UiActions;
use crate::constants::{TOOLBAR_HEIGHT, WINDOW_TITLE};
use crate::store::{DetailLevel, Store};

const RESET_VIEW_LABEL: &str = "Reset View";

pub fn draw_toolbar(ctx: &egui::Context, store: &Store, actions: &mut UiActions) {
    egui::TopBottomPanel::top("toolbar")
        .exact_height(TOOLBAR_HEIGHT)
        .resizable(false)
        .frame(style::toolbar_frame())
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(egui::RichText::new(WINDOW_TITLE).size(18.0).strong());
                ui.separator();
                if ui.button(RESET_VIEW_LABEL).clicked() {
                    actions.reset_view = true;
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut level = store.detail_level();
                    egui::ComboBox::from_id_salt("detail_level")
                        .width(110.0)
                        .selected_text(level.name())
                        .show_ui(ui, |ui| {
                            for option in DetailLevel::ALL {
                                ui.selectable_value(&mut level, option, option.name());
                            }
                        });
                    if level != store.detail_level() {
                        actions.detail_level = Some(level);
                    }
                    ui.label(egui::RichText::new("Detail Level:").color(colors::TEXT_MUTED));

                    if let Some(id) = store.selected_tile_id() {
                        ui.separator();
                        ui.label(egui::RichText::new(id.as_str()).color(colors::ACCENT).strong());
                        ui.label(egui::RichText::new("Selected:").color(colors::TEXT_MUTED));
                    }
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolbar_text_uses_bundled_glyphs() {
        let ctx = egui::Context::default();
        let store = Store::new();
        let mut actions = UiActions::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| draw_toolbar(ctx, &store, &mut actions));

        assert!(!actions.reset_view);
        assert_eq!(actions.detail_level, None);
        let font = egui::FontId::proportional(14.0);
        ctx.fonts(|fonts| {
            for text in [WINDOW_TITLE, RESET_VIEW_LABEL, "Detail Level:", "Selected:"] {
                assert!(fonts.has_glyphs(&font, text), "missing glyph in {text:?}");
            }
        });
    }
}
