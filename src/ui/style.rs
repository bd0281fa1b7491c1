//! Dark slate egui styling for the toolbar.
//!
//! Matches the canvas: slate panels, thin borders, purple accent for the
//! selection and focused widgets.

use egui::epaint::Shadow;
use egui::style::{WidgetVisuals, Widgets};
use egui::{Color32, Frame, Margin, Rounding, Stroke, Style, Visuals};

/// Editor color palette
pub mod colors {
    use egui::Color32;

    // Panel backgrounds
    pub const PANEL_BG: Color32 = Color32::from_rgb(24, 27, 38);
    pub const PANEL_BORDER: Color32 = Color32::from_rgb(45, 50, 68);

    // Interactive elements
    pub const BUTTON_BG: Color32 = Color32::from_rgb(38, 43, 58);
    pub const BUTTON_HOVER: Color32 = Color32::from_rgb(52, 58, 78);
    pub const BUTTON_ACTIVE: Color32 = Color32::from_rgb(66, 72, 96);

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(229, 231, 235);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(148, 163, 184);

    /// Same purple as the selected tile border
    pub const ACCENT: Color32 = Color32::from_rgb(168, 85, 247);
}

pub const BORDER_WIDTH: f32 = 1.0;
pub const WIDGET_ROUNDING: f32 = 6.0;

pub fn editor_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.window_rounding = Rounding::same(WIDGET_ROUNDING);
    visuals.menu_rounding = Rounding::same(WIDGET_ROUNDING);
    visuals.window_shadow = Shadow::NONE;
    visuals.popup_shadow = Shadow::NONE;

    visuals.window_fill = colors::PANEL_BG;
    visuals.window_stroke = Stroke::new(BORDER_WIDTH, colors::PANEL_BORDER);
    visuals.panel_fill = colors::PANEL_BG;
    visuals.extreme_bg_color = colors::PANEL_BG;

    visuals.widgets = editor_widgets();

    visuals.selection.bg_fill = colors::ACCENT.linear_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.0, colors::ACCENT);
    visuals.override_text_color = Some(colors::TEXT_PRIMARY);

    visuals
}

fn widget(bg: Color32, stroke: Stroke, fg: Color32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: bg,
        bg_stroke: stroke,
        rounding: Rounding::same(WIDGET_ROUNDING),
        fg_stroke: Stroke::new(1.0, fg),
        expansion: 0.0,
    }
}

fn editor_widgets() -> Widgets {
    let border = Stroke::new(BORDER_WIDTH, colors::PANEL_BORDER);
    Widgets {
        noninteractive: widget(colors::PANEL_BG, border, colors::TEXT_MUTED),
        inactive: widget(colors::BUTTON_BG, border, colors::TEXT_PRIMARY),
        hovered: widget(
            colors::BUTTON_HOVER,
            Stroke::new(BORDER_WIDTH, colors::ACCENT),
            colors::TEXT_PRIMARY,
        ),
        active: widget(colors::BUTTON_ACTIVE, Stroke::new(2.0, colors::ACCENT), colors::TEXT_PRIMARY),
        open: widget(colors::BUTTON_ACTIVE, border, colors::TEXT_PRIMARY),
    }
}

/// Frame of the top toolbar panel
pub fn toolbar_frame() -> Frame {
    Frame::none()
        .fill(colors::PANEL_BG)
        .stroke(Stroke::new(BORDER_WIDTH, colors::PANEL_BORDER))
        .inner_margin(Margin::symmetric(16.0, 0.0))
}

pub fn editor_style() -> Style {
    let mut style = Style::default();
    style.visuals = editor_visuals();
    style.spacing.item_spacing = egui::vec2(12.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style
}
