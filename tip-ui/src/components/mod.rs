pub mod tip_form;
pub mod window;

use gpui::{Div, ParentElement, SharedString, Styled, TextAlign, div};
use gpui::{Pixels, Size, px};
use gpui_component::h_flex;

pub use tip_form::TipCalculatorForm;
pub use window::CalculatorWindow;

use crate::config::WindowSettings;

#[derive(Debug, Clone, Copy)]
pub struct WindowPreferences {
    pub size: Size<Pixels>,
}

impl Default for WindowPreferences {
    fn default() -> Self {
        WindowSettings::default().into()
    }
}

impl WindowPreferences {
    pub fn new(
        width: impl Into<Pixels>,
        height: impl Into<Pixels>,
    ) -> Self {
        Self {
            size: Size {
                width: width.into(),
                height: height.into(),
            },
        }
    }
}

impl From<WindowSettings> for WindowPreferences {
    fn from(settings: WindowSettings) -> Self {
        Self::new(px(settings.width), px(settings.height))
    }
}

/// Creates a row with a fixed-width, right-aligned label on the left.
///
/// Callers append the control the label describes.
pub fn make_labeled_row(label: impl Into<SharedString>) -> Div {
    h_flex()
        .items_center()
        .gap_5()
        .p(px(2.))
        .rounded_md()
        .border_1()
        .child(
            div()
                .min_w(px(130.))
                .text_align(TextAlign::Right)
                .child(label.into()),
        )
}
