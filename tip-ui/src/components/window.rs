use gpui::{
    App, AppContext, Context, Entity, IntoElement, ParentElement, Render, Styled, Subscription,
    Window,
};
use gpui_component::v_flex;
use tracing::info;

use crate::{Quit, components::TipCalculatorForm, quit};

/// Linux desktops keep an app alive after its last window closes; elsewhere
/// closing the calculator ends the process.
const QUIT_ON_CLOSE: bool = !cfg!(target_os = "linux");

/// Root view of the calculator window. Owns the form for the window's lifetime.
pub struct CalculatorWindow {
    form: Entity<TipCalculatorForm>,
    _window_close_subscription: Subscription,
}

impl CalculatorWindow {
    pub fn new(
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let form = cx.new(|form_cx| TipCalculatorForm::new(window, form_cx));

        let last_form = form.downgrade();
        let subscription = cx.on_window_closed(move |cx: &mut App| {
            match last_form.upgrade() {
                Some(form) => info!(state = %form.read(cx).state(), "Calculator closed"),
                None => info!("Calculator closed"),
            }
            if QUIT_ON_CLOSE {
                quit(&Quit, cx);
            }
        });

        Self {
            form,
            _window_close_subscription: subscription,
        }
    }
}

impl Render for CalculatorWindow {
    fn render(
        &mut self,
        _: &mut Window,
        _cx: &mut Context<Self>,
    ) -> impl IntoElement {
        v_flex()
            .size_full()
            .p_5()
            .items_center()
            .justify_center()
            .child(self.form.clone())
    }
}
