use gpui::{
    AppContext, Context, Div, Entity, FontWeight, IntoElement, ParentElement, Render, SharedString,
    Styled, Subscription, Window, div, px, red,
};
use gpui_component::{
    h_flex,
    input::{Input, InputEvent, InputState, MaskPattern},
    switch::Switch,
    v_flex,
};
use tip_core::TipCalculatorState;
use tracing::debug;

use crate::components::make_labeled_row;

/// The calculator screen: two inputs, the round-up switch, and the result.
pub struct TipCalculatorForm {
    state: TipCalculatorState,
    bill_amount: Entity<InputState>,
    tip_percentage: Entity<InputState>,
    _subscriptions: Vec<Subscription>,
}

impl TipCalculatorForm {
    pub fn new(
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let bill_amount = make_decimal_input("Bill Amount", 2, window, cx);
        let tip_percentage = make_decimal_input("Tip Percentage", 4, window, cx);

        let _subscriptions = vec![
            cx.subscribe_in(&bill_amount, window, Self::on_bill_amount_event),
            cx.subscribe_in(&tip_percentage, window, Self::on_tip_percentage_event),
        ];

        Self {
            state: TipCalculatorState::new(),
            bill_amount,
            tip_percentage,
            _subscriptions,
        }
    }

    pub fn state(&self) -> &TipCalculatorState {
        &self.state
    }

    fn on_bill_amount_event(
        &mut self,
        input: &Entity<InputState>,
        event: &InputEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if matches!(event, InputEvent::Change) {
            let text = input.read(cx).value().to_string();
            self.state.set_bill_amount(text);
            debug!(state = %self.state, "bill amount changed");
            cx.notify();
        }
    }

    fn on_tip_percentage_event(
        &mut self,
        input: &Entity<InputState>,
        event: &InputEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if matches!(event, InputEvent::Change) {
            let text = input.read(cx).value().to_string();
            self.state.set_tip_percentage(text);
            debug!(state = %self.state, "tip percentage changed");
            cx.notify();
        }
    }

    fn on_round_up_toggled(
        &mut self,
        checked: bool,
        cx: &mut Context<Self>,
    ) {
        if self.state.set_round_up(checked) {
            debug!(state = %self.state, "round up toggled");
        }
        // Re-render either way so a refused toggle snaps back.
        cx.notify();
    }
}

impl Render for TipCalculatorForm {
    fn render(
        &mut self,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let validation = self
            .state
            .validation_message()
            .map(|message| div().text_color(red()).child(message));

        v_flex()
            .w_full()
            .px(px(32.))
            .gap_4()
            .child(div().pb(px(16.)).child("Calculate Tip"))
            .child(make_input_row(&self.bill_amount, "Bill Amount: $"))
            .child(make_input_row(&self.tip_percentage, "Tip Percentage: %"))
            .child(
                h_flex()
                    .w_full()
                    .py(px(16.))
                    .items_center()
                    .justify_between()
                    .child("Round up tip?")
                    .child(
                        Switch::new("round-up-tip")
                            .checked(self.state.round_up())
                            .on_click(cx.listener(|this, checked: &bool, _, cx| {
                                this.on_round_up_toggled(*checked, cx)
                            })),
                    ),
            )
            .child(
                div()
                    .pt(px(16.))
                    .text_2xl()
                    .font_weight(FontWeight::BOLD)
                    .child(format!("Tip Amount: ${}", self.state.tip_amount())),
            )
            .children(validation)
    }
}

fn make_decimal_input(
    placeholder: impl Into<SharedString>,
    fraction_digits: usize,
    window: &mut Window,
    cx: &mut Context<TipCalculatorForm>,
) -> Entity<InputState> {
    let pattern = MaskPattern::Number {
        separator: Some(','),
        fraction: Some(fraction_digits),
    };

    cx.new(|closure_cx| {
        InputState::new(window, closure_cx)
            .mask_pattern(pattern)
            .placeholder(placeholder.into())
    })
}

fn make_input_row(
    state: &Entity<InputState>,
    label: impl Into<SharedString>,
) -> Div {
    make_labeled_row(label).child(Input::new(state).flex_grow())
}
