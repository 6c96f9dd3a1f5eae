//! State held by the tip calculator screen.
//!
//! The screen owns one [`TipCalculatorState`] for its lifetime. Every input
//! callback goes through a setter here, and every setter recomputes the tip,
//! so `tip_amount` never drifts from the inputs that produced it.

use std::fmt;

use tracing::{debug, warn};

use crate::calculations::common::{ZERO_TIP, is_unset};
use crate::calculations::{TipError, compute};

/// Inputs and derived tip for the calculator screen.
///
/// Fields are read-only from outside; use the setters so the tip is
/// recalculated on each change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipCalculatorState {
    bill_amount: String,
    tip_percentage: String,
    round_up: bool,
    tip_amount: String,
    validation: Option<TipError>,
}

impl Default for TipCalculatorState {
    fn default() -> Self {
        Self {
            bill_amount: String::new(),
            tip_percentage: String::new(),
            round_up: false,
            tip_amount: ZERO_TIP.to_string(),
            validation: None,
        }
    }
}

impl TipCalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bill_amount(&self) -> &str {
        &self.bill_amount
    }

    pub fn tip_percentage(&self) -> &str {
        &self.tip_percentage
    }

    pub fn round_up(&self) -> bool {
        self.round_up
    }

    /// The tip as it should be displayed.
    pub fn tip_amount(&self) -> &str {
        &self.tip_amount
    }

    /// The last calculation error, if the current inputs are invalid.
    pub fn validation(&self) -> Option<&TipError> {
        self.validation.as_ref()
    }

    /// The last calculation error formatted for display.
    pub fn validation_message(&self) -> Option<String> {
        self.validation.as_ref().map(ToString::to_string)
    }

    /// Returns `true` when both the bill and the percentage are entered.
    pub fn has_inputs(&self) -> bool {
        !is_unset(&self.bill_amount) && !is_unset(&self.tip_percentage)
    }

    pub fn set_bill_amount(
        &mut self,
        text: impl Into<String>,
    ) {
        self.bill_amount = text.into();
        self.recompute();
    }

    pub fn set_tip_percentage(
        &mut self,
        text: impl Into<String>,
    ) {
        self.tip_percentage = text.into();
        self.recompute();
    }

    /// Handles the round-up switch.
    ///
    /// The switch only moves once both inputs are entered; until then the
    /// request is ignored and `false` is returned. Returns `true` when the
    /// new flag was applied.
    pub fn set_round_up(
        &mut self,
        round_up: bool,
    ) -> bool {
        if !self.has_inputs() {
            debug!(round_up, "ignoring round-up toggle without inputs");
            return false;
        }
        self.round_up = round_up;
        self.recompute();
        true
    }

    /// Clears all inputs back to the screen's starting values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn recompute(&mut self) {
        match compute(&self.bill_amount, &self.tip_percentage, self.round_up) {
            Ok(outcome) => {
                self.tip_amount = outcome.tip_amount;
                self.round_up = outcome.round_up;
                self.validation = None;
            }
            Err(error) => {
                warn!(%error, "tip input is invalid");
                self.tip_amount = ZERO_TIP.to_string();
                self.validation = Some(error);
            }
        }
    }
}

impl fmt::Display for TipCalculatorState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Bill amount:    {}", self.bill_amount)?;
        writeln!(f, "Tip percentage: {}", self.tip_percentage)?;
        writeln!(f, "Round up:       {}", self.round_up)?;
        write!(f, "Tip amount:     {}", self.tip_amount)?;
        if let Some(error) = &self.validation {
            write!(f, "\nError:          {error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculations::TipField;

    fn filled(
        bill: &str,
        percent: &str,
    ) -> TipCalculatorState {
        let mut state = TipCalculatorState::new();
        state.set_bill_amount(bill);
        state.set_tip_percentage(percent);
        state
    }

    #[test]
    fn starts_with_defaults() {
        let state = TipCalculatorState::new();

        assert_eq!(state.bill_amount(), "");
        assert_eq!(state.tip_percentage(), "");
        assert!(!state.round_up());
        assert_eq!(state.tip_amount(), "0.00");
        assert_eq!(state.validation(), None);
    }

    #[test]
    fn entering_bill_alone_keeps_zero_tip() {
        let mut state = TipCalculatorState::new();
        state.set_bill_amount("50");

        assert_eq!(state.tip_amount(), "0.00");
    }

    #[test]
    fn entering_both_inputs_computes_tip() {
        let state = filled("50", "18");

        assert_eq!(state.tip_amount(), "9.0");
    }

    #[test]
    fn toggle_round_up_on_then_off() {
        let mut state = filled("33.33", "10");

        assert!(state.set_round_up(true));
        assert_eq!(state.tip_amount(), "4");

        assert!(state.set_round_up(false));
        assert_eq!(state.tip_amount(), "3.333");
        assert_eq!(state.bill_amount(), "33.33");
        assert_eq!(state.tip_percentage(), "10");
    }

    #[test]
    fn toggle_is_ignored_without_inputs() {
        let mut state = TipCalculatorState::new();
        state.set_bill_amount("50");

        assert!(!state.set_round_up(true));
        assert!(!state.round_up());
        assert_eq!(state.tip_amount(), "0.00");
    }

    #[test]
    fn clearing_an_input_resets_round_up() {
        let mut state = filled("50", "18");
        state.set_round_up(true);

        state.set_tip_percentage("");

        assert!(!state.round_up());
        assert_eq!(state.tip_amount(), "0.00");
    }

    #[test]
    fn round_up_applies_to_later_edits() {
        let mut state = filled("50", "18");
        state.set_round_up(true);

        state.set_bill_amount("33.33");
        state.set_tip_percentage("10");

        assert_eq!(state.tip_amount(), "4");
    }

    #[test]
    fn invalid_input_sets_validation_message() {
        let mut state = filled("50", "18");

        state.set_bill_amount("5o");

        assert_eq!(state.tip_amount(), "0.00");
        assert_eq!(
            state.validation(),
            Some(&TipError::InvalidInput {
                field: TipField::Bill,
                input: "5o".to_string(),
            })
        );
        assert_eq!(
            state.validation_message().as_deref(),
            Some("Bill amount must be a number, got '5o'")
        );
    }

    #[test]
    fn fixing_input_clears_validation_message() {
        let mut state = filled("5o", "18");

        state.set_bill_amount("50");

        assert_eq!(state.validation(), None);
        assert_eq!(state.tip_amount(), "9.0");
    }

    #[test]
    fn invalid_input_keeps_round_up() {
        let mut state = filled("50", "18");
        state.set_round_up(true);

        state.set_tip_percentage("x");

        assert!(state.round_up());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = filled("50", "18");
        state.set_round_up(true);

        state.reset();

        assert_eq!(state, TipCalculatorState::default());
    }

    #[test]
    fn display_lists_fields() {
        let state = filled("50", "18");

        assert_eq!(
            state.to_string(),
            "Bill amount:    50\n\
             Tip percentage: 18\n\
             Round up:       false\n\
             Tip amount:     9.0"
        );
    }
}
