pub mod tip_state;

pub use tip_state::TipCalculatorState;
