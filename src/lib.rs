//! dicemath evaluates arithmetic equations written as flat byte strings,
//! including the tabletop dice operator `NdM` (roll N dice of M sides each
//! and sum them), parentheses, and unary negation.
//!
//! Precedence from loosest to tightest is addition/subtraction,
//! multiplication, then dice rolls. A value sitting directly against a
//! parenthesized group multiplies it, so `7(1d4-1)` means `7 * (1d4-1)`,
//! and a roll with no left operand rolls one die, so `d6` means `1d6`.
//!
//! ```
//! use dicemath::evaluate;
//!
//! assert_eq!(Ok(60), evaluate(b"(10 + 5)*4"));
//!
//! let value = evaluate(b"2d6 + 3").unwrap();
//! assert!(value >= 5 && value <= 15);
//! ```

pub mod error;
pub mod operator;
pub mod phrase;
pub mod roll;
pub mod term;

pub use error::{EvalError, SyntaxError};
pub use phrase::Phrase;
pub use roll::{DieRoller, RngDieRoller, SequentialDieRoller};

/// Evaluate an equation, rolling any dice with the thread-local random
/// generator.
pub fn evaluate(equation: &[u8]) -> Result<i64, EvalError> {
    Phrase::new(equation).evaluate()
}

/// Evaluate an equation with a caller-supplied die roller, so dice results
/// can be made deterministic.
pub fn evaluate_with<R: DieRoller>(equation: &[u8], roller: &mut R) -> Result<i64, EvalError> {
    Phrase::new(equation).evaluate_with(roller)
}
