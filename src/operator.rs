use crate::error::EvalError;
use crate::roll::{self, DieRoller};
use std::fmt;

/// One of the supported arithmetic operators, or the identity for a bare
/// value that combines with nothing.
///
/// Operator behavior is split into three narrow capabilities
/// ([`default_operand`](Operator::default_operand),
/// [`value`](Operator::value) and [`evaluate`](Operator::evaluate)) rather
/// than one generic eval, because each operator supports exactly one or two
/// of them. Whichever capability an operator lacks fails with
/// [`EvalError::NotSupported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// A bare value awaiting no further combination.
    None,
    Add,
    Sub,
    Mult,
    /// The tabletop dice operator: `NdM` rolls N dice of M sides each and
    /// sums them.
    Roll,
}

impl Operator {
    /// Translate an input byte into its operator. `d` and `D` both mean a
    /// dice roll; any byte outside `+ - * d D` has no operator.
    pub fn from_byte(b: u8) -> Option<Operator> {
        match b {
            b'+' => Some(Operator::Add),
            b'-' => Some(Operator::Sub),
            b'*' => Some(Operator::Mult),
            b'd' | b'D' => Some(Operator::Roll),
            _ => None,
        }
    }

    /// True if the given byte can be translated into an operator.
    pub fn is_operator(b: u8) -> bool {
        Operator::from_byte(b).is_some()
    }

    /// The hierarchical order of the operator. Used purely for comparison
    /// when deciding which adjacent pair of terms reduces first.
    pub fn order(self) -> i32 {
        match self {
            Operator::None => 0,
            Operator::Add | Operator::Sub => 1,
            Operator::Mult => 2,
            Operator::Roll => 3,
        }
    }

    /// The implied left operand when the operator appears with no explicit
    /// one. Only a roll has a default: a bare `d6` means one d6.
    pub fn default_operand(self) -> Result<i64, EvalError> {
        match self {
            Operator::Roll => Ok(1),
            _ => Err(EvalError::NotSupported),
        }
    }

    /// A lone value evaluates to itself, which only makes sense for the
    /// identity operator.
    pub fn value(self, a: i64) -> Result<i64, EvalError> {
        match self {
            Operator::None => Ok(a),
            _ => Err(EvalError::NotSupported),
        }
    }

    /// Apply the operator to two operands. Rolls draw their dice from the
    /// given roller; the identity operator has no binary meaning.
    pub fn evaluate<R: DieRoller>(
        self,
        a: i64,
        b: i64,
        roller: &mut R,
    ) -> Result<i64, EvalError> {
        match self {
            Operator::None => Err(EvalError::NotSupported),
            Operator::Add => Ok(a + b),
            Operator::Sub => Ok(a - b),
            Operator::Mult => Ok(a * b),
            Operator::Roll => roll::roll_dice(a, b, roller),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::None => Ok(()),
            Operator::Add => write!(f, "+"),
            Operator::Sub => write!(f, "-"),
            Operator::Mult => write!(f, "*"),
            Operator::Roll => write!(f, "d"),
        }
    }
}
