use thiserror::Error;

/// A failure to make sense of the input text. Variants that point at a
/// specific byte carry its 0-based index in the equation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("char {0}: missing '('")]
    MissingOpenParen(usize),

    #[error("char {0}: missing operator")]
    MissingOperator(usize),

    #[error("missing operand")]
    MissingOperand,

    #[error("char {0}: unknown operator '{1}'")]
    UnknownOperator(usize, char),

    #[error("char {0}: bad number '{1}'")]
    BadNumber(usize, String),

    #[error("no data to evaluate")]
    NoData,

    #[error("missing ')'")]
    MissingCloseParen,
}

/// Any error that can come out of evaluating an equation, whether from
/// scanning the text or from applying an operator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("operation not supported")]
    NotSupported,

    #[error("roll can only support values greater than 0")]
    BadRoll,
}

impl EvalError {
    /// True if the error came from scanning the equation text, as opposed
    /// to an operator rejecting its operands.
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, EvalError::Syntax(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_carry_character_index() {
        assert_eq!(
            SyntaxError::MissingOpenParen(3).to_string(),
            "char 3: missing '('"
        );
        assert_eq!(
            SyntaxError::UnknownOperator(7, '&').to_string(),
            "char 7: unknown operator '&'"
        );
    }

    #[test]
    fn eval_error_wraps_syntax_error() {
        let err = EvalError::from(SyntaxError::NoData);
        assert!(err.is_syntax_error());
        assert_eq!(err.to_string(), "syntax error: no data to evaluate");
        assert!(!EvalError::BadRoll.is_syntax_error());
    }
}
