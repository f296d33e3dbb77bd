use crate::error::{EvalError, SyntaxError};
use crate::operator::Operator;
use crate::roll::{DieRoller, RngDieRoller};
use crate::term::{self, Term};

/// A raw equation and its recursive evaluator.
///
/// The evaluator scans the bytes left to right, growing a list of [`Term`]s
/// and recursing for parenthesized groups, then reduces the list to a
/// single value. Recursion depth equals parenthesis nesting depth; there is
/// no artificial limit.
pub struct Phrase<'a> {
    equation: &'a [u8],
}

impl<'a> Phrase<'a> {
    pub fn new(equation: &'a [u8]) -> Phrase<'a> {
        Phrase { equation }
    }

    /// Evaluate the equation, rolling any dice with the thread-local
    /// random generator.
    pub fn evaluate(&self) -> Result<i64, EvalError> {
        self.evaluate_with(&mut RngDieRoller::default())
    }

    /// Evaluate the equation, rolling any dice with the given roller.
    pub fn evaluate_with<R: DieRoller>(&self, roller: &mut R) -> Result<i64, EvalError> {
        let (value, _) = self.eval_group(0, true, roller)?;
        Ok(value)
    }

    /// Scan and evaluate one group of terms starting at `start`, stopping
    /// at end of input or at the `)` matching a group opened here. Returns
    /// the group's value and the index to resume scanning from.
    ///
    /// A group "owns" its opening paren only when that paren is the first
    /// byte a fresh recursive call sees; in every other position a `(`
    /// starts a nested group, evaluated by recursing. Scan state is the
    /// term list plus three flags: whether this call owns an open paren,
    /// whether the last term came from an operator default (a bare `d`),
    /// and whether a unary minus is awaiting its operand.
    fn eval_group<R: DieRoller>(
        &self,
        start: usize,
        top: bool,
        roller: &mut R,
    ) -> Result<(i64, usize), EvalError> {
        let eq = self.equation;
        let mut terms: Vec<Term> = Vec::new();
        let mut open = false;
        let mut defaulted = false;
        let mut negative = false;
        let mut i = start;

        while i < eq.len() {
            let c = eq[i];

            if c.is_ascii_whitespace() {
                i += 1;
            } else if c == b'(' {
                if top || open || !terms.is_empty() {
                    let (value, next) = self.eval_group(i, false, roller)?;
                    let value = if negative { -value } else { value };
                    negative = false;

                    // no operator in front of the group implies a multiply
                    if let Some(last) = terms.last_mut() {
                        if last.operator == Operator::None {
                            last.operator = Operator::Mult;
                        }
                    }

                    terms.push(Term::new(value, Operator::None));
                    defaulted = false;
                    i = next;
                } else {
                    open = true;
                    i += 1;
                }
            } else if c == b')' {
                if !open {
                    return Err(SyntaxError::MissingOpenParen(i).into());
                }
                open = false;
                i += 1;
                break;
            } else if let Some(op) = Operator::from_byte(c) {
                match terms.last_mut() {
                    Some(last) if last.operator == Operator::None => {
                        last.operator = op;
                    }
                    _ => {
                        // Nothing for the operator to attach to: either a
                        // unary minus, a defaulted prefix operator, or a
                        // syntax error.
                        if op == Operator::Sub && !negative && !defaulted {
                            negative = true;
                        } else if !defaulted {
                            let term = Term::defaulted(op)
                                .map_err(|_| SyntaxError::MissingOperator(i))?;
                            terms.push(term);
                            defaulted = true;
                        } else {
                            return Err(SyntaxError::MissingOperator(i).into());
                        }
                    }
                }
                i += 1;
            } else if c.is_ascii_digit() {
                if matches!(terms.last(), Some(last) if last.operator == Operator::None) {
                    return Err(SyntaxError::MissingOperator(i).into());
                }

                let (value, next) = self.scan_number(i)?;
                let value = if negative { -value } else { value };
                negative = false;

                terms.push(Term::new(value, Operator::None));
                defaulted = false;
                i = next;
            } else {
                return Err(SyntaxError::UnknownOperator(i, c as char).into());
            }
        }

        if open {
            return Err(SyntaxError::MissingCloseParen.into());
        }

        if terms.is_empty() {
            return Err(SyntaxError::NoData.into());
        }

        if let Some(last) = terms.last() {
            if last.operator != Operator::None {
                return Err(SyntaxError::MissingOperand.into());
            }
        }

        let value = term::reduce(&terms, roller)?;
        Ok((value, i))
    }

    /// Scan the maximal run of digit bytes starting at `start` and parse it
    /// as an integer. The sign is never part of the run; unary minus is
    /// handled by the scan state.
    fn scan_number(&self, start: usize) -> Result<(i64, usize), SyntaxError> {
        let eq = self.equation;
        let mut end = start;
        while end < eq.len() && eq[end].is_ascii_digit() {
            end += 1;
        }

        let digits = String::from_utf8_lossy(&eq[start..end]);
        let value = digits
            .parse::<i64>()
            .map_err(|_| SyntaxError::BadNumber(start, digits.to_string()))?;

        Ok((value, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::SequentialDieRoller;

    fn eval(equation: &str) -> Result<i64, EvalError> {
        Phrase::new(equation.as_bytes()).evaluate()
    }

    fn eval_rolls(equation: &str, rolls: Vec<i64>) -> Result<i64, EvalError> {
        let mut roller = SequentialDieRoller::new(rolls);
        Phrase::new(equation.as_bytes()).evaluate_with(&mut roller)
    }

    #[test]
    fn a_lone_number_is_itself() {
        assert_eq!(Ok(6), eval("  \t\t 6 "));
        assert_eq!(Ok(42), eval("42"));
    }

    #[test]
    fn unary_minus_negates() {
        assert_eq!(Ok(-6), eval("-       6"));
        assert_eq!(Ok(10), eval("6 - -4"));
        assert_eq!(Ok(10), eval("6--4"));
        assert_eq!(Ok(2), eval("6+-4"));
        assert_eq!(Ok(-5), eval("-(2+3)"));
    }

    #[test]
    fn one_unary_minus_per_operand() {
        assert_eq!(
            Err(SyntaxError::MissingOperator(3).into()),
            eval("6---4")
        );
        assert_eq!(
            Err(SyntaxError::MissingOperator(1).into()),
            eval("--4")
        );
    }

    #[test]
    fn multiplication_binds_tighter() {
        assert_eq!(Ok(-10), eval("2-3*4"));
        assert_eq!(Ok(2), eval("2*3-4"));
    }

    #[test]
    fn equal_precedence_combines_left_to_right() {
        assert_eq!(Ok(4), eval("2-3+5"));
        assert_eq!(Ok(9), eval("10-4+3"));
    }

    #[test]
    fn parentheses_group() {
        assert_eq!(Ok(60), eval("(10 + 5)*4"));
        assert_eq!(Ok(14), eval("2*(3+4)"));
        assert_eq!(Ok(9), eval("((2+1))*3"));
    }

    #[test]
    fn adjacent_group_implies_multiplication() {
        assert_eq!(Ok(14), eval("7(1+1)"));
        assert_eq!(Ok(12), eval("(1+1)(2+4)"));
        assert_eq!(Ok(-14), eval("-7(2)"));
    }

    #[test]
    fn rolls_stay_in_bounds() {
        for _ in 0..100 {
            let value = eval("d6").expect("roll failed");
            assert!(value >= 1 && value <= 6);

            let value = eval("10d6").expect("roll failed");
            assert!(value >= 10 && value <= 60);

            let value = eval("10d5 + 7(1d4-1)").expect("roll failed");
            assert!(value >= 10 && value <= 71);
        }
    }

    #[test]
    fn rolls_use_the_supplied_roller() {
        assert_eq!(Ok(4), eval_rolls("d6", vec![4]));
        assert_eq!(Ok(9), eval_rolls("2d6+1", vec![3, 5]));
        assert_eq!(Ok(0), eval_rolls("7(1d4-1)", vec![1]));
        assert_eq!(Ok(21), eval_rolls("7(1d4-1)", vec![4]));
        assert_eq!(Ok(2), eval_rolls("1d(2+1)", vec![2]));
    }

    #[test]
    fn case_insensitive_roll_operator() {
        assert_eq!(Ok(5), eval_rolls("2D4", vec![2, 3]));
    }

    #[test]
    fn bad_dice_parameters_fail() {
        assert_eq!(Err(EvalError::BadRoll), eval("0d6"));
        assert_eq!(Err(EvalError::BadRoll), eval("2d(1-1)"));
    }

    #[test]
    fn trailing_operator_is_missing_an_operand() {
        assert_eq!(Err(SyntaxError::MissingOperand.into()), eval("6+4-"));
        assert_eq!(Err(SyntaxError::MissingOperand.into()), eval("6*"));
    }

    #[test]
    fn doubled_operators_fail() {
        assert_eq!(
            Err(SyntaxError::MissingOperator(2).into()),
            eval("6++4")
        );
        assert_eq!(
            Err(SyntaxError::MissingOperator(2).into()),
            eval("6*+4")
        );
    }

    #[test]
    fn adjacent_operands_need_an_operator() {
        assert_eq!(
            Err(SyntaxError::MissingOperator(2).into()),
            eval("6 7")
        );
        assert_eq!(
            Err(SyntaxError::MissingOperator(3).into()),
            eval("(2)3")
        );
    }

    #[test]
    fn unmatched_parens_fail() {
        assert_eq!(
            Err(SyntaxError::MissingOpenParen(3).into()),
            eval("2+3)")
        );
        assert_eq!(Err(SyntaxError::MissingCloseParen.into()), eval("(2+3"));
        assert_eq!(Err(SyntaxError::MissingCloseParen.into()), eval("((2)"));
    }

    #[test]
    fn unknown_characters_are_reported_with_their_index() {
        assert_eq!(
            Err(SyntaxError::UnknownOperator(2, '&').into()),
            eval("6 & 4")
        );
        assert_eq!(
            Err(SyntaxError::UnknownOperator(1, 'a').into()),
            eval("6a")
        );
        assert_eq!(
            Err(SyntaxError::UnknownOperator(0, 'G').into()),
            eval("G6")
        );
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(Err(SyntaxError::NoData.into()), eval(""));
        assert_eq!(Err(SyntaxError::NoData.into()), eval("   \t "));
        assert_eq!(Err(SyntaxError::NoData.into()), eval("()"));
    }

    #[test]
    fn prefix_operators_without_a_default_fail() {
        assert_eq!(
            Err(SyntaxError::MissingOperator(0).into()),
            eval("+6")
        );
        assert_eq!(
            Err(SyntaxError::MissingOperator(1).into()),
            eval("(*6)")
        );
    }

    #[test]
    fn a_defaulted_roll_cannot_default_again() {
        assert_eq!(
            Err(SyntaxError::MissingOperator(1).into()),
            eval("dd6")
        );
    }

    #[test]
    fn numbers_too_large_to_parse_fail() {
        assert_eq!(
            Err(SyntaxError::BadNumber(0, "99999999999999999999".to_string()).into()),
            eval("99999999999999999999")
        );
    }

    #[test]
    fn deterministic_expressions_are_idempotent() {
        let first = eval("2*(3+4)-5");
        assert_eq!(Ok(9), first);
        for _ in 0..10 {
            assert_eq!(first, eval("2*(3+4)-5"));
        }
    }
}
