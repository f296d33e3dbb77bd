use crate::error::EvalError;
use crate::operator::Operator;
use crate::roll::DieRoller;
use std::fmt;

/// One reduced unit of an expression: a value, and the operator that will
/// combine it with the term to its right. A term whose operator is
/// [`Operator::None`] is a terminal value awaiting no further combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    pub operand: i64,
    pub operator: Operator,
}

impl Term {
    pub fn new(operand: i64, operator: Operator) -> Term {
        Term { operand, operator }
    }

    /// Build a term from an operator's default operand, for operators that
    /// appear with no explicit left operand (a bare `d6` becomes `1d6`).
    pub fn defaulted(operator: Operator) -> Result<Term, EvalError> {
        let operand = operator.default_operand()?;
        Ok(Term { operand, operator })
    }

    /// Determines if the order of this term is greater than or equal to the
    /// one passed. Left-associative for equal precedence.
    pub fn precedes(&self, other: &Term) -> bool {
        self.operator.order() >= other.operator.order()
    }

    /// Evaluate two terms into a new Term carrying the calculated value and
    /// the `other` term's operator, so the result can continue the chain.
    pub fn eval<R: DieRoller>(&self, other: &Term, roller: &mut R) -> Result<Term, EvalError> {
        let operand = self
            .operator
            .evaluate(self.operand, other.operand, roller)?;
        Ok(Term {
            operand,
            operator: other.operator,
        })
    }

    /// The evaluated value of this term alone. Errors unless the term's
    /// operator is the identity.
    pub fn value(&self) -> Result<i64, EvalError> {
        self.operator.value(self.operand)
    }

    /// The hierarchical order of the term's operator.
    pub fn order(&self) -> i32 {
        self.operator.order()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operand, self.operator)
    }
}

/// Reduce a list of terms to a single value by repeated pairwise
/// evaluation. An empty list reduces to 0.
pub fn reduce<R: DieRoller>(terms: &[Term], roller: &mut R) -> Result<i64, EvalError> {
    if terms.is_empty() {
        return Ok(0);
    }

    let mut terms = terms.to_vec();
    while terms.len() > 1 {
        terms = reduce_once(terms, roller)?;
    }

    terms[0].value()
}

/// One reduction step: collapse the highest-precedence adjacent pair
/// reachable from the front of the list, shrinking the list by one. A
/// pair reduces as soon as the left term's order is at least the right
/// term's; otherwise reduction defers into the tail first, which is what
/// lets higher-precedence operators absorb their right neighbor.
fn reduce_once<R: DieRoller>(mut terms: Vec<Term>, roller: &mut R) -> Result<Vec<Term>, EvalError> {
    match terms.len() {
        0 | 1 => Ok(terms),
        2 => Ok(vec![terms[0].eval(&terms[1], roller)?]),
        _ => {
            if terms[0].precedes(&terms[1]) {
                let head = terms[0].eval(&terms[1], roller)?;
                let mut reduced = Vec::with_capacity(terms.len() - 1);
                reduced.push(head);
                reduced.extend_from_slice(&terms[2..]);
                Ok(reduced)
            } else {
                let head = terms[0];
                let tail = reduce_once(terms.split_off(1), roller)?;
                let mut reduced = Vec::with_capacity(tail.len() + 1);
                reduced.push(head);
                reduced.extend(tail);
                Ok(reduced)
            }
        }
    }
}
