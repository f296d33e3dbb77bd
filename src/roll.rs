use crate::error::EvalError;
use rand::prelude::*;

/// A source of single die rolls consumed by the roll operator.
pub trait DieRoller {
    ///Roll one die with the given number of sides, returning a value
    ///between 1 and `sides` inclusive.
    fn roll_number(&mut self, sides: i64) -> i64;
}

///A version of DieRoller that uses a rand::Rng to roll numbers.
pub struct RngDieRoller<R: Rng>(R);

impl<R: Rng> RngDieRoller<R> {
    pub fn new(rng: R) -> RngDieRoller<R> {
        RngDieRoller(rng)
    }
}

impl Default for RngDieRoller<ThreadRng> {
    fn default() -> Self {
        RngDieRoller(rand::thread_rng())
    }
}

impl<R: Rng> DieRoller for RngDieRoller<R> {
    fn roll_number(&mut self, sides: i64) -> i64 {
        self.0.gen_range(1..=sides)
    }
}

///Instead of being random, generate a series of numbers we have complete
///control over. Lets tests assert exact totals instead of ranges.
pub struct SequentialDieRoller {
    results: Vec<i64>,
    position: usize,
}

impl SequentialDieRoller {
    pub fn new(results: Vec<i64>) -> SequentialDieRoller {
        SequentialDieRoller {
            results,
            position: 0,
        }
    }
}

impl DieRoller for SequentialDieRoller {
    fn roll_number(&mut self, _sides: i64) -> i64 {
        let roll = self.results[self.position];
        self.position += 1;
        roll
    }
}

/// Roll `count` dice of `sides` sides each and sum the results. Both
/// parameters must be positive.
pub fn roll_dice<R: DieRoller>(count: i64, sides: i64, roller: &mut R) -> Result<i64, EvalError> {
    if count <= 0 || sides <= 0 {
        return Err(EvalError::BadRoll);
    }

    Ok((0..count).map(|_| roller.roll_number(sides)).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_roller_stays_in_range() {
        let mut roller = RngDieRoller::default();
        for _ in 0..100 {
            let roll = roller.roll_number(6);
            assert!(roll >= 1 && roll <= 6);
        }
    }

    #[test]
    fn dice_totals_stay_in_range() {
        let mut roller = RngDieRoller::default();
        for _ in 0..100 {
            let total = roll_dice(10, 6, &mut roller).expect("roll failed");
            assert!(total >= 10 && total <= 60);
        }
    }

    #[test]
    fn sequential_roller_gives_exact_total() {
        let mut roller = SequentialDieRoller::new(vec![3, 5, 1]);
        assert_eq!(Ok(9), roll_dice(3, 6, &mut roller));
    }

    #[test]
    fn nonpositive_parameters_are_rejected() {
        let mut roller = SequentialDieRoller::new(vec![]);
        assert_eq!(Err(EvalError::BadRoll), roll_dice(0, 6, &mut roller));
        assert_eq!(Err(EvalError::BadRoll), roll_dice(2, 0, &mut roller));
        assert_eq!(Err(EvalError::BadRoll), roll_dice(-1, 6, &mut roller));
        assert_eq!(Err(EvalError::BadRoll), roll_dice(2, -4, &mut roller));
    }
}
