//! Selection codec
//!
//! Converts raw numbers, or a whitespace-separated line of them, into a
//! [`Selection`]. Every selection that enters the pool or is used as a
//! target goes through [`PickCodec`].

use thiserror::Error;

use crate::engines::core::packed::PickMask;
use crate::modules::config::LotteryConfig;

use super::selection::Selection;

/// Error type for rejected selections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("expected {expected} numbers, got {found}")]
    WrongFieldCount { expected: usize, found: usize },

    #[error("{0:?} is not a number")]
    NotANumber(String),

    #[error("number {number} out of lottery range [{min}, {max}]")]
    OutOfRange { number: i64, min: i64, max: i64 },

    #[error("number {0} picked more than once")]
    DuplicateNumber(i64),
}

/// Result type for codec operations
pub type SelectionResult<T> = Result<T, SelectionError>;

/// Validating encoder for one lottery configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickCodec {
    config: LotteryConfig,
}

impl PickCodec {
    /// Create a codec for the given lottery
    pub fn new(config: LotteryConfig) -> Self {
        Self { config }
    }

    /// Get the lottery configuration
    pub fn config(&self) -> &LotteryConfig {
        &self.config
    }

    /// Encode a sequence of numbers.
    ///
    /// Numbers are checked left to right and the first offending one decides
    /// the error.
    pub fn encode<S: Selection>(&self, numbers: &[i64]) -> SelectionResult<S> {
        self.check_count(numbers.len())?;

        let mut seen = PickMask::empty();
        for &number in numbers {
            self.check_number(number, &mut seen)?;
        }

        Ok(S::from_validated(numbers, &self.config))
    }

    /// Parse and encode a line of whitespace-separated numbers
    pub fn parse<S: Selection>(&self, line: &str) -> SelectionResult<S> {
        self.check_count(line.split_whitespace().count())?;

        let mut numbers = Vec::with_capacity(self.config.number_of_picks());
        let mut seen = PickMask::empty();

        for token in line.split_whitespace() {
            let number: i64 = token
                .parse()
                .map_err(|_| SelectionError::NotANumber(token.to_string()))?;
            self.check_number(number, &mut seen)?;
            numbers.push(number);
        }

        Ok(S::from_validated(&numbers, &self.config))
    }

    fn check_count(&self, found: usize) -> SelectionResult<()> {
        let expected = self.config.number_of_picks();
        if found != expected {
            return Err(SelectionError::WrongFieldCount { expected, found });
        }
        Ok(())
    }

    fn check_number(&self, number: i64, seen: &mut PickMask) -> SelectionResult<()> {
        if !self.config.contains(number) {
            return Err(SelectionError::OutOfRange {
                number,
                min: self.config.min_pick(),
                max: self.config.max_pick(),
            });
        }

        // The range fits in a mask, so it doubles as the set of seen numbers
        if !seen.insert(self.config.slot(number)) {
            return Err(SelectionError::DuplicateNumber(number));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::pick::selection::{BitSelection, SortedSelection};

    fn codec() -> PickCodec {
        PickCodec::new(LotteryConfig::default())
    }

    #[test]
    fn test_parse_valid_line() {
        let codec = codec();
        let bits: BitSelection = codec.parse("  5 4\t3 2 1 ").unwrap();
        let sorted: SortedSelection = codec.parse("5 4 3 2 1").unwrap();

        assert_eq!(bits.numbers(codec.config()), vec![1, 2, 3, 4, 5]);
        assert_eq!(sorted.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_wrong_field_count() {
        let codec = codec();

        let err = codec.parse::<BitSelection>("1 2 3 4").unwrap_err();
        assert_eq!(err, SelectionError::WrongFieldCount { expected: 5, found: 4 });

        let err = codec.parse::<BitSelection>("").unwrap_err();
        assert_eq!(err, SelectionError::WrongFieldCount { expected: 5, found: 0 });

        // The count is checked before any token is parsed
        let err = codec.parse::<BitSelection>("a b c d e f").unwrap_err();
        assert_eq!(err, SelectionError::WrongFieldCount { expected: 5, found: 6 });

        let err = codec.encode::<SortedSelection>(&[1, 2, 3]).unwrap_err();
        assert_eq!(err, SelectionError::WrongFieldCount { expected: 5, found: 3 });
    }

    #[test]
    fn test_not_a_number() {
        let err = codec().parse::<BitSelection>("1 2 x 4 5").unwrap_err();
        assert_eq!(err, SelectionError::NotANumber("x".to_string()));

        let err = codec().parse::<BitSelection>("1 2 3.5 4 5").unwrap_err();
        assert_eq!(err, SelectionError::NotANumber("3.5".to_string()));
    }

    #[test]
    fn test_out_of_range() {
        let err = codec().parse::<BitSelection>("1 2 3 4 91").unwrap_err();
        assert_eq!(
            err,
            SelectionError::OutOfRange {
                number: 91,
                min: 1,
                max: 90
            }
        );

        let err = codec().encode::<SortedSelection>(&[0, 1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, SelectionError::OutOfRange { number: 0, .. }));

        let err = codec().parse::<SortedSelection>("-1 2 3 4 5").unwrap_err();
        assert!(matches!(err, SelectionError::OutOfRange { number: -1, .. }));
    }

    #[test]
    fn test_duplicate_number() {
        let err = codec().parse::<BitSelection>("1 2 2 4 5").unwrap_err();
        assert_eq!(err, SelectionError::DuplicateNumber(2));

        let err = codec().encode::<SortedSelection>(&[7, 7, 7, 7, 7]).unwrap_err();
        assert_eq!(err, SelectionError::DuplicateNumber(7));
    }

    #[test]
    fn test_first_failing_token_wins() {
        // Out of range comes before the bad token
        let err = codec().parse::<BitSelection>("1 99 x 4 5").unwrap_err();
        assert!(matches!(err, SelectionError::OutOfRange { number: 99, .. }));

        let err = codec().parse::<BitSelection>("1 x 99 4 5").unwrap_err();
        assert_eq!(err, SelectionError::NotANumber("x".to_string()));
    }

    #[test]
    fn test_error_messages() {
        let err = SelectionError::WrongFieldCount { expected: 5, found: 4 };
        assert_eq!(err.to_string(), "expected 5 numbers, got 4");

        let err = SelectionError::NotANumber("x".to_string());
        assert_eq!(err.to_string(), "\"x\" is not a number");
    }
}
