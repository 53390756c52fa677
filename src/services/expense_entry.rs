//! Accumulating expense input
//!
//! Expense cells do not take absolute values. Typing `50` adds 50 to what is
//! already there and typing `- 20` takes 20 away, so a month's spending can
//! be entered receipt by receipt.

use crate::models::Amount;

/// One parsed expense input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpenseEntry {
    /// Add to the current value
    Add(Amount),
    /// Subtract from the current value (input written as `- x`)
    Subtract(Amount),
    /// Blank input: leave the value alone
    Blank,
    /// Unparsable input: leave the value alone
    Invalid,
}

impl ExpenseEntry {
    /// Parse raw user input
    ///
    /// A leading dash followed by a space marks a subtraction. Comma and dot
    /// are both accepted as the decimal separator.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return ExpenseEntry::Blank;
        }

        if let Some(rest) = input.strip_prefix("- ") {
            return match Amount::parse(rest) {
                Ok(amount) => ExpenseEntry::Subtract(amount),
                Err(_) => ExpenseEntry::Invalid,
            };
        }

        match Amount::parse(input) {
            Ok(amount) => ExpenseEntry::Add(amount),
            Err(_) => ExpenseEntry::Invalid,
        }
    }

    /// The value after applying this entry to `current`
    pub fn apply(&self, current: Amount) -> Amount {
        match self {
            ExpenseEntry::Add(amount) => current + *amount,
            ExpenseEntry::Subtract(amount) => current - *amount,
            ExpenseEntry::Blank | ExpenseEntry::Invalid => current,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, ExpenseEntry::Blank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(current: f64, input: &str) -> f64 {
        ExpenseEntry::parse(input).apply(Amount::new(current)).value()
    }

    #[test]
    fn test_plain_number_adds() {
        assert_eq!(apply(10.0, "50"), 60.0);
        assert_eq!(apply(0.0, "12,5"), 12.5);
        assert_eq!(apply(1.0, " 2.25 "), 3.25);
    }

    #[test]
    fn test_dash_space_subtracts() {
        assert_eq!(ExpenseEntry::parse("- 20"), ExpenseEntry::Subtract(Amount::new(20.0)));
        assert_eq!(apply(100.0, "- 20"), 80.0);
        assert_eq!(apply(10.0, "- 15,5"), -5.5);
    }

    #[test]
    fn test_negative_number_adds_a_negative() {
        assert_eq!(apply(100.0, "-30"), 70.0);
    }

    #[test]
    fn test_blank_and_invalid_keep_value() {
        assert!(ExpenseEntry::parse("   ").is_blank());
        assert_eq!(apply(42.0, ""), 42.0);
        assert_eq!(ExpenseEntry::parse("abc"), ExpenseEntry::Invalid);
        assert_eq!(apply(42.0, "abc"), 42.0);
        assert_eq!(apply(42.0, "- abc"), 42.0);
    }
}
