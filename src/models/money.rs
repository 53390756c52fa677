//! Amount type for representing currency values
//!
//! Budgets are derived as percentages of income, so intermediate values are
//! fractional and stored as `f64`. Anything whose magnitude is below half a
//! cent is display noise from floating-point subtraction and is treated as
//! zero by every formatting path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Magnitude below which an amount renders as zero.
pub const ZERO_TOLERANCE: f64 = 0.005;

/// Represents a monetary amount in the single local currency
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount from a decimal value
    ///
    /// # Examples
    /// ```
    /// use budget_tracker::models::Amount;
    /// let amount = Amount::new(10.5);
    /// assert_eq!(amount.value(), 10.5);
    /// assert_eq!(Amount::new(f64::NAN).value(), 0.0);
    /// ```
    ///
    /// Non-finite values become zero; they cannot be stored as JSON.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value)
        } else {
            Self(0.0)
        }
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Get the raw decimal value
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Check if the amount is zero within display tolerance
    pub fn is_zero(&self) -> bool {
        !self.0.is_finite() || self.0.abs() < ZERO_TOLERANCE
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Check if the amount is negative beyond display tolerance
    pub fn is_negative(&self) -> bool {
        self.0 <= -ZERO_TOLERANCE
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// The share of this amount given by a percentage (0-100)
    pub fn percent(&self, percentage: f64) -> Self {
        Self(self.0 * (percentage / 100.0))
    }

    /// Collapse sub-cent noise to an exact zero
    pub fn clamped(&self) -> Self {
        if self.is_zero() {
            Self::zero()
        } else {
            *self
        }
    }

    /// Parse an amount typed by the user
    ///
    /// Accepts "10.50", "10,50", "-10.50", "R$ 10,50" and whole numbers.
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped.trim_start())
        } else {
            (false, s)
        };

        let s = s.strip_prefix("R$").unwrap_or(s).trim();
        let normalized = s.replace(',', ".");

        let value: f64 = normalized
            .parse()
            .map_err(|_| AmountParseError::InvalidFormat(s.to_string()))?;
        if !value.is_finite() {
            return Err(AmountParseError::InvalidFormat(s.to_string()));
        }

        Ok(Self(if negative { -value } else { value }))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", CurrencyFormat::default().format(*self))
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, m| acc + *m)
    }
}

/// Locale conventions used to render amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Currency symbol placed before the number
    pub symbol: String,
    /// Separator between whole and fractional part
    pub decimal_separator: char,
    /// Separator between groups of three whole digits
    pub grouping_separator: char,
    /// Whether a space sits between the symbol and the number
    #[serde(default = "default_symbol_spacing")]
    pub symbol_spacing: bool,
}

fn default_symbol_spacing() -> bool {
    true
}

impl Default for CurrencyFormat {
    /// Brazilian real, as rendered by the pt-BR locale
    fn default() -> Self {
        Self {
            symbol: "R$".to_string(),
            decimal_separator: ',',
            grouping_separator: '.',
            symbol_spacing: true,
        }
    }
}

impl CurrencyFormat {
    /// Render an amount with two decimals and grouped thousands
    ///
    /// Non-finite values and anything below half a cent render as zero, so
    /// `-0.001` never shows up as a negative zero.
    pub fn format(&self, amount: Amount) -> String {
        let amount = amount.clamped();
        let cents = (amount.value().abs() * 100.0).round() as i64;
        let whole = cents / 100;
        let fraction = cents % 100;

        let sign = if amount.value() < 0.0 && cents > 0 {
            "-"
        } else {
            ""
        };
        let space = if self.symbol_spacing { " " } else { "" };

        format!(
            "{}{}{}{}{}{:02}",
            sign,
            self.symbol,
            space,
            self.group_digits(whole),
            self.decimal_separator,
            fraction
        )
    }

    /// Render a bare number with two decimals (no symbol, no grouping)
    ///
    /// Used for editable cells; zero and negative values render empty.
    pub fn format_input(&self, amount: Amount) -> String {
        if amount.value() > 0.0 {
            format!("{:.2}", amount.value()).replace('.', &self.decimal_separator.to_string())
        } else {
            String::new()
        }
    }

    fn group_digits(&self, whole: i64) -> String {
        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(self.grouping_separator);
            }
            grouped.push(ch);
        }
        grouped
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
