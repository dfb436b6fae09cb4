//! Money types
//!
//! Domain primitives for monetary values with business rule validation.
//! All values are validated at construction time, ensuring invalid values
//! cannot exist in the ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum representable balance (1 trillion)
const MAX_BALANCE: &str = "1000000000000";

/// Maximum decimal places (8)
const MAX_SCALE: u32 = 8;

/// Tolerance for balance comparisons against zero.
pub fn epsilon() -> Decimal {
    Decimal::new(1, 12)
}

/// Largest balance the ledger will represent.
pub fn max_balance() -> Decimal {
    Decimal::from_str(MAX_BALANCE).expect("Invalid MAX_BALANCE constant")
}

/// Amount represents a validated operation value.
///
/// # Invariants
/// - Value is always positive (> 0)
/// - Maximum 8 decimal places
/// - Maximum value is 1 trillion
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use bank_ledger::domain::Amount;
///
/// let amount = Amount::new(Decimal::new(100, 0)).unwrap();
/// assert_eq!(amount.value(), Decimal::new(100, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(Decimal);

/// Errors that can occur when creating an Amount or Balance
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("Amount must be positive (got {0})")]
    NotPositive(Decimal),

    #[error("Amount has too many decimal places (max {MAX_SCALE}, got {0})")]
    TooManyDecimals(u32),

    #[error("Amount exceeds the ledger maximum ({MAX_BALANCE})")]
    Overflow,

    #[error("Invalid amount format: {0}")]
    ParseError(String),
}

impl Amount {
    /// Create a new Amount with validation.
    ///
    /// # Errors
    /// - `MoneyError::NotPositive` if value <= 0
    /// - `MoneyError::TooManyDecimals` if more than 8 decimal places
    /// - `MoneyError::Overflow` if value > 1 trillion
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        // Rule 1: Must be positive
        if value <= Decimal::ZERO {
            return Err(MoneyError::NotPositive(value));
        }

        // Rule 2: Maximum 8 decimal places
        if value.scale() > MAX_SCALE {
            return Err(MoneyError::TooManyDecimals(value.scale()));
        }

        // Rule 3: Maximum 1 trillion
        if value > max_balance() {
            return Err(MoneyError::Overflow);
        }

        Ok(Self(value))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.8}", self.0)
    }
}

impl FromStr for Amount {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s).map_err(|e| MoneyError::ParseError(e.to_string()))?;
        Amount::new(decimal)
    }
}

impl TryFrom<String> for Amount {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Amount::from_str(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        format!("{:.8}", amount.0)
    }
}

/// Balance represents an account balance (zero or positive).
/// Unlike Amount, Balance can be zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance(Decimal);

impl Balance {
    /// Create a new balance (zero or positive)
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value < Decimal::ZERO {
            return Err(MoneyError::NotPositive(value));
        }

        if value > max_balance() {
            return Err(MoneyError::Overflow);
        }

        Ok(Self(value))
    }

    /// Create a zero balance
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying value
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Check whether the balance covers a debit, within tolerance.
    pub fn is_sufficient_for(&self, amount: &Amount) -> bool {
        self.0 + epsilon() >= amount.value()
    }

    /// Check whether the balance is zero, within tolerance.
    pub fn is_near_zero(&self) -> bool {
        self.0.abs() <= epsilon()
    }

    /// Add amount to balance
    pub fn credit(&self, amount: &Amount) -> Result<Balance, MoneyError> {
        let new_value = self.0 + amount.value();
        Balance::new(new_value)
    }

    /// Subtract amount from balance
    pub fn debit(&self, amount: &Amount) -> Result<Balance, MoneyError> {
        let new_value = self.0 - amount.value();
        Balance::new(new_value)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.8}", self.0)
    }
}

impl Default for Balance {
    fn default() -> Self {
        Self::zero()
    }
}
