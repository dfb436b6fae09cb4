//! Account number allocation
//!
//! Account numbers are ten-digit strings drawn from a generator owned by the
//! registry. The generator is injected so deterministic sequences can stand
//! in for randomness where reproducibility matters.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Account number length (10 digits)
pub const ACCOUNT_NUMBER_LEN: usize = 10;

/// Error returned when an account number has the wrong shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Account number must be exactly {ACCOUNT_NUMBER_LEN} digits (got {0:?})")]
pub struct InvalidAccountNumber(pub String);

/// A ten-digit account number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountNumber(String);

impl AccountNumber {
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidAccountNumber> {
        let raw = raw.into();
        if raw.len() != ACCOUNT_NUMBER_LEN || !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidAccountNumber(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AccountNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountNumber {
    type Err = InvalidAccountNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountNumber::new(s)
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = InvalidAccountNumber;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AccountNumber::new(value)
    }
}

impl From<AccountNumber> for String {
    fn from(number: AccountNumber) -> Self {
        number.0
    }
}

/// Source of fresh account numbers.
///
/// The registry draws candidates and retries on collision, so implementations
/// do not need to track which numbers are already in use.
pub trait AccountNumberGenerator {
    fn next_number(&mut self) -> AccountNumber;
}

/// Uniformly random account numbers.
#[derive(Debug)]
pub struct RandomAccountNumbers {
    rng: StdRng,
}

impl RandomAccountNumbers {
    /// Generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generator with a fixed seed; the drawn sequence is reproducible.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl AccountNumberGenerator for RandomAccountNumbers {
    fn next_number(&mut self) -> AccountNumber {
        let digits: String = (0..ACCOUNT_NUMBER_LEN)
            .map(|_| char::from(self.rng.gen_range(b'0'..=b'9')))
            .collect();
        AccountNumber(digits)
    }
}

/// Zero-padded sequential account numbers.
#[derive(Debug)]
pub struct SequentialAccountNumbers {
    next: u64,
}

impl SequentialAccountNumbers {
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialAccountNumbers {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl AccountNumberGenerator for SequentialAccountNumbers {
    fn next_number(&mut self) -> AccountNumber {
        let number = AccountNumber(format!("{:010}", self.next % 10_000_000_000));
        self.next = self.next.wrapping_add(1);
        number
    }
}
