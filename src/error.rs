//! Error handling module
//!
//! Centralized error type for every ledger operation. Domain validation
//! errors fold in transparently; the predicates classify errors the way
//! callers care about them: bad input, bad state or arithmetic limits.

use rust_decimal::Decimal;

use crate::domain::{DateError, MoneyError, ParseTransactionKindError, PersonError};
use crate::ledger::{InvalidAccountNumber, ParseAccountTypeError};

/// Ledger-wide Result type
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    // Validation errors from the domain layer
    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    Person(#[from] PersonError),

    #[error(transparent)]
    AccountNumber(#[from] InvalidAccountNumber),

    #[error(transparent)]
    AccountType(#[from] ParseAccountTypeError),

    #[error(transparent)]
    TransactionKind(#[from] ParseTransactionKindError),

    // Request validation
    #[error("Cannot transfer to the same account")]
    SameAccountTransfer,

    #[error("Holder identifier is not set")]
    MissingHolderId,

    #[error("Opening year must be {minimum} or later (got {year})")]
    OpeningYearTooEarly { year: i32, minimum: i32 },

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    // State preconditions
    #[error("Account {number} is closed")]
    AccountClosed { number: String },

    #[error("Account not found: {number}")]
    AccountNotFound { number: String },

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Account {number} still holds {balance}; balance must be zero to close")]
    BalanceNotZero { number: String, balance: Decimal },

    #[error("Holder already registered: {id}")]
    DuplicateHolder { id: String },

    #[error("Unknown holder: {id}")]
    UnknownHolder { id: String },

    #[error("Account {number} does not belong to holder {id}")]
    ForeignAccount { number: String, id: String },

    #[error("Could not allocate an unused account number after {attempts} attempts")]
    NumberSpaceExhausted { attempts: u32 },

    // Arithmetic limits
    #[error("Balance overflow: {balance} + {amount} exceeds the ledger maximum")]
    BalanceOverflow { balance: Decimal, amount: Decimal },
}

impl LedgerError {
    pub fn account_closed(number: impl Into<String>) -> Self {
        Self::AccountClosed {
            number: number.into(),
        }
    }

    pub fn account_not_found(number: impl Into<String>) -> Self {
        Self::AccountNotFound {
            number: number.into(),
        }
    }

    pub fn insufficient_funds(requested: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            requested,
            available,
        }
    }

    pub fn invalid_transaction(reason: impl Into<String>) -> Self {
        Self::InvalidTransaction(reason.into())
    }

    /// The request itself was malformed; retrying unchanged cannot succeed.
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Money(MoneyError::Overflow) => false,
            Self::Money(_)
            | Self::Date(_)
            | Self::Person(_)
            | Self::AccountNumber(_)
            | Self::AccountType(_)
            | Self::TransactionKind(_)
            | Self::SameAccountTransfer
            | Self::MissingHolderId
            | Self::OpeningYearTooEarly { .. }
            | Self::InvalidTransaction(_) => true,
            _ => false,
        }
    }

    /// The request was well-formed but the ledger state forbids it.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::AccountClosed { .. }
                | Self::AccountNotFound { .. }
                | Self::InsufficientFunds { .. }
                | Self::BalanceNotZero { .. }
                | Self::DuplicateHolder { .. }
                | Self::UnknownHolder { .. }
                | Self::ForeignAccount { .. }
                | Self::NumberSpaceExhausted { .. }
        )
    }

    /// The operation would leave a balance outside the representable range.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::Money(MoneyError::Overflow) | Self::BalanceOverflow { .. }
        )
    }
}
