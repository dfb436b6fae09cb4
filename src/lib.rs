//! bank_ledger Library
//!
//! Re-exports modules for integration testing and external use.

pub mod domain;
pub mod ledger;
pub mod report;

// Private modules (used only by main.rs binary)
pub mod config;
mod error;

pub use config::Config;
pub use error::{LedgerError, LedgerResult};
pub use domain::{Amount, Balance, CalendarDate, Gender, IdCode, Person, Transaction, TransactionKind};
pub use domain::{DateError, MoneyError, ParseTransactionKindError, PersonError};
pub use ledger::{Account, AccountNumber, AccountNumberGenerator, AccountType, Ledger};
pub use ledger::{InvalidAccountNumber, ParseAccountTypeError, RandomAccountNumbers, SequentialAccountNumbers};
