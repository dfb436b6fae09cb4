//! Domain module
//!
//! Core domain types and business rules.

pub mod date;
pub mod money;
pub mod person;
pub mod transaction;

pub use date::{CalendarDate, DateError};
pub use money::{Amount, Balance, MoneyError};
pub use person::{Gender, IdCode, Person, PersonError};
pub use transaction::{ParseTransactionKindError, Transaction, TransactionKind};
