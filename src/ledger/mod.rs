//! Accounts, account numbers and the registry that owns them

pub mod account;
pub mod number;
pub mod registry;

pub use account::{
    Account, AccountType, ParseAccountTypeError, CASH_ENDPOINT, CLOSED_ENDPOINT, MIN_OPENING_YEAR,
};
pub use number::{
    AccountNumber, AccountNumberGenerator, InvalidAccountNumber, RandomAccountNumbers,
    SequentialAccountNumbers, ACCOUNT_NUMBER_LEN,
};
pub use registry::Ledger;
