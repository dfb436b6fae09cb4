//! Transaction log entries
//!
//! Immutable records of balance-affecting events. Entries are created only
//! by an account's append gate; once logged they never change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::date::CalendarDate;

/// Transaction kind.
///
/// The names are a wire contract; parsing accepts exactly the strings
/// produced by [`TransactionKind::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    TransferIn,
    TransferOut,
    Open,
    Close,
}

/// Error returned when parsing an unknown transaction kind name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown transaction type: {0:?}")]
pub struct ParseTransactionKindError(pub String);

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
            Self::TransferIn => "TransferIn",
            Self::TransferOut => "TransferOut",
            Self::Open => "Open",
            Self::Close => "Close",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ParseTransactionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Deposit" => Ok(Self::Deposit),
            "Withdraw" => Ok(Self::Withdraw),
            "TransferIn" => Ok(Self::TransferIn),
            "TransferOut" => Ok(Self::TransferOut),
            "Open" => Ok(Self::Open),
            "Close" => Ok(Self::Close),
            other => Err(ParseTransactionKindError(other.to_string())),
        }
    }
}

/// A single entry in an account's transaction log.
///
/// `balance_after` is the account balance once the entry took effect; the
/// amount is positive for every kind except the final `Close` marker.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    id: Uuid,
    date: CalendarDate,
    amount: Decimal,
    source: String,
    destination: String,
    kind: TransactionKind,
    balance_after: Decimal,
}

impl Transaction {
    pub(crate) fn new(
        date: CalendarDate,
        amount: Decimal,
        source: String,
        destination: String,
        kind: TransactionKind,
        balance_after: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            source,
            destination,
            kind,
            balance_after,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn balance_after(&self) -> Decimal {
        self.balance_after
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<15}{}", "Id:", self.id)?;
        writeln!(f, "{:<15}{}", "Date:", self.date)?;
        writeln!(f, "{:<15}{}", "Type:", self.kind)?;
        writeln!(f, "{:<15}{}", "Amount:", self.amount)?;
        writeln!(f, "{:<15}{}", "Source:", self.source)?;
        writeln!(f, "{:<15}{}", "Destination:", self.destination)?;
        write!(f, "{:<15}{}", "Balance After:", self.balance_after)
    }
}
