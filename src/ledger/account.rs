//! Accounts
//!
//! The account aggregate: a balance, a lifecycle flag and an append-only
//! transaction log. Every change to the log runs through a single validation
//! gate, and every operation either applies completely or leaves the account
//! exactly as it was.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;
use std::str::FromStr;

use crate::domain::money::max_balance;
use crate::domain::{Amount, Balance, CalendarDate, Person, Transaction, TransactionKind};
use crate::error::{LedgerError, LedgerResult};

use super::number::AccountNumber;

/// Earliest accepted opening year
pub const MIN_OPENING_YEAR: i32 = 2025;

/// Counterparty label for cash operations
pub const CASH_ENDPOINT: &str = "Cash";

/// Counterparty label for the final close entry
pub const CLOSED_ENDPOINT: &str = "Closed";

/// Account type.
///
/// The names are a wire contract; parsing accepts exactly the strings
/// produced by [`AccountType::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Checking,
    Saving,
    FixedDeposit,
}

/// Error returned when parsing an unknown account type name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown account type: {0:?}")]
pub struct ParseAccountTypeError(pub String);

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "Checking",
            Self::Saving => "Saving",
            Self::FixedDeposit => "FixedDeposit",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = ParseAccountTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Checking" => Ok(Self::Checking),
            "Saving" => Ok(Self::Saving),
            "FixedDeposit" => Ok(Self::FixedDeposit),
            other => Err(ParseAccountTypeError(other.to_string())),
        }
    }
}

/// Bank account with an append-only transaction history.
///
/// Invariants:
/// - the balance is never negative and never exceeds the ledger maximum
/// - every balance change has a matching log entry
/// - a closed account accepts no further operations
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    number: AccountNumber,
    owner: Person,
    balance: Balance,
    account_type: AccountType,
    opened_on: CalendarDate,
    closed: bool,
    transactions: Vec<Transaction>,
}

impl Account {
    // =========================================================================
    // Open
    // =========================================================================

    /// Open a new account with a strictly positive initial balance.
    ///
    /// The opening deposit is logged as the first transaction. On any
    /// failure no account value exists, so a partially configured account
    /// is unrepresentable.
    pub fn open(
        owner: Person,
        number: AccountNumber,
        initial_balance: Decimal,
        account_type: AccountType,
        opened_on: CalendarDate,
    ) -> LedgerResult<Self> {
        if owner.id_code().is_none() {
            return Err(LedgerError::MissingHolderId);
        }
        if opened_on.year() < MIN_OPENING_YEAR {
            return Err(LedgerError::OpeningYearTooEarly {
                year: opened_on.year(),
                minimum: MIN_OPENING_YEAR,
            });
        }

        let deposit = Amount::new(initial_balance)?;
        let balance = Balance::new(deposit.value())?;

        let mut account = Self {
            number,
            owner,
            balance,
            account_type,
            opened_on,
            closed: false,
            transactions: Vec::new(),
        };

        let own_number = account.number.as_str().to_string();
        account.append_transaction(
            TransactionKind::Open,
            deposit.value(),
            CASH_ENDPOINT,
            &own_number,
            opened_on,
        )?;

        Ok(account)
    }

    // =========================================================================
    // Deposit / Withdraw
    // =========================================================================

    /// Deposit a positive amount.
    pub fn deposit(&mut self, amount: Decimal, date: CalendarDate) -> LedgerResult<()> {
        if self.closed {
            return Err(LedgerError::account_closed(self.number.as_str()));
        }

        let amount = Amount::new(amount)?;
        let credited = self
            .balance
            .credit(&amount)
            .map_err(|_| LedgerError::BalanceOverflow {
                balance: self.balance.value(),
                amount: amount.value(),
            })?;

        let previous = mem::replace(&mut self.balance, credited);
        let own_number = self.number.as_str().to_string();
        if let Err(err) = self.append_transaction(
            TransactionKind::Deposit,
            amount.value(),
            CASH_ENDPOINT,
            &own_number,
            date,
        ) {
            tracing::warn!("Deposit on {} rolled back: {}", own_number, err);
            self.balance = previous;
            return Err(err);
        }

        Ok(())
    }

    /// Withdraw a positive amount covered by the current balance.
    pub fn withdraw(&mut self, amount: Decimal, date: CalendarDate) -> LedgerResult<()> {
        if self.closed {
            return Err(LedgerError::account_closed(self.number.as_str()));
        }

        let amount = Amount::new(amount)?;
        if !self.balance.is_sufficient_for(&amount) {
            return Err(LedgerError::insufficient_funds(
                amount.value(),
                self.balance.value(),
            ));
        }
        let debited = self
            .balance
            .debit(&amount)
            .map_err(|_| LedgerError::insufficient_funds(amount.value(), self.balance.value()))?;

        let previous = mem::replace(&mut self.balance, debited);
        let own_number = self.number.as_str().to_string();
        if let Err(err) = self.append_transaction(
            TransactionKind::Withdraw,
            amount.value(),
            &own_number,
            CASH_ENDPOINT,
            date,
        ) {
            tracing::warn!("Withdrawal on {} rolled back: {}", own_number, err);
            self.balance = previous;
            return Err(err);
        }

        Ok(())
    }

    // =========================================================================
    // Transfer
    // =========================================================================

    /// Move funds between two open accounts, atomically.
    ///
    /// All checks run before either side changes; the balances move first and
    /// the two log entries follow. If the second entry cannot be appended the
    /// first is compensated away, so no failure leaves the pair inconsistent.
    pub fn transfer(
        source: &mut Account,
        destination: &mut Account,
        amount: Decimal,
        date: CalendarDate,
    ) -> LedgerResult<()> {
        if source.closed {
            return Err(LedgerError::account_closed(source.number.as_str()));
        }
        if destination.closed {
            return Err(LedgerError::account_closed(destination.number.as_str()));
        }
        if source.number == destination.number {
            return Err(LedgerError::SameAccountTransfer);
        }

        let amount = Amount::new(amount)?;
        if !source.balance.is_sufficient_for(&amount) {
            return Err(LedgerError::insufficient_funds(
                amount.value(),
                source.balance.value(),
            ));
        }
        let debited = source
            .balance
            .debit(&amount)
            .map_err(|_| LedgerError::insufficient_funds(amount.value(), source.balance.value()))?;
        let credited =
            destination
                .balance
                .credit(&amount)
                .map_err(|_| LedgerError::BalanceOverflow {
                    balance: destination.balance.value(),
                    amount: amount.value(),
                })?;

        let source_number = source.number.as_str().to_string();
        let destination_number = destination.number.as_str().to_string();
        let source_previous = mem::replace(&mut source.balance, debited);
        let destination_previous = mem::replace(&mut destination.balance, credited);

        if let Err(err) = source.append_transaction(
            TransactionKind::TransferOut,
            amount.value(),
            &source_number,
            &destination_number,
            date,
        ) {
            tracing::warn!(
                "Transfer {} -> {} rolled back: {}",
                source_number,
                destination_number,
                err
            );
            source.balance = source_previous;
            destination.balance = destination_previous;
            return Err(err);
        }

        if let Err(err) = destination.append_transaction(
            TransactionKind::TransferIn,
            amount.value(),
            &source_number,
            &destination_number,
            date,
        ) {
            tracing::warn!(
                "Transfer {} -> {} compensated after partial append: {}",
                source_number,
                destination_number,
                err
            );
            source.balance = source_previous;
            destination.balance = destination_previous;
            source.transactions.pop();
            return Err(err);
        }

        Ok(())
    }

    // =========================================================================
    // Close
    // =========================================================================

    /// Close the account once its balance is zero.
    ///
    /// The final entry is logged before the closed flag flips, keeping the
    /// append gate's closed-account rejection unconditional. Closed is
    /// terminal.
    pub fn close(&mut self, date: CalendarDate) -> LedgerResult<()> {
        if self.closed {
            return Err(LedgerError::account_closed(self.number.as_str()));
        }
        if !self.balance.is_near_zero() {
            return Err(LedgerError::BalanceNotZero {
                number: self.number.as_str().to_string(),
                balance: self.balance.value(),
            });
        }

        let own_number = self.number.as_str().to_string();
        self.append_transaction(
            TransactionKind::Close,
            Decimal::ZERO,
            &own_number,
            CLOSED_ENDPOINT,
            date,
        )?;
        self.closed = true;

        Ok(())
    }

    // =========================================================================
    // Append gate
    // =========================================================================

    /// Validate and append a log entry.
    ///
    /// Zero amounts are accepted for `Close` entries only; the recorded
    /// balance is the account balance at append time.
    fn append_transaction(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        source: &str,
        destination: &str,
        date: CalendarDate,
    ) -> LedgerResult<()> {
        if self.closed {
            return Err(LedgerError::account_closed(self.number.as_str()));
        }
        if amount < Decimal::ZERO {
            return Err(LedgerError::invalid_transaction(format!(
                "amount must be positive (got {amount})"
            )));
        }
        if amount == Decimal::ZERO && kind != TransactionKind::Close {
            return Err(LedgerError::invalid_transaction(format!(
                "zero amount is only recorded for {} entries",
                TransactionKind::Close
            )));
        }
        if amount > max_balance() {
            return Err(LedgerError::invalid_transaction(format!(
                "amount {amount} exceeds the ledger maximum"
            )));
        }
        if source.trim().is_empty() {
            return Err(LedgerError::invalid_transaction("source endpoint is empty"));
        }
        if destination.trim().is_empty() {
            return Err(LedgerError::invalid_transaction(
                "destination endpoint is empty",
            ));
        }
        let balance_after = self.balance.value();
        if balance_after < Decimal::ZERO || balance_after > max_balance() {
            return Err(LedgerError::invalid_transaction(format!(
                "resulting balance {balance_after} is out of range"
            )));
        }

        self.transactions.push(Transaction::new(
            date,
            amount,
            source.to_string(),
            destination.to_string(),
            kind,
            balance_after,
        ));

        Ok(())
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn owner(&self) -> &Person {
        &self.owner
    }

    pub fn balance(&self) -> &Balance {
        &self.balance
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn opened_on(&self) -> CalendarDate {
        self.opened_on
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn status_label(&self) -> &'static str {
        if self.closed {
            "Closed"
        } else {
            "Open"
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<15}{}", "Number:", self.number)?;
        writeln!(f, "{:<15}{}", "Owner:", self.owner.full_name())?;
        writeln!(
            f,
            "{:<15}{}",
            "Id Code:",
            self.owner.id_code().map(|id| id.as_str()).unwrap_or("")
        )?;
        writeln!(f, "{:<15}{}", "Type:", self.account_type)?;
        writeln!(f, "{:<15}{}", "Opened:", self.opened_on)?;
        writeln!(f, "{:<15}{}", "Status:", self.status_label())?;
        write!(f, "{:<15}{}", "Balance:", self.balance.value())
    }
}
