//! Ledger registry
//!
//! Owns every account and holder record, routes operations to accounts by
//! number and enforces the cross-account rules: unique account numbers,
//! single registration per holder identifier and ownership checks on close.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::domain::{Amount, CalendarDate, IdCode, Person};
use crate::error::{LedgerError, LedgerResult};

use super::account::{Account, AccountType, MIN_OPENING_YEAR};
use super::number::{AccountNumber, AccountNumberGenerator, RandomAccountNumbers};

/// Draws from the number generator before giving up on a fresh number
const MAX_NUMBER_ATTEMPTS: u32 = 100;

/// The in-memory ledger.
///
/// Single-threaded by design: all operations take `&mut self` and run to
/// completion before the next one starts.
pub struct Ledger {
    // Sole owner of all Account values; the holder index only carries numbers
    accounts: HashMap<AccountNumber, Account>,
    accounts_by_holder: HashMap<IdCode, Vec<AccountNumber>>,
    holders: HashMap<IdCode, Person>,
    numbers: Box<dyn AccountNumberGenerator>,
}

impl Ledger {
    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn new(numbers: Box<dyn AccountNumberGenerator>) -> Self {
        Self {
            accounts: HashMap::new(),
            accounts_by_holder: HashMap::new(),
            holders: HashMap::new(),
            numbers,
        }
    }

    pub fn with_random_numbers() -> Self {
        Self::new(Box::new(RandomAccountNumbers::from_entropy()))
    }

    pub fn with_seeded_numbers(seed: u64) -> Self {
        Self::new(Box::new(RandomAccountNumbers::from_seed(seed)))
    }

    // =========================================================================
    // Holders
    // =========================================================================

    /// Register a holder under their id code.
    pub fn add_holder(&mut self, person: Person) -> LedgerResult<()> {
        let id = person.id_code().cloned().ok_or(LedgerError::MissingHolderId)?;
        if self.holders.contains_key(id.as_str()) {
            return Err(LedgerError::DuplicateHolder { id: id.to_string() });
        }

        tracing::info!("Registered holder {} ({})", person.full_name(), id);
        self.holders.insert(id, person);
        Ok(())
    }

    /// Register a holder unless the id code is already taken.
    ///
    /// Returns whether the record was inserted; an existing record is left
    /// untouched.
    pub fn add_holder_if_absent(&mut self, person: Person) -> LedgerResult<bool> {
        let id = person.id_code().cloned().ok_or(LedgerError::MissingHolderId)?;
        if self.holders.contains_key(id.as_str()) {
            return Ok(false);
        }

        self.holders.insert(id, person);
        Ok(true)
    }

    // =========================================================================
    // Account lifecycle
    // =========================================================================

    /// Open an account for `owner` and return the allocated number.
    ///
    /// Registers the owner as part of the open: an identifier that is already
    /// registered rejects the whole request, so this path opens at most one
    /// account per holder. Validation runs before a number is drawn, so a
    /// rejected request never consumes one.
    pub fn open_account(
        &mut self,
        owner: Person,
        initial_balance: Decimal,
        account_type: AccountType,
        opened_on: CalendarDate,
    ) -> LedgerResult<AccountNumber> {
        let id = owner.id_code().cloned().ok_or(LedgerError::MissingHolderId)?;
        if self.holders.contains_key(id.as_str()) {
            return Err(LedgerError::DuplicateHolder { id: id.to_string() });
        }

        Amount::new(initial_balance)?;
        if opened_on.year() < MIN_OPENING_YEAR {
            return Err(LedgerError::OpeningYearTooEarly {
                year: opened_on.year(),
                minimum: MIN_OPENING_YEAR,
            });
        }

        let number = self.allocate_number()?;
        let account = Account::open(
            owner.clone(),
            number.clone(),
            initial_balance,
            account_type,
            opened_on,
        )?;

        self.holders.insert(id.clone(), owner);
        self.accounts_by_holder
            .entry(id.clone())
            .or_default()
            .push(number.clone());
        self.accounts.insert(number.clone(), account);

        tracing::info!(
            "Opened {} account {} for holder {}",
            account_type,
            number,
            id
        );
        Ok(number)
    }

    /// Close an account, checking that it belongs to `holder_id`.
    pub fn close_account(
        &mut self,
        holder_id: &str,
        number: &str,
        date: CalendarDate,
    ) -> LedgerResult<()> {
        if holder_id.trim().is_empty() {
            return Err(LedgerError::MissingHolderId);
        }
        if number.trim().is_empty() {
            return Err(LedgerError::account_not_found(number));
        }

        let owned = self
            .accounts_by_holder
            .get(holder_id)
            .ok_or_else(|| LedgerError::UnknownHolder {
                id: holder_id.to_string(),
            })?;
        if !owned.iter().any(|n| n.as_str() == number) {
            return Err(LedgerError::ForeignAccount {
                number: number.to_string(),
                id: holder_id.to_string(),
            });
        }

        let account = self
            .accounts
            .get_mut(number)
            .ok_or_else(|| LedgerError::account_not_found(number))?;
        account.close(date)?;

        tracing::info!("Closed account {} for holder {}", number, holder_id);
        Ok(())
    }

    // =========================================================================
    // Money movement
    // =========================================================================

    pub fn deposit(&mut self, number: &str, amount: Decimal, date: CalendarDate) -> LedgerResult<()> {
        let account = self
            .accounts
            .get_mut(number)
            .ok_or_else(|| LedgerError::account_not_found(number))?;
        account.deposit(amount, date)?;

        tracing::debug!("Deposited {} into {}", amount, number);
        Ok(())
    }

    pub fn withdraw(&mut self, number: &str, amount: Decimal, date: CalendarDate) -> LedgerResult<()> {
        let account = self
            .accounts
            .get_mut(number)
            .ok_or_else(|| LedgerError::account_not_found(number))?;
        account.withdraw(amount, date)?;

        tracing::debug!("Withdrew {} from {}", amount, number);
        Ok(())
    }

    /// Transfer between two accounts held by this ledger.
    pub fn transfer(
        &mut self,
        source: &str,
        destination: &str,
        amount: Decimal,
        date: CalendarDate,
    ) -> LedgerResult<()> {
        if source == destination {
            return Err(LedgerError::SameAccountTransfer);
        }

        let (source_account, destination_account) = self.account_pair_mut(source, destination)?;
        Account::transfer(source_account, destination_account, amount, date)?;

        tracing::info!("Transferred {} from {} to {}", amount, source, destination);
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn account(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    pub fn holder(&self, id: &str) -> Option<&Person> {
        self.holders.get(id)
    }

    /// Numbers of every account opened under `id`, closed ones included.
    pub fn accounts_of(&self, id: &str) -> &[AccountNumber] {
        self.accounts_by_holder
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn allocate_number(&mut self) -> LedgerResult<AccountNumber> {
        for attempt in 0..MAX_NUMBER_ATTEMPTS {
            let candidate = self.numbers.next_number();
            if !self.accounts.contains_key(candidate.as_str()) {
                return Ok(candidate);
            }
            tracing::debug!(
                "Account number collision on attempt {}: {}",
                attempt + 1,
                candidate
            );
        }
        Err(LedgerError::NumberSpaceExhausted {
            attempts: MAX_NUMBER_ATTEMPTS,
        })
    }

    fn account_pair_mut(
        &mut self,
        source: &str,
        destination: &str,
    ) -> LedgerResult<(&mut Account, &mut Account)> {
        let mut first = None;
        let mut second = None;
        for (number, account) in self.accounts.iter_mut() {
            if number.as_str() == source {
                first = Some(account);
            } else if number.as_str() == destination {
                second = Some(account);
            }
        }

        match (first, second) {
            (Some(source_account), Some(destination_account)) => {
                Ok((source_account, destination_account))
            }
            (None, _) => Err(LedgerError::account_not_found(source)),
            (_, None) => Err(LedgerError::account_not_found(destination)),
        }
    }
}
