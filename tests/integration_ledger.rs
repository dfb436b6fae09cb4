//! Integration tests for the ledger registry

use bank_ledger::domain::TransactionKind;
use bank_ledger::ledger::{AccountType, CASH_ENDPOINT};
use bank_ledger::LedgerError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod common;

#[test]
fn test_full_account_lifecycle() {
    let mut ledger = common::sequential_ledger();
    let date = common::opening_date();

    // Open an account funded with 1000.00
    let alice = ledger
        .open_account(
            common::sample_holder("10234"),
            dec!(1000.00),
            AccountType::Checking,
            date,
        )
        .unwrap();
    let opening = &ledger.account(alice.as_str()).unwrap().transactions()[0];
    assert_eq!(opening.kind(), TransactionKind::Open);
    assert_eq!(opening.source(), CASH_ENDPOINT);

    // Deposit
    ledger.deposit(alice.as_str(), dec!(250.00), date).unwrap();
    assert_eq!(
        ledger.account(alice.as_str()).unwrap().balance().value(),
        dec!(1250.00)
    );

    // A withdrawal beyond the balance fails and changes nothing
    let result = ledger.withdraw(alice.as_str(), dec!(2000.00), date);
    assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
    assert_eq!(
        ledger.account(alice.as_str()).unwrap().balance().value(),
        dec!(1250.00)
    );

    // Open a second account and transfer into it
    let bob = ledger
        .open_account(
            common::named_holder("Bruno", "Keller", "774"),
            dec!(10.00),
            AccountType::Saving,
            date,
        )
        .unwrap();
    ledger
        .transfer(alice.as_str(), bob.as_str(), dec!(150.00), date)
        .unwrap();
    assert_eq!(
        ledger.account(alice.as_str()).unwrap().balance().value(),
        dec!(1100.00)
    );
    assert_eq!(
        ledger.account(bob.as_str()).unwrap().balance().value(),
        dec!(160.00)
    );

    // Close must be refused while funds remain
    let result = ledger.close_account("10234", alice.as_str(), date);
    assert!(matches!(result, Err(LedgerError::BalanceNotZero { .. })));

    // Withdraw everything, then close
    ledger
        .withdraw(alice.as_str(), dec!(1100.00), date)
        .unwrap();
    ledger.close_account("10234", alice.as_str(), date).unwrap();

    let account = ledger.account(alice.as_str()).unwrap();
    assert!(account.is_closed());

    let kinds: Vec<TransactionKind> =
        account.transactions().iter().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TransactionKind::Open,
            TransactionKind::Deposit,
            TransactionKind::TransferOut,
            TransactionKind::Withdraw,
            TransactionKind::Close,
        ]
    );

    // Closed is terminal
    assert!(matches!(
        ledger.deposit(alice.as_str(), dec!(1.00), date),
        Err(LedgerError::AccountClosed { .. })
    ));
}

#[test]
fn test_log_balances_are_consistent() {
    let mut ledger = common::sequential_ledger();
    let date = common::opening_date();

    let alice = ledger
        .open_account(
            common::sample_holder("10234"),
            dec!(500.00),
            AccountType::Checking,
            date,
        )
        .unwrap();
    let bob = ledger
        .open_account(
            common::named_holder("Bruno", "Keller", "774"),
            dec!(50.00),
            AccountType::FixedDeposit,
            date,
        )
        .unwrap();

    ledger.deposit(alice.as_str(), dec!(75.25), date).unwrap();
    ledger.withdraw(alice.as_str(), dec!(20.00), date).unwrap();
    ledger
        .transfer(alice.as_str(), bob.as_str(), dec!(100.00), date)
        .unwrap();
    ledger.deposit(bob.as_str(), dec!(1.00), date).unwrap();

    // Each entry's recorded balance must equal the running balance
    for account in ledger.accounts() {
        let mut running = Decimal::ZERO;
        for transaction in account.transactions() {
            match transaction.kind() {
                TransactionKind::Open
                | TransactionKind::Deposit
                | TransactionKind::TransferIn => running += transaction.amount(),
                TransactionKind::Withdraw | TransactionKind::TransferOut => {
                    running -= transaction.amount()
                }
                TransactionKind::Close => {}
            }
            assert_eq!(transaction.balance_after(), running);
        }
        assert_eq!(account.balance().value(), running);
    }
}

#[test]
fn test_funds_conserved_across_transfers() {
    let mut ledger = common::sequential_ledger();
    let date = common::opening_date();

    let alice = ledger
        .open_account(
            common::sample_holder("10234"),
            dec!(800.00),
            AccountType::Checking,
            date,
        )
        .unwrap();
    let bob = ledger
        .open_account(
            common::named_holder("Bruno", "Keller", "774"),
            dec!(200.00),
            AccountType::Saving,
            date,
        )
        .unwrap();

    let total_before: Decimal = ledger.accounts().map(|a| a.balance().value()).sum();

    ledger
        .transfer(alice.as_str(), bob.as_str(), dec!(123.45), date)
        .unwrap();
    ledger
        .transfer(bob.as_str(), alice.as_str(), dec!(0.45), date)
        .unwrap();

    let total_after: Decimal = ledger.accounts().map(|a| a.balance().value()).sum();
    assert_eq!(total_before, total_after);
}

#[test]
fn test_rejects_invalid_amounts() {
    let mut ledger = common::sequential_ledger();
    let date = common::opening_date();
    let number = ledger
        .open_account(
            common::sample_holder("10234"),
            dec!(100.00),
            AccountType::Checking,
            date,
        )
        .unwrap();

    assert!(matches!(
        ledger.deposit(number.as_str(), dec!(0.00), date),
        Err(LedgerError::Money(_))
    ));
    assert!(matches!(
        ledger.withdraw(number.as_str(), dec!(-5.00), date),
        Err(LedgerError::Money(_))
    ));
    assert!(matches!(
        ledger.withdraw(number.as_str(), dec!(0.00), date),
        Err(LedgerError::Money(_))
    ));
    // More than eight decimal places
    assert!(matches!(
        ledger.deposit(number.as_str(), dec!(0.123456789), date),
        Err(LedgerError::Money(_))
    ));

    let account = ledger.account(number.as_str()).unwrap();
    assert_eq!(account.balance().value(), dec!(100.00));
    assert_eq!(account.transactions().len(), 1);
}

#[test]
fn test_failed_open_leaves_registry_unchanged() {
    let mut ledger = common::sequential_ledger();
    let date = common::opening_date();

    // A zero opening balance is rejected outright
    let result = ledger.open_account(
        common::sample_holder("10234"),
        dec!(0.00),
        AccountType::Saving,
        date,
    );
    assert!(matches!(result, Err(LedgerError::Money(_))));
    assert_eq!(ledger.account_count(), 0);
    assert!(ledger.holder("10234").is_none());

    // A small positive balance works
    let number = ledger
        .open_account(
            common::sample_holder("10234"),
            dec!(0.01),
            AccountType::Saving,
            date,
        )
        .unwrap();
    assert_eq!(number.as_str(), "0000000001");
    assert_eq!(ledger.account_count(), 1);
}

#[test]
fn test_transfer_to_closed_account_changes_nothing() {
    let mut ledger = common::sequential_ledger();
    let date = common::opening_date();

    let alice = ledger
        .open_account(
            common::sample_holder("10234"),
            dec!(300.00),
            AccountType::Checking,
            date,
        )
        .unwrap();
    let bob = ledger
        .open_account(
            common::named_holder("Bruno", "Keller", "774"),
            dec!(40.00),
            AccountType::Saving,
            date,
        )
        .unwrap();

    ledger.withdraw(bob.as_str(), dec!(40.00), date).unwrap();
    ledger.close_account("774", bob.as_str(), date).unwrap();

    let bob_log_len = ledger.account(bob.as_str()).unwrap().transactions().len();
    let result = ledger.transfer(alice.as_str(), bob.as_str(), dec!(10.00), date);

    assert!(matches!(result, Err(LedgerError::AccountClosed { .. })));
    assert_eq!(
        ledger.account(alice.as_str()).unwrap().balance().value(),
        dec!(300.00)
    );
    assert_eq!(
        ledger.account(bob.as_str()).unwrap().transactions().len(),
        bob_log_len
    );
}

#[test]
fn test_holder_record_is_first_write_wins() {
    let mut ledger = common::sequential_ledger();
    ledger
        .add_holder(common::sample_holder("10234"))
        .unwrap();

    let inserted = ledger
        .add_holder_if_absent(common::named_holder("Grace", "Hopper", "10234"))
        .unwrap();
    assert!(!inserted);
    assert_eq!(
        ledger.holder("10234").unwrap().full_name(),
        "Ada Lovelace"
    );

    assert!(matches!(
        ledger.add_holder(common::named_holder("Grace", "Hopper", "10234")),
        Err(LedgerError::DuplicateHolder { .. })
    ));
}

#[test]
fn test_duplicate_owner_open_rejected() {
    let mut ledger = common::sequential_ledger();
    let date = common::opening_date();

    let first = ledger
        .open_account(
            common::sample_holder("10234"),
            dec!(100.00),
            AccountType::Checking,
            date,
        )
        .unwrap();

    // Opening registers the holder, so a second open under the same id fails
    // and leaves the registry exactly as it was
    let result = ledger.open_account(
        common::named_holder("Grace", "Hopper", "10234"),
        dec!(200.00),
        AccountType::Saving,
        date,
    );

    assert!(matches!(result, Err(LedgerError::DuplicateHolder { .. })));
    assert_eq!(ledger.account_count(), 1);
    assert_eq!(ledger.accounts_of("10234"), &[first]);
    assert_eq!(
        ledger.holder("10234").unwrap().full_name(),
        "Ada Lovelace"
    );
}

#[test]
fn test_transfer_drains_source_then_close() {
    let mut ledger = common::sequential_ledger();
    let date = bank_ledger::domain::CalendarDate::new(2025, 6, 1).unwrap();

    let source = ledger
        .open_account(
            common::sample_holder("12345"),
            dec!(100.00),
            AccountType::Checking,
            date,
        )
        .unwrap();
    {
        let account = ledger.account(source.as_str()).unwrap();
        assert_eq!(account.transactions().len(), 1);
        assert_eq!(account.transactions()[0].amount(), dec!(100.00));
        assert_eq!(account.transactions()[0].balance_after(), dec!(100.00));
    }

    ledger.deposit(source.as_str(), dec!(50.00), date).unwrap();
    assert_eq!(
        ledger.account(source.as_str()).unwrap().balance().value(),
        dec!(150.00)
    );

    let result = ledger.withdraw(source.as_str(), dec!(200.00), date);
    assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
    assert_eq!(
        ledger.account(source.as_str()).unwrap().transactions().len(),
        2
    );

    // Transfer the whole balance away; the drained source is then closable
    let destination = ledger
        .open_account(
            common::named_holder("Bruno", "Keller", "774"),
            dec!(0.01),
            AccountType::Saving,
            date,
        )
        .unwrap();
    ledger
        .transfer(source.as_str(), destination.as_str(), dec!(150.00), date)
        .unwrap();

    assert_eq!(
        ledger.account(source.as_str()).unwrap().balance().value(),
        dec!(0.00)
    );
    assert_eq!(
        ledger
            .account(destination.as_str())
            .unwrap()
            .balance()
            .value(),
        dec!(150.01)
    );

    ledger.close_account("12345", source.as_str(), date).unwrap();
    let closed = ledger.account(source.as_str()).unwrap();
    assert!(closed.is_closed());

    let last = closed.transactions().last().unwrap();
    assert_eq!(last.kind(), TransactionKind::Close);
    assert_eq!(last.amount(), dec!(0));
}
