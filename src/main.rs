//! bank_ledger - In-Memory Banking Ledger
//!
//! Demo driver for the ledger: registers holders, opens accounts, moves
//! money around (including a rejected withdrawal), closes an emptied account
//! and prints a statement for every account.

use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod domain;
pub mod ledger;
pub mod report;
mod config;
mod error;

pub use config::Config;
pub use error::{LedgerError, LedgerResult};

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bank_ledger=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build a fully-populated holder record
fn build_holder(
    name: &str,
    family_name: &str,
    nationality: &str,
    id_code: &str,
    gender_code: &str,
    birth_date: (&str, &str, &str),
) -> Result<domain::Person, domain::PersonError> {
    let mut person = domain::Person::new();
    person.set_name(name)?;
    person.set_family_name(family_name)?;
    person.set_nationality(nationality)?;
    person.set_id_code(id_code)?;
    person.set_gender(gender_code)?;
    let (day, month, year) = birth_date;
    person.set_birth_date(day, month, year)?;
    Ok(person)
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Starting bank_ledger demo");

    let mut bank = match config.seed {
        Some(seed) => {
            tracing::info!("Using seeded account numbers (seed {})", seed);
            ledger::Ledger::with_seeded_numbers(seed)
        }
        None => ledger::Ledger::with_random_numbers(),
    };

    let today = domain::CalendarDate::from(chrono::Utc::now().date_naive());

    // Register holders and open their accounts
    let ada = build_holder(
        "Ada",
        "Lovelace",
        "British",
        "10234",
        "2",
        ("10", "12", "1985"),
    )?;
    let bruno = build_holder("Bruno", "Keller", "Swiss", "774", "1", ("3", "6", "1990"))?;

    let checking = bank.open_account(ada, "1500.00".parse()?, ledger::AccountType::Checking, today)?;
    let saving = bank.open_account(bruno, "90.00".parse()?, ledger::AccountType::Saving, today)?;

    // Move some money
    bank.deposit(checking.as_str(), "250.00".parse()?, today)?;

    if let Err(err) = bank.withdraw(saving.as_str(), "500.00".parse()?, today) {
        tracing::warn!("Withdrawal rejected: {}", err);
    }

    bank.transfer(checking.as_str(), saving.as_str(), "400.00".parse()?, today)?;

    // Drain the saving account so it can be closed
    let remaining = bank
        .account(saving.as_str())
        .map(|account| account.balance().value())
        .unwrap_or_default();
    if remaining > Decimal::ZERO {
        bank.withdraw(saving.as_str(), remaining, today)?;
    }
    bank.close_account("774", saving.as_str(), today)?;

    // Print statements
    for account in bank.accounts() {
        println!("{}", report::render_statement(account));
    }

    // Optional file export
    if let Some(path) = &config.export_path {
        let mut file = std::fs::File::create(path)?;
        for account in bank.accounts() {
            report::export_account(account, &mut file)?;
        }
        tracing::info!(
            "Exported {} accounts to {}",
            bank.account_count(),
            path.display()
        );
    }

    Ok(())
}
