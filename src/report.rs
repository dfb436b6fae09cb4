//! Statements and export
//!
//! Read-side rendering of accounts: a printable statement and a
//! line-oriented export of the full account state with its transaction log.

use std::io;

use crate::ledger::Account;

/// Render a printable statement: the account header followed by every
/// transaction in log order.
pub fn render_statement(account: &Account) -> String {
    let mut out = String::new();
    out.push_str(&format!("{account}\n"));
    out.push_str(&format!(
        "{:<15}{}\n",
        "Transactions:",
        account.transactions().len()
    ));
    for (index, transaction) in account.transactions().iter().enumerate() {
        out.push_str(&format!("\nTransaction #{}\n{transaction}\n", index + 1));
    }
    out
}

/// Write the account state as `Label: value` lines, one block per log entry,
/// each entry terminated by a `---` separator line.
pub fn export_account<W: io::Write>(account: &Account, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "Account Number: {}", account.number())?;
    writeln!(writer, "Owner Name: {}", account.owner().name())?;
    writeln!(writer, "Owner Family Name: {}", account.owner().family_name())?;
    writeln!(
        writer,
        "Owner Id Code: {}",
        account.owner().id_code().map(|id| id.as_str()).unwrap_or("")
    )?;
    writeln!(writer, "Account Type: {}", account.account_type())?;
    writeln!(writer, "Opening Date: {}", account.opened_on())?;
    writeln!(writer, "Status: {}", account.status_label())?;
    writeln!(writer, "Balance: {}", account.balance().value())?;
    writeln!(
        writer,
        "Number of Transactions: {}",
        account.transactions().len()
    )?;

    for transaction in account.transactions() {
        writeln!(writer)?;
        writeln!(writer, "Id: {}", transaction.id())?;
        writeln!(writer, "Date: {}", transaction.date())?;
        writeln!(writer, "Type: {}", transaction.kind())?;
        writeln!(writer, "Amount: {}", transaction.amount())?;
        writeln!(writer, "Source: {}", transaction.source())?;
        writeln!(writer, "Destination: {}", transaction.destination())?;
        writeln!(writer, "Balance After: {}", transaction.balance_after())?;
        writeln!(writer, "---")?;
    }

    tracing::debug!(
        "Exported account {} with {} transactions",
        account.number(),
        account.transactions().len()
    );
    Ok(())
}
