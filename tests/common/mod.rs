//! Common test utilities

use bank_ledger::domain::{CalendarDate, Person};
use bank_ledger::ledger::{Ledger, SequentialAccountNumbers};

/// Opening date used across tests
pub fn opening_date() -> CalendarDate {
    CalendarDate::new(2025, 1, 15).expect("valid opening date")
}

/// Fully-populated sample holder
pub fn sample_holder(id_code: &str) -> Person {
    named_holder("Ada", "Lovelace", id_code)
}

/// Holder with a custom name
pub fn named_holder(name: &str, family_name: &str, id_code: &str) -> Person {
    let mut person = Person::new();
    person.set_name(name).expect("valid name");
    person
        .set_family_name(family_name)
        .expect("valid family name");
    person.set_nationality("British").expect("valid nationality");
    person.set_id_code(id_code).expect("valid id code");
    person.set_gender("2").expect("valid gender code");
    person
        .set_birth_date("10", "12", "1985")
        .expect("valid birth date");
    person
}

/// Ledger with deterministic sequential account numbers
pub fn sequential_ledger() -> Ledger {
    Ledger::new(Box::new(SequentialAccountNumbers::starting_at(1)))
}
