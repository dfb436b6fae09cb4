//! Account holders
//!
//! Person records with per-field validated setters. Each field is checked
//! independently; a value that fails validation never replaces the current
//! one.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use super::date::{CalendarDate, DateError};

/// Maximum identifier code length (5 digits)
const MAX_ID_CODE_LEN: usize = 5;

/// Earliest accepted birth year
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Latest accepted birth year
pub const MAX_BIRTH_YEAR: i32 = 2007;

/// Errors that can occur when populating a person record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersonError {
    #[error("Name must be alphabetic words separated by single spaces (got {0:?})")]
    InvalidName(String),

    #[error("Family name must be alphabetic words separated by single spaces (got {0:?})")]
    InvalidFamilyName(String),

    #[error("Nationality must be alphabetic words separated by single spaces (got {0:?})")]
    InvalidNationality(String),

    #[error("Identifier code must be 1 to {MAX_ID_CODE_LEN} digits (got {0:?})")]
    InvalidIdCode(String),

    #[error("Gender code must be \"1\" or \"2\" (got {0:?})")]
    InvalidGenderCode(String),

    #[error("Birth year must be between {MIN_BIRTH_YEAR} and {MAX_BIRTH_YEAR} (got {0})")]
    BirthYearOutOfRange(i32),

    #[error(transparent)]
    BirthDate(#[from] DateError),
}

/// Holder gender, entered as code "1" (man) or "2" (woman).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Man,
    Woman,
}

impl Gender {
    pub fn from_code(code: &str) -> Result<Self, PersonError> {
        match code {
            "1" => Ok(Self::Man),
            "2" => Ok(Self::Woman),
            other => Err(PersonError::InvalidGenderCode(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Man => "Man",
            Self::Woman => "Woman",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifier code uniquely naming a holder within a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdCode(String);

impl IdCode {
    /// Create an identifier code: trimmed, digits only, 1 to 5 characters.
    pub fn new(raw: &str) -> Result<Self, PersonError> {
        let raw = raw.trim();
        if raw.is_empty() || raw.len() > MAX_ID_CODE_LEN || !raw.chars().all(|c| c.is_ascii_digit())
        {
            return Err(PersonError::InvalidIdCode(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for IdCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IdCode {
    type Err = PersonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdCode::new(s)
    }
}

impl TryFrom<String> for IdCode {
    type Error = PersonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        IdCode::new(&value)
    }
}

impl From<IdCode> for String {
    fn from(code: IdCode) -> Self {
        code.0
    }
}

/// Account holder record.
///
/// Fields start unset and are populated through validated setters; once the
/// record enters a registry it is treated as read-only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Person {
    name: String,
    family_name: String,
    nationality: String,
    id_code: Option<IdCode>,
    gender: Option<Gender>,
    birth_date: Option<CalendarDate>,
}

impl Person {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    pub fn set_name(&mut self, name: &str) -> Result<(), PersonError> {
        let name = name.trim();
        if !is_alphabetic_words(name) {
            return Err(PersonError::InvalidName(name.to_string()));
        }
        self.name = name.to_string();
        Ok(())
    }

    pub fn set_family_name(&mut self, family_name: &str) -> Result<(), PersonError> {
        let family_name = family_name.trim();
        if !is_alphabetic_words(family_name) {
            return Err(PersonError::InvalidFamilyName(family_name.to_string()));
        }
        self.family_name = family_name.to_string();
        Ok(())
    }

    pub fn set_nationality(&mut self, nationality: &str) -> Result<(), PersonError> {
        let nationality = nationality.trim();
        if !is_alphabetic_words(nationality) {
            return Err(PersonError::InvalidNationality(nationality.to_string()));
        }
        self.nationality = nationality.to_string();
        Ok(())
    }

    pub fn set_id_code(&mut self, code: &str) -> Result<(), PersonError> {
        self.id_code = Some(IdCode::new(code)?);
        Ok(())
    }

    pub fn set_gender(&mut self, code: &str) -> Result<(), PersonError> {
        self.gender = Some(Gender::from_code(code)?);
        Ok(())
    }

    /// Set the birth date from day/month/year input strings.
    ///
    /// On top of the calendar rules the birth year must fall within
    /// [`MIN_BIRTH_YEAR`, `MAX_BIRTH_YEAR`].
    pub fn set_birth_date(&mut self, day: &str, month: &str, year: &str) -> Result<(), PersonError> {
        let date = CalendarDate::from_parts(day, month, year)?;
        if date.year() < MIN_BIRTH_YEAR || date.year() > MAX_BIRTH_YEAR {
            return Err(PersonError::BirthYearOutOfRange(date.year()));
        }
        self.birth_date = Some(date);
        Ok(())
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn nationality(&self) -> &str {
        &self.nationality
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.family_name)
    }

    pub fn id_code(&self) -> Option<&IdCode> {
        self.id_code.as_ref()
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn birth_date(&self) -> Option<CalendarDate> {
        self.birth_date
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<15}{}", "Name:", self.name)?;
        writeln!(f, "{:<15}{}", "Family Name:", self.family_name)?;
        writeln!(f, "{:<15}{}", "Nationality:", self.nationality)?;
        writeln!(
            f,
            "{:<15}{}",
            "Id Code:",
            self.id_code.as_ref().map(IdCode::as_str).unwrap_or("")
        )?;
        writeln!(
            f,
            "{:<15}{}",
            "Gender:",
            self.gender.map(|g| g.as_str()).unwrap_or("")
        )?;
        write!(
            f,
            "{:<15}{}",
            "Birthday:",
            self.birth_date.map(|d| d.to_string()).unwrap_or_default()
        )
    }
}

/// Letters only, single spaces between words.
fn is_alphabetic_words(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    let mut previous_was_space = true;
    for ch in value.chars() {
        if ch == ' ' {
            if previous_was_space {
                return false;
            }
            previous_was_space = true;
        } else if ch.is_ascii_alphabetic() {
            previous_was_space = false;
        } else {
            return false;
        }
    }
    !previous_was_space
}
