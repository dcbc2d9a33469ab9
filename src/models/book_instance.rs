//! Book instance (loanable copy) model and related types

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Loan status of a copy. DB stores the single-character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LoanStatus {
    #[serde(rename = "m")]
    Maintenance,
    #[serde(rename = "o")]
    OnLoan,
    #[serde(rename = "a")]
    Available,
    #[serde(rename = "r")]
    Reserved,
}

impl LoanStatus {
    /// Return the single-character DB code for this status
    pub fn as_code(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        }
    }

    /// Parse a DB code; unknown codes are a validation error, not a silent default
    pub fn from_code(code: &str) -> AppResult<Self> {
        match code {
            "m" => Ok(LoanStatus::Maintenance),
            "o" => Ok(LoanStatus::OnLoan),
            "a" => Ok(LoanStatus::Available),
            "r" => Ok(LoanStatus::Reserved),
            other => Err(AppError::Validation(format!(
                "Invalid loan status code: {}",
                other
            ))),
        }
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        LoanStatus::Maintenance
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// Book instance row from database. `book_id` and `borrower_id` stay nullable:
/// deleting the book or the borrower clears the reference and keeps the copy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    pub status: String,
}

impl BookInstance {
    /// True iff the copy has a due date strictly before `today`.
    /// An absent due date is never overdue; comparing against it must not fail.
    pub fn is_overdue_at(&self, today: NaiveDate) -> bool {
        match self.due_back {
            Some(due_back) => due_back < today,
            None => false,
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Utc::now().date_naive())
    }
}

/// Copy with its book title resolved, for lists and loan views
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookInstanceDetails {
    pub id: Uuid,
    pub book_id: Option<i32>,
    /// Title of the referenced book, absent when the reference was cleared
    pub book_title: Option<String>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    pub status: String,
    pub is_overdue: bool,
}

impl BookInstanceDetails {
    /// Canonical string form: "id (book title)", "-" for orphaned copies
    pub fn label(&self) -> String {
        format!("{} ({})", self.id, self.book_title.as_deref().unwrap_or("-"))
    }
}

impl std::fmt::Display for BookInstanceDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Create copy request. Status defaults to maintenance when omitted.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookInstance {
    pub book_id: Option<i32>,
    #[validate(length(min = 1, max = 200, message = "Imprint must be 1-200 characters"))]
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    pub status: Option<String>,
}

/// Update copy request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookInstance {
    pub book_id: Option<i32>,
    #[validate(length(min = 1, max = 200, message = "Imprint must be 1-200 characters"))]
    pub imprint: Option<String>,
    pub due_back: Option<NaiveDate>,
    pub borrower_id: Option<i32>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn copy(due_back: Option<NaiveDate>) -> BookInstance {
        BookInstance {
            id: Uuid::new_v4(),
            book_id: None,
            imprint: "Test Imprint".to_string(),
            due_back,
            borrower_id: None,
            status: "m".to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_overdue_without_due_date() {
        let c = copy(None);
        // never overdue without a due date, whatever "today" is
        assert!(!c.is_overdue_at(date(1970, 1, 1)));
        assert!(!c.is_overdue_at(date(2099, 12, 31)));
    }

    #[test]
    fn test_overdue_strictly_before_today() {
        let c = copy(Some(date(2026, 6, 15)));
        assert!(c.is_overdue_at(date(2026, 6, 16)));
        // not overdue on the due date itself
        assert!(!c.is_overdue_at(date(2026, 6, 15)));
        assert!(!c.is_overdue_at(date(2026, 6, 14)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(LoanStatus::default(), LoanStatus::Maintenance);
        assert_eq!(LoanStatus::OnLoan.as_code(), "o");
        assert_eq!(LoanStatus::from_code("a").unwrap(), LoanStatus::Available);
        assert_eq!(LoanStatus::Reserved.label(), "Reserved");
        assert!(LoanStatus::from_code("x").is_err());
    }

    #[test]
    fn test_instance_label() {
        let id = Uuid::new_v4();
        let details = BookInstanceDetails {
            id,
            book_id: Some(1),
            book_title: Some("Dune".to_string()),
            imprint: "Ace Books".to_string(),
            due_back: None,
            borrower_id: None,
            status: "a".to_string(),
            is_overdue: false,
        };
        assert_eq!(details.to_string(), format!("{} (Dune)", id));

        let orphan = BookInstanceDetails {
            book_title: None,
            ..details
        };
        assert_eq!(orphan.to_string(), format!("{} (-)", id));
    }
}
