//! Book instances (copies) repository for database operations

use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{
        BookInstanceDetails, CreateBookInstance, LoanStatus, UpdateBookInstance,
    },
};

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

fn details_from_row(row: &PgRow, today: chrono::NaiveDate) -> BookInstanceDetails {
    let due_back: Option<chrono::NaiveDate> = row.get("due_back");
    BookInstanceDetails {
        id: row.get("id"),
        book_id: row.get("book_id"),
        book_title: row.get("book_title"),
        imprint: row.get("imprint"),
        due_back,
        borrower_id: row.get("borrower_id"),
        status: row.get("status"),
        is_overdue: due_back.map(|d| d < today).unwrap_or(false),
    }
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all copies, ordered by due date (undated copies last)
    pub async fn list(&self) -> AppResult<Vec<BookInstanceDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.book_id, b.title as book_title, c.imprint,
                   c.due_back, c.borrower_id, c.status
            FROM book_instances c
            LEFT JOIN books b ON b.id = c.book_id
            ORDER BY c.due_back ASC NULLS LAST, c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let today = Utc::now().date_naive();
        Ok(rows.iter().map(|r| details_from_row(r, today)).collect())
    }

    /// Get copy by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstanceDetails> {
        let row = sqlx::query(
            r#"
            SELECT c.id, c.book_id, b.title as book_title, c.imprint,
                   c.due_back, c.borrower_id, c.status
            FROM book_instances c
            LEFT JOIN books b ON b.id = c.book_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Copy with id {} not found", id)))?;

        Ok(details_from_row(&row, Utc::now().date_naive()))
    }

    /// Copies on loan to a borrower, ascending by due date.
    /// Undated loans sink to the bottom, id breaks ties.
    pub async fn borrowed_by(&self, borrower_id: i32) -> AppResult<Vec<BookInstanceDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.book_id, b.title as book_title, c.imprint,
                   c.due_back, c.borrower_id, c.status
            FROM book_instances c
            LEFT JOIN books b ON b.id = c.book_id
            WHERE c.borrower_id = $1 AND c.status = 'o'
            ORDER BY c.due_back ASC NULLS LAST, c.id
            "#,
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await?;

        let today = Utc::now().date_naive();
        Ok(rows.iter().map(|r| details_from_row(r, today)).collect())
    }

    /// Create a new copy. The id is generated here; status defaults to
    /// maintenance when omitted.
    pub async fn create(&self, data: &CreateBookInstance) -> AppResult<BookInstanceDetails> {
        let status = match data.status.as_deref() {
            Some(code) => LoanStatus::from_code(code)?,
            None => LoanStatus::default(),
        };
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, due_back, borrower_id, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.due_back)
        .bind(data.borrower_id)
        .bind(status.as_code())
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Update a copy. Absent fields keep their current values.
    pub async fn update(&self, id: Uuid, data: &UpdateBookInstance) -> AppResult<BookInstanceDetails> {
        let status = match data.status.as_deref() {
            Some(code) => Some(LoanStatus::from_code(code)?),
            None => None,
        };

        let result = sqlx::query(
            r#"
            UPDATE book_instances SET
                book_id = COALESCE($1, book_id),
                imprint = COALESCE($2, imprint),
                due_back = COALESCE($3, due_back),
                borrower_id = COALESCE($4, borrower_id),
                status = COALESCE($5, status)
            WHERE id = $6
            "#,
        )
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.due_back)
        .bind(data.borrower_id)
        .bind(status.map(|s| s.as_code()))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Copy with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Mark a copy returned: available again, no due date, no borrower
    pub async fn mark_returned(&self, id: Uuid) -> AppResult<BookInstanceDetails> {
        let result = sqlx::query(
            r#"
            UPDATE book_instances
            SET status = $1, due_back = NULL, borrower_id = NULL
            WHERE id = $2
            "#,
        )
        .bind(LoanStatus::Available.as_code())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Copy with id {} not found", id)));
        }

        self.get_by_id(id).await
    }

    /// Delete a copy. Independent of everything else, no downstream effects.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Copy with id {} not found", id)));
        }
        Ok(())
    }

    /// Count all copies
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count copies with a given status
    pub async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(status.as_code())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
