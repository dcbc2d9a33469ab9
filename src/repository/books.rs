//! Books repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookSummary, CreateBook, UpdateBook},
        book_instance::{BookInstance, BookInstanceDetails},
        genre::Genre,
        language::Language,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List books with pagination, in insertion order
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<BookSummary>, i64)> {
        let offset = (page - 1) * per_page;

        let rows = sqlx::query(
            r#"
            SELECT b.id, b.title, b.isbn, a.first_name, a.last_name
            FROM books b
            LEFT JOIN authors a ON a.id = b.author_id
            ORDER BY b.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let mut books = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i32 = row.get("id");
            let genres = self.get_book_genres(id).await?;
            let last_name: Option<String> = row.get("last_name");
            let first_name: Option<String> = row.get("first_name");

            books.push(BookSummary {
                id,
                title: row.get("title"),
                isbn: row.get("isbn"),
                author: last_name
                    .map(|last| format!("{}, {}", last, first_name.unwrap_or_default())),
                genre: Book::format_genres(&genres),
            });
        }

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok((books, total))
    }

    /// Get book by ID with author, language, genres and copies resolved
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let mut book = sqlx::query_as::<_, Book>(
            "SELECT id, title, summary, isbn, author_id, language_id FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if let Some(author_id) = book.author_id {
            book.author = sqlx::query_as::<_, Author>(
                "SELECT id, first_name, last_name, date_of_birth, date_of_death FROM authors WHERE id = $1",
            )
            .bind(author_id)
            .fetch_optional(&self.pool)
            .await?;
        }

        if let Some(language_id) = book.language_id {
            book.language =
                sqlx::query_as::<_, Language>("SELECT id, name FROM languages WHERE id = $1")
                    .bind(language_id)
                    .fetch_optional(&self.pool)
                    .await?;
        }

        book.genres = self.get_book_genres(id).await?;
        book.copies = self.get_book_copies(id).await?;

        Ok(book)
    }

    /// Load all genres linked to a book, in relation order (no explicit sort)
    pub async fn get_book_genres(&self, book_id: i32) -> AppResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = $1
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(genres)
    }

    /// Load all copies of a book, ordered by due date
    async fn get_book_copies(&self, book_id: i32) -> AppResult<Vec<BookInstanceDetails>> {
        let copies = sqlx::query_as::<_, BookInstance>(
            r#"
            SELECT id, book_id, imprint, due_back, borrower_id, status
            FROM book_instances
            WHERE book_id = $1
            ORDER BY due_back ASC NULLS LAST, id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        let title: Option<String> = sqlx::query_scalar("SELECT title FROM books WHERE id = $1")
            .bind(book_id)
            .fetch_optional(&self.pool)
            .await?;

        let today = Utc::now().date_naive();
        Ok(copies
            .into_iter()
            .map(|c| {
                let is_overdue = c.is_overdue_at(today);
                BookInstanceDetails {
                    id: c.id,
                    book_id: c.book_id,
                    book_title: title.clone(),
                    imprint: c.imprint,
                    due_back: c.due_back,
                    borrower_id: c.borrower_id,
                    status: c.status,
                    is_overdue,
                }
            })
            .collect())
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Create a new book and its genre links in one transaction
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, summary, isbn, author_id, language_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&data.title)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(data.author_id)
        .bind(data.language_id)
        .fetch_one(&mut *tx)
        .await?;

        for genre_id in &data.genre_ids {
            sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                .bind(book_id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.get_by_id(book_id).await
    }

    /// Update a book. Absent fields keep their current values; a present
    /// genre_ids list replaces the full set of genre links.
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE books SET
                title = COALESCE($1, title),
                summary = COALESCE($2, summary),
                isbn = COALESCE($3, isbn),
                author_id = COALESCE($4, author_id),
                language_id = COALESCE($5, language_id)
            WHERE id = $6
            "#,
        )
        .bind(&data.title)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(data.author_id)
        .bind(data.language_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        if let Some(ref genre_ids) = data.genre_ids {
            sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for genre_id in genre_ids {
                sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2)")
                    .bind(id)
                    .bind(genre_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        self.get_by_id(id).await
    }

    /// Delete a book. Dependent copies survive with their book reference
    /// cleared by the store (ON DELETE SET NULL); genre links cascade.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Count all books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
