//! Circulation service: loanable copies and borrower views

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book_instance::{BookInstanceDetails, CreateBookInstance, UpdateBookInstance},
    repository::Repository,
};

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
}

impl CirculationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all copies, ordered by due date
    pub async fn list_copies(&self) -> AppResult<Vec<BookInstanceDetails>> {
        self.repository.copies.list().await
    }

    /// Get copy by ID
    pub async fn get_copy(&self, id: Uuid) -> AppResult<BookInstanceDetails> {
        self.repository.copies.get_by_id(id).await
    }

    /// Copies on loan to the given borrower, ascending by due date
    pub async fn borrowed_by(&self, borrower_id: i32) -> AppResult<Vec<BookInstanceDetails>> {
        self.repository.copies.borrowed_by(borrower_id).await
    }

    /// Create a new copy. Referenced book and borrower must exist.
    pub async fn create_copy(&self, data: CreateBookInstance) -> AppResult<BookInstanceDetails> {
        if let Some(book_id) = data.book_id {
            self.repository.books.get_by_id(book_id).await?;
        }
        if let Some(borrower_id) = data.borrower_id {
            self.repository.users.get_by_id(borrower_id).await?;
        }
        self.repository.copies.create(&data).await
    }

    /// Update a copy
    pub async fn update_copy(
        &self,
        id: Uuid,
        data: UpdateBookInstance,
    ) -> AppResult<BookInstanceDetails> {
        if let Some(book_id) = data.book_id {
            self.repository.books.get_by_id(book_id).await?;
        }
        if let Some(borrower_id) = data.borrower_id {
            self.repository.users.get_by_id(borrower_id).await?;
        }
        self.repository.copies.update(id, &data).await
    }

    /// Mark a copy returned
    pub async fn mark_returned(&self, id: Uuid) -> AppResult<BookInstanceDetails> {
        self.repository.copies.mark_returned(id).await
    }

    /// Delete a copy
    pub async fn delete_copy(&self, id: Uuid) -> AppResult<()> {
        self.repository.copies.delete(id).await
    }
}
