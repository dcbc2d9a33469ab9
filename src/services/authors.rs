//! Authors service

use crate::{
    config::CatalogConfig,
    error::AppResult,
    models::author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
    config: CatalogConfig,
}

impl AuthorsService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    /// List authors with pagination, ordered by (last_name, first_name)
    pub async fn list(&self, query: &AuthorQuery) -> AppResult<(Vec<Author>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(self.config.page_size).clamp(1, 100);
        self.repository.authors.list(page, per_page).await
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Create a new author
    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        self.repository.authors.create(data).await
    }

    /// Update an author
    pub async fn update(&self, id: i32, data: &UpdateAuthor) -> AppResult<Author> {
        self.repository.authors.update(id, data).await
    }

    /// Delete an author. Their books survive with the reference cleared.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.authors.delete(id).await
    }
}
