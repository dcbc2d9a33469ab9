//! Catalog management service: books, genres and languages

use crate::{
    config::CatalogConfig,
    error::AppResult,
    models::{
        book::{Book, BookQuery, BookSummary, CreateBook, UpdateBook},
        genre::{CreateGenre, Genre, UpdateGenre},
        language::{CreateLanguage, Language, UpdateLanguage},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(repository: Repository, config: CatalogConfig) -> Self {
        Self { repository, config }
    }

    /// List books with pagination, in insertion order
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<(Vec<BookSummary>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(self.config.page_size).clamp(1, 100);
        self.repository.books.list(page, per_page).await
    }

    /// Get book by ID with full details
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book. Referenced author, language and genres must exist.
    pub async fn create_book(&self, data: CreateBook) -> AppResult<Book> {
        if let Some(author_id) = data.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        if let Some(language_id) = data.language_id {
            self.repository.languages.get_by_id(language_id).await?;
        }
        for genre_id in &data.genre_ids {
            self.repository.genres.get_by_id(*genre_id).await?;
        }
        self.repository.books.create(&data).await
    }

    /// Update an existing book
    pub async fn update_book(&self, id: i32, data: UpdateBook) -> AppResult<Book> {
        if let Some(author_id) = data.author_id {
            self.repository.authors.get_by_id(author_id).await?;
        }
        if let Some(language_id) = data.language_id {
            self.repository.languages.get_by_id(language_id).await?;
        }
        if let Some(ref genre_ids) = data.genre_ids {
            for genre_id in genre_ids {
                self.repository.genres.get_by_id(*genre_id).await?;
            }
        }
        self.repository.books.update(id, &data).await
    }

    /// Delete a book. Its copies survive with the reference cleared.
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// List all genres
    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    /// Create a genre
    pub async fn create_genre(&self, data: &CreateGenre) -> AppResult<Genre> {
        self.repository.genres.create(data).await
    }

    /// Update a genre
    pub async fn update_genre(&self, id: i32, data: &UpdateGenre) -> AppResult<Genre> {
        self.repository.genres.update(id, data).await
    }

    /// Delete a genre
    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.repository.genres.delete(id).await
    }

    /// List all languages
    pub async fn list_languages(&self) -> AppResult<Vec<Language>> {
        self.repository.languages.list().await
    }

    /// Create a language (case-insensitively unique name)
    pub async fn create_language(&self, data: &CreateLanguage) -> AppResult<Language> {
        self.repository.languages.create(data).await
    }

    /// Update a language
    pub async fn update_language(&self, id: i32, data: &UpdateLanguage) -> AppResult<Language> {
        self.repository.languages.update(id, data).await
    }

    /// Delete a language
    pub async fn delete_language(&self, id: i32) -> AppResult<()> {
        self.repository.languages.delete(id).await
    }
}
