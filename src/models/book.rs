//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::author::Author;
use super::book_instance::BookInstanceDetails;
use super::genre::Genre;
use super::language::Language;

/// Full book model (DB + API). Author, language, genres and copies are loaded
/// separately by the repository; the reference columns stay nullable because
/// deleting an author or language clears them without touching the book.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
    // Relations (loaded separately)
    #[sqlx(skip)]
    #[serde(default)]
    pub author: Option<Author>,
    #[sqlx(skip)]
    #[serde(default)]
    pub language: Option<Language>,
    #[sqlx(skip)]
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[sqlx(skip)]
    #[serde(default)]
    pub copies: Vec<BookInstanceDetails>,
}

impl Book {
    /// Compact genre display: the first three linked genre names, comma-joined,
    /// in whatever order the relation yields them.
    pub fn display_genre(&self) -> String {
        Self::format_genres(&self.genres)
    }

    pub fn format_genres(genres: &[Genre]) -> String {
        genres
            .iter()
            .take(3)
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Short book representation for paginated lists
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub isbn: String,
    /// Author display name ("last, first"), absent for orphaned books
    pub author: Option<String>,
    /// Compact genre display (first three names, comma-joined)
    pub genre: String,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    #[serde(default)]
    pub summary: String,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: String,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 1000, message = "Summary must be at most 1000 characters"))]
    pub summary: Option<String>,
    #[validate(length(equal = 13, message = "ISBN must be exactly 13 characters"))]
    pub isbn: Option<String>,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
    /// When present, replaces the full set of genre links
    pub genre_ids: Option<Vec<i32>>,
}

/// Book list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre(id: i32, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_display_genre_takes_first_three() {
        let genres = vec![
            genre(1, "Science Fiction"),
            genre(2, "Fantasy"),
            genre(3, "Horror"),
            genre(4, "Poetry"),
            genre(5, "Drama"),
        ];
        assert_eq!(
            Book::format_genres(&genres),
            "Science Fiction,Fantasy,Horror"
        );
    }

    #[test]
    fn test_display_genre_fewer_than_three() {
        assert_eq!(Book::format_genres(&[genre(1, "Poetry")]), "Poetry");
        assert_eq!(Book::format_genres(&[]), "");
    }
}
