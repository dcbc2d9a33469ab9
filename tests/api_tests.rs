//! API integration tests
//!
//! These run against a live server with a fresh database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get a staff token (bootstrap admin account)
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_language_case_insensitive_unique() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/languages", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "English" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let language_id = body["id"].as_i64().expect("No language ID");

    // Same name differing only in case must be rejected
    let response = client
        .post(format!("{}/languages", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "english" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["message"],
        "Language already exists (case insensitive match)"
    );

    // Cleanup
    let _ = client
        .delete(format!("{}/languages/{}", BASE_URL, language_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_book_detail_and_author_delete_clears_reference() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "first_name": "Frank", "last_name": "Herbert" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let author: Value = response.json().await.expect("Failed to parse response");
    let author_id = author["id"].as_i64().expect("No author ID");

    let response = client
        .post(format!("{}/genres", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Science Fiction" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let genre: Value = response.json().await.expect("Failed to parse response");
    let genre_id = genre["id"].as_i64().expect("No genre ID");

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Dune",
            "summary": "Desert planet epic",
            "isbn": "9780441013593",
            "author_id": author_id,
            "genre_ids": [genre_id]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let book: Value = response.json().await.expect("Failed to parse response");
    let book_id = book["id"].as_i64().expect("No book ID");

    // Detail lookup returns the exact fields
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let detail: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(detail["title"], "Dune");
    assert_eq!(detail["isbn"], "9780441013593");
    assert_eq!(detail["author"]["last_name"], "Herbert");
    assert_eq!(detail["genres"][0]["name"], "Science Fiction");

    // Deleting the author keeps the book, with the reference cleared
    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let detail: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(detail["title"], "Dune");
    assert!(detail["author_id"].is_null());
    assert!(detail["author"].is_null());

    // Cleanup
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/genres/{}", BASE_URL, genre_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_book_delete_keeps_copies() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Ephemeral Book",
            "isbn": "9780000000001"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let book: Value = response.json().await.expect("Failed to parse response");
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = client
        .post(format!("{}/copies", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "book_id": book_id,
            "imprint": "First Edition, 2020"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let copy: Value = response.json().await.expect("Failed to parse response");
    let copy_id = copy["id"].as_str().expect("No copy ID").to_string();
    // Status defaults to maintenance
    assert_eq!(copy["status"], "m");

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Copy survives as an orphan
    let response = client
        .get(format!("{}/copies/{}", BASE_URL, copy_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let copy: Value = response.json().await.expect("Failed to parse response");
    assert!(copy["book_id"].is_null());
    assert!(copy["book_title"].is_null());

    // Cleanup
    let _ = client
        .delete(format!("{}/copies/{}", BASE_URL, copy_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_my_loans_filtering_and_order() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // A borrower and a second user whose loans must never show up
    let borrower: Value = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "login": "loans_borrower", "password": "testpass" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let borrower_id = borrower["id"].as_i64().expect("No user ID");

    let other: Value = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "login": "loans_other", "password": "testpass" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let other_id = other["id"].as_i64().expect("No user ID");

    // Three copies for the borrower: undated, late, soon; one on loan to the
    // other user; one merely reserved by the borrower.
    let mut copy_ids = Vec::new();
    for (due_back, user_id, status) in [
        (None, Some(borrower_id), "o"),
        (Some("2020-01-01"), Some(borrower_id), "o"),
        (Some("2030-01-01"), Some(borrower_id), "o"),
        (Some("2020-06-01"), Some(other_id), "o"),
        (Some("2020-06-01"), Some(borrower_id), "r"),
    ] {
        let response = client
            .post(format!("{}/copies", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({
                "imprint": "Loan Test Imprint",
                "due_back": due_back,
                "borrower_id": user_id,
                "status": status
            }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
        let copy: Value = response.json().await.expect("Failed to parse response");
        copy_ids.push(copy["id"].as_str().expect("No copy ID").to_string());
    }

    // Log in as the borrower
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "login": "loans_borrower", "password": "testpass" }))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let borrower_token = body["token"].as_str().expect("No token").to_string();

    let response = client
        .get(format!("{}/my/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", borrower_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let loans: Value = response.json().await.expect("Failed to parse response");
    let loans = loans.as_array().expect("Expected array");

    // Only the borrower's on-loan copies, dated first ascending, undated last
    assert_eq!(loans.len(), 3);
    assert_eq!(loans[0]["due_back"], "2020-01-01");
    assert_eq!(loans[1]["due_back"], "2030-01-01");
    assert!(loans[2]["due_back"].is_null());
    assert!(loans[0]["is_overdue"].as_bool().unwrap());
    assert!(!loans[2]["is_overdue"].as_bool().unwrap());
    for loan in loans {
        assert_eq!(loan["borrower_id"].as_i64().unwrap(), borrower_id);
        assert_eq!(loan["status"], "o");
    }

    // Cleanup
    for copy_id in copy_ids {
        let _ = client
            .delete(format!("{}/copies/{}", BASE_URL, copy_id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await;
    }
    for user_id in [borrower_id, other_id] {
        let _ = client
            .delete(format!("{}/users/{}", BASE_URL, user_id))
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await;
    }
}

#[tokio::test]
#[ignore]
async fn test_return_copy() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/copies", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "imprint": "Return Test Imprint",
            "due_back": "2020-01-01",
            "status": "o"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let copy: Value = response.json().await.expect("Failed to parse response");
    let copy_id = copy["id"].as_str().expect("No copy ID").to_string();

    let response = client
        .post(format!("{}/copies/{}/return", BASE_URL, copy_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let returned: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(returned["status"], "a");
    assert!(returned["due_back"].is_null());
    assert!(returned["borrower_id"].is_null());

    // Cleanup
    let _ = client
        .delete(format!("{}/copies/{}", BASE_URL, copy_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_book_list_pagination() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].is_number());
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 5);
    assert!(body["items"].as_array().unwrap().len() <= 5);
}

#[tokio::test]
#[ignore]
async fn test_catalog_summary_visits() {
    let client = Client::new();

    let response = client
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["num_books"].is_number());
    assert!(body["num_authors"].is_number());
    assert!(body["num_instances"].is_number());
    assert!(body["num_instances_available"].is_number());
    assert_eq!(body["num_visits"], 0);
    let session_id = body["session_id"].as_str().expect("No session id");

    // Second visit with the same session id increments the counter
    let response = client
        .get(format!("{}/catalog", BASE_URL))
        .header("X-Session-Id", session_id)
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["num_visits"], 1);
    assert_eq!(body["session_id"], session_id);
}

#[tokio::test]
#[ignore]
async fn test_get_missing_book_returns_not_found() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/books/999999999", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}
