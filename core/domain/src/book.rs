//! Requests operating on books

use super::Reply;
use library::communication::request::Request;
use library::communication::Subject;
use serde::{Deserialize, Serialize};

/// Common prefix of all book subjects
pub const PREFIX: &str = "book";

/// Subject names, always in the form `book.<operation>`
pub mod subject {
    use library::communication::Subject;

    #[allow(missing_docs)]
    pub const CREATE: Subject = "book.create";
    #[allow(missing_docs)]
    pub const FIND_BY_ID: Subject = "book.find_by_id";
    #[allow(missing_docs)]
    pub const UPDATE: Subject = "book.update";
    #[allow(missing_docs)]
    pub const CHANGE_AMOUNT: Subject = "book.change_amount";
    #[allow(missing_docs)]
    pub const DELETE: Subject = "book.delete";
}

/// Book in the catalog of the library
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Book {
    /// Object id assigned on creation
    pub id: String,
    #[allow(missing_docs)]
    pub title: String,
    #[allow(missing_docs)]
    pub description: Option<String>,
    #[allow(missing_docs)]
    pub year_of_publishing: i32,
    #[allow(missing_docs)]
    pub price: f64,
    /// Number of copies that can currently be lent
    pub amount_available: i32,
}

/// Content of a book which is provided by clients
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct BookContent {
    #[allow(missing_docs)]
    pub title: String,
    #[allow(missing_docs)]
    pub description: Option<String>,
    #[allow(missing_docs)]
    pub year_of_publishing: i32,
    #[allow(missing_docs)]
    pub price: f64,
    #[allow(missing_docs)]
    pub amount_available: i32,
}

impl BookContent {
    /// Attaches an id to the content
    pub fn into_book(self, id: String) -> Book {
        Book {
            id,
            title: self.title,
            description: self.description,
            year_of_publishing: self.year_of_publishing,
            price: self.price,
            amount_available: self.amount_available,
        }
    }
}

/// Adds a new book to the catalog
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CreateBookRequest {
    #[allow(missing_docs)]
    pub content: BookContent,
}

impl Request for CreateBookRequest {
    type Response = Reply<Book>;

    fn subject() -> Subject {
        subject::CREATE
    }
}

/// Looks up a book by its id
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct FindBookByIdRequest {
    #[allow(missing_docs)]
    pub id: String,
}

impl Request for FindBookByIdRequest {
    type Response = Reply<Book>;

    fn subject() -> Subject {
        subject::FIND_BY_ID
    }
}

/// Replaces the content of an existing book
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct UpdateBookRequest {
    #[allow(missing_docs)]
    pub id: String,
    #[allow(missing_docs)]
    pub content: BookContent,
}

impl Request for UpdateBookRequest {
    type Response = Reply<Book>;

    fn subject() -> Subject {
        subject::UPDATE
    }
}

/// Adds (or withdraws, if negative) copies of a book, replying with the resulting amount
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ChangeBookAmountRequest {
    #[allow(missing_docs)]
    pub id: String,
    #[allow(missing_docs)]
    pub delta: i32,
}

impl Request for ChangeBookAmountRequest {
    type Response = Reply<i32>;

    fn subject() -> Subject {
        subject::CHANGE_AMOUNT
    }
}

/// Removes a book from the catalog
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct DeleteBookByIdRequest {
    #[allow(missing_docs)]
    pub id: String,
}

impl Request for DeleteBookByIdRequest {
    type Response = Reply<()>;

    fn subject() -> Subject {
        subject::DELETE
    }
}
