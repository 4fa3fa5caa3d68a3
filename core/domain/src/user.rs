//! Requests operating on users
//!
//! All of them are served on subjects prefixed with [`PREFIX`].

use super::Reply;
use library::communication::request::Request;
use library::communication::Subject;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Common prefix of all user subjects
pub const PREFIX: &str = "user";

/// Subject names, always in the form `user.<operation>`
pub mod subject {
    use library::communication::Subject;

    #[allow(missing_docs)]
    pub const CREATE: Subject = "user.create";
    #[allow(missing_docs)]
    pub const FIND_BY_ID: Subject = "user.find_by_id";
    #[allow(missing_docs)]
    pub const UPDATE: Subject = "user.update";
    #[allow(missing_docs)]
    pub const DELETE: Subject = "user.delete";
    #[allow(missing_docs)]
    pub const ADD_BOOK_TO_WISH_LIST: Subject = "user.add_book_to_wish_list";
}

/// Registered user of the library
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct User {
    /// Object id assigned on creation
    pub id: String,
    /// Unique login name
    pub login: String,
    /// Contact address
    pub email: String,
    /// Ids of books the user would like to read
    pub book_wish_list: BTreeSet<String>,
}

/// Creates a new user, optionally with books already on the wish list
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct CreateUserRequest {
    #[allow(missing_docs)]
    pub login: String,
    #[allow(missing_docs)]
    pub email: String,
    #[allow(missing_docs)]
    pub book_wish_list: BTreeSet<String>,
}

impl Request for CreateUserRequest {
    type Response = Reply<User>;

    fn subject() -> Subject {
        subject::CREATE
    }
}

/// Looks up a user by its id
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct FindUserByIdRequest {
    #[allow(missing_docs)]
    pub id: String,
}

impl Request for FindUserByIdRequest {
    type Response = Reply<User>;

    fn subject() -> Subject {
        subject::FIND_BY_ID
    }
}

/// Replaces login, email and wish list of an existing user
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct UpdateUserRequest {
    #[allow(missing_docs)]
    pub id: String,
    #[allow(missing_docs)]
    pub login: String,
    #[allow(missing_docs)]
    pub email: String,
    #[allow(missing_docs)]
    pub book_wish_list: BTreeSet<String>,
}

impl Request for UpdateUserRequest {
    type Response = Reply<User>;

    fn subject() -> Subject {
        subject::UPDATE
    }
}

/// Removes a user
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct DeleteUserByIdRequest {
    #[allow(missing_docs)]
    pub id: String,
}

impl Request for DeleteUserByIdRequest {
    type Response = Reply<()>;

    fn subject() -> Subject {
        subject::DELETE
    }
}

/// Adds a book to the wish list of a user
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct AddBookToWishListRequest {
    #[allow(missing_docs)]
    pub user_id: String,
    #[allow(missing_docs)]
    pub book_id: String,
}

impl Request for AddBookToWishListRequest {
    type Response = Reply<()>;

    fn subject() -> Subject {
        subject::ADD_BOOK_TO_WISH_LIST
    }
}
