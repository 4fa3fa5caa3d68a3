//! Representations exchanged with HTTP clients

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Body of `POST /user`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserExternalRequest {
    pub login: String,
    pub email: String,
    #[serde(default)]
    pub book_wish_list: BTreeSet<String>,
}

/// Body of `PUT /user/{id}`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserExternalRequest {
    pub login: String,
    pub email: String,
    #[serde(default)]
    pub book_wish_list: BTreeSet<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserExternalResponse {
    pub id: String,
    pub login: String,
    pub email: String,
    pub book_wish_list: BTreeSet<String>,
}

/// Body of `POST /book` and `PUT /book/{id}`
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookExternalRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub year_of_publishing: i32,
    pub price: f64,
    pub amount_available: i32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BookExternalResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub year_of_publishing: i32,
    pub price: f64,
    pub amount_available: i32,
}

/// Body of `PATCH /book/{id}/amount`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct ChangeAmountExternalRequest {
    pub delta: i32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct AmountExternalResponse {
    pub amount: i32,
}
