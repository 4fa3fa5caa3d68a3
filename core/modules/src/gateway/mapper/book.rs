use super::super::dto::{AmountExternalResponse, BookExternalRequest, BookExternalResponse};
use super::{extract, requested};
use domain::book::{
    Book, BookContent, ChangeBookAmountRequest, CreateBookRequest, DeleteBookByIdRequest,
    FindBookByIdRequest, UpdateBookRequest,
};
use domain::{DomainError, EntityKind, Reply};

fn to_content(external: BookExternalRequest) -> BookContent {
    BookContent {
        title: external.title,
        description: external.description,
        year_of_publishing: external.year_of_publishing,
        price: external.price,
        amount_available: external.amount_available,
    }
}

pub fn to_create_book_request(external: BookExternalRequest) -> CreateBookRequest {
    CreateBookRequest {
        content: to_content(external),
    }
}

pub fn to_find_book_by_id_request(id: &str) -> FindBookByIdRequest {
    FindBookByIdRequest { id: id.to_owned() }
}

pub fn to_update_book_request(id: &str, external: BookExternalRequest) -> UpdateBookRequest {
    UpdateBookRequest {
        id: id.to_owned(),
        content: to_content(external),
    }
}

pub fn to_change_book_amount_request(id: &str, delta: i32) -> ChangeBookAmountRequest {
    ChangeBookAmountRequest {
        id: id.to_owned(),
        delta,
    }
}

pub fn to_delete_book_by_id_request(id: &str) -> DeleteBookByIdRequest {
    DeleteBookByIdRequest { id: id.to_owned() }
}

pub fn book_to_external(
    reply: Reply<Book>,
    id: Option<&str>,
) -> Result<BookExternalResponse, DomainError> {
    let book = extract(reply, id.and_then(|id| requested(EntityKind::Book, id)))?;

    Ok(BookExternalResponse {
        id: book.id,
        title: book.title,
        description: book.description,
        year_of_publishing: book.year_of_publishing,
        price: book.price,
        amount_available: book.amount_available,
    })
}

pub fn amount_to_external(
    reply: Reply<i32>,
    id: &str,
) -> Result<AmountExternalResponse, DomainError> {
    let amount = extract(reply, requested(EntityKind::Book, id))?;
    Ok(AmountExternalResponse { amount })
}

pub fn book_ack_to_external(reply: Reply<()>, id: &str) -> Result<(), DomainError> {
    extract(reply, requested(EntityKind::Book, id))
}
