use super::super::dto::{CreateUserExternalRequest, UpdateUserExternalRequest, UserExternalResponse};
use super::{extract, requested};
use domain::user::{
    AddBookToWishListRequest, CreateUserRequest, DeleteUserByIdRequest, FindUserByIdRequest,
    UpdateUserRequest, User,
};
use domain::{DomainError, EntityKind, Reply};

pub fn to_create_user_request(external: CreateUserExternalRequest) -> CreateUserRequest {
    CreateUserRequest {
        login: external.login,
        email: external.email,
        book_wish_list: external.book_wish_list,
    }
}

pub fn to_find_user_by_id_request(id: &str) -> FindUserByIdRequest {
    FindUserByIdRequest { id: id.to_owned() }
}

pub fn to_update_user_request(id: &str, external: UpdateUserExternalRequest) -> UpdateUserRequest {
    UpdateUserRequest {
        id: id.to_owned(),
        login: external.login,
        email: external.email,
        book_wish_list: external.book_wish_list,
    }
}

pub fn to_delete_user_by_id_request(id: &str) -> DeleteUserByIdRequest {
    DeleteUserByIdRequest { id: id.to_owned() }
}

pub fn to_add_book_to_wish_list_request(user_id: &str, book_id: &str) -> AddBookToWishListRequest {
    AddBookToWishListRequest {
        user_id: user_id.to_owned(),
        book_id: book_id.to_owned(),
    }
}

/// Projects a user reply, `id` is `None` for freshly created users
pub fn user_to_external(
    reply: Reply<User>,
    id: Option<&str>,
) -> Result<UserExternalResponse, DomainError> {
    let user = extract(reply, id.and_then(|id| requested(EntityKind::User, id)))?;

    Ok(UserExternalResponse {
        id: user.id,
        login: user.login,
        email: user.email,
        book_wish_list: user.book_wish_list,
    })
}

/// Checks a reply without content which refers to the given user
pub fn user_ack_to_external(reply: Reply<()>, id: &str) -> Result<(), DomainError> {
    extract(reply, requested(EntityKind::User, id))
}
