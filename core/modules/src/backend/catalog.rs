use domain::book::{Book, BookContent};
use domain::user::User;
use domain::{new_object_id, EntityKind, ErrorDetail, FailureKind};
use futures::lock::Mutex;
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

/// Earliest accepted year of publishing
pub const MIN_YEAR_OF_PUBLISHING: i32 = 1600;

#[derive(Default)]
struct CatalogState {
    users: HashMap<String, User>,
    books: HashMap<String, Book>,
}

/// Outcome of changing the available amount of a book
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct AmountChange {
    /// Copies available after the change
    pub amount: i32,
    /// Book was unavailable before and is available now
    pub replenished: bool,
}

/// In-memory store of users and books
///
/// Every operation is atomic with respect to all others.
#[derive(Default)]
pub struct Catalog {
    state: Mutex<CatalogState>,
}

impl Catalog {
    /// Registers a new user, the login has to be unique
    pub async fn create_user(
        &self,
        login: String,
        email: String,
        book_wish_list: BTreeSet<String>,
    ) -> Result<User, ErrorDetail> {
        let mut state = self.state.lock().await;
        ensure_login_available(&state, &login, None)?;

        let user = User {
            id: new_object_id(),
            login,
            email,
            book_wish_list,
        };

        state.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    /// Looks up a single user
    pub async fn find_user(&self, id: &str) -> Result<User, ErrorDetail> {
        let state = self.state.lock().await;

        state
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| ErrorDetail::not_found(EntityKind::User, id))
    }

    /// Replaces login, email and wish list of an existing user
    pub async fn update_user(
        &self,
        id: &str,
        login: String,
        email: String,
        book_wish_list: BTreeSet<String>,
    ) -> Result<User, ErrorDetail> {
        let mut state = self.state.lock().await;

        if !state.users.contains_key(id) {
            return Err(ErrorDetail::not_found(EntityKind::User, id));
        }

        ensure_login_available(&state, &login, Some(id))?;

        let user = User {
            id: id.to_owned(),
            login,
            email,
            book_wish_list,
        };

        state.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    /// Removes a user
    pub async fn delete_user(&self, id: &str) -> Result<(), ErrorDetail> {
        let mut state = self.state.lock().await;

        state
            .users
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ErrorDetail::not_found(EntityKind::User, id))
    }

    /// Adds a book to the wish list of a user, the book is checked for existence first
    pub async fn add_book_to_wish_list(
        &self,
        user_id: &str,
        book_id: &str,
    ) -> Result<(), ErrorDetail> {
        let mut state = self.state.lock().await;

        if !state.books.contains_key(book_id) {
            return Err(ErrorDetail::not_found(EntityKind::Book, book_id));
        }

        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| ErrorDetail::not_found(EntityKind::User, user_id))?;

        user.book_wish_list.insert(book_id.to_owned());
        Ok(())
    }

    /// Adds a book to the catalog under a fresh identifier
    pub async fn create_book(&self, content: BookContent) -> Result<Book, ErrorDetail> {
        validate_content(&content)?;
        let book = content.into_book(new_object_id());

        let mut state = self.state.lock().await;
        state.books.insert(book.id.clone(), book.clone());

        Ok(book)
    }

    /// Looks up a single book
    pub async fn find_book(&self, id: &str) -> Result<Book, ErrorDetail> {
        let state = self.state.lock().await;

        state
            .books
            .get(id)
            .cloned()
            .ok_or_else(|| ErrorDetail::not_found(EntityKind::Book, id))
    }

    /// Replaces the content of a book
    pub async fn update_book(&self, id: &str, content: BookContent) -> Result<Book, ErrorDetail> {
        validate_content(&content)?;
        let mut state = self.state.lock().await;

        let book = state
            .books
            .get_mut(id)
            .ok_or_else(|| ErrorDetail::not_found(EntityKind::Book, id))?;

        *book = content.into_book(id.to_owned());
        Ok(book.clone())
    }

    /// Adds `delta` copies to a book, rejecting changes that result in a negative amount
    pub async fn change_amount(&self, id: &str, delta: i32) -> Result<AmountChange, ErrorDetail> {
        let mut state = self.state.lock().await;

        let book = state
            .books
            .get_mut(id)
            .ok_or_else(|| ErrorDetail::not_found(EntityKind::Book, id))?;

        let previous = book.amount_available;
        let amount = match previous.checked_add(delta) {
            Some(amount) if amount >= 0 => amount,
            _ => {
                let message = format!(
                    "Can't withdraw {} book(s), when amount is {}",
                    delta.unsigned_abs(),
                    previous
                );

                return Err(ErrorDetail::new(FailureKind::ValidationFailed, message)
                    .with_entity(EntityKind::Book, id));
            }
        };

        book.amount_available = amount;

        Ok(AmountChange {
            amount,
            replenished: previous == 0 && amount > 0,
        })
    }

    /// Removes a book, absent books are tolerated
    pub async fn delete_book(&self, id: &str) {
        let mut state = self.state.lock().await;

        if state.books.remove(id).is_none() {
            warn!(id, "Attempting to delete absent book");
        }
    }
}

fn validate_content(content: &BookContent) -> Result<(), ErrorDetail> {
    let violation = if content.title.is_empty() {
        Some("title must not be empty".to_owned())
    } else if content.year_of_publishing < MIN_YEAR_OF_PUBLISHING {
        Some(format!(
            "year of publishing must be at least {}, got {}",
            MIN_YEAR_OF_PUBLISHING, content.year_of_publishing
        ))
    } else if content.price.is_nan() || content.price <= 0.0 {
        Some(format!("price must be positive, got {}", content.price))
    } else if content.amount_available < 0 {
        Some(format!(
            "amount available must not be negative, got {}",
            content.amount_available
        ))
    } else {
        None
    };

    match violation {
        Some(message) => Err(ErrorDetail::new(FailureKind::ValidationFailed, message)),
        None => Ok(()),
    }
}

fn ensure_login_available(
    state: &CatalogState,
    login: &str,
    except: Option<&str>,
) -> Result<(), ErrorDetail> {
    let holder = state
        .users
        .values()
        .find(|user| user.login == login && Some(user.id.as_str()) != except);

    match holder {
        Some(user) => Err(ErrorDetail::new(
            FailureKind::Conflict,
            format!("login {} is already taken", login),
        )
        .with_entity(EntityKind::User, user.id.clone())),
        None => Ok(()),
    }
}
