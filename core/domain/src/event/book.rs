use library::communication::event::Notification;
use library::communication::Subject;
use serde::{Deserialize, Serialize};

/// Copies of a previously unavailable book became available again
///
/// Published whenever the available amount of a book rises from zero. Interested parties
/// (e.g. users with the book on their wish list) may be informed about it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct BookAmountIncreasedNotification {
    /// Id of the affected book
    pub book_id: String,
    /// Amount available after the change
    pub amount: i32,
}

impl Notification for BookAmountIncreasedNotification {
    fn subject() -> Subject {
        "book.amount_increased"
    }
}
