use super::catalog::Catalog;
use async_trait::async_trait;
use domain::book::{
    Book, ChangeBookAmountRequest, CreateBookRequest, DeleteBookByIdRequest, FindBookByIdRequest,
    UpdateBookRequest,
};
use domain::event::BookAmountIncreasedNotification;
use domain::user::{
    AddBookToWishListRequest, CreateUserRequest, DeleteUserByIdRequest, FindUserByIdRequest,
    UpdateUserRequest, User,
};
use domain::Reply;
use library::communication::event::{FireAndForget, NotificationPublisher};
use library::communication::request::RequestProcessor;
use library::BoxedError;
use std::sync::Arc;
use tracing::{debug, info};

/// Answers every user and book request from a shared [`Catalog`]
///
/// Business-level failures are replied as [`Reply::Failure`], thus processing itself never fails.
pub struct CatalogProcessor<P> {
    catalog: Arc<Catalog>,
    notifier: FireAndForget<P>,
}

impl<P: Clone> Clone for CatalogProcessor<P> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

impl<P> CatalogProcessor<P>
where
    P: NotificationPublisher + Clone + Send + Sync + 'static,
{
    /// Creates a new processor publishing notifications through `publisher`
    pub fn new(catalog: Arc<Catalog>, publisher: P) -> Self {
        Self {
            catalog,
            notifier: FireAndForget::new(publisher),
        }
    }
}

#[async_trait]
impl<P: Send + Sync> RequestProcessor<CreateUserRequest> for CatalogProcessor<P> {
    async fn process(&self, request: CreateUserRequest) -> Result<Reply<User>, BoxedError> {
        let result = self
            .catalog
            .create_user(request.login, request.email, request.book_wish_list)
            .await;

        if let Ok(user) = &result {
            info!(id = %user.id, login = %user.login, "Created user");
        }

        Ok(result.into())
    }
}

#[async_trait]
impl<P: Send + Sync> RequestProcessor<FindUserByIdRequest> for CatalogProcessor<P> {
    async fn process(&self, request: FindUserByIdRequest) -> Result<Reply<User>, BoxedError> {
        Ok(self.catalog.find_user(&request.id).await.into())
    }
}

#[async_trait]
impl<P: Send + Sync> RequestProcessor<UpdateUserRequest> for CatalogProcessor<P> {
    async fn process(&self, request: UpdateUserRequest) -> Result<Reply<User>, BoxedError> {
        let result = self
            .catalog
            .update_user(
                &request.id,
                request.login,
                request.email,
                request.book_wish_list,
            )
            .await;

        Ok(result.into())
    }
}

#[async_trait]
impl<P: Send + Sync> RequestProcessor<DeleteUserByIdRequest> for CatalogProcessor<P> {
    async fn process(&self, request: DeleteUserByIdRequest) -> Result<Reply<()>, BoxedError> {
        let result = self.catalog.delete_user(&request.id).await;

        if result.is_ok() {
            info!(id = %request.id, "Deleted user");
        }

        Ok(result.into())
    }
}

#[async_trait]
impl<P: Send + Sync> RequestProcessor<AddBookToWishListRequest> for CatalogProcessor<P> {
    async fn process(&self, request: AddBookToWishListRequest) -> Result<Reply<()>, BoxedError> {
        let result = self
            .catalog
            .add_book_to_wish_list(&request.user_id, &request.book_id)
            .await;

        Ok(result.into())
    }
}

#[async_trait]
impl<P: Send + Sync> RequestProcessor<CreateBookRequest> for CatalogProcessor<P> {
    async fn process(&self, request: CreateBookRequest) -> Result<Reply<Book>, BoxedError> {
        let result = self.catalog.create_book(request.content).await;

        if let Ok(book) = &result {
            info!(id = %book.id, title = %book.title, "Created book");
        }

        Ok(result.into())
    }
}

#[async_trait]
impl<P: Send + Sync> RequestProcessor<FindBookByIdRequest> for CatalogProcessor<P> {
    async fn process(&self, request: FindBookByIdRequest) -> Result<Reply<Book>, BoxedError> {
        Ok(self.catalog.find_book(&request.id).await.into())
    }
}

#[async_trait]
impl<P: Send + Sync> RequestProcessor<UpdateBookRequest> for CatalogProcessor<P> {
    async fn process(&self, request: UpdateBookRequest) -> Result<Reply<Book>, BoxedError> {
        Ok(self
            .catalog
            .update_book(&request.id, request.content)
            .await
            .into())
    }
}

#[async_trait]
impl<P> RequestProcessor<ChangeBookAmountRequest> for CatalogProcessor<P>
where
    P: NotificationPublisher + Clone + Send + Sync + 'static,
{
    async fn process(&self, request: ChangeBookAmountRequest) -> Result<Reply<i32>, BoxedError> {
        let change = match self.catalog.change_amount(&request.id, request.delta).await {
            Ok(change) => change,
            Err(detail) => return Ok(Reply::failure(detail)),
        };

        debug!(id = %request.id, delta = request.delta, amount = change.amount, "Changed book amount");

        if change.replenished {
            info!(id = %request.id, "Notifying subscribers of replenished book");

            self.notifier.send(BookAmountIncreasedNotification {
                book_id: request.id,
                amount: change.amount,
            });
        }

        Ok(Reply::success(change.amount))
    }
}

#[async_trait]
impl<P: Send + Sync> RequestProcessor<DeleteBookByIdRequest> for CatalogProcessor<P> {
    async fn process(&self, request: DeleteBookByIdRequest) -> Result<Reply<()>, BoxedError> {
        self.catalog.delete_book(&request.id).await;
        Ok(Reply::success(()))
    }
}

#[cfg(test)]
mod does {
    use super::*;
    use domain::book::BookContent;
    use domain::{EntityKind, ErrorDetail, FailureKind};
    use library::communication::implementation::mock::MockNotificationPublisher;
    use pretty_assertions::assert_eq;
    use tokio::task::yield_now;

    fn processor() -> (
        CatalogProcessor<Arc<MockNotificationPublisher>>,
        Arc<MockNotificationPublisher>,
    ) {
        let publisher = Arc::new(MockNotificationPublisher::default());
        let processor = CatalogProcessor::new(Arc::new(Catalog::default()), publisher.clone());
        (processor, publisher)
    }

    async fn create_book(
        processor: &CatalogProcessor<Arc<MockNotificationPublisher>>,
        amount_available: i32,
    ) -> Book {
        let request = CreateBookRequest {
            content: BookContent {
                title: "Dune".into(),
                description: None,
                year_of_publishing: 1965,
                price: 9.5,
                amount_available,
            },
        };

        match processor.process(request).await.unwrap() {
            Reply::Success(book) => book,
            Reply::Failure(detail) => panic!("unable to create book: {:?}", detail),
        }
    }

    #[tokio::test]
    async fn reply_not_found_for_unknown_user() {
        let (processor, _) = processor();

        let reply = processor
            .process(FindUserByIdRequest {
                id: "missing".into(),
            })
            .await
            .unwrap();

        assert_eq!(
            reply,
            Reply::failure(ErrorDetail::not_found(EntityKind::User, "missing"))
        );
    }

    #[tokio::test]
    async fn notify_when_book_becomes_available() {
        let (processor, publisher) = processor();
        let book = create_book(&processor, 0).await;

        let reply = processor
            .process(ChangeBookAmountRequest {
                id: book.id.clone(),
                delta: 2,
            })
            .await
            .unwrap();

        assert_eq!(reply, Reply::success(2));

        // Notifications are published by a background task
        for _ in 0..10 {
            yield_now().await;
        }

        assert_eq!(
            publisher.published::<BookAmountIncreasedNotification>(),
            vec![BookAmountIncreasedNotification {
                book_id: book.id,
                amount: 2
            }]
        );
    }

    #[tokio::test]
    async fn stay_quiet_when_book_was_available() {
        let (processor, publisher) = processor();
        let book = create_book(&processor, 1).await;

        processor
            .process(ChangeBookAmountRequest {
                id: book.id.clone(),
                delta: 1,
            })
            .await
            .unwrap();

        let rejected = processor
            .process(ChangeBookAmountRequest {
                id: book.id,
                delta: -5,
            })
            .await
            .unwrap();

        for _ in 0..10 {
            yield_now().await;
        }

        assert!(matches!(
            rejected,
            Reply::Failure(ErrorDetail {
                kind: FailureKind::ValidationFailed,
                ..
            })
        ));
        assert_eq!(publisher.count(), 0);
    }

    #[tokio::test]
    async fn reply_validation_failure_for_negative_stock() {
        let (processor, _) = processor();

        let reply = processor
            .process(CreateBookRequest {
                content: BookContent {
                    title: "Dune".into(),
                    description: None,
                    year_of_publishing: 1965,
                    price: 9.5,
                    amount_available: -5,
                },
            })
            .await
            .unwrap();

        assert!(matches!(
            reply,
            Reply::Failure(ErrorDetail {
                kind: FailureKind::ValidationFailed,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn acknowledge_deletion_of_absent_book() {
        let (processor, _) = processor();

        let reply = processor
            .process(DeleteBookByIdRequest {
                id: "missing".into(),
            })
            .await
            .unwrap();

        assert_eq!(reply, Reply::success(()));
    }
}
