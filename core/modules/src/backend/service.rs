use super::processor::CatalogProcessor;
use async_trait::async_trait;
use domain::book::{
    ChangeBookAmountRequest, CreateBookRequest, DeleteBookByIdRequest, FindBookByIdRequest,
    UpdateBookRequest,
};
use domain::user::{
    AddBookToWishListRequest, CreateUserRequest, DeleteUserByIdRequest, FindUserByIdRequest,
    UpdateUserRequest,
};
use futures::{Future, FutureExt};
use jatsl::Job;
use library::communication::event::{NotificationPublisher, RawNotificationPublisher};
use library::communication::request::Responder;
use library::communication::RawSubscriber;
use library::{BoxedError, EmptyResult};
use tracing::info;

/// Serves all user and book subjects using one [`CatalogProcessor`]
pub struct CatalogService<T, P> {
    transport: T,
    processor: CatalogProcessor<P>,
}

impl<T, P> CatalogService<T, P>
where
    T: RawSubscriber + RawNotificationPublisher + Send + Sync,
    P: NotificationPublisher + Clone + Send + Sync + 'static,
{
    /// Creates a new instance from raw parts
    pub fn new(transport: T, processor: CatalogProcessor<P>) -> Self {
        Self {
            transport,
            processor,
        }
    }

    /// Subscribes to every subject, awaits `ready` and serves requests until `termination` resolves
    pub async fn run<Ready, F>(&self, ready: Ready, termination: F) -> EmptyResult
    where
        Ready: Future<Output = ()>,
        F: Future<Output = ()> + Send,
    {
        let termination = termination.shared();
        let transport = &self.transport;

        let create_user = Responder::<CreateUserRequest, _>::new(self.processor.clone());
        let find_user = Responder::<FindUserByIdRequest, _>::new(self.processor.clone());
        let update_user = Responder::<UpdateUserRequest, _>::new(self.processor.clone());
        let delete_user = Responder::<DeleteUserByIdRequest, _>::new(self.processor.clone());
        let add_to_wish_list =
            Responder::<AddBookToWishListRequest, _>::new(self.processor.clone());
        let create_book = Responder::<CreateBookRequest, _>::new(self.processor.clone());
        let find_book = Responder::<FindBookByIdRequest, _>::new(self.processor.clone());
        let update_book = Responder::<UpdateBookRequest, _>::new(self.processor.clone());
        let change_amount = Responder::<ChangeBookAmountRequest, _>::new(self.processor.clone());
        let delete_book = Responder::<DeleteBookByIdRequest, _>::new(self.processor.clone());

        // Everything is subscribed before anybody is told that requests are being served
        let create_user_subscription = create_user.subscribe(transport).await?;
        let find_user_subscription = find_user.subscribe(transport).await?;
        let update_user_subscription = update_user.subscribe(transport).await?;
        let delete_user_subscription = delete_user.subscribe(transport).await?;
        let add_to_wish_list_subscription = add_to_wish_list.subscribe(transport).await?;
        let create_book_subscription = create_book.subscribe(transport).await?;
        let find_book_subscription = find_book.subscribe(transport).await?;
        let update_book_subscription = update_book.subscribe(transport).await?;
        let change_amount_subscription = change_amount.subscribe(transport).await?;
        let delete_book_subscription = delete_book.subscribe(transport).await?;

        info!("Subscribed to all catalog subjects");
        ready.await;

        futures::join!(
            create_user.serve_subscription(transport, create_user_subscription, termination.clone()),
            find_user.serve_subscription(transport, find_user_subscription, termination.clone()),
            update_user.serve_subscription(transport, update_user_subscription, termination.clone()),
            delete_user.serve_subscription(transport, delete_user_subscription, termination.clone()),
            add_to_wish_list.serve_subscription(
                transport,
                add_to_wish_list_subscription,
                termination.clone()
            ),
            create_book.serve_subscription(transport, create_book_subscription, termination.clone()),
            find_book.serve_subscription(transport, find_book_subscription, termination.clone()),
            update_book.serve_subscription(transport, update_book_subscription, termination.clone()),
            change_amount.serve_subscription(
                transport,
                change_amount_subscription,
                termination.clone()
            ),
            delete_book.serve_subscription(transport, delete_book_subscription, termination),
        );

        Ok(())
    }
}

/// Job which runs a [`CatalogService`] for the lifetime of the module
pub struct CatalogServiceJob<T, P> {
    service: CatalogService<T, P>,
}

impl<T, P> CatalogServiceJob<T, P> {
    pub fn new(service: CatalogService<T, P>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<T, P> Job for CatalogServiceJob<T, P>
where
    T: RawSubscriber + RawNotificationPublisher + Send + Sync + 'static,
    P: NotificationPublisher + Clone + Send + Sync + 'static,
{
    const NAME: &'static str = module_path!();
    const SUPPORTS_GRACEFUL_TERMINATION: bool = true;

    async fn execute(&self, manager: jatsl::JobManager) -> Result<(), BoxedError> {
        self.service
            .run(manager.ready(), manager.termination_signal())
            .await
    }
}
