//! # Mock Stores & Testing Guide
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered from a
//! queue of scripted expectations instead of a store. Code under test cannot tell the
//! difference, which makes it the easy way to inject failures such as an unreachable mirror.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | scripted replies | real table |
//! | **Error injection** | `return_err` | needs crafted state |
//! | **Use case** | logic around a client | the store or the full system |
//!
//! ## Testing Patterns
//!
//! 1. **Pure mock**: script every reply, assert on the caller's behaviour.
//! 2. **Single actor**: spawn one `ResourceActor`, drive it through its client.
//! 3. **Actor with mocked neighbours**: a real store whose context holds mock clients.
//! 4. **Full system**: spawn everything through the lifecycle module.
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Listing { id: String }
//! #[derive(Debug, thiserror::Error)] #[error("listing error")] struct ListingError;
//!
//! #[async_trait]
//! impl ActorEntity for Listing {
//!     type Id = String; type Create = (); type Update = (); type Action = ();
//!     type ActionResult = (); type Query = (); type Context = (); type Error = ListingError;
//!     fn from_create_params(id: String, _: ()) -> Result<Self, ListingError> { Ok(Self { id }) }
//!     fn id(&self) -> &String { &self.id }
//!     fn matches(&self, _: &()) -> bool { true }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), ListingError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), ListingError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mirror = MockClient::<Listing>::new();
//!     mirror.expect_put("p1".to_string()).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mirror.client().put(Listing { id: "p1".into() }).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mirror.verify();
//! }
//! ```
//!
//! For a store that is simply gone, use [`unreachable_client`]: every call fails with
//! [`FrameworkError::ActorClosed`].

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Put {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn describe(&self) -> String {
        match self {
            Expectation::Get { id, .. } => format!("Get({id})"),
            Expectation::Create { .. } => "Create".to_string(),
            Expectation::Put { id, .. } => format!("Put({id})"),
            Expectation::List { .. } => "List".to_string(),
            Expectation::Update { id, .. } => format!("Update({id})"),
            Expectation::Delete { id, .. } => format!("Delete({id})"),
            Expectation::Action { id, .. } => format!("Action({id})"),
        }
    }
}

struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    received: Vec<String>,
    mismatches: Vec<String>,
}

type SharedState<T> = Arc<Mutex<MockState<T>>>;

fn lock<T: ActorEntity>(state: &SharedState<T>) -> MutexGuard<'_, MockState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Replies to `respond_to` when the expectation id matches, otherwise records a mismatch and
/// drops the reply channel (the caller then sees `ActorDropped`).
fn answer<R, I: PartialEq + std::fmt::Display>(
    mismatches: &mut Vec<String>,
    expected: &I,
    actual: &I,
    respond_to: oneshot::Sender<Result<R, FrameworkError>>,
    response: Result<R, FrameworkError>,
) {
    if expected == actual {
        let _ = respond_to.send(response);
    } else {
        mismatches.push(format!("expected id {expected}, got {actual}"));
    }
}

/// A scripted store.
///
/// Expectations are consumed in FIFO order. Requests that do not match the next expectation
/// are recorded and reported by [`MockClient::verify`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: SharedState<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: SharedState<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            received: Vec::new(),
            mismatches: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut guard = lock(&task_state);
                let st = &mut *guard;
                let expectation = st.expectations.pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: exp, response })) => {
                        st.received.push(format!("Get({id})"));
                        answer(&mut st.mismatches, &exp, &id, respond_to, response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        st.received.push("Create".to_string());
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Put { item, respond_to }, Some(Expectation::Put { id: exp, response })) => {
                        let id = item.id().clone();
                        st.received.push(format!("Put({id})"));
                        answer(&mut st.mismatches, &exp, &id, respond_to, response);
                    }
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
                        st.received.push("List".to_string());
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Update { id, respond_to, .. }, Some(Expectation::Update { id: exp, response })) => {
                        st.received.push(format!("Update({id})"));
                        answer(&mut st.mismatches, &exp, &id, respond_to, response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: exp, response })) => {
                        st.received.push(format!("Delete({id})"));
                        answer(&mut st.mismatches, &exp, &id, respond_to, response);
                    }
                    (ResourceRequest::Action { id, respond_to, .. }, Some(Expectation::Action { id: exp, response })) => {
                        st.received.push(format!("Action({id})"));
                        answer(&mut st.mismatches, &exp, &id, respond_to, response);
                    }
                    (request, expectation) => {
                        let got = describe_request(&request);
                        st.received.push(got.clone());
                        let wanted = expectation
                            .map(|e| e.describe())
                            .unwrap_or_else(|| "nothing".to_string());
                        st.mismatches.push(format!("expected {wanted}, got {got}"));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_put(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Put { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Requests received so far, rendered as `Kind(id)`.
    pub fn received(&self) -> Vec<String> {
        lock(&self.state).received.clone()
    }

    /// Panics if an expectation is left over or a request did not match.
    pub fn verify(&self) {
        let st = lock(&self.state);
        if !st.mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", st.mismatches);
        }
        if !st.expectations.is_empty() {
            let remaining: Vec<String> = st.expectations.iter().map(|e| e.describe()).collect();
            panic!("Not all expectations were met. Remaining: {:?}", remaining);
        }
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            state: self.state.clone(),
        }
    }
}

fn describe_request<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { .. } => "Create".to_string(),
        ResourceRequest::Get { id, .. } => format!("Get({id})"),
        ResourceRequest::Put { item, .. } => format!("Put({})", item.id()),
        ResourceRequest::List { .. } => "List".to_string(),
        ResourceRequest::Update { id, .. } => format!("Update({id})"),
        ResourceRequest::Delete { id, .. } => format!("Delete({id})"),
        ResourceRequest::Action { id, .. } => format!("Action({id})"),
    }
}

type MakeExpectation<T, R> = Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>;

/// Completes an expectation with the reply the mock should send.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: MakeExpectation<T, R>,
    state: SharedState<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        lock(&self.state).expectations.push_back(expectation);
    }

    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.make)(Err(error));
        lock(&self.state).expectations.push_back(expectation);
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiving end of its mailbox.
///
/// Use this when a test needs to inspect request payloads or control reply timing.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// A client whose actor is gone. Every request fails with `ActorClosed`.
pub fn unreachable_client<T: ActorEntity>() -> ResourceClient<T> {
    let (client, receiver) = create_mock_client::<T>(1);
    drop(receiver);
    client
}

/// Waits for the next request and returns it if it is a `Put`.
pub async fn expect_put<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T, oneshot::Sender<Result<(), FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Put { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Flat {
        id: String,
        rooms: u32,
        sold: bool,
    }

    #[derive(Debug)]
    struct FlatCreate {
        rooms: u32,
    }

    #[derive(Debug)]
    enum FlatAction {
        MarkSold,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("flat error")]
    struct FlatError;

    #[async_trait]
    impl ActorEntity for Flat {
        type Id = String;
        type Create = FlatCreate;
        type Update = ();
        type Action = FlatAction;
        type ActionResult = bool;
        type Query = u32;
        type Context = ();
        type Error = FlatError;

        fn from_create_params(id: String, params: FlatCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                rooms: params.rooms,
                sold: false,
            })
        }

        fn id(&self) -> &String {
            &self.id
        }

        fn matches(&self, min_rooms: &u32) -> bool {
            self.rooms >= *min_rooms
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, action: FlatAction, _: &()) -> Result<bool, Self::Error> {
            match action {
                FlatAction::MarkSold => {
                    let flipped = !self.sold;
                    self.sold = true;
                    Ok(flipped)
                }
            }
        }
    }

    fn flat(id: &str, rooms: u32) -> Flat {
        Flat {
            id: id.to_string(),
            rooms,
            sold: false,
        }
    }

    #[tokio::test]
    async fn test_channel_level_action() {
        let (client, mut receiver) = create_mock_client::<Flat>(10);

        let task = tokio::spawn(async move {
            client
                .perform_action("flat_1".to_string(), FlatAction::MarkSold)
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, "flat_1");
        assert!(matches!(action, FlatAction::MarkSold));
        responder.send(Ok(true)).unwrap();

        assert!(task.await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let mut mock = MockClient::<Flat>::new();
        mock.expect_create().return_ok("flat_1".to_string());
        mock.expect_list().return_ok(vec![flat("flat_1", 3)]);
        mock.expect_put("flat_1".to_string()).return_ok(());

        let client = mock.client();
        let id = client.create(FlatCreate { rooms: 3 }).await.unwrap();
        assert_eq!(id, "flat_1");
        assert_eq!(client.list(2).await.unwrap().len(), 1);
        client.put(flat("flat_1", 3)).await.unwrap();

        mock.verify();
        assert_eq!(mock.received(), vec!["Create", "List", "Put(flat_1)"]);
    }

    #[tokio::test]
    async fn test_mismatch_is_reported() {
        let mut mock = MockClient::<Flat>::new();
        mock.expect_get("flat_1".to_string()).return_ok(None);

        let result = mock.client().get("flat_2".to_string()).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));

        let verified = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(verified.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_client_fails_closed() {
        let client = unreachable_client::<Flat>();
        let result = client.put(flat("flat_1", 2)).await;
        assert!(matches!(result, Err(FrameworkError::ActorClosed)));
    }
}
