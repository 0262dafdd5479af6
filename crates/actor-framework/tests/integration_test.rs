use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Plot {
    id: String,
    acres: u32,
    owner: String,
    reserved: bool,
}

#[derive(Debug)]
struct PlotCreate {
    acres: u32,
    owner: String,
}

#[derive(Debug)]
struct PlotUpdate {
    acres: Option<u32>,
}

#[derive(Debug)]
enum PlotAction {
    Reserve,
    Release,
}

#[derive(Debug, Clone)]
enum PlotQuery {
    OwnedBy(String),
    Unreserved,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum PlotError {
    #[error("a plot needs at least one acre")]
    Empty,
}

#[async_trait]
impl ActorEntity for Plot {
    type Id = String;
    type Create = PlotCreate;
    type Update = PlotUpdate;
    type Action = PlotAction;
    type ActionResult = bool;
    type Query = PlotQuery;
    type Context = ();
    type Error = PlotError;

    fn from_create_params(id: String, params: PlotCreate) -> Result<Self, Self::Error> {
        if params.acres == 0 {
            return Err(PlotError::Empty);
        }
        Ok(Self {
            id,
            acres: params.acres,
            owner: params.owner,
            reserved: false,
        })
    }

    fn id(&self) -> &String {
        &self.id
    }

    fn validate(&self) -> Result<(), Self::Error> {
        if self.acres == 0 {
            return Err(PlotError::Empty);
        }
        Ok(())
    }

    fn matches(&self, query: &PlotQuery) -> bool {
        match query {
            PlotQuery::OwnedBy(owner) => &self.owner == owner,
            PlotQuery::Unreserved => !self.reserved,
        }
    }

    async fn on_update(&mut self, update: PlotUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(acres) = update.acres {
            self.acres = acres;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: PlotAction, _ctx: &()) -> Result<bool, Self::Error> {
        match action {
            PlotAction::Reserve => {
                if self.reserved {
                    Ok(false)
                } else {
                    self.reserved = true;
                    Ok(true)
                }
            }
            PlotAction::Release => {
                let changed = self.reserved;
                self.reserved = false;
                Ok(changed)
            }
        }
    }
}

fn counter_ids() -> impl Fn() -> String + Send + Sync + 'static {
    let next = Arc::new(AtomicU32::new(1));
    move || format!("plot_{}", next.fetch_add(1, Ordering::SeqCst))
}

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Plot>::new(10, counter_ids());
    tokio::spawn(actor.run(()));

    let id = client
        .create(PlotCreate {
            acres: 4,
            owner: "ana".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, "plot_1");

    assert!(client.perform_action(id.clone(), PlotAction::Reserve).await.unwrap());
    assert!(!client.perform_action(id.clone(), PlotAction::Reserve).await.unwrap());

    let updated = client
        .update(id.clone(), PlotUpdate { acres: Some(6) })
        .await
        .unwrap();
    assert_eq!(updated.acres, 6);
    assert!(updated.reserved);

    client.delete(id.clone()).await.unwrap();
    assert!(client.get(id.clone()).await.unwrap().is_none());
    assert!(matches!(
        client.delete(id).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_put_and_list() {
    let (actor, client) = ResourceActor::<Plot>::new(10, counter_ids());
    tokio::spawn(actor.run(()));

    client
        .create(PlotCreate {
            acres: 2,
            owner: "ana".into(),
        })
        .await
        .unwrap();

    // A replicated copy keeps its own id.
    client
        .put(Plot {
            id: "remote_7".into(),
            acres: 9,
            owner: "ben".into(),
            reserved: true,
        })
        .await
        .unwrap();

    let bens = client.list(PlotQuery::OwnedBy("ben".into())).await.unwrap();
    assert_eq!(bens.len(), 1);
    assert_eq!(bens[0].id, "remote_7");

    let free = client.list(PlotQuery::Unreserved).await.unwrap();
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].owner, "ana");

    // Put over an existing id replaces it.
    client
        .put(Plot {
            id: "remote_7".into(),
            acres: 9,
            owner: "ben".into(),
            reserved: false,
        })
        .await
        .unwrap();
    assert_eq!(client.list(PlotQuery::Unreserved).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_validation_error_is_typed() {
    let (actor, client) = ResourceActor::<Plot>::new(10, counter_ids());
    tokio::spawn(actor.run(()));

    let err = client
        .create(PlotCreate {
            acres: 0,
            owner: "ana".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.downcast_entity::<PlotError>().unwrap(), PlotError::Empty);
}

#[tokio::test]
async fn test_concurrent_reserve_has_single_winner() {
    let (actor, client) = ResourceActor::<Plot>::new(64, counter_ids());
    tokio::spawn(actor.run(()));

    let id = client
        .create(PlotCreate {
            acres: 1,
            owner: "ana".into(),
        })
        .await
        .unwrap();

    let mut handles = vec![];
    for _ in 0..20 {
        let client = client.clone();
        let id = id.clone();
        handles.push(tokio::spawn(async move {
            client.perform_action(id, PlotAction::Reserve).await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);

    assert!(client.perform_action(id.clone(), PlotAction::Release).await.unwrap());
    assert!(!client.get(id).await.unwrap().unwrap().reserved);
}

#[tokio::test]
async fn test_put_rejects_invalid_copy() {
    let (actor, client) = ResourceActor::<Plot>::new(10, counter_ids());
    tokio::spawn(actor.run(()));

    let err = client
        .put(Plot {
            id: "remote_1".into(),
            acres: 0,
            owner: "ben".into(),
            reserved: false,
        })
        .await
        .unwrap_err();

    assert_eq!(err.downcast_entity::<PlotError>().unwrap(), PlotError::Empty);
    assert!(client.get("remote_1".to_string()).await.unwrap().is_none());
}
