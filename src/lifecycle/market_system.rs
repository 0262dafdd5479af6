use actor_framework::{ActorEntity, ResourceActor, ResourceClient};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::accounts::AccountService;
use crate::clients::{LocalityClient, PropertyClient, ServiceClient, TransactionClient};
use crate::config::MarketConfig;
use crate::locality_actor::LocalityContext;
use crate::purchase::PurchaseWorkflow;
use crate::replication::ReplicatedStore;
use crate::{locality_actor, property_actor, service_actor, transaction_actor, user_actor};

/// Every store actor, wired together, plus the services built on them.
///
/// Properties, transactions and users get a local store and, when
/// [`MarketConfig::mirror_enabled`] is set, a mirror store of the same type. Localities and
/// services are local only.
///
/// Actor contexts only point "downwards" (bookings → services → service reviews,
/// localities → locality reviews), so dropping the clients held here lets every actor exit.
///
/// ```no_run
/// # use property_market::{config::MarketConfig, lifecycle::MarketSystem};
/// # async fn demo() -> Result<(), String> {
/// let system = MarketSystem::new(MarketConfig::default());
/// let available = system.properties.list_available().await.map_err(|e| e.to_string())?;
/// println!("{} listings for sale", available.len());
/// system.shutdown().await
/// # }
/// ```
pub struct MarketSystem {
    pub properties: PropertyClient,
    pub transactions: TransactionClient,
    pub accounts: AccountService,
    pub localities: LocalityClient,
    pub services: ServiceClient,
    pub purchases: PurchaseWorkflow,
    handles: Vec<JoinHandle<()>>,
}

fn spawn<T: ActorEntity>(
    handles: &mut Vec<JoinHandle<()>>,
    (actor, client): (ResourceActor<T>, ResourceClient<T>),
    context: T::Context,
) -> ResourceClient<T> {
    handles.push(tokio::spawn(actor.run(context)));
    client
}

impl MarketSystem {
    /// Spawns all actors. Must be called inside a Tokio runtime.
    pub fn new(config: MarketConfig) -> Self {
        let buffer = config.actor_buffer;
        let policy = config.sync_policy();
        let mut handles = Vec::new();

        // Replicated stores: local first, then the optional mirror.
        let property_local = spawn(&mut handles, property_actor::new(buffer), ());
        let property_mirror = config
            .mirror_enabled
            .then(|| spawn(&mut handles, property_actor::new(buffer), ()));
        let transaction_local = spawn(&mut handles, transaction_actor::new(buffer), ());
        let transaction_mirror = config
            .mirror_enabled
            .then(|| spawn(&mut handles, transaction_actor::new(buffer), ()));
        let user_local = spawn(&mut handles, user_actor::new(buffer), ());
        let user_mirror = config
            .mirror_enabled
            .then(|| spawn(&mut handles, user_actor::new(buffer), ()));

        // Satellites, dependencies first.
        let locality_reviews = spawn(&mut handles, locality_actor::new_reviews(buffer), ());
        let localities = spawn(
            &mut handles,
            locality_actor::new(buffer),
            LocalityContext {
                reviews: locality_reviews.clone(),
                verified_threshold: config.verified_review_threshold,
            },
        );
        let service_reviews = spawn(&mut handles, service_actor::new_reviews(buffer), ());
        let services = spawn(&mut handles, service_actor::new(buffer), service_reviews.clone());
        let bookings = spawn(&mut handles, service_actor::new_bookings(buffer), services.clone());

        let properties = PropertyClient::new(ReplicatedStore::new(property_local, property_mirror, policy));
        let transactions =
            TransactionClient::new(ReplicatedStore::new(transaction_local, transaction_mirror, policy));
        let accounts = AccountService::new(ReplicatedStore::new(user_local, user_mirror, policy));
        let purchases = PurchaseWorkflow::new(properties.clone(), transactions.clone(), config.claim_strategy);

        info!(
            actors = handles.len(),
            mirror_enabled = config.mirror_enabled,
            strategy = ?config.claim_strategy,
            "Market system started"
        );

        Self {
            properties,
            transactions,
            accounts,
            localities: LocalityClient::new(localities, locality_reviews),
            services: ServiceClient::new(services, service_reviews, bookings),
            purchases,
            handles,
        }
    }

    /// Drops every client and waits for the actors to drain and exit.
    ///
    /// Clones of the clients held elsewhere keep their actors alive, so callers must drop
    /// those first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down market system...");

        drop(self.purchases);
        drop(self.properties);
        drop(self.transactions);
        drop(self.accounts);
        drop(self.localities);
        drop(self.services);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Market system shutdown complete.");
        Ok(())
    }
}
