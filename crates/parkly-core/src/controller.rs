// ── Controller ──
//
// Owns the API client and the session store. Every operation is one
// backend call followed by the reloads it makes necessary; pages never
// write state themselves.

use std::sync::Arc;

use parkly_api::ApiClient;
use secrecy::SecretString;
use tracing::{debug, info, warn};

use crate::command::{
    CreateLotRequest, Mutation, Notice, RegisterRequest, Resource, UpdateLotRequest,
};
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{HistorySummary, Id, Identity, Lot, LotOccupancy, Role, Spot, UserAccount};
use crate::store::SessionStore;
use crate::stream::LotFilter;

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`; every clone shares one
/// cookie jar and one [`SessionStore`]. Operations run sequentially: each
/// awaits its backend call before the next reload starts.
///
/// All public operations share one error contract: on failure the error
/// message is published on the store's error channel and returned; on
/// success the error channel is cleared.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ClientConfig,
    client: ApiClient,
    store: Arc<SessionStore>,
}

impl Controller {
    /// Build a controller. Restores the saved session cookie, if any;
    /// call [`initialize()`](Self::initialize) to learn who it belongs to.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let client = ApiClient::new(config.url.clone(), &config.transport())?;
        if let Some(cookie) = config.session_cookie.as_deref() {
            client.restore_cookies(cookie);
        }

        Ok(Self {
            inner: Arc::new(ControllerInner {
                config,
                client,
                store: Arc::new(SessionStore::new()),
            }),
        })
    }

    /// Access the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Access the underlying SessionStore.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.inner.store
    }

    /// The underlying API client, for calls that need no state.
    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    pub fn identity(&self) -> Identity {
        self.inner.store.identity()
    }

    /// The `Cookie` header to persist between runs, if the backend set one.
    pub fn session_cookie(&self) -> Option<String> {
        self.inner.client.cookie_header()
    }

    // ── Session lifecycle ────────────────────────────────────────────

    /// Fetch the identity and load what its role shows: admins get the
    /// admin lot list, users get their lot list and history, anonymous
    /// sessions load nothing further.
    pub async fn initialize(&self) -> Result<Identity, CoreError> {
        let result = async {
            let identity = self.fetch_identity().await?;
            self.load_for(&identity).await?;
            Ok::<_, CoreError>(identity)
        }
        .await;
        self.surface(result)
    }

    /// Re-fetch the identity from the backend without reloading anything.
    pub async fn refresh_identity(&self) -> Result<Identity, CoreError> {
        let result = self.fetch_identity().await;
        self.surface(result)
    }

    /// Log in, then re-fetch the identity and run its load sequence.
    ///
    /// A rejected login leaves the previous identity and collections as
    /// they were.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Identity, CoreError> {
        let result = async {
            let response = self.inner.client.login(email, password).await?;
            info!(
                name = response.name.as_deref().unwrap_or(email),
                "logged in"
            );
            self.inner.store.clear_error();
            let identity = self.fetch_identity().await?;
            self.load_for(&identity).await?;
            Ok::<_, CoreError>(identity)
        }
        .await;
        self.surface(result)
    }

    /// End the backend session, then forget the identity and every
    /// collection. Nothing is cleared if the backend refuses.
    pub async fn logout(&self) -> Result<(), CoreError> {
        let result = async {
            self.inner.client.logout().await?;
            self.inner.store.reset();
            info!("logged out");
            Ok::<_, CoreError>(())
        }
        .await;
        self.surface(result)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Run one mutation: call the backend, publish its notice, then reload
    /// every resource it [invalidates](Mutation::invalidates).
    ///
    /// A rejected mutation changes nothing and reloads nothing. Once the
    /// backend has accepted, the notice is returned even if a reload
    /// fails; that failure only goes to the error channel.
    pub async fn execute(&self, mutation: Mutation) -> Result<Notice, CoreError> {
        let stale = mutation.invalidates();
        let result = self.perform(mutation).await;
        let notice = self.surface(result)?;
        self.inner.store.publish_notice(notice.clone());

        for resource in stale {
            if let Err(err) = self.refetch_inner(*resource).await {
                warn!(%resource, error = %err, "reload after mutation failed");
                self.inner.store.publish_error(err.to_string());
            }
        }
        Ok(notice)
    }

    pub async fn create_lot(&self, request: CreateLotRequest) -> Result<Notice, CoreError> {
        self.execute(Mutation::CreateLot(request)).await
    }

    pub async fn update_lot(&self, id: Id, update: UpdateLotRequest) -> Result<Notice, CoreError> {
        self.execute(Mutation::UpdateLot { id, update }).await
    }

    pub async fn delete_lot(&self, id: Id) -> Result<Notice, CoreError> {
        self.execute(Mutation::DeleteLot { id }).await
    }

    pub async fn book(&self, lot_id: Id) -> Result<Notice, CoreError> {
        self.execute(Mutation::Book { lot_id }).await
    }

    pub async fn release(&self, reservation_id: Id) -> Result<Notice, CoreError> {
        self.execute(Mutation::Release { reservation_id }).await
    }

    pub async fn export(&self) -> Result<Notice, CoreError> {
        self.execute(Mutation::Export).await
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<Notice, CoreError> {
        self.execute(Mutation::Register(request)).await
    }

    // ── Reloads ──────────────────────────────────────────────────────

    /// Replace one collection with the backend's current listing.
    pub async fn refetch(&self, resource: Resource) -> Result<(), CoreError> {
        let result = self.refetch_inner(resource).await;
        self.surface(result)
    }

    // ── Queries (not cached) ─────────────────────────────────────────

    /// Registered accounts (admin).
    pub async fn list_users(&self) -> Result<Vec<UserAccount>, CoreError> {
        let result = self.inner.client.admin_users().await.map_err(CoreError::from);
        self.surface(result).map(|users| users.into_iter().map(Into::into).collect())
    }

    /// Spots of one lot with their status (admin).
    pub async fn lot_spots(&self, lot_id: &Id) -> Result<Vec<Spot>, CoreError> {
        let result = self.inner.client.lot_spots(lot_id).await.map_err(CoreError::from);
        self.surface(result).map(|spots| spots.into_iter().map(Into::into).collect())
    }

    /// Occupancy per lot (admin).
    pub async fn occupancy_summary(&self) -> Result<Vec<LotOccupancy>, CoreError> {
        let result = self.inner.client.admin_summary().await.map_err(CoreError::from);
        self.surface(result).map(|rows| rows.into_iter().map(Into::into).collect())
    }

    // ── Derived views over loaded state ──────────────────────────────

    /// Loaded lots matching a search query.
    pub fn search_lots(&self, query: &str) -> Vec<Arc<Lot>> {
        self.inner
            .store
            .subscribe_lots()
            .matching(&LotFilter::search(query))
    }

    /// Totals over the loaded history.
    pub fn history_summary(&self) -> HistorySummary {
        let history = self.inner.store.history_snapshot();
        HistorySummary::from_history(history.iter().map(|r| &**r))
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn surface<T>(&self, result: Result<T, CoreError>) -> Result<T, CoreError> {
        match &result {
            Ok(_) => self.inner.store.clear_error(),
            Err(err) => {
                warn!(error = %err, "operation failed");
                self.inner.store.publish_error(err.to_string());
            }
        }
        result
    }

    async fn fetch_identity(&self) -> Result<Identity, CoreError> {
        let identity = Identity::from(self.inner.client.me().await?);
        debug!(role = ?identity.role, "identity fetched");
        self.inner.store.set_identity(identity.clone());
        Ok(identity)
    }

    async fn load_for(&self, identity: &Identity) -> Result<(), CoreError> {
        match identity.role {
            Some(Role::Admin) => {
                self.inner.store.clear_history();
                self.refetch_inner(Resource::AdminLots).await
            }
            Some(Role::User) => {
                self.refetch_inner(Resource::UserLots).await?;
                self.refetch_inner(Resource::History).await
            }
            None => {
                self.inner.store.clear_collections();
                Ok(())
            }
        }
    }

    async fn refetch_inner(&self, resource: Resource) -> Result<(), CoreError> {
        let client = &self.inner.client;
        let store = &self.inner.store;
        match resource {
            Resource::AdminLots => {
                let lots = client.admin_lots().await?;
                store.replace_lots(lots.into_iter().map(Lot::from).collect());
            }
            Resource::UserLots => {
                let lots = client.user_lots().await?;
                store.replace_lots(lots.into_iter().map(Lot::from).collect());
            }
            Resource::History => {
                let history = client.history().await?;
                store.replace_history(history.into_iter().map(Into::into).collect());
            }
        }
        debug!(%resource, "resource reloaded");
        Ok(())
    }

    async fn perform(&self, mutation: Mutation) -> Result<Notice, CoreError> {
        let client = &self.inner.client;
        let name = mutation.name();
        debug!(mutation = name, "executing");

        let notice = match mutation {
            Mutation::CreateLot(request) => {
                let lot_name = request.name.clone();
                let created = client.create_lot(&request.into()).await?;
                Notice::LotCreated {
                    id: created.id,
                    name: lot_name,
                }
            }
            Mutation::UpdateLot { id, update } => {
                client.update_lot(&id, &update.into()).await?;
                Notice::LotUpdated { id }
            }
            Mutation::DeleteLot { id } => {
                client.delete_lot(&id).await?;
                Notice::LotDeleted { id }
            }
            Mutation::Book { lot_id } => {
                let booking = client.book(&lot_id).await?;
                Notice::Booked {
                    spot_id: booking.spot_id,
                    reservation_id: booking.reservation_id,
                }
            }
            Mutation::Release { reservation_id } => {
                let release = client.release(&reservation_id).await?;
                Notice::Released {
                    reservation_id,
                    cost: release.cost,
                    message: release.message,
                }
            }
            Mutation::Export => {
                let task = client.export_csv().await?;
                Notice::ExportStarted {
                    task_id: task.task_id,
                }
            }
            Mutation::Register(request) => {
                client.register(&request.into()).await?;
                Notice::Registered
            }
        };

        info!(mutation = name, %notice, "mutation accepted");
        Ok(notice)
    }
}
