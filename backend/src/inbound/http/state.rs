//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CatalogueQuery, ContactCommand, RepairCommand, RepairQuery, UserAccounts};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub repairs: Arc<dyn RepairCommand>,
    pub repairs_query: Arc<dyn RepairQuery>,
    pub users: Arc<dyn UserAccounts>,
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub contact: Arc<dyn ContactCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub repairs: Arc<dyn RepairCommand>,
    pub repairs_query: Arc<dyn RepairQuery>,
    pub users: Arc<dyn UserAccounts>,
    pub catalogue: Arc<dyn CatalogueQuery>,
    pub contact: Arc<dyn ContactCommand>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::{
    ///     CatalogueService, ContactService, RepairLifecycleService, UserService,
    /// };
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use backend::outbound::memory::MemoryStore;
    /// use backend::outbound::tracking_codes::RandomTrackingCodes;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let clock = Arc::new(DefaultClock);
    /// let lifecycle = Arc::new(RepairLifecycleService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     Arc::new(RandomTrackingCodes),
    ///     clock.clone(),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     repairs: lifecycle.clone(),
    ///     repairs_query: lifecycle,
    ///     users: Arc::new(UserService::new(store.clone(), clock.clone())),
    ///     catalogue: Arc::new(CatalogueService::new(store.clone())),
    ///     contact: Arc::new(ContactService::new(store, clock)),
    /// });
    /// let _repairs = state.repairs.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            repairs,
            repairs_query,
            users,
            catalogue,
            contact,
        } = ports;
        Self {
            repairs,
            repairs_query,
            users,
            catalogue,
            contact,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
