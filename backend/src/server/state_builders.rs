//! Builders wiring repository adapters into services and HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tracing::info;

use backend::domain::ports::{
    CatalogueRepository, ContactMessageRepository, RepairCommand, RepairQuery, RepairRepository,
    TrackingCodeGenerator, UserRepository,
};
use backend::domain::{
    CatalogueSeed, CatalogueService, ContactService, Error, RepairLifecycleService, SeedOutcome,
    UserService, seed_catalogue,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::memory::MemoryStore;
use backend::outbound::persistence::{
    DbPool, DieselCatalogueRepository, DieselContactMessageRepository, DieselRepairRepository,
    DieselUserRepository, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};
use backend::outbound::tracking_codes::RandomTrackingCodes;

use super::config::{ServerConfig, StorageBackend};

/// Failures that stop the server before it binds.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database migrations failed: {0}")]
    Migrations(#[from] MigrationError),
    #[error("database pool unavailable: {0}")]
    Pool(#[from] PoolError),
    #[error("catalogue seeding failed: {0}")]
    Seed(#[from] Error),
    #[error("postgres storage selected without a database URL")]
    MissingDatabaseUrl,
}

/// Repository adapters backing every port.
struct Repositories<R, U, C, M> {
    repairs: Arc<R>,
    users: Arc<U>,
    catalogue: Arc<C>,
    messages: Arc<M>,
}

/// Build the command/query pair over one lifecycle service.
fn build_repair_pair<R, U>(
    repairs: Arc<R>,
    users: Arc<U>,
    codes: Arc<dyn TrackingCodeGenerator>,
    clock: Arc<dyn Clock>,
) -> (Arc<dyn RepairCommand>, Arc<dyn RepairQuery>)
where
    R: RepairRepository + 'static,
    U: UserRepository + 'static,
{
    let service = Arc::new(RepairLifecycleService::new(repairs, users, codes, clock));
    (
        service.clone() as Arc<dyn RepairCommand>,
        service as Arc<dyn RepairQuery>,
    )
}

/// Assemble HTTP state from repositories, seeding the catalogue first when
/// configured.
async fn assemble<R, U, C, M>(
    repos: Repositories<R, U, C, M>,
    seed: bool,
) -> Result<web::Data<HttpState>, StartupError>
where
    R: RepairRepository + 'static,
    U: UserRepository + 'static,
    C: CatalogueRepository + 'static,
    M: ContactMessageRepository + 'static,
{
    if seed {
        match seed_catalogue(repos.catalogue.as_ref(), CatalogueSeed::bundled()?).await? {
            SeedOutcome::Skipped => info!("catalogue already present"),
            SeedOutcome::Seeded { .. } => info!("bundled catalogue loaded"),
        }
    }

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (repairs, repairs_query) = build_repair_pair(
        repos.repairs,
        Arc::clone(&repos.users),
        Arc::new(RandomTrackingCodes),
        Arc::clone(&clock),
    );
    Ok(web::Data::new(HttpState::new(HttpStatePorts {
        repairs,
        repairs_query,
        users: Arc::new(UserService::new(repos.users, Arc::clone(&clock))),
        catalogue: Arc::new(CatalogueService::new(repos.catalogue)),
        contact: Arc::new(ContactService::new(repos.messages, clock)),
    })))
}

/// Build the shared HTTP state for the configured storage backend.
///
/// PostgreSQL storage applies pending migrations before the pool is built.
pub(super) async fn build_http_state(
    config: &ServerConfig,
) -> Result<web::Data<HttpState>, StartupError> {
    match config.storage {
        StorageBackend::Memory => {
            info!(storage = "memory", "using in-memory store; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            assemble(
                Repositories {
                    repairs: Arc::clone(&store),
                    users: Arc::clone(&store),
                    catalogue: Arc::clone(&store),
                    messages: store,
                },
                config.seed_catalogue,
            )
            .await
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(StartupError::MissingDatabaseUrl)?;
            run_pending_migrations(url).await?;
            let pool =
                DbPool::new(PoolConfig::new(url).with_max_size(config.db_max_connections)).await?;
            info!(
                storage = "postgres",
                max_connections = config.db_max_connections,
                "database pool ready"
            );
            assemble(
                Repositories {
                    repairs: Arc::new(DieselRepairRepository::new(pool.clone())),
                    users: Arc::new(DieselUserRepository::new(pool.clone())),
                    catalogue: Arc::new(DieselCatalogueRepository::new(pool.clone())),
                    messages: Arc::new(DieselContactMessageRepository::new(pool)),
                },
                config.seed_catalogue,
            )
            .await
        }
    }
}
