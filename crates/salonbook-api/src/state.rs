//! Application state wiring all services together.
//!
//! Services are generic over repository and storage traits; AppState pins
//! them to the concrete SQLite and filesystem implementations.

use std::sync::Arc;

use salonbook_core::service::booking::BookingService;
use salonbook_core::service::catalog::CatalogService;
use salonbook_core::service::notification::NotificationService;
use salonbook_core::service::review::ReviewService;
use salonbook_core::service::slots::SlotService;
use salonbook_infra::config::AppConfig;
use salonbook_infra::sqlite::appointment::SqliteAppointmentRepository;
use salonbook_infra::sqlite::employee::SqliteEmployeeRepository;
use salonbook_infra::sqlite::notification::SqliteNotificationRepository;
use salonbook_infra::sqlite::pool::DatabasePool;
use salonbook_infra::sqlite::review::SqliteReviewRepository;
use salonbook_infra::sqlite::salon::SqliteSalonRepository;
use salonbook_infra::sqlite::service::SqliteServiceRepository;
use salonbook_infra::sqlite::slot::SqliteSlotRepository;
use salonbook_infra::storage::LocalImageStore;

/// Concrete type aliases for the service generics pinned to infra
/// implementations.
pub type ConcreteCatalogService = CatalogService<
    SqliteSalonRepository,
    SqliteServiceRepository,
    SqliteEmployeeRepository,
    LocalImageStore,
>;

pub type ConcreteSlotService = SlotService<SqliteSlotRepository, SqliteSalonRepository>;

pub type ConcreteBookingService = BookingService<
    SqliteAppointmentRepository,
    SqliteServiceRepository,
    SqliteSalonRepository,
    SqliteSlotRepository,
    SqliteNotificationRepository,
>;

pub type ConcreteReviewService =
    ReviewService<SqliteReviewRepository, SqliteAppointmentRepository>;

pub type ConcreteNotificationService = NotificationService<SqliteNotificationRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ConcreteCatalogService>,
    pub slots: Arc<ConcreteSlotService>,
    pub booking: Arc<ConcreteBookingService>,
    pub reviews: Arc<ConcreteReviewService>,
    pub notifications: Arc<ConcreteNotificationService>,
}

impl AppState {
    /// Initialize the application state: connect to the database, run
    /// migrations, wire services.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let uploads_dir = config.uploads_dir();
        tokio::fs::create_dir_all(&uploads_dir).await?;

        let db_pool = DatabasePool::new(&config.database_url()).await?;

        let catalog = CatalogService::new(
            SqliteSalonRepository::new(db_pool.clone()),
            SqliteServiceRepository::new(db_pool.clone()),
            SqliteEmployeeRepository::new(db_pool.clone()),
            LocalImageStore::new(uploads_dir),
        );

        let slots = SlotService::new(
            SqliteSlotRepository::new(db_pool.clone()),
            SqliteSalonRepository::new(db_pool.clone()),
        );

        let booking = BookingService::new(
            SqliteAppointmentRepository::new(db_pool.clone()),
            SqliteServiceRepository::new(db_pool.clone()),
            SqliteSalonRepository::new(db_pool.clone()),
            SqliteSlotRepository::new(db_pool.clone()),
            SqliteNotificationRepository::new(db_pool.clone()),
        );

        let reviews = ReviewService::new(
            SqliteReviewRepository::new(db_pool.clone()),
            SqliteAppointmentRepository::new(db_pool.clone()),
        );

        let notifications =
            NotificationService::new(SqliteNotificationRepository::new(db_pool.clone()));

        Ok(Self {
            catalog: Arc::new(catalog),
            slots: Arc::new(slots),
            booking: Arc::new(booking),
            reviews: Arc::new(reviews),
            notifications: Arc::new(notifications),
        })
    }
}
