use std::path::{Path, PathBuf};
use std::sync::Arc;

use packtrack_auth::{SessionManager, UserBook, UserRecord, hash_password};
use packtrack_inventory::{ProductBook, StockLog};
use packtrack_parcels::ParcelBook;
use packtrack_store::{JsonStore, StoreError};

use crate::config::AppConfig;

const PRODUCTS_DOC: &str = "products";
const USERS_DOC: &str = "users";
const STOCK_LOG_DOC: &str = "stock_log";
const PARCELS_DOC: &str = "parcels";

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "1234";

/// Shared per-process state handed to handlers via `Extension`.
///
/// Holds the document store handles, the upload directory, and the session
/// table. There is no in-memory cache of the documents: every handler does
/// its own load/modify/save, preserving whole-document read-modify-write
/// semantics.
pub struct AppServices {
    store: JsonStore,
    uploads_dir: PathBuf,
    sessions: Arc<SessionManager>,
}

impl AppServices {
    /// Open the stores, ensure the upload directory exists, and seed the
    /// default admin user when the user table has never been written.
    pub fn bootstrap(config: &AppConfig) -> Result<Self, StoreError> {
        let store = JsonStore::open(&config.data_dir)?;
        std::fs::create_dir_all(&config.upload_dir)?;

        let services = Self {
            store,
            uploads_dir: config.upload_dir.clone(),
            sessions: Arc::new(SessionManager::new()),
        };

        if !services.store.exists(USERS_DOC) {
            let mut users = UserBook::new();
            users.insert(
                DEFAULT_ADMIN_USERNAME.to_string(),
                UserRecord {
                    password_hash: hash_password(DEFAULT_ADMIN_PASSWORD),
                },
            );
            services.save_users(&users)?;
            tracing::info!("seeded default '{DEFAULT_ADMIN_USERNAME}' user");
        }

        Ok(services)
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub fn load_products(&self) -> Result<ProductBook, StoreError> {
        self.store.load(PRODUCTS_DOC)
    }

    pub fn save_products(&self, book: &ProductBook) -> Result<(), StoreError> {
        self.store.save(PRODUCTS_DOC, book)
    }

    pub fn load_users(&self) -> Result<UserBook, StoreError> {
        self.store.load(USERS_DOC)
    }

    pub fn save_users(&self, users: &UserBook) -> Result<(), StoreError> {
        self.store.save(USERS_DOC, users)
    }

    pub fn load_stock_log(&self) -> Result<StockLog, StoreError> {
        self.store.load(STOCK_LOG_DOC)
    }

    pub fn save_stock_log(&self, log: &StockLog) -> Result<(), StoreError> {
        self.store.save(STOCK_LOG_DOC, log)
    }

    pub fn load_parcels(&self) -> Result<ParcelBook, StoreError> {
        self.store.load(PARCELS_DOC)
    }

    pub fn save_parcels(&self, parcels: &ParcelBook) -> Result<(), StoreError> {
        self.store.save(PARCELS_DOC, parcels)
    }
}
