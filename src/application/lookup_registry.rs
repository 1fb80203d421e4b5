//! Lookup Registry - the shared, write-once lookup capability
//!
//! One registry is built by the composition root and shared (via `Arc`) by
//! every middleware instance. The first successful initialization wins;
//! later ones are no-ops, so the database is loaded at most once.

use crate::adapters::outbound::MaxMindLoader;
use crate::config::GeoIpConfig;
use crate::domain::entities::GeoResult;
use crate::domain::errors::{InitError, LookupError};
use crate::domain::ports::{GeoResolver, ResolverLoader};
use crate::domain::value_objects::DatabaseType;
use parking_lot::{Mutex, RwLock};
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

/// Result of [`LookupRegistry::initialize`].
#[derive(Debug)]
pub enum InitOutcome {
    /// A resolver was already bound; nothing was loaded.
    AlreadyInitialized,
    /// This call loaded and published a resolver.
    Initialized(DatabaseType),
    /// No resolver could be built; lookups stay unavailable.
    Degraded(InitError),
}

impl InitOutcome {
    pub fn is_ready(&self) -> bool {
        !matches!(self, Self::Degraded(_))
    }
}

/// Holds at most one bound [`GeoResolver`].
pub struct LookupRegistry {
    loader: Arc<dyn ResolverLoader>,
    resolver: RwLock<Option<Arc<dyn GeoResolver>>>,
    /// Serializes initialization so racing callers load once.
    init_guard: Mutex<()>,
}

impl LookupRegistry {
    pub fn new(loader: Arc<dyn ResolverLoader>) -> Self {
        Self {
            loader,
            resolver: RwLock::new(None),
            init_guard: Mutex::new(()),
        }
    }

    /// Registry backed by the MaxMind City/Country readers.
    pub fn maxmind() -> Self {
        Self::new(Arc::new(MaxMindLoader))
    }

    /// Bind a resolver from `config` unless one is already bound.
    ///
    /// Never fails: any problem is logged and reported as
    /// [`InitOutcome::Degraded`], leaving the registry unset.
    pub fn initialize(&self, config: &GeoIpConfig, name: &str) -> InitOutcome {
        if self.is_initialized() {
            return InitOutcome::AlreadyInitialized;
        }

        let _guard = self.init_guard.lock();
        // Another instance may have won while we waited
        if self.is_initialized() {
            return InitOutcome::AlreadyInitialized;
        }

        match self.load(config) {
            Ok(resolver) => {
                let db_type = resolver.database_type();
                *self.resolver.write() = Some(resolver);
                tracing::info!(
                    "lookup DB initialized: db={}, db_type={}, name={}",
                    config.db_path,
                    db_type,
                    name
                );
                InitOutcome::Initialized(db_type)
            }
            Err(e) => {
                tracing::error!(
                    "lookup DB is not initialized: db={}, name={}, err={}",
                    config.db_path,
                    name,
                    e
                );
                InitOutcome::Degraded(e)
            }
        }
    }

    fn load(&self, config: &GeoIpConfig) -> Result<Arc<dyn GeoResolver>, InitError> {
        let path = Path::new(&config.db_path);
        std::fs::metadata(path).map_err(|source| InitError::DatabaseNotFound {
            path: config.db_path.clone(),
            source,
        })?;

        let db_type = resolve_database_type(config)?;
        self.loader.load(path, db_type)
    }

    /// Look up `ip` against the bound resolver.
    pub fn resolve(&self, ip: IpAddr) -> Result<GeoResult, LookupError> {
        match self.current() {
            Some(resolver) => resolver.resolve(ip),
            None => Err(LookupError::Unavailable),
        }
    }

    /// The bound resolver, if any.
    pub fn current(&self) -> Option<Arc<dyn GeoResolver>> {
        self.resolver.read().clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.resolver.read().is_some()
    }

    pub fn database_type(&self) -> Option<DatabaseType> {
        self.resolver.read().as_ref().map(|r| r.database_type())
    }

    /// Drop the bound resolver. Not used while serving requests.
    pub fn reset(&self) {
        let _guard = self.init_guard.lock();
        if self.resolver.write().take().is_some() {
            tracing::info!("lookup DB reset");
        }
    }
}

impl std::fmt::Debug for LookupRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupRegistry")
            .field("database_type", &self.database_type())
            .finish()
    }
}

/// Explicit `db_type` wins; otherwise infer from the path.
pub fn resolve_database_type(config: &GeoIpConfig) -> Result<DatabaseType, InitError> {
    match config.effective_db_type() {
        Some(explicit) => DatabaseType::parse(explicit)
            .ok_or_else(|| InitError::UnsupportedType(explicit.to_string())),
        None => DatabaseType::infer_from_path(&config.db_path)
            .ok_or_else(|| InitError::UnsupportedType(String::new())),
    }
}
