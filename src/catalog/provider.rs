//! Cached catalog access
//!
//! The pipeline never reaches into ambient global state: request handlers
//! ask a provider for a snapshot and pass it down. The file-backed
//! implementation re-reads its TSV/CSV sources at most once per TTL.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use super::{CatalogSnapshot, load};
use crate::error::CatalogError;

/// Source of catalog snapshots for request handlers.
pub trait CatalogProvider: Send + Sync {
    /// The SWEET-Cat stars-only snapshot.
    fn stars(&self) -> Result<Arc<CatalogSnapshot>, CatalogError>;

    /// Stars inner-joined with their exoplanets.
    fn merged(&self) -> Result<Arc<CatalogSnapshot>, CatalogError>;

    /// Drop any cached snapshots; the next call reloads from source.
    fn invalidate(&self);
}

struct CacheSlot {
    loaded_at: Instant,
    snapshot: Arc<CatalogSnapshot>,
}

/// File-backed provider with a fixed-TTL in-memory cache per snapshot.
pub struct FileCatalog {
    sweetcat_path: PathBuf,
    exoplanet_path: PathBuf,
    ttl: Duration,
    stars: RwLock<Option<CacheSlot>>,
    merged: RwLock<Option<CacheSlot>>,
}

impl FileCatalog {
    /// Default cache lifetime, matching the five-minute refresh cadence of
    /// the upstream catalog mirror.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

    pub fn new(
        sweetcat_path: impl Into<PathBuf>,
        exoplanet_path: impl Into<PathBuf>,
        ttl: Duration,
    ) -> Self {
        Self {
            sweetcat_path: sweetcat_path.into(),
            exoplanet_path: exoplanet_path.into(),
            ttl,
            stars: RwLock::new(None),
            merged: RwLock::new(None),
        }
    }

    fn cached(
        &self,
        slot: &RwLock<Option<CacheSlot>>,
        load: impl Fn() -> Result<CatalogSnapshot, CatalogError>,
        what: &str,
    ) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        if let Some(cache) = slot.read().as_ref() {
            if cache.loaded_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&cache.snapshot));
            }
        }

        let mut guard = slot.write();
        // Another request may have refreshed while we waited for the lock.
        if let Some(cache) = guard.as_ref() {
            if cache.loaded_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&cache.snapshot));
            }
        }

        let snapshot = Arc::new(load()?);
        debug!(
            rows = snapshot.height(),
            catalog = what,
            "refreshed catalog cache"
        );
        *guard = Some(CacheSlot {
            loaded_at: Instant::now(),
            snapshot: Arc::clone(&snapshot),
        });
        Ok(snapshot)
    }
}

impl CatalogProvider for FileCatalog {
    fn stars(&self) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        self.cached(&self.stars, || load::read_sweetcat(&self.sweetcat_path), "stars")
    }

    fn merged(&self) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        self.cached(
            &self.merged,
            || load::read_merged(&self.sweetcat_path, &self.exoplanet_path),
            "merged",
        )
    }

    fn invalidate(&self) {
        *self.stars.write() = None;
        *self.merged.write() = None;
    }
}
