//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! - **Catalog**: the project records, loaded once at startup
//! - **Contacts**: the most recent submissions, capped by
//!   `AppConfig::contact_capacity`
//! - **Rate limiter**: one store shared by every rate-limited route
//! - **Reply drafter**: absent when drafting is switched off

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use folio_core::Catalog;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::middleware::metrics::ApiMetrics;
use crate::middleware::rate_limit::RateLimitStore;
use crate::reply::{MessageKind, ReplyDrafter, TemplateDrafter};

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// A store built with [`Store::bounded`] keeps at most `capacity` records;
/// inserting a new key into a full store evicts the oldest one. The lock is
/// `parking_lot` and never held across `.await`, so a panicking writer
/// cannot poison it.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    data: Arc<RwLock<Slots<T>>>,
}

#[derive(Debug)]
struct Slots<T> {
    records: HashMap<Uuid, T>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<Uuid>,
    capacity: Option<usize>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// A store holding at most `capacity` records. A zero capacity keeps
    /// nothing.
    pub fn bounded(capacity: usize) -> Self {
        Self::with_capacity(Some(capacity))
    }

    fn with_capacity(capacity: Option<usize>) -> Self {
        Self {
            data: Arc::new(RwLock::new(Slots {
                records: HashMap::new(),
                order: VecDeque::new(),
                capacity,
            })),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    ///
    /// Replacing an existing key keeps its original position in the
    /// eviction order.
    pub fn insert(&self, id: Uuid, value: T) -> Option<T> {
        let mut slots = self.data.write();
        if let Some(previous) = slots.records.insert(id, value) {
            return Some(previous);
        }
        slots.order.push_back(id);
        let capacity = slots.capacity.unwrap_or(usize::MAX);
        while slots.order.len() > capacity {
            if let Some(oldest) = slots.order.pop_front() {
                slots.records.remove(&oldest);
            }
        }
        None
    }

    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.data.read().records.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.data.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> Option<usize> {
        self.data.read().capacity
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Records -----------------------------------------------------------------

/// A contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub kind: MessageKind,
    /// Whether the owner has answered. Always `false` on creation.
    pub replied: bool,
    /// Drafted reply, when drafting is enabled and succeeded.
    pub suggested_reply: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// -- Application State --------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub contacts: Store<ContactRecord>,
    pub limiter: RateLimitStore,
    pub drafter: Option<Arc<dyn ReplyDrafter>>,
    pub metrics: ApiMetrics,
    pub config: AppConfig,
}

impl AppState {
    /// Build state with the template drafter when `config.reply_drafts` is set.
    pub fn new(config: AppConfig, catalog: Catalog) -> Self {
        let drafter = config
            .reply_drafts
            .then(|| Arc::new(TemplateDrafter::new(config.owner.clone())) as Arc<dyn ReplyDrafter>);
        Self {
            catalog: Arc::new(catalog),
            contacts: Store::bounded(config.contact_capacity),
            limiter: RateLimitStore::new(),
            drafter,
            metrics: ApiMetrics::new(),
            config,
        }
    }

    /// Replace the reply drafter.
    pub fn with_drafter(mut self, drafter: Option<Arc<dyn ReplyDrafter>>) -> Self {
        self.drafter = drafter;
        self
    }
}
