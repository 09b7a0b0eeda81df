//! Shared store handle with atomic whole-store swaps.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use crate::compiler::compile;
use crate::error::Result;
use crate::schema::RulesConfig;

use super::RuleStore;

/// Cloneable handle to the current [`RuleStore`].
///
/// Readers take a snapshot and evaluate against it without holding any lock.
/// A rebuild compiles a complete new store first and then swaps the
/// reference, so readers see either the old store or the new one.
#[derive(Debug, Clone, Default)]
pub struct SharedRuleStore {
    current: Arc<RwLock<Arc<RuleStore>>>,
}

impl SharedRuleStore {
    pub fn new(store: RuleStore) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(store))),
        }
    }

    /// The store currently being served.
    pub fn snapshot(&self) -> Arc<RuleStore> {
        Arc::clone(&self.current.read().expect("rule store lock poisoned"))
    }

    /// Compile `config` and swap it in. On error the current store is kept.
    pub fn rebuild(&self, config: &RulesConfig) -> Result<()> {
        let store = match compile(config) {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "rule store rebuild failed, keeping current rules");
                return Err(e);
            }
        };
        let services = store.len();
        self.replace(store);
        info!(services, "swapped in rebuilt rule store");
        Ok(())
    }

    /// Swap in an already built store, returning the previous one.
    pub fn replace(&self, store: RuleStore) -> Arc<RuleStore> {
        let mut guard = self.current.write().expect("rule store lock poisoned");
        std::mem::replace(&mut *guard, Arc::new(store))
    }
}
