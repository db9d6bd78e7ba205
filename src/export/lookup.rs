//! Resolving a ticket view by identity.

use crate::model::TicketView;
use std::collections::HashMap;

/// Finds rendered views by identity.
pub trait ViewLookup: Send + Sync {
    fn find_view(&self, id: &str) -> Option<&TicketView>;
}

/// Views keyed by their identity.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    views: HashMap<String, TicketView>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a view under its own identity, replacing any previous one.
    pub fn insert(&mut self, view: TicketView) -> Option<TicketView> {
        self.views.insert(view.id.clone(), view)
    }

    /// Builder form of [`ViewRegistry::insert`].
    pub fn with_view(mut self, view: TicketView) -> Self {
        self.insert(view);
        self
    }

    pub fn remove(&mut self, id: &str) -> Option<TicketView> {
        self.views.remove(id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl ViewLookup for ViewRegistry {
    fn find_view(&self, id: &str) -> Option<&TicketView> {
        self.views.get(id)
    }
}
