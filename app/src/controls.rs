//! Id-keyed collections behind the alert and spinner surfaces.
//!
//! # Design
//! `ListControl` hands out a fresh id per added entry and removes by id.
//! Ids are never reused, so a stale dismiss cannot hit a newer entry.
//! Alerts and the loading spinner are both instances of it.

use todos_core::ApiError;

/// Handle for one entry in a `ListControl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim_start_matches('#').parse().map(ItemId)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct ListControl<T> {
    items: Vec<(ItemId, T)>,
    next_id: u64,
}

impl<T> Default for ListControl<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> ListControl<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push((id, item));
        id
    }

    /// Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: ItemId) -> Option<T> {
        let index = self.items.iter().position(|(i, _)| *i == id)?;
        Some(self.items.remove(index).1)
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items.iter().find(|(i, _)| *i == id).map(|(_, item)| item)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &T)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Default> ListControl<T> {
    /// Add a default entry and return its id.
    pub fn create(&mut self) -> ItemId {
        self.add(T::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

pub type AlertQueue = ListControl<Alert>;

impl ListControl<Alert> {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> ItemId {
        self.add(Alert {
            severity,
            message: message.into(),
        })
    }

    /// One error alert per message the error carries.
    pub fn push_errors(&mut self, error: &ApiError) {
        for message in error.messages() {
            self.push(Severity::Error, message);
        }
    }
}

/// Outstanding-request tokens; one per in-flight call.
pub type Spinner = ListControl<()>;

impl ListControl<()> {
    pub fn is_loading(&self) -> bool {
        !self.is_empty()
    }
}
