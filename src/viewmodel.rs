//! Shared list/detail view-model behind every dashboard.
//!
//! Keeps the last successfully fetched snapshot, an aadhar search query
//! and the single expanded card, independent of any widget toolkit. The
//! GUI renders purely from this state, so a poll tick, a search keystroke
//! and a post-decision refresh all flow through the same two entry points
//! (`apply_fetch`, `set_query`).

use crate::core::api::ApiError;

pub trait RosterRecord {
    fn record_id(&self) -> &str;
    fn aadhar(&self) -> &str;
}

impl RosterRecord for crate::models::ApplicationRecord {
    fn record_id(&self) -> &str {
        &self.id
    }
    fn aadhar(&self) -> &str {
        &self.aadhar
    }
}

impl RosterRecord for crate::models::DisapprovedTraveler {
    fn record_id(&self) -> &str {
        &self.id
    }
    fn aadhar(&self) -> &str {
        &self.aadhar
    }
}

#[derive(Debug, Clone)]
pub struct Roster<R> {
    snapshot: Vec<R>,
    loaded: bool,
    query: String,
    expanded: Option<String>,
    last_error: Option<String>,
}

impl<R> Default for Roster<R> {
    fn default() -> Self {
        Self {
            snapshot: Vec::new(),
            loaded: false,
            query: String::new(),
            expanded: None,
            last_error: None,
        }
    }
}

impl<R: RosterRecord> Roster<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether at least one fetch has succeeded. Until then a search has
    /// no local snapshot to narrow and must go to the server.
    pub fn has_cache(&self) -> bool {
        self.loaded
    }

    pub fn records(&self) -> &[R] {
        &self.snapshot
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
    }

    /// Fold a fetch outcome into the view state. A success replaces the
    /// snapshot wholesale (last write wins); a failure keeps the previous
    /// snapshot visible and only records the message.
    pub fn apply_fetch(&mut self, result: Result<Vec<R>, ApiError>) {
        match result {
            Ok(records) => {
                self.snapshot = records;
                self.loaded = true;
                self.last_error = None;
                // An expansion whose record vanished must not resurface
                // on some other card; expansion is keyed by id, never by
                // list position.
                if let Some(id) = &self.expanded {
                    if !self.snapshot.iter().any(|r| r.record_id() == id) {
                        self.expanded = None;
                    }
                }
            }
            Err(error) => {
                self.last_error = Some(error.to_string());
            }
        }
    }

    /// Records matching the current query: substring match on aadhar,
    /// in fetch order. An empty query matches everything.
    pub fn visible(&self) -> Vec<&R> {
        let query = self.query.trim();
        self.snapshot
            .iter()
            .filter(|r| query.is_empty() || r.aadhar().contains(query))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.visible().is_empty()
    }

    /// Expand the given card, collapsing whichever was open; toggling the
    /// open card collapses it. At most one card is ever expanded.
    pub fn toggle(&mut self, id: &str) {
        if self.expanded.as_deref() == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.to_string());
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.as_deref() == Some(id)
    }

    pub fn expanded_id(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
