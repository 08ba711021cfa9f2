//! Test helper utilities

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use docview::{DisplayReference, RawReference, RegistryError, ResourceRegistry, TrustPolicy};

/// What happened inside a [`RecordingRegistry`], in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    Created(String),
    Revoked(String),
}

/// Registry stub that logs every create and revoke.
///
/// The log is shared, so it stays readable after the cache owning the
/// registry has been dropped.
#[derive(Debug, Default)]
pub struct RecordingRegistry {
    log: Rc<RefCell<Vec<RegistryEvent>>>,
    next_id: u32,
    /// When set, `create` fails with this message
    pub fail_with: Option<String>,
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the event log
    pub fn log(&self) -> Rc<RefCell<Vec<RegistryEvent>>> {
        Rc::clone(&self.log)
    }

    pub fn events(&self) -> Vec<RegistryEvent> {
        self.log.borrow().clone()
    }

    pub fn created(&self) -> Vec<String> {
        created_in(&self.events())
    }

    pub fn revoked(&self) -> Vec<String> {
        revoked_in(&self.events())
    }

    /// References created and not yet revoked
    pub fn live(&self) -> usize {
        self.created().len() - self.revoked().len()
    }
}

impl ResourceRegistry for RecordingRegistry {
    fn create(&mut self, _content: &[u8]) -> Result<RawReference, RegistryError> {
        if let Some(message) = &self.fail_with {
            return Err(RegistryError::Rejected(message.clone()));
        }
        self.next_id += 1;
        let url = format!("test:{}", self.next_id);
        self.log.borrow_mut().push(RegistryEvent::Created(url.clone()));
        Ok(RawReference::new(url))
    }

    fn revoke(&mut self, reference: RawReference) {
        self.log
            .borrow_mut()
            .push(RegistryEvent::Revoked(reference.url().to_string()));
    }
}

/// URLs created, in order
pub fn created_in(events: &[RegistryEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            RegistryEvent::Created(url) => Some(url.clone()),
            RegistryEvent::Revoked(_) => None,
        })
        .collect()
}

/// URLs revoked, in order
pub fn revoked_in(events: &[RegistryEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            RegistryEvent::Revoked(url) => Some(url.clone()),
            RegistryEvent::Created(_) => None,
        })
        .collect()
}

/// Trust policy stub that wraps without any fragment.
#[derive(Debug, Default)]
pub struct PlainTrust;

impl TrustPolicy for PlainTrust {
    fn trust(&self, raw: &RawReference) -> DisplayReference {
        DisplayReference::trusted(raw, "")
    }
}
