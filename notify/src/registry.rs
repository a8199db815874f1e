//! # Event Name Registry
//!
//! Maps WMI interface GUIDs to canonical, human-readable event names for
//! diagnostics. Scoped to one attach session and monotonic: registrations
//! accrete, nothing is removed until the session tears the registry down.

use alloc::collections::BTreeMap;
use alloc::string::String;
use spin::RwLock;
use wmi::NotifyId;

/// GUID to canonical event name registry
///
/// Two layers: a read-only table of well-known associations seeded by the
/// metadata collaborator before validation, and the session registrations
/// accumulated while entries are validated. A GUID's first registration
/// wins; later registrations return the stored resolution unchanged, even
/// when the first resolution failed.
#[derive(Debug, Default)]
pub struct EventNameRegistry {
    /// Well-known associations supplied by the metadata collaborator
    known: BTreeMap<String, String>,
    /// Session registrations, including failed resolutions
    registered: RwLock<BTreeMap<String, Option<String>>>,
}

impl EventNameRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with well-known GUID to name associations
    pub fn with_known_names(names: &[(&str, &str)]) -> Self {
        let mut registry = Self::new();
        for &(guid, name) in names {
            registry.add_known_name(guid, name);
        }
        registry
    }

    /// Add one well-known association
    ///
    /// Seeding happens before validation starts, hence `&mut self`; the
    /// session registrations are the only state mutated concurrently.
    pub fn add_known_name(&mut self, guid: impl Into<String>, name: impl Into<String>) {
        self.known.insert(guid.into(), name.into());
    }

    /// Register `guid` for notification `id`, or return its existing resolution
    ///
    /// The association is recorded even when no name resolves, so a later
    /// registration of the same GUID is a lookup, not a retry.
    pub fn register_or_lookup(&self, guid: &str, id: NotifyId) -> Option<String> {
        let mut registered = self.registered.write();
        if let Some(existing) = registered.get(guid) {
            return existing.clone();
        }

        let resolved = self.known.get(guid).cloned();
        match &resolved {
            Some(name) => log::info!("registered event {name} for notify id {id} ({guid})"),
            None => log::info!("no event name for {guid} (notify id {id})"),
        }
        registered.insert(String::from(guid), resolved.clone());
        resolved
    }

    /// Look up a GUID's session resolution without registering it
    pub fn lookup(&self, guid: &str) -> Option<String> {
        self.registered.read().get(guid).cloned().flatten()
    }

    /// Whether the GUID has been registered this session
    pub fn contains(&self, guid: &str) -> bool {
        self.registered.read().contains_key(guid)
    }

    /// Number of session registrations
    pub fn len(&self) -> usize {
        self.registered.read().len()
    }

    /// Whether no registration has happened this session
    pub fn is_empty(&self) -> bool {
        self.registered.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_guid_resolves_on_registration() {
        let registry = EventNameRegistry::with_known_names(&[("ABCD-1234", "LidEvent")]);

        let name = registry.register_or_lookup("ABCD-1234", NotifyId::new(0x1A));
        assert_eq!(name.as_deref(), Some("LidEvent"));
        assert!(registry.contains("ABCD-1234"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_guid_is_recorded_without_a_name() {
        let registry = EventNameRegistry::new();

        let name = registry.register_or_lookup("ABCD-1234", NotifyId::new(0x1A));
        assert_eq!(name, None);
        // Recorded: re-registration is a lookup, not a retry.
        assert!(registry.contains("ABCD-1234"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registration_is_idempotent() {
        let registry = EventNameRegistry::with_known_names(&[("ABCD-1234", "LidEvent")]);

        let first = registry.register_or_lookup("ABCD-1234", NotifyId::new(0x1A));
        let second = registry.register_or_lookup("ABCD-1234", NotifyId::new(0x1B));

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn first_resolution_wins_over_later_seeding() {
        let mut registry = EventNameRegistry::new();
        let before = registry.register_or_lookup("ABCD-1234", NotifyId::new(0x1A));
        assert_eq!(before, None);

        // A name learned after the first registration does not rewrite it.
        registry.add_known_name("ABCD-1234", "LidEvent");
        let after = registry.register_or_lookup("ABCD-1234", NotifyId::new(0x1A));
        assert_eq!(after, None);
    }

    #[test]
    fn lookup_does_not_register() {
        let registry = EventNameRegistry::with_known_names(&[("ABCD-1234", "LidEvent")]);

        assert_eq!(registry.lookup("ABCD-1234"), None);
        assert!(registry.is_empty());
    }
}
