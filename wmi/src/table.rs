//! # Notification Table
//!
//! Structured output of the firmware metadata decoder: an insertion-ordered
//! mapping from a textual notification key to the decoded descriptor for
//! that notification, as declared by the firmware's WMI event blocks.
//!
//! Firmware data is untrusted: a slot may fail to decode into a structured
//! record, and a decoded record may lack any of its fields. Both conditions
//! are represented explicitly so consumers diagnose them instead of failing.

use crate::NotifyId;
use alloc::string::String;
use alloc::vec::Vec;
use bitflags::bitflags;
use core::fmt;

bitflags! {
    /// Flags of the firmware-declared data block an entry was decoded from
    ///
    /// These mirror the ACPI WDG block flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BlockFlags: u8 {
        /// Accessing the block is expensive and should be gated
        const EXPENSIVE = 1 << 0;
        /// Block describes a method
        const METHOD = 1 << 1;
        /// Block data is a string
        const STRING = 1 << 2;
        /// Block describes an event source
        const EVENT = 1 << 3;
    }
}

/// Two-character textual code for a notification id
///
/// The decoder keys each table entry by the hexadecimal rendering of the
/// low 8 bits of its notification id, e.g. `"1A"` for id `0x1A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotificationKey(String);

impl NotificationKey {
    /// Create a key from its textual code
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Parse the key as a 2-digit hexadecimal notification id
    ///
    /// Anything but exactly two ASCII hex digits fails to parse.
    pub fn parse(&self) -> Option<NotifyId> {
        if self.0.len() != 2 || !self.0.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u8::from_str_radix(&self.0, 16).ok().map(NotifyId::new)
    }

    /// Get the textual code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NotificationKey {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl fmt::Display for NotificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One decoded entry of the notification table
///
/// Every field beyond the block flags is optional: the decoder records what
/// it could recover and leaves the rest absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationDescriptor {
    /// Canonical numeric notification code
    pub id: Option<NotifyId>,
    /// Name of the firmware-declared class raising this notification
    pub class_name: Option<String>,
    /// GUID of the WMI interface instance raising this notification
    pub guid: Option<String>,
    /// Flags of the source data block
    pub flags: BlockFlags,
}

impl NotificationDescriptor {
    /// Create a descriptor for a decoded event block with the given id
    pub fn new(id: u8) -> Self {
        Self {
            id: Some(NotifyId::new(id)),
            class_name: None,
            guid: None,
            flags: BlockFlags::EVENT,
        }
    }

    /// Set the declaring class name
    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    /// Set the source GUID
    pub fn guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = Some(guid.into());
        self
    }

    /// Set the source block flags
    pub fn flags(mut self, flags: BlockFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A raw table slot
///
/// Either a structured descriptor or a slot the decoder could not parse
/// into one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEntry {
    /// The slot did not decode to a structured record
    Unparsed,
    /// The decoded descriptor
    Parsed(NotificationDescriptor),
}

/// Insertion-ordered mapping from notification key to table entry
///
/// Iteration yields entries in the order the decoder inserted them, which
/// is the order validation reports them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationTable {
    entries: Vec<(NotificationKey, TableEntry)>,
}

impl NotificationTable {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert an entry, preserving insertion order
    ///
    /// Re-inserting an existing key replaces the entry in place.
    pub fn insert(&mut self, key: NotificationKey, entry: TableEntry) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = entry,
            None => self.entries.push((key, entry)),
        }
    }

    /// Look up an entry by its textual key
    pub fn get(&self, key: &str) -> Option<&TableEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, entry)| entry)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&NotificationKey, &TableEntry)> {
        self.entries.iter().map(|(k, e)| (k, e))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_parses_two_hex_digits() {
        assert_eq!(NotificationKey::from("1A").parse(), Some(NotifyId::new(0x1A)));
        assert_eq!(NotificationKey::from("d0").parse(), Some(NotifyId::new(0xD0)));
        assert_eq!(NotificationKey::from("00").parse(), Some(NotifyId::new(0x00)));
    }

    #[test]
    fn key_rejects_malformed_codes() {
        assert_eq!(NotificationKey::from("1").parse(), None);
        assert_eq!(NotificationKey::from("1A0").parse(), None);
        assert_eq!(NotificationKey::from("ZZ").parse(), None);
        assert_eq!(NotificationKey::from("+f").parse(), None);
        assert_eq!(NotificationKey::from("").parse(), None);
    }

    #[test]
    fn descriptor_builder_sets_fields() {
        let desc = NotificationDescriptor::new(0x1A)
            .class_name("LIDD")
            .guid("ABCD-1234");

        assert_eq!(desc.id, Some(NotifyId::new(0x1A)));
        assert_eq!(desc.class_name.as_deref(), Some("LIDD"));
        assert_eq!(desc.guid.as_deref(), Some("ABCD-1234"));
        assert!(desc.flags.contains(BlockFlags::EVENT));
    }

    #[test]
    fn table_preserves_insertion_order() {
        let mut table = NotificationTable::new();
        table.insert("D0".into(), TableEntry::Parsed(NotificationDescriptor::new(0xD0)));
        table.insert("1A".into(), TableEntry::Parsed(NotificationDescriptor::new(0x1A)));
        table.insert("40".into(), TableEntry::Unparsed);

        let keys: Vec<&str> = table.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["D0", "1A", "40"]);
    }

    #[test]
    fn table_replaces_in_place() {
        let mut table = NotificationTable::new();
        table.insert("1A".into(), TableEntry::Unparsed);
        table.insert("40".into(), TableEntry::Unparsed);
        table.insert(
            "1A".into(),
            TableEntry::Parsed(NotificationDescriptor::new(0x1A)),
        );

        assert_eq!(table.len(), 2);
        let keys: Vec<&str> = table.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["1A", "40"]);
        assert!(matches!(table.get("1A"), Some(TableEntry::Parsed(_))));
    }
}
