//! # Metadata Decoder Interface
//!
//! Seam to the collaborator that decodes the platform-supplied firmware
//! descriptor blob (binary MOF) into the structured notification table.
//! The decoding grammar lives entirely behind this trait; consumers see
//! only its output.

use crate::table::NotificationTable;
use crate::{WmiError, WmiResult};

/// Firmware metadata collaborator abstraction
///
/// Lifecycle: `initialize` once, then `extract_firmware_table` to decode
/// the descriptor blob. The decoded table remains owned by the collaborator
/// and is only borrowed by consumers for the duration of the attach session.
pub trait MetadataSource: Send + Sync {
    /// Prepare the collaborator for extraction
    fn initialize(&mut self) -> WmiResult<()>;

    /// Decode the platform-supplied descriptor blob into the notification table
    fn extract_firmware_table(&mut self) -> WmiResult<()>;

    /// The decoded notification table, if extraction produced one
    fn notification_table(&self) -> Option<&NotificationTable>;

    /// Well-known GUID to canonical event name associations for this platform
    ///
    /// Used to seed the event name registry before validation.
    fn known_event_names(&self) -> &[(&'static str, &'static str)] {
        &[]
    }
}

/// Metadata source over a table built ahead of time
///
/// Used where the decoded table is produced elsewhere and handed in whole,
/// and by tests. Follows the trait lifecycle strictly: the table is not
/// visible until `extract_firmware_table` has run.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    table: Option<NotificationTable>,
    names: &'static [(&'static str, &'static str)],
    initialized: bool,
    extracted: bool,
}

impl StaticSource {
    /// Create a source over a pre-built table
    pub fn new(table: NotificationTable) -> Self {
        Self {
            table: Some(table),
            names: &[],
            initialized: false,
            extracted: false,
        }
    }

    /// Attach well-known event name associations
    pub fn with_event_names(mut self, names: &'static [(&'static str, &'static str)]) -> Self {
        self.names = names;
        self
    }
}

impl MetadataSource for StaticSource {
    fn initialize(&mut self) -> WmiResult<()> {
        self.initialized = true;
        log::debug!("metadata source initialized");
        Ok(())
    }

    fn extract_firmware_table(&mut self) -> WmiResult<()> {
        if !self.initialized {
            return Err(WmiError::NotInitialized);
        }
        if self.table.is_none() {
            return Err(WmiError::NoFirmwareData);
        }
        self.extracted = true;
        Ok(())
    }

    fn notification_table(&self) -> Option<&NotificationTable> {
        if !self.extracted {
            return None;
        }
        self.table.as_ref()
    }

    fn known_event_names(&self) -> &[(&'static str, &'static str)] {
        self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{NotificationDescriptor, NotificationTable, TableEntry};

    #[test]
    fn static_source_follows_lifecycle() {
        let mut table = NotificationTable::new();
        table.insert(
            "1A".into(),
            TableEntry::Parsed(NotificationDescriptor::new(0x1A)),
        );
        let mut source = StaticSource::new(table);

        assert!(source.notification_table().is_none());
        assert_eq!(
            source.extract_firmware_table(),
            Err(WmiError::NotInitialized)
        );

        source.initialize().unwrap();
        source.extract_firmware_table().unwrap();
        assert_eq!(source.notification_table().map(NotificationTable::len), Some(1));
    }

    #[test]
    fn static_source_without_table_reports_no_data() {
        let mut source = StaticSource::default();
        source.initialize().unwrap();
        assert_eq!(source.extract_firmware_table(), Err(WmiError::NoFirmwareData));
    }

    #[test]
    fn event_names_default_to_empty() {
        let source = StaticSource::new(NotificationTable::new());
        assert!(source.known_event_names().is_empty());

        let source = source.with_event_names(&[("ABCD-1234", "LidEvent")]);
        assert_eq!(source.known_event_names(), &[("ABCD-1234", "LidEvent")]);
    }
}
