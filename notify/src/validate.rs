//! # Registry Validator
//!
//! One-shot pass over the decoded notification table, run at attach time.
//! Each entry's key encoding is cross-checked against its decoded id and
//! its GUID is resolved to a canonical event name through the registry.
//!
//! Validation is best-effort and total: no entry aborts the pass, and every
//! finding is a diagnostic record rather than an error.

use crate::registry::EventNameRegistry;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use wmi::table::{BlockFlags, NotificationKey, NotificationTable, TableEntry};
use wmi::NotifyId;

/// One diagnostic record emitted for a table entry
///
/// Records are also emitted through the log facade, one informational line
/// each, in the order the table declares its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Table slot was not a structured record
    UnparsedEntry {
        /// Key of the offending slot
        key: NotificationKey,
    },
    /// Structured entry carried no numeric id
    InvalidIdentifier {
        /// Key of the offending entry
        key: NotificationKey,
    },
    /// Key-encoded id disagrees with the decoded id
    ///
    /// Non-fatal: the decoded id is authoritative and processing continues.
    IdentifierMismatch {
        /// Key whose encoding disagrees
        key: NotificationKey,
        /// Decoded id, used going forward
        id: NotifyId,
    },
    /// Entry carries no class name; name resolution abandoned
    MissingDescription {
        /// Decoded id of the entry
        id: NotifyId,
    },
    /// Entry resolved through the registry
    ///
    /// `name` is absent when the entry has no GUID or resolution yielded
    /// no name; the record is emitted either way.
    Resolved {
        /// Canonical event name, if one resolved
        name: Option<String>,
        /// Decoded id of the entry
        id: NotifyId,
        /// Declaring class name
        class: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparsedEntry { key } => write!(f, "unparsed notification id {key}"),
            Self::InvalidIdentifier { key } => write!(f, "invalid notification id {key}"),
            Self::IdentifierMismatch { key, id } => {
                write!(f, "notification id {key} mismatch {id}")
            }
            Self::MissingDescription { id } => {
                write!(f, "notification id {id} has no description")
            }
            Self::Resolved { name, id, class } => write!(
                f,
                "resolved {} notification id {id} for class {class}",
                name.as_deref().unwrap_or("unknown")
            ),
        }
    }
}

/// Validate the full table in insertion order, resolving event names
///
/// Side effects: every record is logged, and entries with a GUID register
/// it with the registry. The pass never aborts; malformed entries yield
/// their diagnostic and processing moves to the next entry.
pub fn validate(table: &NotificationTable, registry: &EventNameRegistry) -> Vec<Diagnostic> {
    let mut report = Vec::with_capacity(table.len());
    for (key, entry) in table.iter() {
        validate_entry(key, entry, registry, &mut report);
    }
    report
}

fn validate_entry(
    key: &NotificationKey,
    entry: &TableEntry,
    registry: &EventNameRegistry,
    report: &mut Vec<Diagnostic>,
) {
    let desc = match entry {
        TableEntry::Unparsed => {
            emit(report, Diagnostic::UnparsedEntry { key: key.clone() });
            return;
        }
        TableEntry::Parsed(desc) => desc,
    };

    let Some(id) = desc.id else {
        emit(report, Diagnostic::InvalidIdentifier { key: key.clone() });
        return;
    };

    // Decoded id is authoritative; the key encoding is only cross-checked.
    if key.parse() != Some(id) {
        emit(report, Diagnostic::IdentifierMismatch { key: key.clone(), id });
    }

    let Some(class) = desc.class_name.as_deref() else {
        emit(report, Diagnostic::MissingDescription { id });
        return;
    };

    if !desc.flags.contains(BlockFlags::EVENT) {
        log::debug!("notification id {id} declared by a block without the EVENT flag");
    }

    let name = desc
        .guid
        .as_deref()
        .and_then(|guid| registry.register_or_lookup(guid, id));
    emit(
        report,
        Diagnostic::Resolved {
            name,
            id,
            class: String::from(class),
        },
    );
}

fn emit(report: &mut Vec<Diagnostic>, diag: Diagnostic) {
    log::info!("{diag}");
    report.push(diag);
}
