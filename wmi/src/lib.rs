//! # WMI - Firmware Instrumentation Data Model
//!
//! This crate defines the data model for a vendor ACPI WMI interface: the
//! structured notification table produced by the firmware metadata decoder,
//! and the collaborator seam behind which that decoder lives.
//!
//! The decoding grammar of the firmware descriptor blob (binary MOF) is not
//! part of this crate; consumers only see its output through
//! [`source::MetadataSource`].

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod source;
pub mod table;

use alloc::string::String;
use core::fmt;
use static_assertions::{assert_eq_size, const_assert};

/// Result type for firmware metadata operations
pub type WmiResult<T> = Result<T, WmiError>;

/// Errors reported by the firmware metadata collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WmiError {
    /// The collaborator was used before `initialize`
    NotInitialized,
    /// The platform supplied no firmware descriptor blob
    NoFirmwareData,
    /// The descriptor blob could not be decoded
    DecodeFailed(String),
}

impl fmt::Display for WmiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "metadata source not initialized"),
            Self::NoFirmwareData => write!(f, "no firmware descriptor data"),
            Self::DecodeFailed(reason) => write!(f, "descriptor decode failed: {reason}"),
        }
    }
}

/// Canonical numeric notification code (the low 8 bits of a notification id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NotifyId(u8);

impl NotifyId {
    /// Create a notification id from its raw code
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Get the raw code
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl From<u8> for NotifyId {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NotifyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Reserved ACPI notify code.
///
/// Device notifications carrying this code are reported as reserved rather
/// than unknown.
pub const ACPI_NOTIFY_RESERVED: u32 = 0xFF;

assert_eq_size!(NotifyId, u8);
const_assert!(ACPI_NOTIFY_RESERVED <= u8::MAX as u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_id_displays_as_hex() {
        use alloc::format;
        assert_eq!(format!("{}", NotifyId::new(0x1A)), "0x1a");
        assert_eq!(format!("{}", NotifyId::new(0x07)), "0x07");
    }

    #[test]
    fn notify_id_round_trips_raw_code() {
        let id = NotifyId::from(0xD0);
        assert_eq!(id.as_u8(), 0xD0);
        assert_eq!(id, NotifyId::new(0xD0));
    }
}
