//! # WMI Notification Engine
//!
//! The decision core of a vendor WMI driver: validation of the decoded
//! notification table and routing of live platform notifications.
//!
//! - One-shot validation of the firmware-declared notification table
//! - GUID to canonical event name registration and lookup
//! - Stateless dispatch of asynchronous platform messages
//!
//! ## Attach Session
//!
//! 1. Attach: decode, validate, register event names
//! 2. Message dispatch (one message at a time, always acknowledged)
//! 3. Detach: release the collaborator's table
//!
//! Malformed firmware data is routine in this domain. Validation and
//! dispatch therefore never fail: every malformed or unrecognized input is
//! reported through the log facade and processing continues.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod dispatch;
pub mod driver;
pub mod registry;
pub mod validate;


use core::fmt;
use wmi::WmiError;

/// Result type for driver lifecycle operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors from the driver lifecycle
///
/// Only the lifecycle surface is fallible; validation and dispatch report
/// diagnostics instead of returning errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// The metadata collaborator failed to initialize
    Init(WmiError),
    /// Firmware table extraction failed
    Extract(WmiError),
    /// Extraction succeeded but yielded no table
    NoTable,
    /// Lifecycle call in the wrong state
    WrongState {
        /// State the driver is in
        current: DriverState,
        /// State the call requires
        required: DriverState,
    },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(err) => write!(f, "collaborator initialization failed: {err}"),
            Self::Extract(err) => write!(f, "firmware table extraction failed: {err}"),
            Self::NoTable => write!(f, "no notification table extracted"),
            Self::WrongState { current, required } => {
                write!(f, "driver is {current}, call requires {required}")
            }
        }
    }
}

/// Attach-session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Created, not yet attached
    Idle,
    /// Attached; table validated, messages routed
    Attached,
    /// Session torn down
    Detached,
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Attached => "attached",
            Self::Detached => "detached",
        };
        f.write_str(name)
    }
}
