//! # Driver Lifecycle
//!
//! Attach-session scaffolding around the validator and dispatcher. The
//! driver binds one metadata collaborator, runs the one-shot validation
//! pass at attach time, and forwards live platform messages to the
//! dispatcher until detach.

use crate::dispatch::{self, DispatchMessage, DispatchOutcome};
use crate::registry::EventNameRegistry;
use crate::validate::{self, Diagnostic};
use crate::{DriverError, DriverResult, DriverState};
use alloc::vec::Vec;
use wmi::source::MetadataSource;

/// WMI notification driver bound to one metadata collaborator
///
/// Owns the event name registry for the duration of one attach session.
/// The notification table stays with the collaborator and is only borrowed
/// while `attach` runs.
#[derive(Debug)]
pub struct NotifyDriver<S: MetadataSource> {
    source: S,
    registry: EventNameRegistry,
    state: DriverState,
}

impl<S: MetadataSource> NotifyDriver<S> {
    /// Create a driver over a metadata collaborator
    pub fn new(source: S) -> Self {
        Self {
            source,
            registry: EventNameRegistry::new(),
            state: DriverState::Idle,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// The session's event name registry
    pub fn registry(&self) -> &EventNameRegistry {
        &self.registry
    }

    /// Attach: initialize the collaborator, extract the firmware table and
    /// run the one-shot validation pass
    ///
    /// Returns the validation report. Malformed table entries are
    /// diagnostics inside the report, not errors; only collaborator
    /// failures make attach fail.
    pub fn attach(&mut self) -> DriverResult<Vec<Diagnostic>> {
        if self.state != DriverState::Idle {
            return Err(DriverError::WrongState {
                current: self.state,
                required: DriverState::Idle,
            });
        }
        log::debug!("attaching");

        self.source.initialize().map_err(DriverError::Init)?;
        self.source
            .extract_firmware_table()
            .map_err(DriverError::Extract)?;

        let registry = EventNameRegistry::with_known_names(self.source.known_event_names());
        let table = self.source.notification_table().ok_or(DriverError::NoTable)?;
        let report = validate::validate(table, &registry);
        log::info!(
            "validated {} notification entries, {} guids registered",
            table.len(),
            registry.len()
        );

        self.registry = registry;
        self.state = DriverState::Attached;
        Ok(report)
    }

    /// Route one asynchronous platform message
    ///
    /// Always acknowledged. A message arriving outside the attached state
    /// is still classified and reported, never an error.
    pub fn message(&self, message: &DispatchMessage<'_>) -> DispatchOutcome {
        if self.state != DriverState::Attached {
            log::debug!("message while {}", self.state);
        }
        dispatch::dispatch(message)
    }

    /// Detach: end the attach session
    ///
    /// The collaborator's table is no longer referenced and the registry
    /// stops growing.
    pub fn detach(&mut self) -> DriverResult<()> {
        if self.state != DriverState::Attached {
            return Err(DriverError::WrongState {
                current: self.state,
                required: DriverState::Attached,
            });
        }
        log::debug!("detaching");
        self.state = DriverState::Detached;
        Ok(())
    }
}
