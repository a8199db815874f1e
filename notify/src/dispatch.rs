//! # Notification Dispatcher
//!
//! Stateless routing of asynchronous platform notifications. Each message
//! is classified by channel and payload and reported in one log line.
//!
//! Recognition failure is a diagnostic condition, not an operational error:
//! every message is acknowledged, and the delivery path is never stalled or
//! destabilized by unrecognized firmware data.

use wmi::ACPI_NOTIFY_RESERVED;

/// Message channel carrying ACPI platform device notifications
pub const MSG_DEVICE_NOTIFICATION: u32 = 0x8000_0010;

/// One asynchronous platform notification, as delivered by the platform
/// notification mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchMessage<'a> {
    /// Notification channel
    pub msg_type: u32,
    /// Name of the originating service, used only for diagnostics
    pub provider: &'a str,
    /// 32-bit payload; expected for device notifications
    pub argument: Option<u32>,
}

impl<'a> DispatchMessage<'a> {
    /// Platform device notification carrying an ACPI event code
    pub const fn device_notification(provider: &'a str, argument: Option<u32>) -> Self {
        Self {
            msg_type: MSG_DEVICE_NOTIFICATION,
            provider,
            argument,
        }
    }
}

/// Dispatch decision for one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Device notification carried the reserved sentinel code
    Reserved {
        /// The raw event code
        code: u32,
    },
    /// Device notification carried a code no handler recognizes
    Unrecognized {
        /// The raw event code
        code: u32,
    },
    /// Device notification arrived without its expected payload
    MissingArgument,
    /// Message on another channel, reported generically
    Other {
        /// Raw channel value
        msg_type: u32,
        /// Low 16 bits of the payload, as logged
        argument: Option<u16>,
    },
}

/// Route one platform message
///
/// Always completes and always acknowledges, regardless of whether the
/// notification was recognized. The returned outcome mirrors the log line
/// so callers can observe the decision.
pub fn dispatch(message: &DispatchMessage<'_>) -> DispatchOutcome {
    match (message.msg_type, message.argument) {
        (MSG_DEVICE_NOTIFICATION, Some(code)) if code == ACPI_NOTIFY_RESERVED => {
            log::info!("reserved notify id {code:#x} for {}", message.provider);
            DispatchOutcome::Reserved { code }
        }
        (MSG_DEVICE_NOTIFICATION, Some(code)) => {
            log::info!("unknown notify id {code:#x} for {}", message.provider);
            DispatchOutcome::Unrecognized { code }
        }
        (MSG_DEVICE_NOTIFICATION, None) => {
            log::info!("acpi provider={}, unknown argument", message.provider);
            DispatchOutcome::MissingArgument
        }
        (msg_type, Some(argument)) => {
            let low = (argument & 0xFFFF) as u16;
            log::info!(
                "type={msg_type:#x}, provider={}, argument={low:#06x}",
                message.provider
            );
            DispatchOutcome::Other {
                msg_type,
                argument: Some(low),
            }
        }
        (msg_type, None) => {
            log::info!(
                "type={msg_type:#x}, provider={}, unknown argument",
                message.provider
            );
            DispatchOutcome::Other {
                msg_type,
                argument: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_sentinel_is_reported_as_reserved() {
        let message = DispatchMessage::device_notification("PNP0C14", Some(0xFF));
        assert_eq!(dispatch(&message), DispatchOutcome::Reserved { code: 0xFF });
    }

    #[test]
    fn unknown_code_is_reported_not_escalated() {
        let message = DispatchMessage::device_notification("PNP0C14", Some(0x07));
        assert_eq!(
            dispatch(&message),
            DispatchOutcome::Unrecognized { code: 0x07 }
        );
    }

    #[test]
    fn device_notification_without_argument() {
        let message = DispatchMessage::device_notification("PNP0C14", None);
        assert_eq!(dispatch(&message), DispatchOutcome::MissingArgument);
    }

    #[test]
    fn other_channel_truncates_argument_to_16_bits() {
        let message = DispatchMessage {
            msg_type: 0xE000_0001,
            provider: "PNP0C14",
            argument: Some(0x0012_3456),
        };
        assert_eq!(
            dispatch(&message),
            DispatchOutcome::Other {
                msg_type: 0xE000_0001,
                argument: Some(0x3456),
            }
        );
    }

    #[test]
    fn other_channel_without_argument() {
        let message = DispatchMessage {
            msg_type: 0xE000_0001,
            provider: "PNP0C14",
            argument: None,
        };
        assert_eq!(
            dispatch(&message),
            DispatchOutcome::Other {
                msg_type: 0xE000_0001,
                argument: None,
            }
        );
    }

    #[test]
    fn reserved_only_applies_to_the_device_channel() {
        let message = DispatchMessage {
            msg_type: 0xE000_0001,
            provider: "PNP0C14",
            argument: Some(0xFF),
        };
        assert!(matches!(dispatch(&message), DispatchOutcome::Other { .. }));
    }
}
