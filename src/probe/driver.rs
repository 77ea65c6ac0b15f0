use log::debug;
use thiserror::Error;

use crate::{
    card::{CardDescriptor, CardType},
    common::pins::RoleAssignment,
    host::{HostConfig, HostGuard, HostSlot, MmcHostError, MmcProbeHost, SlotConfig},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("host acquisition failed: {0}")]
    AcquisitionFailed(MmcHostError),
    #[error("slot configuration failed: {0}")]
    ConfigurationFailed(MmcHostError),
    #[error("card enumeration failed: {0}")]
    EnumerationFailed(MmcHostError),
    #[error("{} card answered, not eMMC", .0.name())]
    WrongDeviceType(CardType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    WrongDeviceType,
    EnumerationFailed,
}

impl OutcomeKind {
    pub fn name(self) -> &'static str {
        match self {
            OutcomeKind::Success => "success",
            OutcomeKind::WrongDeviceType => "wrong device type",
            OutcomeKind::EnumerationFailed => "enumeration failed",
        }
    }
}

/// Result of probing one role assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// An eMMC answered. The host is still initialized on this mapping.
    Success(CardDescriptor),
    /// Something answered that is not eMMC. Host released.
    WrongDeviceType(CardType),
    /// Nothing usable answered. Host released.
    EnumerationFailed(ProbeError),
}

impl ProbeOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ProbeOutcome::Success(_) => OutcomeKind::Success,
            ProbeOutcome::WrongDeviceType(_) => OutcomeKind::WrongDeviceType,
            ProbeOutcome::EnumerationFailed(_) => OutcomeKind::EnumerationFailed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }

    /// Reason a candidate was rejected, `None` on success.
    pub fn error(&self) -> Option<ProbeError> {
        match self {
            ProbeOutcome::Success(_) => None,
            ProbeOutcome::WrongDeviceType(card_type) => {
                Some(ProbeError::WrongDeviceType(*card_type))
            }
            ProbeOutcome::EnumerationFailed(err) => Some(*err),
        }
    }
}

/// Probe one assignment: claim the host, bind the slot, enumerate, classify.
///
/// The host is deinitialized on every path except [`ProbeOutcome::Success`].
pub fn probe_once<H: MmcProbeHost>(
    host: &mut H,
    assignment: &RoleAssignment,
    slot: HostSlot,
    clk_khz: u32,
) -> ProbeOutcome {
    let mut guard = match HostGuard::acquire(host) {
        Ok(guard) => guard,
        Err(e) => return ProbeOutcome::EnumerationFailed(ProbeError::AcquisitionFailed(e)),
    };

    let host_config = HostConfig::probe(slot, clk_khz);
    let slot_config = SlotConfig::for_assignment(assignment);
    debug!(
        "slot {:?}: width={} flags={:?} max_freq={}kHz",
        host_config.slot, slot_config.width, slot_config.flags, host_config.max_freq_khz
    );

    if let Err(e) = guard.init_slot(&host_config, &slot_config) {
        return ProbeOutcome::EnumerationFailed(ProbeError::ConfigurationFailed(e));
    }

    let info = match guard.card_init(&host_config) {
        Ok(info) => info,
        Err(e) => return ProbeOutcome::EnumerationFailed(ProbeError::EnumerationFailed(e)),
    };

    if !info.card_type.is_mmc() {
        debug!("{} card on {}", info.card_type.name(), assignment);
        return ProbeOutcome::WrongDeviceType(info.card_type);
    }

    guard.retain();
    ProbeOutcome::Success(CardDescriptor::from_info(&info))
}
