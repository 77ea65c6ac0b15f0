//! Blind pin-role discovery for an eMMC device wired to three unknown GPIOs.
//!
//! Every bijection of the three probe lines onto CLK / CMD / D0 is tried in a
//! fixed order with a 1-bit, 400 kHz identification-mode enumeration. The
//! first candidate that identifies an MMC-class card wins; the host stays
//! initialised on that mapping and the status indicator is held.
//!
//! Hardware is reached only through [`host::MmcProbeHost`],
//! [`indicator::Indicator`] and [`embedded_hal::delay::DelayNs`], so the
//! search runs unchanged on target firmware and against fakes in tests.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod card;
pub mod common;
pub mod config;
pub mod host;
pub mod indicator;
pub mod probe;
pub mod tools;

pub use card::{CardDescriptor, CardInfo, CardType, MmcCid};
pub use common::pins::{BusRole, PhysicalLine, RoleAssignment, candidate_set};
pub use config::{ConfigError, ProbeConfig};
pub use host::{HostGuard, MmcHostError, MmcHostResult, MmcProbeHost};
pub use indicator::{Color, Indicator, RgbIndicator};
pub use probe::driver::{OutcomeKind, ProbeError, ProbeOutcome, probe_once};
pub use probe::report::StatusReporter;
pub use probe::search::{
    PinSearch, SearchError, SearchOutcome, SearchPhase, SearchState, run_and_park,
};
