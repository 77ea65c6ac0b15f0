use embedded_hal::delay::DelayNs;
use log::{error, info, warn};

use crate::{
    card::CardDescriptor,
    common::pins::RoleAssignment,
    config::{ConfigError, TAG},
    indicator::{Color, Indicator},
    probe::driver::ProbeOutcome,
};

/// Turns search progress into log lines and LED colours.
pub struct StatusReporter<I: Indicator> {
    indicator: I,
    pulse_ms: u32,
}

impl<I: Indicator> StatusReporter<I> {
    pub fn new(indicator: I, pulse_ms: u32) -> Self {
        StatusReporter { indicator, pulse_ms }
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn indicator_mut(&mut self) -> &mut I {
        &mut self.indicator
    }

    pub fn into_indicator(self) -> I {
        self.indicator
    }

    pub fn on_start(&mut self) {
        self.indicator.set(Color::Off);
        info!("[{}] Start 3-GPIO role-swap eMMC probe", TAG);
    }

    pub fn on_attempt(&mut self, index: usize, assignment: &RoleAssignment) {
        info!("[{}] Try #{}: {}", TAG, index, assignment);
    }

    pub fn on_rejected<D: DelayNs>(
        &mut self,
        index: usize,
        assignment: &RoleAssignment,
        outcome: &ProbeOutcome,
        delay: &mut D,
    ) {
        match outcome.error() {
            Some(reason) => info!(
                "[{}] Reject #{} {}: {} ({})",
                TAG,
                index,
                assignment,
                outcome.kind().name(),
                reason
            ),
            None => info!("[{}] Reject #{} {}: {}", TAG, index, assignment, outcome.kind().name()),
        }

        if self.pulse_ms > 0 {
            self.indicator.set(Color::AttemptFailed);
            delay.delay_ms(self.pulse_ms);
            self.indicator.set(Color::Off);
        }
    }

    pub fn on_found(&mut self, assignment: &RoleAssignment, card: &CardDescriptor) {
        info!("[{}] VALID eMMC FOUND", TAG);
        info!("[{}] Mapping: {}", TAG, assignment);
        info!(
            "[{}] CID: {:08x} {:08x} {:08x} {:08x}",
            TAG, card.raw_cid[0], card.raw_cid[1], card.raw_cid[2], card.raw_cid[3]
        );
        let (major, minor) = card.cid.revision();
        info!(
            "[{}] Name: {} rev {}.{} MID=0x{:02x} OID=0x{:02x} S/N=0x{:08x} date={:02}/{}",
            TAG,
            card.product_name,
            major,
            minor,
            card.cid.manufacturer_id,
            card.cid.oem_id,
            card.cid.serial_number,
            card.cid.date.month,
            card.cid.date.year
        );
        info!(
            "[{}] Capacity: {} MB ({} sectors x {} B)",
            TAG,
            card.capacity_mb(),
            card.sector_count,
            card.sector_size
        );
        self.indicator.set(Color::Success);
    }

    pub fn on_exhausted(&mut self, attempts: usize) {
        warn!(
            "[{}] No valid eMMC detected with any permutation ({} tried)",
            TAG, attempts
        );
        self.indicator.set(Color::Failure);
    }

    pub fn on_config_error(&mut self, err: &ConfigError) {
        error!("[{}] Invalid probe configuration: {}", TAG, err);
        self.indicator.set(Color::Failure);
    }
}
