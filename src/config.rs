// Board wiring and probe timing.

use thiserror::Error;

use crate::common::{MMC_IDENT_MAX_KHZ, pins::PhysicalLine};
use crate::host::HostSlot;

// =============================================================================
// Probe lines (three wires to the target board, roles unknown)
// =============================================================================

pub const PROBE_A: u32 = 36;
pub const PROBE_B: u32 = 35;
pub const PROBE_C: u32 = 34;

// =============================================================================
// RGB status LED (three plain GPIOs, not an addressable LED)
// =============================================================================

pub const PIN_R: u32 = 2;
pub const PIN_G: u32 = 3;
pub const PIN_B: u32 = 4;

// =============================================================================
// Timing
// =============================================================================

/// Probe clock, kept at the identification-mode ceiling.
pub const PROBE_CLK_KHZ: u32 = 400;

/// Pause between candidates so the lines settle after deinit.
pub const SETTLE_DELAY_MS: u32 = 150;

/// Period of the terminal parking loop.
pub const PARK_DELAY_MS: u32 = 1000;

/// Length of the "attempt failed" blink. 0 disables it.
pub const PULSE_MS: u32 = 50;

pub const TAG: &str = "EMMC_3GPIO_SWAP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("probe line GPIO {0} is listed more than once")]
    DuplicateLine(u32),
    #[error("probe clock must be non-zero")]
    ZeroClock,
    #[error("probe clock {0} kHz exceeds the 400 kHz identification limit")]
    ClockAboveIdentification(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub lines: [PhysicalLine; 3],
    pub probe_clk_khz: u32,
    pub settle_delay_ms: u32,
    pub park_delay_ms: u32,
    pub pulse_ms: u32,
    pub slot: HostSlot,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            lines: [
                PhysicalLine(PROBE_A),
                PhysicalLine(PROBE_B),
                PhysicalLine(PROBE_C),
            ],
            probe_clk_khz: PROBE_CLK_KHZ,
            settle_delay_ms: SETTLE_DELAY_MS,
            park_delay_ms: PARK_DELAY_MS,
            pulse_ms: PULSE_MS,
            slot: HostSlot::default(),
        }
    }
}

impl ProbeConfig {
    pub fn with_lines(mut self, lines: [u32; 3]) -> Self {
        self.lines = lines.map(PhysicalLine);
        self
    }

    pub fn with_probe_clk_khz(mut self, khz: u32) -> Self {
        self.probe_clk_khz = khz;
        self
    }

    pub fn with_settle_delay_ms(mut self, ms: u32) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    pub fn with_park_delay_ms(mut self, ms: u32) -> Self {
        self.park_delay_ms = ms;
        self
    }

    pub fn with_pulse_ms(mut self, ms: u32) -> Self {
        self.pulse_ms = ms;
        self
    }

    pub fn with_slot(mut self, slot: HostSlot) -> Self {
        self.slot = slot;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let [a, b, c] = self.lines;
        if a == b || a == c {
            return Err(ConfigError::DuplicateLine(a.gpio()));
        }
        if b == c {
            return Err(ConfigError::DuplicateLine(b.gpio()));
        }

        match self.probe_clk_khz {
            0 => Err(ConfigError::ZeroClock),
            khz if khz > MMC_IDENT_MAX_KHZ => Err(ConfigError::ClockAboveIdentification(khz)),
            _ => Ok(()),
        }
    }
}
