#![allow(dead_code)]

use std::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use emmc_pinprobe::host::{HostConfig, SlotConfig};
use emmc_pinprobe::{CardInfo, CardType, MmcHostError, MmcHostResult, MmcProbeHost, RoleAssignment};

pub const CID: [u32; 4] = [0x1501_0138, 0x4754_4634, 0x5272_1234, 0xabcd_7b01];

/// A target board with fixed, hidden wiring.
///
/// Only a slot bound exactly on `wiring` enumerates the eMMC. A `decoy`
/// mapping answers as some other card class. A claim while a previous one
/// is still held fails, as a real controller does.
pub struct FakeBoard {
    pub wiring: Option<RoleAssignment>,
    pub decoy: Option<(RoleAssignment, CardType)>,
    pub sector_count: u64,
    held: bool,
    bound: Option<[u32; 3]>,
    pub claims: usize,
    pub inits: usize,
    pub deinits: usize,
    pub stale_claims: usize,
    pub probed: Vec<[u32; 3]>,
}

impl FakeBoard {
    pub fn wired(wiring: RoleAssignment) -> Self {
        FakeBoard {
            wiring: Some(wiring),
            ..Self::empty()
        }
    }

    pub fn empty() -> Self {
        FakeBoard {
            wiring: None,
            decoy: None,
            sector_count: 1_000_000,
            held: false,
            bound: None,
            claims: 0,
            inits: 0,
            deinits: 0,
            stale_claims: 0,
            probed: Vec::new(),
        }
    }

    pub fn with_decoy(mut self, at: RoleAssignment, card_type: CardType) -> Self {
        self.decoy = Some((at, card_type));
        self
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn bound(&self) -> Option<[u32; 3]> {
        self.bound
    }
}

fn pins(a: &RoleAssignment) -> [u32; 3] {
    a.lines().map(|l| l.gpio())
}

impl MmcProbeHost for FakeBoard {
    fn host_init(&mut self) -> MmcHostResult {
        self.claims += 1;
        if self.held {
            self.stale_claims += 1;
            return Err(MmcHostError::AlreadyInitialized);
        }
        self.held = true;
        self.inits += 1;
        Ok(())
    }

    fn init_slot(&mut self, _host: &HostConfig, slot: &SlotConfig) -> MmcHostResult {
        if !self.held {
            return Err(MmcHostError::NotInitialized);
        }
        self.bound = Some(slot.pins());
        self.probed.push(slot.pins());
        Ok(())
    }

    fn card_init(&mut self, host: &HostConfig) -> MmcHostResult<CardInfo> {
        let bound = self.bound.ok_or(MmcHostError::NotInitialized)?;
        if host.max_freq_khz > 400 {
            return Err(MmcHostError::CrcError);
        }
        if self.wiring.as_ref().map(pins) == Some(bound) {
            return Ok(CardInfo::new(CardType::Mmc, CID)
                .with_capacity(self.sector_count, 512));
        }
        match self.decoy {
            Some((at, card_type)) if pins(&at) == bound => Ok(CardInfo::new(card_type, [0; 4])),
            _ => Err(MmcHostError::Timeout),
        }
    }

    fn host_deinit(&mut self) {
        self.held = false;
        self.bound = None;
        self.deinits += 1;
    }
}

#[derive(Default)]
pub struct Delay {
    pub total_ms: u64,
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += u64::from(ns) / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += u64::from(ms);
    }
}

#[derive(Default)]
pub struct Pin {
    pub high: bool,
}

impl ErrorType for Pin {
    type Error = Infallible;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        Ok(())
    }
}
