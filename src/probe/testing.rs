//! Scripted host, delay and indicator doubles for unit tests.

use crate::{
    card::{CardInfo, CardType},
    host::{HostConfig, MmcHostError, MmcHostResult, MmcProbeHost, SlotConfig},
    indicator::{Color, Indicator},
};
use embedded_hal::delay::DelayNs;

pub const EMMC_CID: [u32; 4] = [0x1501_0138, 0x4754_4634, 0x5272_1234, 0xabcd_7b01];

/// What the fake does on the n-th claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Emmc,
    Answer(CardType),
    NoResponse,
    BadSlot,
    InitFault,
}

#[derive(Default)]
pub struct FakeHost {
    pub script: Vec<Script>,
    pub held: bool,
    pub claims: usize,
    pub inits: usize,
    pub deinits: usize,
    pub stale_claims: usize,
    pub slots: Vec<SlotConfig>,
    pub hosts: Vec<HostConfig>,
}

impl FakeHost {
    pub fn new(script: &[Script]) -> Self {
        FakeHost {
            script: script.to_vec(),
            ..Default::default()
        }
    }

    /// Candidate `k` enumerates as eMMC, earlier ones time out.
    pub fn succeeding_at(k: usize) -> Self {
        let mut script = vec![Script::NoResponse; k];
        script.push(Script::Emmc);
        Self::new(&script)
    }

    fn current(&self) -> Script {
        self.script
            .get(self.claims - 1)
            .copied()
            .unwrap_or(Script::NoResponse)
    }
}

impl MmcProbeHost for FakeHost {
    fn host_init(&mut self) -> MmcHostResult {
        self.claims += 1;
        if self.held {
            self.stale_claims += 1;
            return Err(MmcHostError::AlreadyInitialized);
        }
        if self.current() == Script::InitFault {
            return Err(MmcHostError::Unsupported);
        }
        self.held = true;
        self.inits += 1;
        Ok(())
    }

    fn init_slot(&mut self, host: &HostConfig, slot: &SlotConfig) -> MmcHostResult {
        assert!(self.held, "slot configured without a claimed host");
        self.hosts.push(host.clone());
        self.slots.push(slot.clone());
        match self.current() {
            Script::BadSlot => Err(MmcHostError::InvalidPin(slot.clk)),
            _ => Ok(()),
        }
    }

    fn card_init(&mut self, _host: &HostConfig) -> MmcHostResult<CardInfo> {
        assert!(self.held, "enumeration without a claimed host");
        match self.current() {
            Script::Emmc => {
                Ok(CardInfo::new(CardType::Mmc, EMMC_CID).with_capacity(1_000_000, 512))
            }
            Script::Answer(card_type) => Ok(CardInfo::new(card_type, [0; 4])),
            _ => Err(MmcHostError::Timeout),
        }
    }

    fn host_deinit(&mut self) {
        self.held = false;
        self.deinits += 1;
    }
}

#[derive(Default)]
pub struct FakeDelay {
    pub calls: Vec<u32>,
}

impl FakeDelay {
    pub fn total_ms(&self) -> u32 {
        self.calls.iter().sum()
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
    }
}

#[derive(Default)]
pub struct FakeIndicator {
    pub history: Vec<Color>,
}

impl Indicator for FakeIndicator {
    fn set(&mut self, color: Color) {
        self.history.push(color);
    }

    fn color(&self) -> Color {
        self.history.last().copied().unwrap_or_default()
    }
}
