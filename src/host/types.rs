use bitflags::bitflags;

use crate::common::{MMC_BUS_WIDTH_1BIT, pins::RoleAssignment};

bitflags! {
    /// Host capability word handed to the controller at init.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HostFlags: u32 {
        const BIT1 = 1 << 0;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SlotFlags: u32 {
        const INTERNAL_PULLUP = 1 << 0;
    }
}

/// Controller slot. Only slot 1 goes through the GPIO matrix, so it is the
/// only one that can route arbitrary probe lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostSlot {
    Slot0,
    #[default]
    Slot1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub slot: HostSlot,
    pub max_freq_khz: u32,
    pub flags: HostFlags,
}

impl HostConfig {
    /// 1-bit host capped at `clk_khz`.
    pub fn probe(slot: HostSlot, clk_khz: u32) -> Self {
        HostConfig {
            slot,
            max_freq_khz: clk_khz,
            flags: HostFlags::BIT1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotConfig {
    pub clk: u32,
    pub cmd: u32,
    pub d0: u32,
    pub width: u8,
    pub flags: SlotFlags,
}

impl SlotConfig {
    /// 1-bit slot on the given mapping with the internal pull-ups enabled,
    /// since the probe harness has no external ones.
    pub fn for_assignment(assignment: &RoleAssignment) -> Self {
        SlotConfig {
            clk: assignment.clk.gpio(),
            cmd: assignment.cmd.gpio(),
            d0: assignment.d0.gpio(),
            width: MMC_BUS_WIDTH_1BIT,
            flags: SlotFlags::INTERNAL_PULLUP,
        }
    }

    pub fn pins(&self) -> [u32; 3] {
        [self.clk, self.cmd, self.d0]
    }
}
