mod types;

use core::ops::{Deref, DerefMut};

use log::debug;
use thiserror::Error;

use crate::card::CardInfo;
pub use types::{HostConfig, HostFlags, HostSlot, SlotConfig, SlotFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MmcHostError {
    #[error("host already initialized")]
    AlreadyInitialized,
    #[error("host not initialized")]
    NotInitialized,
    #[error("GPIO {0} cannot be routed to the slot")]
    InvalidPin(u32),
    #[error("command timed out")]
    Timeout,
    #[error("command error")]
    CommandError,
    #[error("response CRC mismatch")]
    CrcError,
    #[error("operation not supported")]
    Unsupported,
    #[error("invalid value")]
    InvalidValue,
}

pub type MmcHostResult<T = ()> = Result<T, MmcHostError>;

/// Bus-enumeration capability of an SD/MMC host controller.
///
/// `host_init` claims the controller; it must fail with
/// [`MmcHostError::AlreadyInitialized`] while a previous claim is still
/// held. `host_deinit` gives it back along with any slot binding.
pub trait MmcProbeHost {
    fn host_init(&mut self) -> MmcHostResult;

    fn init_slot(&mut self, host: &HostConfig, slot: &SlotConfig) -> MmcHostResult;

    /// Run the identification sequence (CMD0/CMD1/CMD2/CMD3/CMD9) and
    /// report what answered. Must be bounded in time.
    fn card_init(&mut self, host: &HostConfig) -> MmcHostResult<CardInfo>;

    fn host_deinit(&mut self);
}

impl<T: MmcProbeHost + ?Sized> MmcProbeHost for &mut T {
    fn host_init(&mut self) -> MmcHostResult {
        (**self).host_init()
    }

    fn init_slot(&mut self, host: &HostConfig, slot: &SlotConfig) -> MmcHostResult {
        (**self).init_slot(host, slot)
    }

    fn card_init(&mut self, host: &HostConfig) -> MmcHostResult<CardInfo> {
        (**self).card_init(host)
    }

    fn host_deinit(&mut self) {
        (**self).host_deinit()
    }
}

/// A claimed host. Dropping the guard deinitializes the host; `retain`
/// keeps it initialized for the caller.
pub struct HostGuard<'a, H: MmcProbeHost> {
    host: &'a mut H,
    armed: bool,
}

impl<'a, H: MmcProbeHost> HostGuard<'a, H> {
    pub fn acquire(host: &'a mut H) -> MmcHostResult<Self> {
        host.host_init()?;
        debug!("host claimed");
        Ok(HostGuard { host, armed: true })
    }

    /// Keep the host and its slot binding alive past the guard.
    pub fn retain(mut self) {
        self.armed = false;
        debug!("host retained");
    }
}

impl<H: MmcProbeHost> Deref for HostGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: MmcProbeHost> DerefMut for HostGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: MmcProbeHost> Drop for HostGuard<'_, H> {
    fn drop(&mut self) {
        if self.armed {
            self.host.host_deinit();
            debug!("host released");
        }
    }
}
