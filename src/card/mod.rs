mod cid;

extern crate alloc;
use alloc::string::String;

use crate::common::{BYTES_PER_MB, MMC_MAX_BLOCK_LEN};
pub use cid::{MmcCid, ManufactureDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Unknown,
    Mmc,
    SdV1,
    SdV2,
    Sdio,
}

impl CardType {
    pub fn is_mmc(self) -> bool {
        matches!(self, CardType::Mmc)
    }

    pub fn name(self) -> &'static str {
        match self {
            CardType::Unknown => "unknown",
            CardType::Mmc => "MMC",
            CardType::SdV1 => "SD v1",
            CardType::SdV2 => "SD v2",
            CardType::Sdio => "SDIO",
        }
    }
}

/// What a successful bus enumeration hands back, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardInfo {
    pub card_type: CardType,
    /// R2 payload of CMD2, word 0 = bits 127:96.
    pub cid: [u32; 4],
    pub sector_count: u64,
    pub sector_size: u32,
}

impl CardInfo {
    pub fn new(card_type: CardType, cid: [u32; 4]) -> Self {
        CardInfo {
            card_type,
            cid,
            sector_count: 0,
            sector_size: MMC_MAX_BLOCK_LEN,
        }
    }

    pub fn with_capacity(mut self, sector_count: u64, sector_size: u32) -> Self {
        self.sector_count = sector_count;
        self.sector_size = sector_size;
        self
    }
}

/// Identification of an accepted eMMC device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDescriptor {
    pub raw_cid: [u32; 4],
    pub cid: MmcCid,
    pub product_name: String,
    pub sector_count: u64,
    pub sector_size: u32,
}

impl CardDescriptor {
    pub fn from_info(info: &CardInfo) -> Self {
        let cid = MmcCid::parse(&info.cid);
        let product_name = cid.product_name_str();
        CardDescriptor {
            raw_cid: info.cid,
            cid,
            product_name,
            sector_count: info.sector_count,
            sector_size: info.sector_size,
        }
    }

    /// Saturates at `u64::MAX` for nonsensical sector counts.
    pub fn capacity_bytes(&self) -> u64 {
        self.sector_count.saturating_mul(self.sector_size as u64)
    }

    /// Whole megabytes, rounded down.
    pub fn capacity_mb(&self) -> u64 {
        let mb = self.sector_count as u128 * self.sector_size as u128 / BYTES_PER_MB as u128;
        u64::try_from(mb).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_floors_to_whole_megabytes() {
        let info = CardInfo::new(CardType::Mmc, [0; 4]).with_capacity(1_000_000, 512);
        let card = CardDescriptor::from_info(&info);
        assert_eq!(card.capacity_bytes(), 512_000_000);
        assert_eq!(card.capacity_mb(), 488);
    }

    #[test]
    fn capacity_does_not_overflow_large_parts() {
        // 128 GiB user area
        let info = CardInfo::new(CardType::Mmc, [0; 4]).with_capacity(268_435_456, 512);
        assert_eq!(CardDescriptor::from_info(&info).capacity_mb(), 131_072);
    }

    #[test]
    fn capacity_of_garbage_sector_count_does_not_panic() {
        let info = CardInfo::new(CardType::Mmc, [0; 4]).with_capacity(u64::MAX / 256, 512);
        let card = CardDescriptor::from_info(&info);
        assert_eq!(card.capacity_bytes(), u64::MAX);
        assert_eq!(card.capacity_mb(), (u64::MAX / 256) / 2048);

        let info = CardInfo::new(CardType::Mmc, [0; 4]).with_capacity(u64::MAX, u32::MAX);
        assert_eq!(CardDescriptor::from_info(&info).capacity_mb(), u64::MAX);
    }

    #[test]
    fn only_mmc_is_target_class() {
        assert!(CardType::Mmc.is_mmc());
        for t in [CardType::Unknown, CardType::SdV1, CardType::SdV2, CardType::Sdio] {
            assert!(!t.is_mmc(), "{}", t.name());
        }
    }
}
