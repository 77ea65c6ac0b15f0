pub mod pins;

/// 1-bit data bus, the only width a D0-only wiring can carry.
pub const MMC_BUS_WIDTH_1BIT: u8 = 1;

/// Identification-mode clock ceiling (kHz).
pub const MMC_IDENT_MAX_KHZ: u32 = 400;

/// Default sector size for MMC user area.
pub const MMC_MAX_BLOCK_LEN: u32 = 512;

pub const BYTES_PER_MB: u64 = 1024 * 1024;
