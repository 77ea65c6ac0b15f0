extern crate alloc;
use alloc::string::String;

use crate::tools::extract_bits;

const MMC_CID_YEAR_BASE: u16 = 1997;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ManufactureDate {
    pub month: u8,
    pub year: u16,
}

/// eMMC CID register (JESD84 layout).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MmcCid {
    pub manufacturer_id: u8,
    /// CBX: 0 = removable, 1 = BGA, 2 = POP.
    pub device_type: u8,
    pub oem_id: u8,
    pub product_name: [u8; 6],
    pub product_revision: u8,
    pub serial_number: u32,
    pub date: ManufactureDate,
}

impl MmcCid {
    pub fn parse(raw: &[u32; 4]) -> Self {
        let mut product_name = [0u8; 6];
        for (i, byte) in product_name.iter_mut().enumerate() {
            // PNM[103:56], first character in the highest byte
            *byte = extract_bits(raw, 96 - 8 * i as u32, 8) as u8;
        }

        let mdt = extract_bits(raw, 8, 8);

        MmcCid {
            manufacturer_id: extract_bits(raw, 120, 8) as u8,
            device_type: extract_bits(raw, 112, 2) as u8,
            oem_id: extract_bits(raw, 104, 8) as u8,
            product_name,
            product_revision: extract_bits(raw, 48, 8) as u8,
            serial_number: extract_bits(raw, 16, 32),
            date: ManufactureDate {
                month: (mdt >> 4) as u8,
                year: MMC_CID_YEAR_BASE + (mdt & 0xf) as u16,
            },
        }
    }

    /// Printable part of PNM with trailing padding removed.
    pub fn product_name_str(&self) -> String {
        let name: String = self
            .product_name
            .iter()
            .filter(|b| b.is_ascii_graphic() || **b == b' ')
            .map(|b| *b as char)
            .collect();
        String::from(name.trim_end())
    }

    /// PRV as `major.minor` BCD nibbles.
    pub fn revision(&self) -> (u8, u8) {
        (self.product_revision >> 4, self.product_revision & 0xf)
    }
}
