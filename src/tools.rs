/// Pack a 136-bit R2 payload (CRC stripped) into one integer.
///
/// Word 0 carries bits 127:96, word 3 carries bits 31:0.
pub fn cid_to_u128(raw: &[u32; 4]) -> u128 {
    ((raw[0] as u128) << 96) | ((raw[1] as u128) << 64) | ((raw[2] as u128) << 32) | raw[3] as u128
}

/// Extract `len` bits (at most 32) starting at bit `start` of a CID/CSD word array.
pub fn extract_bits(raw: &[u32; 4], start: u32, len: u32) -> u32 {
    debug_assert!(len > 0 && len <= 32 && start + len <= 128);
    let mask = if len == 32 { u32::MAX as u128 } else { (1u128 << len) - 1 };
    ((cid_to_u128(raw) >> start) & mask) as u32
}
