// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Tag-format helpers.
//!
//! Both directions key off the lowest set bit of the value in network byte
//! order. Zero has no set bit and maps to the unshifted mask.

/// Alternating-bit format used when a provider has no tag layout of its own.
pub const TAG_GENERIC: u64 = 0xAAAA_AAAA_AAAA_AAAA;

fn lowest_set_bit_be(v: u64) -> u32 {
    let be = v.to_be();
    if be == 0 {
        0
    } else {
        be.trailing_zeros()
    }
}

/// Mask of tag bits usable under memory tag format `mem_tag_format`.
pub fn tag_bits(mem_tag_format: u64) -> u64 {
    u64::MAX >> lowest_set_bit_be(mem_tag_format)
}

/// Generic tag format covering `tag_bits`.
pub fn tag_format(tag_bits: u64) -> u64 {
    TAG_GENERIC >> lowest_set_bit_be(tag_bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_shift_by_lowest_network_order_bit() {
        for k in [0u32, 5, 17, 63] {
            let fmt = (1u64 << k).to_be();
            assert_eq!(tag_bits(fmt), u64::MAX >> k);
            assert_eq!(tag_format(fmt), TAG_GENERIC >> k);
        }
    }

    #[test]
    fn zero_is_unshifted() {
        assert_eq!(tag_bits(0), u64::MAX);
        assert_eq!(tag_format(0), TAG_GENERIC);
    }

    #[test]
    fn higher_bits_do_not_matter() {
        let fmt = ((1u64 << 8) | (1u64 << 40)).to_be();
        assert_eq!(tag_bits(fmt), u64::MAX >> 8);
    }
}
