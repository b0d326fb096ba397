//! Decimal text ↔ minimal big-endian bytes for NUM payloads.
//!
//! Only non-negative integers are needed, so both directions are plain
//! base conversions over byte limbs instead of a general bignum type.

/// Largest power of ten below 2^30; one output chunk per division pass.
const CHUNK: u64 = 1_000_000_000;
const CHUNK_DIGITS: usize = 9;

/// Whether `text` qualifies as a NUM literal: ASCII digits, non-empty, no leading zero.
pub fn is_num_literal(text: &str) -> bool {
	let bytes = text.as_bytes();
	match bytes.first() {
		Some(b'1'..=b'9') => bytes.iter().all(u8::is_ascii_digit),
		_ => false,
	}
}

/// Convert decimal digits into minimal big-endian bytes.
///
/// Returns `None` when `digits` is empty or holds a non-digit. Zero (with any
/// number of leading zeros) yields an empty vector.
pub fn decimal_to_be_bytes(digits: &str) -> Option<Vec<u8>> {
	if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
		return None;
	}

	// little-endian base-256 limbs
	let mut limbs: Vec<u8> = Vec::with_capacity(digits.len() / 2 + 1);
	for byte in digits.bytes() {
		let mut carry = u32::from(byte - b'0');
		for limb in &mut limbs {
			let acc = u32::from(*limb) * 10 + carry;
			*limb = (acc & 0xff) as u8;
			carry = acc >> 8;
		}
		while carry > 0 {
			limbs.push((carry & 0xff) as u8);
			carry >>= 8;
		}
	}

	limbs.reverse();
	Some(limbs)
}

/// Render big-endian unsigned bytes as canonical decimal text.
///
/// Leading zero bytes are ignored; an empty or all-zero payload renders `"0"`.
pub fn be_bytes_to_decimal(bytes: &[u8]) -> String {
	let mut dividend: Vec<u8> = bytes.iter().skip_while(|byte| **byte == 0).copied().collect();
	if dividend.is_empty() {
		return "0".to_owned();
	}

	let mut chunks = Vec::new();
	while !dividend.is_empty() {
		let mut rem = 0_u64;
		let mut quotient = Vec::with_capacity(dividend.len());
		for byte in &dividend {
			let acc = (rem << 8) | u64::from(*byte);
			let digit = acc / CHUNK;
			rem = acc % CHUNK;
			if !quotient.is_empty() || digit != 0 {
				quotient.push(digit as u8);
			}
		}
		chunks.push(rem);
		dividend = quotient;
	}

	let mut out = String::with_capacity(chunks.len() * CHUNK_DIGITS);
	let mut iter = chunks.iter().rev();
	if let Some(head) = iter.next() {
		out.push_str(&head.to_string());
	}
	for chunk in iter {
		out.push_str(&format!("{chunk:0width$}", width = CHUNK_DIGITS));
	}
	out
}

#[cfg(test)]
mod tests {
	use super::{be_bytes_to_decimal, decimal_to_be_bytes, is_num_literal};

	#[test]
	fn literal_rules() {
		assert!(is_num_literal("1"));
		assert!(is_num_literal("123456789012345678901234567890"));
		assert!(!is_num_literal(""));
		assert!(!is_num_literal("0"));
		assert!(!is_num_literal("0123"));
		assert!(!is_num_literal("12a"));
		assert!(!is_num_literal("-12"));
	}

	#[test]
	fn small_values_are_minimal() {
		assert_eq!(decimal_to_be_bytes("1"), Some(vec![0x01]));
		assert_eq!(decimal_to_be_bytes("255"), Some(vec![0xff]));
		assert_eq!(decimal_to_be_bytes("256"), Some(vec![0x01, 0x00]));
		assert_eq!(decimal_to_be_bytes("65535"), Some(vec![0xff, 0xff]));
		assert_eq!(decimal_to_be_bytes("0"), Some(Vec::new()));
		assert_eq!(decimal_to_be_bytes("007"), Some(vec![0x07]));
		assert_eq!(decimal_to_be_bytes("x"), None);
	}

	#[test]
	fn thirty_digit_value_matches_hex() {
		// 123456789012345678901234567890 == 0x18ee90ff6c373e0ee4e3f0ad2
		let bytes = decimal_to_be_bytes("123456789012345678901234567890").expect("digits");
		assert_eq!(bytes, vec![0x01, 0x8e, 0xe9, 0x0f, 0xf6, 0xc3, 0x73, 0xe0, 0xee, 0x4e, 0x3f, 0x0a, 0xd2]);
		assert_eq!(be_bytes_to_decimal(&bytes), "123456789012345678901234567890");
	}

	#[test]
	fn decimal_rendering_handles_zero_and_padding() {
		assert_eq!(be_bytes_to_decimal(&[]), "0");
		assert_eq!(be_bytes_to_decimal(&[0, 0]), "0");
		assert_eq!(be_bytes_to_decimal(&[0x3b, 0x9a, 0xca, 0x00]), "1000000000");
		assert_eq!(be_bytes_to_decimal(&[0x3b, 0x9a, 0xca, 0x01]), "1000000001");
		assert_eq!(be_bytes_to_decimal(&u64::MAX.to_be_bytes()), u64::MAX.to_string());
	}

	#[test]
	fn long_literals_survive_conversion() {
		let digits: String = "9876543210".repeat(26)[..256].to_owned();
		let bytes = decimal_to_be_bytes(&digits).expect("digits");
		assert_ne!(bytes.first(), Some(&0));
		assert_eq!(be_bytes_to_decimal(&bytes), digits);
	}
}
