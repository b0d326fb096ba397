use crate::wire::{CodecError, Result};

/// Simple bounded cursor over an immutable byte slice.
///
/// `base` is the absolute offset of `bytes[0]` in the outermost buffer, so
/// errors raised deep inside nested payloads still point at the real byte.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
	base: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self::with_base(bytes, 0)
	}

	/// Create a cursor over a sub-slice starting at absolute offset `base`.
	pub fn with_base(bytes: &'a [u8], base: usize) -> Self {
		Self { bytes, pos: 0, base }
	}

	/// Return current absolute byte offset.
	pub fn abs_pos(&self) -> usize {
		self.base + self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Whether every byte has been consumed.
	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(CodecError::UnexpectedEof {
				at: self.abs_pos(),
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a big-endian `u32`.
	pub fn read_u32_be(&mut self) -> Result<u32> {
		Ok(u32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian length field of `width` bytes (1 or 4).
	pub fn read_len(&mut self, width: usize) -> Result<usize> {
		let len = match width {
			1 => u32::from(self.read_u8()?),
			_ => self.read_u32_be()?,
		};
		Ok(len as usize)
	}

	/// Read exactly `N` bytes into an array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}
}

#[cfg(test)]
mod tests {
	use super::Cursor;
	use crate::wire::CodecError;

	#[test]
	fn reads_big_endian_lengths() {
		let mut cursor = Cursor::new(&[0x07, 0x00, 0x00, 0x01, 0x02]);
		assert_eq!(cursor.read_len(1).expect("one byte"), 7);
		assert_eq!(cursor.read_len(4).expect("four bytes"), 258);
		assert!(cursor.is_empty());
	}

	#[test]
	fn eof_reports_absolute_offset() {
		let mut cursor = Cursor::with_base(&[1, 2], 10);
		cursor.read_u8().expect("first byte");
		let err = cursor.read_u32_be().expect_err("short read");
		assert!(matches!(err, CodecError::UnexpectedEof { at: 11, need: 4, rem: 1 }));
	}
}
