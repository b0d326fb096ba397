use thiserror::Error;

use crate::wire::TypeTag;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Coarse error category shared by related [`CodecError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Input bytes do not form a valid frame tree.
	MalformedInput,
	/// A value cannot be expressed in the wire format.
	UnsupportedValue,
	/// Configuration names more keys than a key byte can address.
	KeyDictionaryOverflow,
	/// Configuration or document could not be read or parsed.
	Config,
	/// Filesystem or stream IO failure.
	Io,
}

/// Errors produced while building a codec, packing, or unpacking.
#[derive(Debug, Error)]
pub enum CodecError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON configuration or document failed to parse.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Frame starts with a byte that is not a known tag.
	#[error("unknown type tag 0x{tag:02x} at offset {at}")]
	UnknownTag {
		/// Offending tag byte.
		tag: u8,
		/// Offset of the tag byte.
		at: usize,
	},
	/// Root frame length disagrees with the bytes that follow its header.
	#[error("root frame declares {declared} payload bytes, {actual} present")]
	LengthMismatch {
		/// Length from the root header.
		declared: usize,
		/// Bytes remaining after the root header.
		actual: usize,
	},
	/// Child frame extends past the end of its parent payload.
	#[error("frame at offset {at} declares {len} bytes, only {rem} remain in parent")]
	FrameOverrun {
		/// Offset of the child header within the parent payload.
		at: usize,
		/// Declared child payload length.
		len: usize,
		/// Bytes left in the parent payload after the child header.
		rem: usize,
	},
	/// Fixed-width scalar payload has the wrong size.
	#[error("{tag} payload must be {expected} bytes, got {got}")]
	PayloadWidth {
		/// Scalar tag being decoded.
		tag: TypeTag,
		/// Width required by the tag.
		expected: usize,
		/// Width found on the wire.
		got: usize,
	},
	/// Typed list payload is not a whole number of records.
	#[error("{tag} payload of {len} bytes is not a multiple of {width}")]
	TypedListMisaligned {
		/// Typed list tag.
		tag: TypeTag,
		/// Payload length.
		len: usize,
		/// Record width.
		width: usize,
	},
	/// Map child refers to a key index outside the dictionary.
	#[error("key index {index} out of range (dictionary holds {max})")]
	UnknownKeyIndex {
		/// Raw key byte.
		index: u8,
		/// Number of dictionary entries.
		max: usize,
	},
	/// Decoder nesting exceeded the configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Encoder nesting exceeded the configured limit.
	#[error("encode depth exceeded (max={max_depth})")]
	EncodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Value cannot be written under the selected tag.
	#[error("cannot encode {got} as {tag}")]
	UnsupportedValue {
		/// Tag the value was routed to.
		tag: TypeTag,
		/// Short description of the rejected value.
		got: String,
	},
	/// Payload longer than the tag's length field can declare.
	#[error("{tag} payload of {len} bytes exceeds limit {max}")]
	PayloadTooLarge {
		/// Tag being written.
		tag: TypeTag,
		/// Payload length.
		len: usize,
		/// Maximum declarable length.
		max: usize,
	},
	/// Configuration defines more keys than one key byte can index.
	#[error("key dictionary holds {count} names, max {max}")]
	KeyDictionaryOverflow {
		/// Distinct configured names.
		count: usize,
		/// Addressable names.
		max: usize,
	},
}

impl CodecError {
	/// Coarse category of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Io(_) => ErrorKind::Io,
			Self::Json(_) => ErrorKind::Config,
			Self::UnexpectedEof { .. }
			| Self::UnknownTag { .. }
			| Self::LengthMismatch { .. }
			| Self::FrameOverrun { .. }
			| Self::PayloadWidth { .. }
			| Self::TypedListMisaligned { .. }
			| Self::UnknownKeyIndex { .. }
			| Self::DecodeDepthExceeded { .. } => ErrorKind::MalformedInput,
			Self::EncodeDepthExceeded { .. } | Self::UnsupportedValue { .. } | Self::PayloadTooLarge { .. } => ErrorKind::UnsupportedValue,
			Self::KeyDictionaryOverflow { .. } => ErrorKind::KeyDictionaryOverflow,
		}
	}
}
