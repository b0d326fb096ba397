use tracing::{debug, instrument};

use crate::wire::decode::Decoder;
use crate::wire::encode::Encoder;
use crate::wire::frame::{self, read_root};
use crate::wire::{CodecConfig, FrameNode, KeyDictionary, Result, Value};

/// Runtime limits for pack and unpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
	/// Maximum frame nesting depth; the root frame sits at depth 0.
	pub max_depth: u32,
}

impl Default for CodecOptions {
	fn default() -> Self {
		Self { max_depth: 128 }
	}
}

/// Packs value trees into self-describing frames and back.
///
/// The key dictionary is fixed at construction, so one instance can be
/// shared freely across threads. Both sides must use the same configuration
/// for map keys to resolve to the same names.
#[derive(Debug, Clone)]
pub struct Codec {
	dict: KeyDictionary,
	options: CodecOptions,
}

impl Codec {
	/// Build a codec with default limits.
	pub fn new(config: &CodecConfig) -> Result<Self> {
		Self::with_options(config, CodecOptions::default())
	}

	/// Build a codec with explicit limits.
	#[instrument(level = "debug", skip_all, fields(config_fields = config.len(), max_depth = options.max_depth))]
	pub fn with_options(config: &CodecConfig, options: CodecOptions) -> Result<Self> {
		let dict = KeyDictionary::build(config)?;
		debug!(keys = dict.len(), "key dictionary built");
		Ok(Self { dict, options })
	}

	/// Key dictionary derived from the configuration.
	pub fn dictionary(&self) -> &KeyDictionary {
		&self.dict
	}

	/// Limits this codec was built with.
	pub fn options(&self) -> CodecOptions {
		self.options
	}

	/// Encode `value` as a single unnamed root frame.
	#[instrument(level = "debug", skip_all, fields(root = value.kind_name()))]
	pub fn pack(&self, value: &Value) -> Result<Vec<u8>> {
		let bytes = Encoder::new(&self.dict, self.options.max_depth).encode_root(value)?;
		debug!(len = bytes.len(), "packed");
		Ok(bytes)
	}

	/// Decode bytes produced by [`Codec::pack`].
	#[instrument(level = "debug", skip_all, fields(len = bytes.len()))]
	pub fn unpack(&self, bytes: &[u8]) -> Result<Value> {
		let (header, payload) = read_root(bytes)?;
		debug!(tag = %header.tag, payload = header.len, "root frame");
		Decoder::new(&self.dict, self.options.max_depth).decode(header, payload, 0)
	}

	/// Parse the frame tree without materializing values.
	pub fn inspect(&self, bytes: &[u8]) -> Result<FrameNode> {
		frame::inspect(bytes, &self.dict, self.options.max_depth)
	}
}
