mod bytes;
mod classify;
mod codec;
mod config;
mod decode;
mod dict;
mod encode;
mod error;
mod frame;
mod json;
mod num;
mod tag;
mod value;

/// Tag classification entry point.
pub use classify::classify;
/// Codec instance and its runtime limits.
pub use codec::{Codec, CodecOptions};
/// Field configuration consumed by the codec.
pub use config::CodecConfig;
/// Key dictionary built from configuration.
pub use dict::KeyDictionary;
/// Error and result aliases.
pub use error::{CodecError, ErrorKind, Result};
/// Frame header and inspection tree types.
pub use frame::{FrameHeader, FrameNode};
/// Decimal string helpers for NUM payloads.
pub use num::{be_bytes_to_decimal, decimal_to_be_bytes, is_num_literal};
/// Wire type tags and typed-list element geometry.
pub use tag::{ListElement, TypeTag};
/// Runtime value model.
pub use value::Value;
