//! Self-describing binary codec for nested values.
//!
//! Values are written as length-framed, type-tagged frames. Map field names
//! are compressed to one-byte indices through a key dictionary fixed when the
//! [`wire::Codec`] is built, and configured integer or hex lists skip
//! per-element framing entirely.

/// Wire format, value model, key dictionary, and pack/unpack entry points.
pub mod wire;
