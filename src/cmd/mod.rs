/// Frame tree inspection command.
pub mod inspect;
/// JSON to frames command.
pub mod pack;
/// Frames to JSON command.
pub mod unpack;
/// Shared input/output helpers.
pub(crate) mod util;
