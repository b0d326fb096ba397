use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use bincodec::wire::{Codec, CodecConfig, Result};

/// Build a codec from an optional JSON configuration file.
pub(crate) fn load_codec(config: Option<&Path>) -> Result<Codec> {
	let config = match config {
		Some(path) => CodecConfig::from_path(path)?,
		None => CodecConfig::new(),
	};
	Codec::new(&config)
}

/// Read a file, or stdin when the path is `-`.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
	if path == Path::new("-") {
		let mut buf = Vec::new();
		io::stdin().read_to_end(&mut buf)?;
		return Ok(buf);
	}
	Ok(fs::read(path)?)
}

/// Write to a file, or stdout when no path is given.
pub(crate) fn write_output(path: Option<&PathBuf>, bytes: &[u8]) -> Result<()> {
	match path {
		Some(path) => fs::write(path, bytes)?,
		None => {
			let mut stdout = io::stdout().lock();
			stdout.write_all(bytes)?;
			stdout.flush()?;
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use super::load_codec;

	#[test]
	fn missing_config_means_empty_dictionary() {
		let codec = load_codec(None).expect("codec builds");
		assert!(codec.dictionary().is_empty());
	}

	#[test]
	fn unreadable_config_is_io_error() {
		let err = load_codec(Some(Path::new("/nonexistent/bincodec/config.json"))).expect_err("missing file");
		assert_eq!(err.kind(), bincodec::wire::ErrorKind::Io);
	}
}
