use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, io};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Resolves a corpus path given on the command line or in the environment.
///
/// - Relative paths are joined to the current working directory
/// - Absolute paths are returned as-is (not canonicalized)
pub fn resolve_path<P: AsRef<Path>>(input: P) -> PathBuf {
	let path = input.as_ref().to_path_buf();
	if path.is_absolute() {
		return path;
	}
	env::current_dir()
		.map(|cwd| cwd.join(&path))
		.unwrap_or(path)
}
