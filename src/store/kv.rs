/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The only thing the tracker needs from persistent storage: whole string
/// values by key.
pub trait KeyValueStore {
	fn get(&self, key: &str) -> io::Result<Option<String>>;
	fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
pub struct FileStore {
	dir: PathBuf,
}

impl FileStore {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn path_for(&self, key: &str) -> io::Result<PathBuf> {
		let valid = !key.is_empty()
			&& key
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
		if !valid {
			return Err(io::Error::new(
				io::ErrorKind::InvalidInput,
				format!("invalid storage key: {:?}", key),
			));
		}
		Ok(self.dir.join(format!("{}.json", key)))
	}
}

impl KeyValueStore for FileStore {
	fn get(&self, key: &str) -> io::Result<Option<String>> {
		let path = self.path_for(key)?;
		match fs::read_to_string(&path) {
			Ok(content) => Ok(Some(content)),
			Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
			Err(e) => Err(e),
		}
	}

	/// Writes a sibling temp file and renames it over the old value, so a
	/// reader never sees a half-written snapshot.
	fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
		let path = self.path_for(key)?;
		fs::create_dir_all(&self.dir)?;

		let tmp = self.dir.join(format!(".{}.json.tmp", key));
		fs::write(&tmp, value)?;
		fs::rename(&tmp, &path)?;

		debug!(path = %path.display(), bytes = value.len(), "wrote snapshot");
		Ok(())
	}
}

/// In-memory store for tests; can be told to fail every write, the way a
/// full disk would.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
	pub entries: std::collections::HashMap<String, String>,
	pub fail_writes: bool,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> io::Result<Option<String>> {
		Ok(self.entries.get(key).cloned())
	}

	fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
		if self.fail_writes {
			return Err(io::Error::other("storage quota exceeded"));
		}
		self.entries.insert(key.to_string(), value.to_string());
		Ok(())
	}
}
