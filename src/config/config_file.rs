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
use anyhow::{anyhow, Error};
use dirs::home_dir;
use serde::Deserialize;
use std::fs;
use std::fs::File;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	pub storage: Option<Storage>,
	pub display: Option<Display>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Storage {
	/// Directory holding one JSON file per storage key.
	pub dir: Option<String>,

	/// Key of the item snapshot.
	pub key: Option<String>,

	/// Key read by `import` when none is given on the command line.
	pub legacy_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Display {
	pub currency: Option<String>,
	pub precision: Option<u32>,
}

impl Config {
	/// Reads the config from the given path, or from the default path if
	/// none. The default file is created empty on first use; a custom path
	/// must exist.
	pub fn load(custom_config_path: Option<&String>) -> Result<Config, Error> {
		let config_path = match custom_config_path {
			None => home_dir()
				.ok_or_else(|| anyhow!("unable to determine home directory"))?
				.join(".config/resale-tracker/config.toml"),
			Some(p) => PathBuf::from(p),
		};

		if !config_path.exists() && custom_config_path.is_none() {
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(&config_path)?;
		}

		debug!(path = %config_path.display(), "reading config");
		let content = fs::read_to_string(&config_path).map_err(|e| {
			anyhow!("failed to read config {}: {}", config_path.display(), e)
		})?;
		Config::parse(&content)
	}

	pub fn parse(content: &str) -> Result<Config, Error> {
		toml::from_str(content).map_err(|e| anyhow!("failed to parse config: {}", e))
	}
}
