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
use crate::config::config_file::Config;
use crate::util::amount::MoneyFormat;
use anyhow::{anyhow, bail, Error};
use dirs::data_dir;
use std::path::PathBuf;

/// Values given on the command line; these win over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
	pub store: Option<String>,
	pub key: Option<String>,
	pub precision: Option<u32>,
}

/// Everything a run needs to know, after applying the command line over the
/// config file over the built-in defaults.
#[derive(Debug)]
pub struct Settings {
	pub data_dir: PathBuf,
	pub key: String,
	pub legacy_key: String,
	pub money: MoneyFormat,
}

impl Settings {
	pub const DEFAULT_KEY: &'static str = "items";
	pub const DEFAULT_LEGACY_KEY: &'static str = "productos";
	pub const DEFAULT_CURRENCY: &'static str = "€";
	pub const DEFAULT_PRECISION: u32 = 2;

	/// Nobody needs more than this; it only stops runaway zeroes.
	pub const MAX_PRECISION: u32 = 10;

	pub fn resolve(config: Config, overrides: Overrides) -> Result<Settings, Error> {
		let storage = config.storage.unwrap_or_default();
		let display = config.display.unwrap_or_default();

		let data_dir = match overrides.store.or(storage.dir) {
			Some(dir) => PathBuf::from(dir),
			None => data_dir()
				.ok_or_else(|| anyhow!("unable to determine data directory"))?
				.join("resale-tracker"),
		};

		let precision = overrides
			.precision
			.or(display.precision)
			.unwrap_or(Settings::DEFAULT_PRECISION);
		if precision > Settings::MAX_PRECISION {
			bail!("Maximum precision is {}", Settings::MAX_PRECISION);
		}

		let currency = display
			.currency
			.unwrap_or_else(|| Settings::DEFAULT_CURRENCY.to_string());

		Ok(Settings {
			data_dir,
			key: overrides
				.key
				.or(storage.key)
				.unwrap_or_else(|| Settings::DEFAULT_KEY.to_string()),
			legacy_key: storage
				.legacy_key
				.unwrap_or_else(|| Settings::DEFAULT_LEGACY_KEY.to_string()),
			money: MoneyFormat::new(&currency, precision),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let settings = Settings::resolve(
			Config::default(),
			Overrides {
				store: Some("/tmp/x".to_string()),
				..Default::default()
			},
		)
		.unwrap();
		assert_eq!(settings.data_dir, PathBuf::from("/tmp/x"));
		assert_eq!(settings.key, "items");
		assert_eq!(settings.legacy_key, "productos");
		assert_eq!(settings.money.currency, "€");
		assert_eq!(settings.money.precision, 2);
	}

	#[test]
	fn test_command_line_beats_config() {
		let config = Config::parse(
			"[storage]\ndir = \"/from/config\"\nkey = \"cfg\"\n\
			 [display]\ncurrency = \"USD\"\nprecision = 3\n",
		)
		.unwrap();
		let settings = Settings::resolve(
			config,
			Overrides {
				store: Some("/from/cli".to_string()),
				key: Some("cli".to_string()),
				precision: Some(0),
			},
		)
		.unwrap();
		assert_eq!(settings.data_dir, PathBuf::from("/from/cli"));
		assert_eq!(settings.key, "cli");
		assert_eq!(settings.money.currency, "USD");
		assert_eq!(settings.money.precision, 0);
	}

	#[test]
	fn test_precision_limit() {
		let config = Config::parse("[display]\nprecision = 11\n").unwrap();
		let overrides = Overrides {
			store: Some("/tmp/x".to_string()),
			..Default::default()
		};
		assert!(Settings::resolve(config, overrides).is_err());
	}
}
