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
use crate::errors::Error;
use crate::inventory::item::{fresh_id, Item};
use crate::store::kv::KeyValueStore;
use std::collections::{BTreeSet, HashSet};
use std::io;
use tracing::{debug, warn};

/// The full item collection, kept as one JSON array under a single key.
pub struct ItemStore<S: KeyValueStore> {
	backend: S,
	key: String,
}

impl<S: KeyValueStore> ItemStore<S> {
	pub fn new(backend: S, key: &str) -> Self {
		Self {
			backend,
			key: key.to_string(),
		}
	}

	pub fn backend(&self) -> &S {
		&self.backend
	}

	/// Never fails: a missing, unreadable or unparsable snapshot loads as an
	/// empty collection. Records are normalized so that `sold` matches the
	/// sale price and ids are unique.
	pub fn load(&self) -> Vec<Item> {
		let raw = match self.backend.get(&self.key) {
			Ok(Some(raw)) => raw,
			Ok(None) => {
				debug!(key = %self.key, "no saved items");
				return Vec::new();
			},
			Err(e) => {
				warn!(key = %self.key, error = %e, "could not read saved items");
				return Vec::new();
			},
		};

		let mut items: Vec<Item> = match serde_json::from_str(&raw) {
			Ok(items) => items,
			Err(e) => {
				warn!(key = %self.key, error = %e, "ignoring unparsable saved items");
				return Vec::new();
			},
		};

		normalize(&mut items);
		debug!(key = %self.key, count = items.len(), "loaded items");
		items
	}

	/// Overwrites the snapshot with the whole collection.
	pub fn save(&mut self, items: &[Item]) -> Result<(), Error> {
		let json = serde_json::to_string_pretty(items).map_err(io::Error::from)?;
		self.backend.set(&self.key, &json)?;
		Ok(())
	}
}

fn normalize(items: &mut [Item]) {
	for item in items.iter_mut() {
		let sold = item.sale_price.is_some();
		if item.sold != sold {
			warn!(id = item.id, "sold flag disagrees with sale price; fixing");
			item.sold = sold;
		}
		if let (Some(bought), Some(sold)) = (item.purchase_date, item.sale_date) {
			if sold < bought {
				warn!(
					id = item.id,
					%bought,
					%sold,
					"sale date before purchase date; left out of sale speed"
				);
			}
		}
	}

	let mut taken: BTreeSet<u64> = items.iter().map(|i| i.id).collect();
	let mut seen = HashSet::new();
	for item in items.iter_mut() {
		if !seen.insert(item.id) {
			let id = fresh_id(&taken, 0);
			warn!(old = item.id, new = id, "duplicate item id reassigned");
			item.id = id;
			taken.insert(id);
			seen.insert(id);
		}
	}
}
