/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
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
use crate::errors::{Error, Result};
use crate::inventory::form::ItemForm;
use crate::inventory::item::{fresh_id, Item};
use crate::store::item_store::ItemStore;
use crate::store::kv::KeyValueStore;
use chrono::Utc;
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Owns the in-memory item list for the session. The list only changes
/// through `create` and `update`, and every successful change is saved as
/// a full snapshot before returning. If the save fails, the change is
/// undone so memory and storage never disagree.
pub struct Tracker<S: KeyValueStore> {
	items: Vec<Item>,
	store: ItemStore<S>,
}

impl<S: KeyValueStore> Tracker<S> {
	pub fn open(store: ItemStore<S>) -> Self {
		let items = store.load();
		Self { items, store }
	}

	pub fn items(&self) -> &[Item] {
		&self.items
	}

	pub fn get(&self, id: u64) -> Option<&Item> {
		self.items.iter().find(|i| i.id == id)
	}

	pub fn create(&mut self, form: &ItemForm) -> Result<Item> {
		let draft = form.validate()?;
		let item = draft.into_item(self.next_id());

		self.items.push(item.clone());
		if let Err(e) = self.store.save(&self.items) {
			self.items.pop();
			warn!(error = %e, "save failed; discarded new item");
			return Err(e);
		}

		info!(id = item.id, name = %item.name, "created item");
		Ok(item)
	}

	/// Replaces every field of the item with `id`; only the id survives.
	pub fn update(&mut self, id: u64, form: &ItemForm) -> Result<Item> {
		let index = self
			.items
			.iter()
			.position(|i| i.id == id)
			.ok_or(Error::NotFound(id))?;

		let item = form.validate()?.into_item(id);

		let previous = std::mem::replace(&mut self.items[index], item.clone());
		if let Err(e) = self.store.save(&self.items) {
			self.items[index] = previous;
			warn!(id, error = %e, "save failed; edit reverted");
			return Err(e);
		}

		info!(id, name = %item.name, "updated item");
		Ok(item)
	}

	/// Millisecond timestamp, or one past the highest id in use if the
	/// clock is behind it, so ids keep increasing.
	fn next_id(&self) -> u64 {
		let now = Utc::now().timestamp_millis().max(0) as u64;
		let taken: BTreeSet<u64> = self.items.iter().map(|i| i.id).collect();
		fresh_id(&taken, now)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::errors::Field;
	use crate::store::kv::MemoryStore;

	fn tracker() -> Tracker<MemoryStore> {
		Tracker::open(ItemStore::new(MemoryStore::default(), "items"))
	}

	fn form(name: &str, purchase: &str) -> ItemForm {
		ItemForm {
			name: name.to_string(),
			purchase_price: purchase.to_string(),
			..Default::default()
		}
	}

	fn reload(tracker: Tracker<MemoryStore>) -> Tracker<MemoryStore> {
		let backend = MemoryStore {
			entries: tracker.store.backend().entries.clone(),
			fail_writes: false,
		};
		Tracker::open(ItemStore::new(backend, "items"))
	}

	#[test]
	fn test_create_round_trips_every_field() {
		let mut t = tracker();
		let created = t
			.create(&ItemForm {
				name: "Camera".to_string(),
				purchase_price: "80.50".to_string(),
				sale_price: "120".to_string(),
				target_sale_value: "130.00".to_string(),
				purchase_date: "2024-05-01".to_string(),
				sale_date: "2024-05-11".to_string(),
				notes: "with strap".to_string(),
			})
			.unwrap();

		let t = reload(t);
		assert_eq!(t.items(), &[created.clone()]);
		assert_eq!(
			ItemForm::from(&t.items()[0]).purchase_price,
			"80.50".to_string()
		);
		assert!(t.items()[0].sold);
	}

	#[test]
	fn test_ids_are_unique_and_increasing() {
		let mut t = tracker();
		let a = t.create(&form("a", "1")).unwrap();
		let b = t.create(&form("b", "1")).unwrap();
		let c = t.create(&form("c", "1")).unwrap();
		assert!(a.id < b.id && b.id < c.id);
	}

	#[test]
	fn test_invalid_create_commits_nothing() {
		let mut t = tracker();
		let err = t.create(&form("", "1")).unwrap_err();
		assert!(matches!(err, Error::Validation(ref v) if v.field == Field::Name));
		assert!(t.items().is_empty());
		assert!(t.store.backend().entries.is_empty());
	}

	#[test]
	fn test_update_replaces_all_fields_and_keeps_id() {
		let mut t = tracker();
		let mut original = form("Desk", "40");
		original.notes = "scratched".to_string();
		let created = t.create(&original).unwrap();

		let mut edit = form("Oak desk", "45");
		edit.sale_price = "70".to_string();
		let updated = t.update(created.id, &edit).unwrap();

		assert_eq!(updated.id, created.id);
		assert_eq!(updated.name, "Oak desk");
		assert!(updated.sold);
		assert_eq!(updated.notes, None);

		let t = reload(t);
		assert_eq!(t.get(created.id), Some(&updated));
	}

	#[test]
	fn test_update_unknown_id_is_not_found() {
		let mut t = tracker();
		t.create(&form("a", "1")).unwrap();
		let stored = t.store.backend().entries["items"].clone();

		let err = t.update(42, &form("b", "2")).unwrap_err();
		assert!(matches!(err, Error::NotFound(42)));
		assert_eq!(t.store.backend().entries["items"], stored);
	}

	#[test]
	fn test_invalid_update_keeps_old_record() {
		let mut t = tracker();
		let created = t.create(&form("a", "1")).unwrap();
		assert!(t.update(created.id, &form("a", "-1")).is_err());
		assert_eq!(t.get(created.id), Some(&created));
	}

	#[test]
	fn test_failed_save_rolls_back_create() {
		let mut t = tracker();
		t.create(&form("a", "1")).unwrap();
		t.store = ItemStore::new(
			MemoryStore {
				fail_writes: true,
				..Default::default()
			},
			"items",
		);

		let err = t.create(&form("b", "2")).unwrap_err();
		assert!(matches!(err, Error::Persistence(_)));
		assert_eq!(t.items().len(), 1);
		assert_eq!(t.items()[0].name, "a");
	}

	#[test]
	fn test_failed_save_rolls_back_update() {
		let mut t = tracker();
		let created = t.create(&form("a", "1")).unwrap();
		t.store = ItemStore::new(
			MemoryStore {
				fail_writes: true,
				..Default::default()
			},
			"items",
		);

		assert!(t.update(created.id, &form("b", "2")).is_err());
		assert_eq!(t.get(created.id), Some(&created));
	}

	#[test]
	fn test_next_id_beats_future_ids() {
		let mut backend = MemoryStore::default();
		backend.entries.insert(
			"items".to_string(),
			r#"[{"id": 18446744073709551000, "name": "a", "purchasePrice": "1"}]"#
				.to_string(),
		);
		let mut t = Tracker::open(ItemStore::new(backend, "items"));
		let created = t.create(&form("b", "1")).unwrap();
		assert_eq!(created.id, 18446744073709551001);
	}

	#[test]
	fn test_ids_stay_unique_past_u64_max() {
		let mut backend = MemoryStore::default();
		backend.entries.insert(
			"items".to_string(),
			r#"[{"id": 18446744073709551615, "name": "a", "purchasePrice": "1"}]"#
				.to_string(),
		);
		let mut t = Tracker::open(ItemStore::new(backend, "items"));
		let b = t.create(&form("b", "1")).unwrap();
		let c = t.create(&form("c", "1")).unwrap();
		assert_eq!((b.id, c.id), (0, 1));

		let t = reload(t);
		let ids: Vec<u64> = t.items().iter().map(|i| i.id).collect();
		assert_eq!(ids, vec![u64::MAX, 0, 1]);
	}
}
