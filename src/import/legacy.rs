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
use crate::errors::Error as TrackerError;
use crate::inventory::form::ItemForm;
use crate::inventory::tracker::Tracker;
use crate::store::kv::KeyValueStore;
use anyhow::{anyhow, Error};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

/// A record written by the older web front ends. Both the simple form and
/// the dashboard stored Spanish keys; they differ only in the name key and
/// in whether a sale date exists. Values were saved as form text, but
/// numbers are accepted too.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyRecord {
	#[serde(rename = "nombre", alias = "producto")]
	name: Option<Value>,
	#[serde(rename = "precioCompra")]
	purchase_price: Option<Value>,
	#[serde(rename = "precioVenta")]
	sale_price: Option<Value>,
	#[serde(rename = "valorVenta")]
	target_sale_value: Option<Value>,
	#[serde(rename = "fecha")]
	purchase_date: Option<Value>,
	#[serde(rename = "fechaVenta")]
	sale_date: Option<Value>,
	#[serde(rename = "notas")]
	notes: Option<Value>,
}

impl LegacyRecord {
	fn to_form(&self) -> ItemForm {
		ItemForm {
			name: text(&self.name),
			purchase_price: text(&self.purchase_price),
			sale_price: text(&self.sale_price),
			target_sale_value: text(&self.target_sale_value),
			purchase_date: text(&self.purchase_date),
			sale_date: text(&self.sale_date),
			notes: text(&self.notes),
		}
	}
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
	pub imported: usize,
	pub skipped: usize,
}

/// Adds every legacy record in `raw` to the tracker as a new item. Records
/// that fail validation are skipped; a storage failure aborts the import.
pub fn import<S: KeyValueStore>(
	tracker: &mut Tracker<S>,
	raw: &str,
) -> Result<ImportSummary, Error> {
	let records: Vec<LegacyRecord> = serde_json::from_str(raw)
		.map_err(|e| anyhow!("legacy data is not a list of records: {}", e))?;

	let mut summary = ImportSummary::default();
	for (index, record) in records.iter().enumerate() {
		match tracker.create(&record.to_form()) {
			Ok(item) => {
				info!(index, id = item.id, name = %item.name, "imported record");
				summary.imported += 1;
			},
			Err(TrackerError::Validation(e)) => {
				warn!(index, error = %e, "skipped legacy record");
				summary.skipped += 1;
			},
			Err(e) => return Err(e.into()),
		}
	}

	Ok(summary)
}

fn text(value: &Option<Value>) -> String {
	match value {
		Some(Value::String(s)) => s.clone(),
		Some(Value::Number(n)) => n.to_string(),
		_ => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::item_store::ItemStore;
	use crate::store::kv::MemoryStore;
	use crate::util::quant::Quant;

	fn tracker() -> Tracker<MemoryStore> {
		Tracker::open(ItemStore::new(MemoryStore::default(), "items"))
	}

	#[test]
	fn test_simple_form_records() {
		let raw = r#"[
			{"producto": "Lamp", "precioCompra": "10", "valorVenta": "25",
			 "precioVenta": "", "fecha": "2024-01-05", "vendido": "no",
			 "notas": "brass"}
		]"#;
		let mut t = tracker();
		let summary = import(&mut t, raw).unwrap();
		assert_eq!(summary, ImportSummary { imported: 1, skipped: 0 });

		let item = &t.items()[0];
		assert_eq!(item.name, "Lamp");
		assert!(!item.sold);
		assert_eq!(item.target_sale_value, Some(Quant::from_str("25").unwrap()));
		assert_eq!(item.purchase_date.unwrap().to_string(), "2024-01-05");
		assert_eq!(item.notes.as_deref(), Some("brass"));
	}

	#[test]
	fn test_dashboard_records() {
		let raw = r#"[
			{"id": 1717000000000, "nombre": "Bike", "precioCompra": 80,
			 "precioVenta": "120", "valorVenta": "", "fecha": "2024-05-01",
			 "fechaVenta": "2024-05-20", "notas": "", "vendido": true}
		]"#;
		let mut t = tracker();
		import(&mut t, raw).unwrap();

		let item = &t.items()[0];
		assert!(item.sold);
		assert_eq!(item.purchase_price, 80);
		assert_eq!(item.sale_date.unwrap().to_string(), "2024-05-20");
		assert_eq!(item.notes, None);
	}

	#[test]
	fn test_invalid_records_are_skipped() {
		let raw = r#"[
			{"producto": "", "precioCompra": "10"},
			{"producto": "Mirror", "precioCompra": "abc"},
			{"producto": "Vase", "precioCompra": "4.5"}
		]"#;
		let mut t = tracker();
		let summary = import(&mut t, raw).unwrap();
		assert_eq!(summary, ImportSummary { imported: 1, skipped: 2 });
		assert_eq!(t.items()[0].name, "Vase");
	}

	#[test]
	fn test_not_a_list() {
		assert!(import(&mut tracker(), "{\"producto\": \"x\"}").is_err());
	}
}
