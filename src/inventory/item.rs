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
use crate::util::date::Date;
use crate::util::quant::Quant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One purchased good, optionally resold. Stored as part of a JSON array
/// with camelCase keys.
///
/// `sold` is derived from `sale_price` and is kept in the record only so
/// that snapshots are self-describing; it is re-derived on load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
	pub id: u64,
	pub name: String,
	pub purchase_price: Quant,

	#[serde(default)]
	pub sale_price: Option<Quant>,

	/// What the owner expects to get for it; unrelated to the actual sale.
	#[serde(default)]
	pub target_sale_value: Option<Quant>,

	#[serde(default)]
	pub purchase_date: Option<Date>,
	#[serde(default)]
	pub sale_date: Option<Date>,

	#[serde(default)]
	pub sold: bool,

	#[serde(default)]
	pub notes: Option<String>,
}

impl Item {
	/// Sale price minus purchase price. Unsold items have no proceeds yet,
	/// so they count as a loss of the full purchase price.
	pub fn profit(&self) -> Quant {
		self.sale_price.unwrap_or_default() - self.purchase_price
	}
}

/// An id not in `taken`: one past the highest taken id and at least
/// `floor`. Once `u64::MAX` is taken there is nothing past it, so the
/// lowest free id is used instead.
pub fn fresh_id(taken: &BTreeSet<u64>, floor: u64) -> u64 {
	match taken.last() {
		None => floor,
		Some(&highest) => match highest.checked_add(1) {
			Some(next) => next.max(floor),
			None => (0..=u64::MAX)
				.find(|id| !taken.contains(id))
				.unwrap_or_default(),
		},
	}
}
