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

//! Derived figures over the item list. Everything here is a pure function
//! of its input and is recomputed for every report.

use crate::inventory::item::Item;
use crate::util::quant::Quant;

/// The headline figures shown above the item table.
#[derive(Debug, PartialEq, Eq)]
pub struct Summary {
	pub invested: Quant,
	pub sold: usize,
	pub profit: Quant,
	pub stock: usize,
	pub unsold_value: Quant,
}

impl Summary {
	pub fn from_items(items: &[Item]) -> Self {
		Self {
			invested: total_invested(items),
			sold: sold_count(items),
			profit: total_profit(items),
			stock: stock_count(items),
			unsold_value: unsold_display_value(items),
		}
	}
}

/// An item together with how long it took to sell.
#[derive(Debug, PartialEq, Eq)]
pub struct SaleSpeed<'a> {
	pub item: &'a Item,
	pub days: i64,
}

pub fn total_invested(items: &[Item]) -> Quant {
	items.iter().map(|i| i.purchase_price).sum()
}

pub fn sold_count(items: &[Item]) -> usize {
	items.iter().filter(|i| i.sold).count()
}

pub fn stock_count(items: &[Item]) -> usize {
	items.iter().filter(|i| !i.sold).count()
}

/// Unsold items are included, each as a loss of its purchase price.
pub fn total_profit(items: &[Item]) -> Quant {
	items.iter().map(Item::profit).sum()
}

/// What the unsold stock is expected to fetch.
pub fn unsold_display_value(items: &[Item]) -> Quant {
	items
		.iter()
		.filter(|i| !i.sold)
		.map(|i| i.target_sale_value.unwrap_or_default())
		.sum()
}

/// Highest profit wins; on a tie the earlier item is kept.
pub fn top_profit_item(items: &[Item]) -> Option<&Item> {
	let mut best: Option<&Item> = None;
	for item in items {
		if best.map_or(true, |b| item.profit() > b.profit()) {
			best = Some(item);
		}
	}
	best
}

/// Return on the purchase price in percent, to one decimal place. An unsold
/// item has returned nothing yet, which is always -100.0%.
///
/// `None` when the purchase price is zero.
pub fn profit_percentage(item: &Item) -> Option<Quant> {
	let gain = match (item.sold, item.sale_price) {
		(true, Some(sale)) => sale - item.purchase_price,
		_ => -item.purchase_price,
	};
	gain.checked_div(item.purchase_price)
		.map(|ratio| (ratio * 100).round(1))
}

/// Days from purchase to sale. Only sold items with both dates count, and
/// a sale dated before its purchase (possible in old snapshots) does not.
pub fn sale_duration(item: &Item) -> Option<i64> {
	if !item.sold {
		return None;
	}
	match (item.purchase_date, item.sale_date) {
		(Some(bought), Some(sold)) if sold >= bought => {
			Some(bought.days_until(&sold))
		},
		_ => None,
	}
}

pub fn fastest_sale(items: &[Item]) -> Option<SaleSpeed<'_>> {
	extreme_sale(items, |candidate, best| candidate < best)
}

pub fn slowest_sale(items: &[Item]) -> Option<SaleSpeed<'_>> {
	extreme_sale(items, |candidate, best| candidate > best)
}

/// The first item whose duration no later item beats under `beats`.
fn extreme_sale(
	items: &[Item],
	beats: impl Fn(i64, i64) -> bool,
) -> Option<SaleSpeed<'_>> {
	let mut best: Option<SaleSpeed> = None;
	for item in items {
		let Some(days) = sale_duration(item) else {
			continue;
		};
		if best.as_ref().map_or(true, |b| beats(days, b.days)) {
			best = Some(SaleSpeed { item, days });
		}
	}
	best
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::date::Date;

	fn item(
		id: u64,
		purchase: &str,
		sale: Option<&str>,
		dates: Option<(&str, &str)>,
	) -> Item {
		Item {
			id,
			name: format!("item {}", id),
			purchase_price: Quant::from_str(purchase).unwrap(),
			sale_price: sale.map(|s| Quant::from_str(s).unwrap()),
			target_sale_value: None,
			purchase_date: dates.map(|(b, _)| Date::from_str(b).unwrap()),
			sale_date: dates.map(|(_, s)| Date::from_str(s).unwrap()),
			sold: sale.is_some(),
			notes: None,
		}
	}

	fn q(s: &str) -> Quant {
		Quant::from_str(s).unwrap()
	}

	/// Two sold items with dates.
	fn sample() -> Vec<Item> {
		vec![
			item(1, "10", Some("15"), Some(("2024-01-01", "2024-01-03"))),
			item(2, "20", Some("18"), Some(("2024-01-01", "2024-01-10"))),
		]
	}

	#[test]
	fn test_empty_collection() {
		let items: Vec<Item> = vec![];
		assert_eq!(total_invested(&items), 0);
		assert_eq!(total_profit(&items), 0);
		assert_eq!(unsold_display_value(&items), 0);
		assert_eq!(sold_count(&items), 0);
		assert_eq!(stock_count(&items), 0);
		assert!(top_profit_item(&items).is_none());
		assert!(fastest_sale(&items).is_none());
		assert!(slowest_sale(&items).is_none());
	}

	#[test]
	fn test_two_sold_items() {
		let items = sample();
		assert_eq!(total_invested(&items), 30);
		assert_eq!(sold_count(&items), 2);
		assert_eq!(total_profit(&items), 3);
		assert_eq!(top_profit_item(&items).unwrap().id, 1);

		let fastest = fastest_sale(&items).unwrap();
		assert_eq!((fastest.item.id, fastest.days), (1, 2));
		let slowest = slowest_sale(&items).unwrap();
		assert_eq!((slowest.item.id, slowest.days), (2, 9));
	}

	#[test]
	fn test_unsold_item_is_a_loss_and_not_a_sale() {
		let mut items = sample();
		items.push(item(3, "50", None, Some(("2024-01-01", "2024-01-02"))));

		assert_eq!(total_profit(&items), -47);
		assert_eq!(stock_count(&items), 1);
		assert_eq!(sold_count(&items) + stock_count(&items), items.len());
		assert_eq!(sale_duration(&items[2]), None);
		assert_eq!(fastest_sale(&items).unwrap().item.id, 1);
		assert_eq!(slowest_sale(&items).unwrap().item.id, 2);
	}

	#[test]
	fn test_sold_without_dates_is_not_timed() {
		let items = vec![
			item(1, "5", Some("6"), None),
			item(2, "5", Some("6"), Some(("2024-03-01", "2024-03-05"))),
		];
		assert_eq!(sale_duration(&items[0]), None);
		assert_eq!(fastest_sale(&items).unwrap().item.id, 2);
		assert_eq!(slowest_sale(&items).unwrap().item.id, 2);
	}

	#[test]
	fn test_sale_before_purchase_is_not_timed() {
		let items = vec![
			item(1, "5", Some("6"), Some(("2024-03-10", "2024-03-01"))),
			item(2, "5", Some("6"), Some(("2024-03-01", "2024-03-05"))),
		];
		assert_eq!(sale_duration(&items[0]), None);
		assert_eq!(fastest_sale(&items).unwrap().item.id, 2);
		assert_eq!(slowest_sale(&items).unwrap().item.id, 2);
	}

	#[test]
	fn test_ties_keep_first_occurrence() {
		let items = vec![
			item(1, "10", Some("12"), Some(("2024-01-01", "2024-01-04"))),
			item(2, "20", Some("22"), Some(("2024-02-01", "2024-02-04"))),
		];
		assert_eq!(top_profit_item(&items).unwrap().id, 1);
		assert_eq!(fastest_sale(&items).unwrap().item.id, 1);
		assert_eq!(slowest_sale(&items).unwrap().item.id, 1);
	}

	#[test]
	fn test_top_profit_can_be_a_loss() {
		let items = vec![item(1, "30", None, None), item(2, "10", None, None)];
		assert_eq!(top_profit_item(&items).unwrap().id, 2);
	}

	#[test]
	fn test_unsold_display_value_only_counts_stock() {
		let mut sold = item(1, "10", Some("15"), None);
		sold.target_sale_value = Some(q("100"));
		let mut unsold = item(2, "10", None, None);
		unsold.target_sale_value = Some(q("25.50"));
		let no_target = item(3, "10", None, None);

		let items = vec![sold, unsold, no_target];
		assert_eq!(unsold_display_value(&items), q("25.5"));
	}

	#[test]
	fn test_profit_percentage() {
		assert_eq!(
			profit_percentage(&item(1, "10", Some("15"), None)),
			Some(q("50.0"))
		);
		assert_eq!(
			profit_percentage(&item(1, "3", Some("4"), None)).unwrap().to_plain_string(),
			"33.3"
		);
		assert_eq!(
			profit_percentage(&item(1, "20", Some("18"), None)),
			Some(q("-10"))
		);
	}

	#[test]
	fn test_unsold_percentage_is_minus_one_hundred() {
		for purchase in ["0.01", "50", "1234.56"] {
			let pct = profit_percentage(&item(1, purchase, None, None)).unwrap();
			assert_eq!(pct.to_plain_string(), "-100.0");
		}
	}

	#[test]
	fn test_extreme_prices_stay_exact() {
		let tiny = "0.000001";
		let huge = "999999999999999.999999";

		let windfall = item(1, tiny, Some(huge), None);
		assert_eq!(
			profit_percentage(&windfall).unwrap().to_plain_string(),
			"99999999999999999999800.0"
		);

		let wipeout = item(2, huge, Some(tiny), None);
		assert_eq!(
			profit_percentage(&wipeout).unwrap().to_plain_string(),
			"-100.0"
		);

		let items = vec![windfall, wipeout];
		assert_eq!(total_invested(&items), 1_000_000_000_000_000);
		assert_eq!(total_profit(&items), 0);
	}

	#[test]
	fn test_zero_purchase_price_has_no_percentage() {
		assert_eq!(profit_percentage(&item(1, "0", Some("5"), None)), None);
		assert_eq!(profit_percentage(&item(1, "0", None, None)), None);
	}

	#[test]
	fn test_summary() {
		let mut items = sample();
		let mut c = item(3, "50", None, None);
		c.target_sale_value = Some(q("70"));
		items.push(c);

		assert_eq!(
			Summary::from_items(&items),
			Summary {
				invested: q("80"),
				sold: 2,
				profit: q("-47"),
				stock: 1,
				unsold_value: q("70"),
			}
		);
	}

	#[test]
	fn test_inputs_are_not_mutated() {
		let items = sample();
		let before = items.clone();
		let _ = Summary::from_items(&items);
		let _ = fastest_sale(&items);
		assert_eq!(items, before);
	}
}
