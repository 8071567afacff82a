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
use crate::inventory::item::Item;
use crate::reports::table::Table;
use crate::stats::aggregator::{
	fastest_sale, slowest_sale, top_profit_item, SaleSpeed,
};

pub struct StatsReporter<'a> {
	items: &'a [Item],
}

impl<'a> StatsReporter<'a> {
	pub fn new(items: &'a [Item]) -> Self {
		Self { items }
	}

	pub fn render(&self) -> String {
		let top = top_profit_item(self.items)
			.map(|i| i.name.clone())
			.unwrap_or_else(|| "-".to_string());

		let mut table = Table::new(2);
		table.add_row(vec!["Most profitable item".to_string(), top]);

		match (fastest_sale(self.items), slowest_sale(self.items)) {
			(Some(fastest), Some(slowest)) => {
				table.add_row(vec!["Fastest sale".to_string(), speed(&fastest)]);
				table.add_row(vec!["Slowest sale".to_string(), speed(&slowest)]);
			},
			_ => {
				let mut out = table.render();
				out.push_str("No sold items with recorded dates\n");
				return out;
			},
		}

		table.render()
	}
}

fn speed(sale: &SaleSpeed) -> String {
	let unit = if sale.days == 1 { "day" } else { "days" };
	format!("{} ({} {})", sale.item.name, sale.days, unit)
}
