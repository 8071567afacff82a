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
use crate::inventory::form::ItemForm;
use crate::inventory::item::Item;
use crate::reports::table::Table;
use crate::stats::aggregator::{profit_percentage, total_profit, Summary};
use crate::util::amount::MoneyFormat;

/// Renders the item list: the panel (summary plus items), the products
/// view (items with return percentages), and the single-item form view.
pub struct ItemReporter<'a> {
	items: &'a [Item],
	money: MoneyFormat,
}

impl<'a> ItemReporter<'a> {
	pub fn new(items: &'a [Item], money: MoneyFormat) -> Self {
		Self { items, money }
	}

	pub fn panel(&self) -> String {
		let summary = Summary::from_items(self.items);

		let mut table = Table::new(2);
		table.right_align(vec![1]);
		let money = |value| self.money.amount(value).to_string();
		table.add_row(vec!["Invested".to_string(), money(summary.invested)]);
		table.add_row(vec!["Sold".to_string(), summary.sold.to_string()]);
		table.add_row(vec!["Total profit".to_string(), money(summary.profit)]);
		table.add_row(vec!["Stock".to_string(), summary.stock.to_string()]);
		table.add_row(vec![
			"Unsold value".to_string(),
			money(summary.unsold_value),
		]);

		let mut out = table.render();
		out.push('\n');
		out.push_str(&self.item_table(false));
		out
	}

	pub fn products(&self) -> String {
		self.item_table(true)
	}

	/// The item as it would be prefilled into the edit form.
	pub fn detail(item: &Item) -> String {
		let form = ItemForm::from(item);
		let sold = if item.sold { "yes" } else { "no" };

		let mut table = Table::new(2);
		table.add_row(cells(["id", &item.id.to_string()]));
		table.add_row(cells(["name", &form.name]));
		table.add_row(cells(["purchase price", &form.purchase_price]));
		table.add_row(cells(["sale price", &form.sale_price]));
		table.add_row(cells(["target sale value", &form.target_sale_value]));
		table.add_row(cells(["purchase date", &form.purchase_date]));
		table.add_row(cells(["sale date", &form.sale_date]));
		table.add_row(cells(["notes", &form.notes]));
		table.add_row(cells(["sold", sold]));
		table.render()
	}

	fn item_table(&self, with_percentage: bool) -> String {
		if self.items.is_empty() {
			return "No items\n".to_string();
		}

		let mut header = vec![
			"ID",
			"Item",
			"Bought",
			"Cost",
			"Sale price",
			"Sold on",
			"Sold",
			"Profit",
		];
		if with_percentage {
			header.push("% Profit");
		}
		header.push("Notes");

		let mut table = Table::new(header.len());
		table.right_align(if with_percentage {
			vec![0, 3, 4, 7, 8]
		} else {
			vec![0, 3, 4, 7]
		});
		table.add_header(header);
		table.add_separator();

		for item in self.items {
			let mut row = vec![
				item.id.to_string(),
				item.name.clone(),
				or_dash(item.purchase_date),
				self.money.amount(item.purchase_price).to_string(),
				self.money.optional(item.sale_price),
				or_dash(item.sale_date),
				if item.sold { "Yes" } else { "No" }.to_string(),
				self.money.amount(item.profit()).to_string(),
			];
			if with_percentage {
				row.push(match profit_percentage(item) {
					Some(pct) => format!("{}%", pct),
					None => "-".to_string(),
				});
			}
			row.push(item.notes.clone().unwrap_or_else(|| "-".to_string()));
			table.add_row(row);
		}

		if with_percentage {
			table.add_partial_separator(vec![7]);
			let mut totals = vec![String::new(); 10];
			totals[7] = self.money.amount(total_profit(self.items)).to_string();
			table.add_row(totals);
		}

		table.render()
	}
}

fn cells<const N: usize>(values: [&str; N]) -> Vec<String> {
	values.iter().map(|s| s.to_string()).collect()
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
	value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
