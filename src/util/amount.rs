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
use crate::util::quant::Quant;
use std::fmt;

/// Formats quants as money for reports: a currency symbol in front and a
/// fixed number of decimal places.
#[derive(Clone, Debug)]
pub struct MoneyFormat {
	pub currency: String,
	pub precision: u32,
}

impl MoneyFormat {
	pub fn new(currency: &str, precision: u32) -> Self {
		Self {
			currency: currency.to_string(),
			precision,
		}
	}

	pub fn amount(&self, value: Quant) -> Amount {
		Amount {
			currency: self.currency.clone(),
			value: value.round(self.precision),
		}
	}

	/// Same as `amount`, but "-" for a missing value.
	pub fn optional(&self, value: Option<Quant>) -> String {
		match value {
			Some(v) => self.amount(v).to_string(),
			None => "-".to_string(),
		}
	}
}

/// A quant value with a currency.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Amount {
	pub currency: String,
	pub value: Quant,
}

impl fmt::Display for Amount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.currency, self.value)
	}
}
