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
use std::fmt;
use thiserror::Error;

/// The form fields that can fail validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
	Name,
	PurchasePrice,
	SalePrice,
	TargetSaleValue,
	PurchaseDate,
	SaleDate,
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Field::Name => "name",
			Field::PurchasePrice => "purchase price",
			Field::SalePrice => "sale price",
			Field::TargetSaleValue => "target sale value",
			Field::PurchaseDate => "purchase date",
			Field::SaleDate => "sale date",
		};
		write!(f, "{}", label)
	}
}

/// Rejected form input; nothing was committed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
	pub field: Field,
	pub reason: String,
}

impl ValidationError {
	pub fn new(field: Field, reason: impl Into<String>) -> Self {
		Self {
			field,
			reason: reason.into(),
		}
	}
}

#[derive(Debug, Error)]
pub enum Error {
	#[error(transparent)]
	Validation(#[from] ValidationError),

	#[error("no item with id {0}")]
	NotFound(u64),

	#[error("failed to save items: {0}")]
	Persistence(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
