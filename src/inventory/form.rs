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
use crate::errors::{Field, ValidationError};
use crate::inventory::item::Item;
use crate::util::date::Date;
use crate::util::quant::Quant;

/// Raw text of the item form, exactly as submitted. Every field is text;
/// an empty (or blank) optional field means "not set".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemForm {
	pub name: String,
	pub purchase_price: String,
	pub sale_price: String,
	pub target_sale_value: String,
	pub purchase_date: String,
	pub sale_date: String,
	pub notes: String,
}

/// A validated form: every field has its final type, but there is no id
/// yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDraft {
	pub name: String,
	pub purchase_price: Quant,
	pub sale_price: Option<Quant>,
	pub target_sale_value: Option<Quant>,
	pub purchase_date: Option<Date>,
	pub sale_date: Option<Date>,
	pub notes: Option<String>,
}

impl ItemForm {
	pub fn validate(&self) -> Result<ItemDraft, ValidationError> {
		let name = self.name.trim();
		if name.is_empty() {
			return Err(ValidationError::new(Field::Name, "must not be empty"));
		}

		let purchase_price = match present(&self.purchase_price) {
			Some(text) => price(Field::PurchasePrice, text)?,
			None => {
				return Err(ValidationError::new(
					Field::PurchasePrice,
					"is required",
				))
			},
		};

		let sale_price = present(&self.sale_price)
			.map(|text| price(Field::SalePrice, text))
			.transpose()?;
		let target_sale_value = present(&self.target_sale_value)
			.map(|text| price(Field::TargetSaleValue, text))
			.transpose()?;

		let purchase_date = present(&self.purchase_date)
			.map(|text| date(Field::PurchaseDate, text))
			.transpose()?;
		let sale_date = present(&self.sale_date)
			.map(|text| date(Field::SaleDate, text))
			.transpose()?;

		if let (Some(bought), Some(sold)) = (purchase_date, sale_date) {
			if sold < bought {
				return Err(ValidationError::new(
					Field::SaleDate,
					format!("{} is before the purchase date {}", sold, bought),
				));
			}
		}

		Ok(ItemDraft {
			name: name.to_string(),
			purchase_price,
			sale_price,
			target_sale_value,
			purchase_date,
			sale_date,
			notes: present(&self.notes).map(str::to_string),
		})
	}
}

/// Prefills the form from a stored item, which is how editing starts.
impl From<&Item> for ItemForm {
	fn from(item: &Item) -> Self {
		let text = |q: Option<Quant>| q.map(|q| q.to_plain_string()).unwrap_or_default();
		let day = |d: Option<Date>| d.map(|d| d.to_string()).unwrap_or_default();

		Self {
			name: item.name.clone(),
			purchase_price: item.purchase_price.to_plain_string(),
			sale_price: text(item.sale_price),
			target_sale_value: text(item.target_sale_value),
			purchase_date: day(item.purchase_date),
			sale_date: day(item.sale_date),
			notes: item.notes.clone().unwrap_or_default(),
		}
	}
}

impl ItemDraft {
	pub fn into_item(self, id: u64) -> Item {
		Item {
			id,
			sold: self.sale_price.is_some(),
			name: self.name,
			purchase_price: self.purchase_price,
			sale_price: self.sale_price,
			target_sale_value: self.target_sale_value,
			purchase_date: self.purchase_date,
			sale_date: self.sale_date,
			notes: self.notes,
		}
	}
}

fn present(text: &str) -> Option<&str> {
	let trimmed = text.trim();
	(!trimmed.is_empty()).then_some(trimmed)
}

fn price(field: Field, text: &str) -> Result<Quant, ValidationError> {
	let value = Quant::from_str(text)
		.map_err(|e| ValidationError::new(field, e.to_string()))?;
	if value.is_negative() {
		return Err(ValidationError::new(field, "must not be negative"));
	}
	Ok(value)
}

fn date(field: Field, text: &str) -> Result<Date, ValidationError> {
	Date::from_str(text).map_err(|e| ValidationError::new(field, e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn form() -> ItemForm {
		ItemForm {
			name: "Vintage lamp".to_string(),
			purchase_price: "10".to_string(),
			..Default::default()
		}
	}

	fn field_of(form: &ItemForm) -> Field {
		form.validate().unwrap_err().field
	}

	#[test]
	fn test_minimal_form_is_unsold() {
		let item = form().validate().unwrap().into_item(3);
		assert_eq!(item.id, 3);
		assert_eq!(item.name, "Vintage lamp");
		assert_eq!(item.purchase_price, 10);
		assert!(!item.sold);
		assert_eq!(item.sale_price, None);
		assert_eq!(item.notes, None);
	}

	#[test]
	fn test_sale_price_marks_sold() {
		let mut f = form();
		f.sale_price = "15.50".to_string();
		let item = f.validate().unwrap().into_item(1);
		assert!(item.sold);
		assert_eq!(item.sale_price.unwrap().to_plain_string(), "15.50");
	}

	#[test]
	fn test_blank_sale_price_is_not_a_sale() {
		let mut f = form();
		f.sale_price = "   ".to_string();
		assert!(!f.validate().unwrap().into_item(1).sold);
	}

	#[test]
	fn test_name_is_required_and_trimmed() {
		let mut f = form();
		f.name = "  ".to_string();
		assert_eq!(field_of(&f), Field::Name);

		f.name = "  Desk ".to_string();
		assert_eq!(f.validate().unwrap().name, "Desk");
	}

	#[test]
	fn test_purchase_price_is_required() {
		let mut f = form();
		f.purchase_price = String::new();
		let err = f.validate().unwrap_err();
		assert_eq!(err, ValidationError::new(Field::PurchasePrice, "is required"));
	}

	#[test]
	fn test_unparsable_numbers_are_rejected() {
		let mut f = form();
		f.purchase_price = "ten".to_string();
		assert_eq!(field_of(&f), Field::PurchasePrice);

		let mut f = form();
		f.sale_price = "NaN".to_string();
		assert_eq!(field_of(&f), Field::SalePrice);

		let mut f = form();
		f.target_sale_value = "1e3".to_string();
		assert_eq!(field_of(&f), Field::TargetSaleValue);
	}

	#[test]
	fn test_prices_beyond_exact_range_are_rejected() {
		let mut f = form();
		f.purchase_price = "1.000000000000000001".to_string();
		assert_eq!(field_of(&f), Field::PurchasePrice);

		let mut f = form();
		f.sale_price = "1000000000000000".to_string();
		assert_eq!(field_of(&f), Field::SalePrice);

		let mut f = form();
		f.purchase_price = "1.000001".to_string();
		f.sale_price = "1000000000000.5".to_string();
		assert!(f.validate().is_ok());
	}

	#[test]
	fn test_negative_prices_are_rejected() {
		let mut f = form();
		f.purchase_price = "-1".to_string();
		let err = f.validate().unwrap_err();
		assert_eq!(err.field, Field::PurchasePrice);
		assert_eq!(err.reason, "must not be negative");
	}

	#[test]
	fn test_zero_purchase_price_is_allowed() {
		let mut f = form();
		f.purchase_price = "0".to_string();
		assert!(f.validate().is_ok());
	}

	#[test]
	fn test_bad_dates() {
		let mut f = form();
		f.purchase_date = "2024-02-30".to_string();
		assert_eq!(field_of(&f), Field::PurchaseDate);

		let mut f = form();
		f.purchase_date = "2024-01-10".to_string();
		f.sale_date = "2024-01-09".to_string();
		assert_eq!(field_of(&f), Field::SaleDate);
	}

	#[test]
	fn test_prefill_reproduces_form() {
		let original = ItemForm {
			name: "Bike".to_string(),
			purchase_price: "120.00".to_string(),
			sale_price: "150".to_string(),
			target_sale_value: "160.5".to_string(),
			purchase_date: "2024-03-01".to_string(),
			sale_date: "2024-03-20".to_string(),
			notes: "needs new tyres".to_string(),
		};
		let item = original.validate().unwrap().into_item(9);
		assert_eq!(ItemForm::from(&item), original);
	}
}
