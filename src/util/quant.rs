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
use anyhow::{anyhow, bail, Error};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};

/// An exact decimal quantity backed by a reduced fraction of u128s. Prices
/// typed by a user are always finite decimals, so every sum and difference
/// of them is exact; only division (percentages) can produce a fraction that
/// has no finite decimal form, and that is rounded before display.
///
/// There is no NaN or infinity: parsing fails instead, and division by zero
/// returns `None`.
///
/// Parsed values are capped at `MAX_WHOLE_DIGITS` integer digits and
/// `MAX_DECIMALS` decimals: numerators stay below 10^21 and denominators
/// divide 10^6. With those bounds a percentage (difference, quotient, times
/// 100, rounded) peaks around 10^30, far inside u128.
#[derive(Clone, Copy, Debug)]
pub struct Quant {
	numerator: u128,
	denominator: u128,

	/// Is always false if the numerator is zero.
	is_negative: bool,

	/// How many decimal places to render by default. Set from the input
	/// text so that "12.50" is stored and shown as "12.50", not "12.5".
	///
	/// Has no effect on the underlying fraction.
	render_precision: u32,
}

impl Quant {
	/// Longest fractional part accepted by `from_str`.
	const MAX_DECIMALS: usize = 6;

	/// Longest integer part accepted by `from_str`, leading zeroes aside.
	const MAX_WHOLE_DIGITS: usize = 15;

	pub fn zero() -> Self {
		Self {
			numerator: 0,
			denominator: 1,
			is_negative: false,
			render_precision: 0,
		}
	}

	pub fn from_i128(amount: i128) -> Self {
		Self {
			numerator: amount.unsigned_abs(),
			denominator: 1,
			is_negative: amount < 0,
			render_precision: 0,
		}
	}

	/// Parses a plain decimal such as "12", "-3.50", "+0.5" or ".5".
	/// Exponents, separators and non-finite values are rejected.
	pub fn from_str(input: &str) -> Result<Self, Error> {
		let trimmed = input.trim();
		let (is_negative, unsigned) = match trimmed.strip_prefix('-') {
			Some(rest) => (true, rest),
			None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
		};

		let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

		if whole.is_empty() && fraction.is_empty() {
			bail!("not a number: {:?}", input);
		}
		if !whole.bytes().all(|b| b.is_ascii_digit())
			|| !fraction.bytes().all(|b| b.is_ascii_digit())
		{
			bail!("not a number: {:?}", input);
		}
		if fraction.len() > Quant::MAX_DECIMALS {
			bail!("at most {} decimal places allowed", Quant::MAX_DECIMALS);
		}
		if whole.trim_start_matches('0').len() > Quant::MAX_WHOLE_DIGITS {
			bail!("at most {} integer digits allowed", Quant::MAX_WHOLE_DIGITS);
		}

		let precision = fraction.len() as u32;
		let scale = 10u128.pow(precision);
		let whole_value = match whole {
			"" => 0,
			w => w.parse::<u128>()?,
		};
		let fractional = match fraction {
			"" => 0,
			f => f.parse::<u128>()?,
		};
		let numerator = whole_value
			.checked_mul(scale)
			.and_then(|n| n.checked_add(fractional))
			.ok_or_else(|| anyhow!("number too large: {:?}", input))?;

		let mut out = Self {
			numerator,
			denominator: scale,
			is_negative: is_negative && numerator > 0,
			render_precision: precision,
		};
		out.reduce();
		Ok(out)
	}

	pub fn is_negative(&self) -> bool {
		self.is_negative
	}

	/// Returns this value rounded to the given number of decimal places,
	/// ties away from zero, rendering with exactly that many places.
	pub fn round(&self, decimal_places: u32) -> Self {
		let scale = 10u128.pow(decimal_places);
		let scaled_numerator = self.numerator * scale;
		let quotient = scaled_numerator / self.denominator;
		let remainder = scaled_numerator % self.denominator;

		let rounded = if remainder * 2 >= self.denominator {
			quotient + 1
		} else {
			quotient
		};

		let mut out = Self {
			numerator: rounded,
			denominator: scale,
			is_negative: self.is_negative && rounded > 0,
			render_precision: decimal_places,
		};
		out.reduce();
		out
	}

	/// Division that refuses a zero divisor instead of panicking.
	pub fn checked_div(self, rhs: Quant) -> Option<Self> {
		if rhs.numerator == 0 {
			return None;
		}

		let numerator = self.numerator * rhs.denominator;
		let denominator = self.denominator * rhs.numerator;

		let mut out = Self {
			numerator,
			denominator,
			is_negative: numerator > 0 && (self.is_negative ^ rhs.is_negative),
			render_precision: self.render_precision.max(rhs.render_precision),
		};
		out.reduce();
		Some(out)
	}

	/// Renders without digit grouping, for storage and form fields.
	pub fn to_plain_string(&self) -> String {
		self.render(self.render_precision as usize, false)
	}

	fn render(&self, precision: usize, grouped: bool) -> String {
		let integer_part = self.numerator / self.denominator;
		let mut remainder = self.numerator % self.denominator;

		let mut fraction_str = String::with_capacity(precision);
		for _ in 0..precision {
			remainder *= 10;
			let digit = (remainder / self.denominator) as u8;
			remainder %= self.denominator;
			fraction_str.push((b'0' + digit) as char);
		}

		let mut int_str = integer_part.to_string();
		if grouped {
			let mut i = int_str.len() as isize - 3;
			while i > 0 {
				int_str.insert(i as usize, ',');
				i -= 3;
			}
		}

		let sign = if self.is_negative { "-" } else { "" };
		if fraction_str.is_empty() {
			format!("{}{}", sign, int_str)
		} else {
			format!("{}{}.{}", sign, int_str, fraction_str)
		}
	}

	fn reduce(&mut self) {
		let gcd = Self::gcd(self.numerator, self.denominator);
		self.numerator /= gcd;
		self.denominator /= gcd;
	}

	fn gcd(mut a: u128, mut b: u128) -> u128 {
		while b != 0 {
			let temp = b;
			b = a % b;
			a = temp;
		}
		a
	}
}

impl Default for Quant {
	fn default() -> Self {
		Quant::zero()
	}
}

/// Renders with thousands separators; a formatter precision such as `{:.2}`
/// overrides the stored render precision (truncating, so round first).
impl fmt::Display for Quant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let precision = f.precision().unwrap_or(self.render_precision as usize);
		write!(f, "{}", self.render(precision, true))
	}
}

// -----------------
// -- BOILERPLATE --
// -----------------

impl Add for Quant {
	type Output = Self;

	fn add(self, rhs: Self) -> Self::Output {
		let render_precision = self.render_precision.max(rhs.render_precision);
		if self.numerator == 0 {
			return Self {
				render_precision,
				..rhs
			};
		}
		if rhs.numerator == 0 {
			return Self {
				render_precision,
				..self
			};
		}

		let gcd = Self::gcd(self.denominator, rhs.denominator);
		let lcm = self.denominator / gcd * rhs.denominator;

		let term_a = self.numerator * (lcm / self.denominator);
		let term_b = rhs.numerator * (lcm / rhs.denominator);

		let (numerator, is_negative) = if self.is_negative == rhs.is_negative {
			(term_a + term_b, self.is_negative)
		} else if term_a >= term_b {
			(term_a - term_b, self.is_negative)
		} else {
			(term_b - term_a, rhs.is_negative)
		};

		let mut out = Self {
			numerator,
			denominator: lcm,
			is_negative: is_negative && numerator > 0,
			render_precision,
		};
		out.reduce();
		out
	}
}

impl Sum for Quant {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Quant::zero(), |acc, quant| acc + quant)
	}
}

impl Sub for Quant {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self::Output {
		self + (-rhs)
	}
}

impl Mul<i128> for Quant {
	type Output = Self;

	fn mul(self, rhs: i128) -> Self::Output {
		let numerator = self.numerator * rhs.unsigned_abs();

		let mut out = Self {
			numerator,
			denominator: self.denominator,
			is_negative: numerator > 0 && (self.is_negative ^ (rhs < 0)),
			render_precision: self.render_precision,
		};
		out.reduce();
		out
	}
}

impl Neg for Quant {
	type Output = Self;

	fn neg(self) -> Self::Output {
		Self {
			is_negative: self.numerator != 0 && !self.is_negative,
			..self
		}
	}
}

impl PartialEq for Quant {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl PartialEq<i128> for Quant {
	fn eq(&self, other: &i128) -> bool {
		*self == Quant::from_i128(*other)
	}
}

impl Eq for Quant {}

impl PartialOrd for Quant {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialOrd<i128> for Quant {
	fn partial_cmp(&self, other: &i128) -> Option<Ordering> {
		Some(self.cmp(&Quant::from_i128(*other)))
	}
}

impl Ord for Quant {
	fn cmp(&self, other: &Self) -> Ordering {
		if self.numerator == 0 && other.numerator == 0 {
			return Ordering::Equal;
		}

		match (self.is_negative, other.is_negative) {
			(true, false) => return Ordering::Less,
			(false, true) => return Ordering::Greater,
			_ => {},
		};

		let gcd = Self::gcd(self.denominator, other.denominator);
		let lcm = self.denominator / gcd * other.denominator;

		let left = self.numerator * (lcm / self.denominator);
		let right = other.numerator * (lcm / other.denominator);

		if self.is_negative {
			right.cmp(&left)
		} else {
			left.cmp(&right)
		}
	}
}

impl Serialize for Quant {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_plain_string())
	}
}

impl<'de> Deserialize<'de> for Quant {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_any(QuantVisitor)
	}
}

/// Accepts decimal strings (what we write) as well as plain JSON numbers.
struct QuantVisitor;

impl Visitor<'_> for QuantVisitor {
	type Value = Quant;

	fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "a decimal number or decimal string")
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Quant, E> {
		Quant::from_str(v).map_err(E::custom)
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<Quant, E> {
		Quant::from_str(&v.to_string()).map_err(E::custom)
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Quant, E> {
		Quant::from_str(&v.to_string()).map_err(E::custom)
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<Quant, E> {
		Quant::from_str(&v.to_string()).map_err(E::custom)
	}
}
