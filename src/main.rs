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
use crate::config::config_file::Config;
use crate::config::settings::{Overrides, Settings};
use crate::inventory::form::ItemForm;
use crate::inventory::tracker::Tracker;
use crate::reports::item_reporter::ItemReporter;
use crate::reports::stats_reporter::StatsReporter;
use crate::store::item_store::ItemStore;
use crate::store::kv::{FileStore, KeyValueStore};
use anyhow::{anyhow, bail, Error};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod import;
mod inventory;
mod reports;
mod stats;
mod store;
mod util;

#[derive(Parser)]
#[command(
	name = "resale-tracker",
	version,
	about = "Track purchased items, their resale and the profit made"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// Item id for edit and show; storage key for import
	#[arg(required = false)]
	term: Option<String>,

	// -----------------
	// -- FORM FIELDS --
	// -----------------
	/// Item name
	#[arg(short, long)]
	name: Option<String>,

	/// Price paid for the item
	#[arg(short, long)]
	purchase_price: Option<String>,

	/// Price the item sold for; setting it marks the item sold
	#[arg(short, long)]
	sale_price: Option<String>,

	/// Expected resale value of an unsold item
	#[arg(short, long = "target-value")]
	target_value: Option<String>,

	/// Purchase date (YYYY-MM-DD)
	#[arg(long)]
	purchase_date: Option<String>,

	/// Sale date (YYYY-MM-DD)
	#[arg(long)]
	sale_date: Option<String>,

	/// Free-form notes
	#[arg(long)]
	notes: Option<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Data directory (default: the platform data dir)
	#[arg(long)]
	store: Option<String>,

	/// Storage key of the item list (default: items)
	#[arg(long)]
	key: Option<String>,

	/// Custom config file location
	/// (default: ~/.config/resale-tracker/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Decimal places to show for money
	#[arg(long)]
	precision: Option<u32>,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if let Some(prec) = self.precision {
			if prec > Settings::MAX_PRECISION {
				bail!("Maximum precision is {}", Settings::MAX_PRECISION);
			}
		}

		let has_form_fields =
			self.form_overrides().iter().any(|value| value.is_some());
		if has_form_fields
			&& !matches!(self.command, Directive::Add | Directive::Edit)
		{
			bail!("Item fields only apply to add and edit");
		}

		Ok(())
	}

	fn form_overrides(&self) -> [&Option<String>; 7] {
		[
			&self.name,
			&self.purchase_price,
			&self.sale_price,
			&self.target_value,
			&self.purchase_date,
			&self.sale_date,
			&self.notes,
		]
	}

	/// Fills in the form fields given on the command line over `form`.
	/// Fields not given keep their prefilled value; an empty string clears.
	fn apply_to(&self, form: &mut ItemForm) {
		let targets = [
			&mut form.name,
			&mut form.purchase_price,
			&mut form.sale_price,
			&mut form.target_sale_value,
			&mut form.purchase_date,
			&mut form.sale_date,
			&mut form.notes,
		];
		for (target, value) in targets.into_iter().zip(self.form_overrides()) {
			if let Some(value) = value {
				*target = value.clone();
			}
		}
	}

	fn item_id(&self) -> Result<u64, Error> {
		let term = self
			.term
			.as_ref()
			.ok_or_else(|| anyhow!("No item id specified"))?;
		term.parse::<u64>()
			.map_err(|_| anyhow!("Invalid item id: {}", term))
	}
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Directive {
	Add,  // record a new item
	Edit, // change an existing item
	Show, // print one item as the edit form sees it

	Panel,    // summary figures and the item list
	Products, // item list with return percentages
	Stats,    // best item and sale speed

	Import, // copy records from the older web front ends
}

fn main() -> Result<(), Error> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| EnvFilter::new("warn")),
		)
		.with_writer(std::io::stderr)
		.init();

	let args = Cli::parse();
	args.validate()?;

	let config = Config::load(args.config.as_ref())?;
	let settings = Settings::resolve(
		config,
		Overrides {
			store: args.store.clone(),
			key: args.key.clone(),
			precision: args.precision,
		},
	)?;
	debug!(?settings, "resolved settings");

	let backend = FileStore::new(&settings.data_dir);
	let legacy_raw = if args.command == Directive::Import {
		let key = args.term.as_deref().unwrap_or(&settings.legacy_key);
		if key == settings.key {
			bail!("Cannot import the item list into itself");
		}
		match backend.get(key)? {
			Some(raw) => Some(raw),
			None => bail!(
				"Nothing stored under key {} in {}",
				key,
				backend.dir().display()
			),
		}
	} else {
		None
	};

	let mut tracker = Tracker::open(ItemStore::new(backend, &settings.key));

	match args.command {
		Directive::Add => {
			let mut form = ItemForm::default();
			args.apply_to(&mut form);
			let item = tracker.create(&form)?;
			println!("Added item {}: {}", item.id, item.name);
		},
		Directive::Edit => {
			let id = args.item_id()?;
			let mut form = match tracker.get(id) {
				Some(item) => ItemForm::from(item),
				None => bail!(errors::Error::NotFound(id)),
			};
			args.apply_to(&mut form);
			let item = tracker.update(id, &form)?;
			println!("Updated item {}: {}", item.id, item.name);
		},
		Directive::Show => {
			let id = args.item_id()?;
			match tracker.get(id) {
				Some(item) => print!("{}", ItemReporter::detail(item)),
				None => bail!(errors::Error::NotFound(id)),
			}
		},
		Directive::Panel => {
			let reporter = ItemReporter::new(tracker.items(), settings.money);
			print!("{}", reporter.panel());
		},
		Directive::Products => {
			let reporter = ItemReporter::new(tracker.items(), settings.money);
			print!("{}", reporter.products());
		},
		Directive::Stats => {
			print!("{}", StatsReporter::new(tracker.items()).render());
		},
		Directive::Import => {
			if let Some(raw) = legacy_raw {
				let summary = import::legacy::import(&mut tracker, &raw)?;
				println!(
					"Imported {} items ({} skipped)",
					summary.imported, summary.skipped
				);
			}
		},
	}

	Ok(())
}
