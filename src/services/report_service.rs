use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::datasets::Snapshot;
use crate::models::{
	Cell, ReportData, ReportId, ReportResult, ResultScalar, ResultSeries, ResultTable,
	format_thousands,
};
use crate::services::aggregate::{
	group_mean, group_size, group_sum, present, round_half_even, value_counts,
};

/// Interactive parameters. Only the provider contact report reads them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportParams {
	pub city: Option<String>,
}

impl ReportParams {
	pub fn for_city(city: impl Into<String>) -> Self {
		Self {
			city: Some(city.into()),
		}
	}

	/// The requested city, or the first selector value when none was given.
	pub fn resolve_city(&self, snapshot: &Snapshot) -> Option<String> {
		self.city.clone().or_else(|| snapshot.cities().into_iter().next())
	}
}

/// Runs one catalog entry against a snapshot.
pub fn run_report(id: ReportId, snapshot: &Snapshot, params: &ReportParams) -> ReportResult {
	let data = match id {
		ReportId::ProvidersReceiversPerCity => {
			ReportData::Table(providers_receivers_per_city(snapshot))
		}
		ReportId::ProviderTypeContribution => ReportData::Series(provider_type_contribution(snapshot)),
		ReportId::ProviderContacts => {
			let city = params.resolve_city(snapshot).unwrap_or_default();
			ReportData::Table(provider_contacts(snapshot, &city))
		}
		ReportId::TopReceivers => ReportData::Table(top_receivers(snapshot)),
		ReportId::TotalQuantity => ReportData::Scalar(total_quantity(snapshot)),
		ReportId::ListingsByCity => ReportData::Series(listings_by_city(snapshot)),
		ReportId::FoodTypeFrequency => ReportData::Series(food_type_frequency(snapshot)),
		ReportId::ClaimsPerFoodItem => ReportData::Series(claims_per_food_item(snapshot)),
		ReportId::ProviderSuccessfulClaims => {
			ReportData::Series(provider_successful_claims(snapshot))
		}
		ReportId::ClaimStatusBreakdown => ReportData::Table(claim_status_breakdown(snapshot)),
		ReportId::AverageClaimedPerReceiver => {
			ReportData::Table(average_claimed_per_receiver(snapshot))
		}
		ReportId::MostClaimedMealType => ReportData::Series(most_claimed_meal_type(snapshot)),
		ReportId::QuantityPerProvider => ReportData::Series(quantity_per_provider(snapshot)),
	};

	ReportResult::new(id, data)
}

/// Runs the whole catalog in display order.
pub fn run_catalog(snapshot: &Snapshot, params: &ReportParams) -> Vec<ReportResult> {
	ReportId::ALL
		.into_iter()
		.map(|id| run_report(id, snapshot, params))
		.collect()
}

/// Distinct providers and receivers per city, outer-joined on city.
pub fn providers_receivers_per_city(snapshot: &Snapshot) -> ResultTable {
	let mut providers: BTreeMap<&str, BTreeSet<i64>> = BTreeMap::new();
	for provider in snapshot.providers.rows() {
		if let Some(city) = present(&provider.city) {
			providers.entry(city).or_default().insert(provider.provider_id);
		}
	}

	let mut receivers: BTreeMap<&str, BTreeSet<i64>> = BTreeMap::new();
	for receiver in snapshot.receivers.rows() {
		if let Some(city) = present(&receiver.city) {
			receivers.entry(city).or_default().insert(receiver.receiver_id);
		}
	}

	let cities: BTreeSet<&str> = providers.keys().chain(receivers.keys()).copied().collect();

	let mut table = ResultTable::new(&["City", "Providers", "Receivers"]);
	for city in cities {
		let provider_count = providers.get(city).map_or(0, |ids| ids.len() as i64);
		let receiver_count = receivers.get(city).map_or(0, |ids| ids.len() as i64);
		table.push_row(vec![city.into(), provider_count.into(), receiver_count.into()]);
	}
	table
}

/// Listed quantity per provider type.
pub fn provider_type_contribution(snapshot: &Snapshot) -> ResultSeries {
	let providers = snapshot.providers.index_by_id();
	let pairs = snapshot.listings.rows().iter().filter_map(|listing| {
		let provider = providers.get(&listing.provider_id)?;
		Some((present(&provider.provider_type)?, listing.quantity))
	});

	ResultSeries::new("Type", "Quantity", labelled(group_sum(pairs)))
}

/// Name, contact and email of the providers in `city`.
pub fn provider_contacts(snapshot: &Snapshot, city: &str) -> ResultTable {
	let mut table = ResultTable::new(&["Name", "Contact", "Email"]);
	for provider in snapshot.providers.in_city(city) {
		table.push_row(vec![
			provider.name.as_str().into(),
			provider.contact.as_str().into(),
			provider.email.as_str().into(),
		]);
	}
	table
}

/// Total completed quantity per receiver, largest first.
pub fn top_receivers(snapshot: &Snapshot) -> ResultTable {
	let sums = group_sum(
		snapshot
			.resolved_claims
			.completed()
			.map(|r| (r.claim.receiver_id, r.quantity)),
	);
	receiver_table(snapshot, sums.into_iter().map(|(id, sum)| (id, Cell::Float(sum))))
}

pub fn total_quantity(snapshot: &Snapshot) -> ResultScalar {
	let total = snapshot.listings.total_quantity();
	ResultScalar {
		label: "Total Quantity Available".to_string(),
		value: total,
		display: format_thousands(total),
	}
}

pub fn listings_by_city(snapshot: &Snapshot) -> ResultSeries {
	let counts = value_counts(
		snapshot
			.listings
			.rows()
			.iter()
			.filter_map(|l| present(&l.location)),
	);
	ResultSeries::new("Location", "count", labelled(counts))
}

pub fn food_type_frequency(snapshot: &Snapshot) -> ResultSeries {
	let counts = value_counts(
		snapshot
			.listings
			.rows()
			.iter()
			.filter_map(|l| present(&l.food_type)),
	);
	ResultSeries::new("Food_Type", "count", labelled(counts))
}

/// Claims per food name; claims on unknown listings drop out of the join.
pub fn claims_per_food_item(snapshot: &Snapshot) -> ResultSeries {
	let listings = snapshot.listings.index_by_id();
	let sizes = group_size(snapshot.claims.rows().iter().filter_map(|claim| {
		let listing = listings.get(&claim.food_id)?;
		present(&listing.food_name)
	}));
	ResultSeries::new("Food_Name", "count", labelled(sizes))
}

/// Completed claims per provider name, through listing then provider.
pub fn provider_successful_claims(snapshot: &Snapshot) -> ResultSeries {
	let listings = snapshot.listings.index_by_id();
	let providers = snapshot.providers.index_by_id();
	let sizes = group_size(snapshot.resolved_claims.completed().filter_map(|r| {
		let listing = listings.get(&r.claim.food_id)?;
		let provider = providers.get(&listing.provider_id)?;
		present(&provider.name)
	}));
	ResultSeries::new("Name", "count", labelled(sizes))
}

/// Count and share of each raw status value.
pub fn claim_status_breakdown(snapshot: &Snapshot) -> ResultTable {
	let counts = value_counts(
		snapshot
			.claims
			.rows()
			.iter()
			.filter_map(|c| present(&c.status)),
	);
	let total: i64 = counts.iter().map(|(_, count)| count).sum();

	let mut table = ResultTable::new(&["Status", "Count", "Percent"]);
	for (status, count) in counts {
		let percent = round_half_even(count as f64 / total as f64 * 100.0, 2);
		table.push_row(vec![status.into(), count.into(), Cell::Float(percent)]);
	}
	table
}

/// Mean completed quantity per receiver; receivers without any numeric
/// quantity rank last with a missing mean.
pub fn average_claimed_per_receiver(snapshot: &Snapshot) -> ResultTable {
	let means = group_mean(
		snapshot
			.resolved_claims
			.completed()
			.map(|r| (r.claim.receiver_id, r.quantity)),
	);
	receiver_table(snapshot, means.into_iter().map(|(id, mean)| (id, Cell::from(mean))))
}

pub fn most_claimed_meal_type(snapshot: &Snapshot) -> ResultSeries {
	let listings = snapshot.listings.index_by_id();
	let sizes = group_size(snapshot.resolved_claims.completed().filter_map(|r| {
		let listing = listings.get(&r.claim.food_id)?;
		present(&listing.meal_type)
	}));
	ResultSeries::new("Meal_Type", "count", labelled(sizes))
}

pub fn quantity_per_provider(snapshot: &Snapshot) -> ResultSeries {
	let providers = snapshot.providers.index_by_id();
	let pairs = snapshot.listings.rows().iter().filter_map(|listing| {
		let provider = providers.get(&listing.provider_id)?;
		Some((present(&provider.name)?, listing.quantity))
	});

	ResultSeries::new("Name", "Quantity", labelled(group_sum(pairs)))
}

/// Inner join of ranked per-receiver values onto the receivers table.
/// Type follows Name only when the receivers source has that column.
fn receiver_table(snapshot: &Snapshot, ranked: impl Iterator<Item = (i64, Cell)>) -> ResultTable {
	let receivers = snapshot.receivers.index_by_id();
	let with_type = snapshot.receivers.has_type();

	let mut table = if with_type {
		ResultTable::new(&["Receiver_ID", "Quantity", "Name", "Type", "City", "Contact"])
	} else {
		ResultTable::new(&["Receiver_ID", "Quantity", "Name", "City", "Contact"])
	};
	for (receiver_id, quantity) in ranked {
		if let Some(receiver) = receivers.get(&receiver_id) {
			let mut row = vec![receiver_id.into(), quantity, receiver.name.as_str().into()];
			if with_type {
				row.push(receiver.receiver_type.as_str().into());
			}
			row.push(receiver.city.as_str().into());
			row.push(receiver.contact.as_str().into());
			table.push_row(row);
		}
	}
	table
}

fn labelled<V>(ranked: Vec<(&str, V)>) -> Vec<(String, V)> {
	ranked
		.into_iter()
		.map(|(label, value)| (label.to_string(), value))
		.collect()
}
