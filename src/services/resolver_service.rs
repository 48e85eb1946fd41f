use crate::datasets::{Claim, ClaimDataset, FoodListingDataset};

/// A claim together with the quantity of the listing it points at.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedClaim {
	pub claim: Claim,
	/// Missing when the listing is absent or its quantity is not numeric.
	pub quantity: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedClaims {
	rows: Vec<ResolvedClaim>,
	lookup_misses: usize,
}

impl ResolvedClaims {
	pub fn rows(&self) -> &[ResolvedClaim] {
		&self.rows
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Claims whose Food_ID matched no listing.
	pub fn lookup_misses(&self) -> usize {
		self.lookup_misses
	}

	pub fn completed(&self) -> impl Iterator<Item = &ResolvedClaim> {
		self.rows.iter().filter(|r| r.claim.is_completed())
	}

	pub fn quantities(&self) -> Vec<Option<f64>> {
		self.rows.iter().map(|r| r.quantity).collect()
	}
}

/// Left lookup of each claim's Food_ID in the listings.
///
/// Neither input is modified. An unmatched Food_ID is not an error: the
/// claim keeps a missing quantity and is skipped by sums and means.
pub fn resolve_claim_quantities(
	claims: &ClaimDataset,
	listings: &FoodListingDataset,
) -> ResolvedClaims {
	let index = listings.index_by_id();
	let mut lookup_misses = 0;

	let rows = claims
		.rows()
		.iter()
		.map(|claim| {
			let quantity = match index.get(&claim.food_id) {
				Some(listing) => listing.quantity,
				None => {
					lookup_misses += 1;
					tracing::debug!(
						"Claim {} references unknown Food_ID {}",
						claim.claim_id,
						claim.food_id
					);
					None
				}
			};

			ResolvedClaim {
				claim: claim.clone(),
				quantity,
			}
		})
		.collect();

	if lookup_misses > 0 {
		tracing::debug!("{} claims left without a quantity after lookup", lookup_misses);
	}

	ResolvedClaims {
		rows,
		lookup_misses,
	}
}
