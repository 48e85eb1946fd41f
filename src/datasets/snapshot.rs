use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::datasets::{ClaimDataset, FoodListingDataset, ProviderDataset, ReceiverDataset};
use crate::services::resolver_service::{ResolvedClaims, resolve_claim_quantities};

/// The four loaded tables plus the claim view with derived quantities.
///
/// Immutable once built. Readers hold it through an `Arc` and a reload
/// replaces the whole value instead of touching it.
#[derive(Debug)]
pub struct Snapshot {
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
    pub providers: ProviderDataset,
    pub receivers: ReceiverDataset,
    pub listings: FoodListingDataset,
    pub claims: ClaimDataset,
    pub resolved_claims: ResolvedClaims,
}

impl Snapshot {
    pub fn new(
        fingerprint: String,
        providers: ProviderDataset,
        receivers: ReceiverDataset,
        listings: FoodListingDataset,
        claims: ClaimDataset,
    ) -> Self {
        let resolved_claims = resolve_claim_quantities(&claims, &listings);

        Self {
            fingerprint,
            loaded_at: Utc::now(),
            providers,
            receivers,
            listings,
            claims,
            resolved_claims,
        }
    }

    /// Values offered by the city selector.
    pub fn cities(&self) -> Vec<String> {
        self.providers.cities()
    }

    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            fingerprint: self.fingerprint.clone(),
            loaded_at: self.loaded_at,
            providers: self.providers.len(),
            receivers: self.receivers.len(),
            listings: self.listings.len(),
            claims: self.claims.len(),
            lookup_misses: self.resolved_claims.lookup_misses(),
        }
    }
}

/// Row counts and identity of a snapshot, as reported by `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSummary {
    pub fingerprint: String,
    pub loaded_at: DateTime<Utc>,
    pub providers: usize,
    pub receivers: usize,
    pub listings: usize,
    pub claims: usize,
    pub lookup_misses: usize,
}
