//! Tier classification: assign each sponsorship to exactly one tier

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::config::Tier;
use crate::model::Sponsorship;

/// Sponsorships grouped by tier, indexed in tier declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    buckets: Vec<Vec<Sponsorship>>,
    /// Sponsorships below every threshold
    pub excluded: Vec<Sponsorship>,
}

impl Partition {
    /// Sponsors of the tier declared at `index`; empty for unknown indices
    pub fn tier(&self, index: usize) -> &[Sponsorship] {
        self.buckets.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of tiers the partition was built for
    pub fn tier_count(&self) -> usize {
        self.buckets.len()
    }

    /// `(tier index, sponsors)` in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Sponsorship])> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(i, b)| (i, b.as_slice()))
    }

    /// All classified sponsorships, in declaration order
    pub fn classified(&self) -> impl Iterator<Item = &Sponsorship> {
        self.buckets.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

/// `created_at` as an instant, if it is valid RFC 3339
fn created_instant(sponsorship: &Sponsorship) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&sponsorship.created_at)
        .ok()
        .map(|stamp| stamp.with_timezone(&Utc))
}

/// Order used inside a tier: oldest first, then login
///
/// Timestamps compare as instants, so differing offsets and fractional
/// seconds order correctly. Unparseable stamps sort after all valid ones and
/// among themselves by their text.
fn sponsor_order(a: &Sponsorship, b: &Sponsorship) -> Ordering {
    let (ta, tb) = (created_instant(a), created_instant(b));
    ta.is_none()
        .cmp(&tb.is_none())
        .then_with(|| ta.cmp(&tb))
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.sponsor.login.cmp(&b.sponsor.login))
        .then_with(|| b.monthly_dollars.total_cmp(&a.monthly_dollars))
}

/// Partition `sponsorships` into `tiers`
///
/// Each sponsorship lands in the tier with the highest threshold that does not
/// exceed its monthly amount. Equal thresholds resolve to the tier declared
/// first. Amounts below every threshold are collected in
/// [`Partition::excluded`]. Within a tier, sponsors are ordered by
/// `created_at` and then `login`, so the result does not depend on input order.
pub fn classify(sponsorships: &[Sponsorship], tiers: &[Tier]) -> Partition {
    let mut by_threshold: Vec<usize> = (0..tiers.len()).collect();
    // Stable: equal thresholds keep declaration order
    by_threshold.sort_by(|&a, &b| tiers[b].threshold.total_cmp(&tiers[a].threshold));

    let mut partition = Partition {
        buckets: vec![Vec::new(); tiers.len()],
        excluded: Vec::new(),
    };

    for sponsorship in sponsorships {
        let tier = by_threshold
            .iter()
            .copied()
            .find(|&i| tiers[i].threshold <= sponsorship.monthly_dollars);
        match tier {
            Some(i) => partition.buckets[i].push(sponsorship.clone()),
            None => partition.excluded.push(sponsorship.clone()),
        }
    }

    for bucket in &mut partition.buckets {
        bucket.sort_by(sponsor_order);
    }
    partition.excluded.sort_by(sponsor_order);

    tracing::debug!(
        tiers = tiers.len(),
        classified = sponsorships.len() - partition.excluded.len(),
        excluded = partition.excluded.len(),
        "classified sponsorships"
    );

    partition
}
