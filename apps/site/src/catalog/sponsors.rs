use serde::Serialize;

use crate::models::{Sponsor, SponsorTier};

/// Sponsors sharing one tier, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct TierGroup<'a> {
    pub tier: &'static str,
    pub sponsors: Vec<&'a Sponsor>,
}

/// Groups sponsors Platinum, Gold, Silver, then anything unrecognized under
/// "Other". Order within a group follows the input. Empty groups are omitted.
pub fn group_by_tier<'a>(sponsors: &[&'a Sponsor]) -> Vec<TierGroup<'a>> {
    let mut groups: Vec<TierGroup<'a>> = SponsorTier::ALL
        .iter()
        .map(|tier| TierGroup {
            tier: tier.as_str(),
            sponsors: Vec::new(),
        })
        .collect();
    let mut other = TierGroup {
        tier: "Other",
        sponsors: Vec::new(),
    };

    for &sponsor in sponsors {
        match sponsor.parsed_tier() {
            Some(tier) => groups[tier.rank() as usize].sponsors.push(sponsor),
            None => other.sponsors.push(sponsor),
        }
    }

    groups.push(other);
    groups.retain(|g| !g.sponsors.is_empty());
    groups
}
