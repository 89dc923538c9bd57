//! Curated directory of known organizations with static base ratings.
//!
//! Company-score requests may reference these by id or name; anything not
//! listed scores from the default base instead.

/// A known organization and its pre-existing readiness rating.
#[derive(Debug, Clone, Copy)]
pub struct KnownCompany {
    pub id: &'static str,
    pub name: &'static str,
    pub industry: &'static str,
    pub region: &'static str,
    pub base_score: u32,
}

pub const KNOWN_COMPANIES: &[KnownCompany] = &[
    KnownCompany {
        id: "aurora-mobility",
        name: "Aurora Mobility",
        industry: "Automotive",
        region: "North America",
        base_score: 84,
    },
    KnownCompany {
        id: "pulsepay",
        name: "PulsePay",
        industry: "Fintech",
        region: "Europe",
        base_score: 78,
    },
    KnownCompany {
        id: "nova-hydration",
        name: "NOVA Hydration",
        industry: "Beverage",
        region: "North America",
        base_score: 88,
    },
];

/// Look up by id first, then by case-insensitive name.
pub fn find_company(company_id: &str, name: &str) -> Option<&'static KnownCompany> {
    KNOWN_COMPANIES
        .iter()
        .find(|c| !company_id.is_empty() && c.id == company_id)
        .or_else(|| {
            KNOWN_COMPANIES
                .iter()
                .find(|c| !name.is_empty() && c.name.eq_ignore_ascii_case(name))
        })
}
