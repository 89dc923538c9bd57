//! Signal rule tables and the disallowed-candidate filter.
//!
//! Each behavioral category is a declarative `{category, weight, patterns}`
//! entry; adding a detector is new data, not new code. Matching runs through
//! `detect_with`, which works over any compiled rule slice so tests can
//! supply their own tables.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use signalscout_common::{SignalCategory, SignalMatch};

/// Ceiling on the summed weights of present categories.
pub const SIGNAL_SCORE_CAP: u32 = 30;

/// Matched titles kept per category as evidence.
const MAX_MATCHED_TITLES: usize = 3;

/// One declarative rule family: any pattern matching any retained title
/// marks the category present for that candidate.
pub struct SignalRule {
    pub category: SignalCategory,
    pub weight: u32,
    pub patterns: &'static [&'static str],
}

pub const SIGNAL_RULES: &[SignalRule] = &[
    SignalRule {
        category: SignalCategory::Funding,
        weight: 14,
        patterns: &[
            r"\bseries\s+[a-e]\b",
            r"\bseed\b",
            r"\bpre-seed\b",
            r"\bfunding\b",
            r"\bfinancing\b",
            r"\braises?\b",
            r"\bround\b",
            r"\binvestment\b",
            r"\bbacked\b",
            r"\bventure\b",
            r"\bvaluation\b",
            r"\bIPO\b",
            r"\bcapital\b",
            r"\bstrategic investment\b",
            r"\bprivate equity\b",
            r"\b\$?\d+(?:\.\d+)?\s?(?:million|billion|m|bn)\b",
        ],
    },
    SignalRule {
        category: SignalCategory::Geo,
        weight: 10,
        patterns: &[
            r"\bexpands?\b",
            r"\bexpansion\b",
            r"\benters?\b",
            r"\blaunches?\s+in\b",
            r"\bopens?\s+(office|hq|hub|facility)\b",
            r"\bnew market\b",
            r"\binternational\b",
            r"\bglobal\b",
            r"\bAPAC\b",
            r"\bEMEA\b",
            r"\bLATAM\b",
            r"\bEurope\b",
            r"\bAsia\b",
            r"\bMiddle East\b",
            r"\bUS\b",
            r"\bUK\b",
            r"\bCanada\b",
            r"\bAustralia\b",
            r"\bIndia\b",
            r"\bJapan\b",
            r"\bChina\b",
            r"\bBrazil\b",
        ],
    },
    SignalRule {
        category: SignalCategory::Cmo,
        weight: 16,
        patterns: &[
            r"\bCMO\b",
            r"\bChief Marketing Officer\b",
            r"\bChief Brand Officer\b",
            r"\bChief Growth Officer\b",
            r"\bmarketing chief\b",
            r"\bmarketing officer\b",
            r"\bappoints?\s+CMO\b",
            r"\bhires?\s+CMO\b",
            r"\bnames?\s+CMO\b",
        ],
    },
    SignalRule {
        category: SignalCategory::Sponsorship,
        weight: 8,
        patterns: &[
            r"\bsponsor\b",
            r"\bsponsorship\b",
            r"\bofficial partner\b",
            r"\bnaming rights\b",
            r"\bbrand partner\b",
            r"\bjersey sponsor\b",
            r"\bshirt sponsor\b",
        ],
    },
];

/// A rule family with its patterns compiled (case-insensitive).
pub struct CompiledRule {
    pub category: SignalCategory,
    pub weight: u32,
    patterns: Vec<Regex>,
}

impl CompiledRule {
    pub fn new(category: SignalCategory, weight: u32, patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .expect("signal rule patterns are static and valid")
            })
            .collect();
        Self {
            category,
            weight,
            patterns,
        }
    }

    pub fn matches(&self, title: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(title))
    }
}

static COMPILED_RULES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    SIGNAL_RULES
        .iter()
        .map(|rule| CompiledRule::new(rule.category, rule.weight, rule.patterns))
        .collect()
});

/// Evaluate a rule table against a candidate's retained titles.
pub fn detect_with(rules: &[CompiledRule], titles: &[String]) -> Vec<SignalMatch> {
    let mut detected = Vec::new();

    for rule in rules {
        let mut matched_titles = Vec::new();
        for title in titles {
            if rule.matches(title) && matched_titles.len() < MAX_MATCHED_TITLES {
                matched_titles.push(title.clone());
            }
        }
        if !matched_titles.is_empty() {
            detected.push(SignalMatch {
                category: rule.category,
                weight: rule.weight,
                matched_titles,
            });
        }
    }

    detected
}

/// Evaluate the built-in rule table.
pub fn detect_signals(titles: &[String]) -> Vec<SignalMatch> {
    detect_with(&COMPILED_RULES, titles)
}

/// Sum of present-category weights, capped at [`SIGNAL_SCORE_CAP`].
/// The cap applies to the total, not per category.
pub fn signal_score(signals: &[SignalMatch]) -> u32 {
    signals
        .iter()
        .map(|s| s.weight)
        .sum::<u32>()
        .min(SIGNAL_SCORE_CAP)
}

// --- Disallowed candidates ---

static TEAM_LEAGUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(
        r"\b(FC|CF|SC|AFC|Club|United|City|Town|Rovers|Athletic|Athletics|Sporting|Rangers|Warriors|Giants|Lions|Tigers|Wolves|Jets|Stars|League|Cup|Series|Championship|Premier League|La Liga|Serie A|Bundesliga|MLS|NASCAR|NCAA|NFL|NBA|MLB|NHL|UEFA|FIFA|ATP|WTA|Formula 1|F1|UFC)\b",
    )
    .case_insensitive(true)
    .build()
    .expect("team/league pattern is valid")
});

static HEALTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(
        r"\b(Health|Healthcare|Hospital|Clinic|Medical|Pharma|Pharmaceutical|Biotech|Therapeutics|Diagnostics|Wellness|Care|Laboratory|Labs?)\b",
    )
    .case_insensitive(true)
    .build()
    .expect("healthcare pattern is valid")
});

/// Sports organizations/competitions and healthcare entities are never
/// sponsorship-outreach targets; drop them right after extraction.
pub fn is_disallowed_candidate(name: &str) -> bool {
    TEAM_LEAGUE_RE.is_match(name) || HEALTH_RE.is_match(name)
}
