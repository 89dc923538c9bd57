//! Candidate extraction: scan merged article titles for name-like spans and
//! yield deduplicated, mention-counted organization-name candidates.
//!
//! Purely lexical. A span is a run of 1–4 consecutive capitalized tokens;
//! a validity predicate then drops stopwords, sports acronyms, and short
//! all-caps tokens before anything reaches the scoring stages.

use std::collections::HashMap;

use signalscout_common::{ArticleRecord, SourceCounts, SourceTag};

/// Evidence titles kept per candidate for display.
const MAX_EVIDENCE: usize = 3;

/// Titles kept per candidate for signal detection.
const MAX_RETAINED: usize = 12;

/// Candidates surviving an extraction pass, sorted by mention count.
const MAX_CANDIDATES: usize = 12;

/// Common words plus generic sponsorship/sports vocabulary that never name
/// an organization on their own. Lowercase; checked against whole names and
/// against every individual word.
const STOPWORDS: &[&str] = &[
    // Common headline words
    "the", "and", "but", "for", "with", "from", "this", "that", "these", "those", "after",
    "before", "over", "under", "into", "amid", "between", "against", "during", "while", "will",
    "says", "said", "here", "there", "what", "when", "where", "which", "who", "why", "how",
    "new", "news", "breaking", "exclusive", "live", "watch", "video", "report", "reports",
    "update", "updates", "opinion", "analysis", "review", "today", "tomorrow", "yesterday",
    "week", "month", "year", "first", "last", "next", "more", "most", "best", "biggest", "top",
    "inside", "meet", "your", "their", "its", "his", "her", "our",
    // Generic sponsorship vocabulary
    "sponsor", "sponsors", "sponsorship", "sponsorships", "partnership", "partnerships",
    "deal", "deals", "agreement", "official", "announces", "announced", "announcement",
    "signs", "signed", "signing", "extends", "extended", "renews", "renewal", "naming",
    "rights", "brand", "brands", "marketing", "campaign", "title",
    // Generic sports vocabulary
    "league", "cup", "club", "team", "teams", "season", "match", "matches", "game", "games",
    "player", "players", "fans", "stadium", "arena", "jersey", "shirt", "kit", "series",
    "championship", "tournament", "football", "soccer", "basketball", "baseball", "cricket",
    "rugby", "hockey", "tennis", "golf", "racing", "esports", "sports", "sport",
];

/// Major-league and governing-body acronyms. Checked case-insensitively
/// against the whole normalized name.
const SPORTS_ACRONYMS: &[&str] = &[
    "NFL", "NBA", "MLB", "NHL", "MLS", "NCAA", "NASCAR", "UEFA", "FIFA", "ATP", "WTA", "UFC",
    "WWE", "EPL", "IPL", "WNBA", "PGA", "LPGA", "ICC", "IOC", "F1", "MOTOGP", "WRC",
];

/// Punctuation trimmed from token edges before the capitalization check.
/// Embedded `&`, `.`, `'`, `-` stay; sentence punctuation goes.
const EDGE_PUNCTUATION: &[char] = &[
    '"', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\'', '(', ')', ',', ':', ';', '!',
    '?', '[', ']', '\u{2026}',
];

/// A normalized organization-name candidate with its mention bookkeeping.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub name: String,
    pub mention_count: u32,
    pub sources: SourceCounts,
    /// Titles shown as evidence, capped at [`MAX_EVIDENCE`].
    pub evidence: Vec<String>,
    /// Titles fed to signal detection, capped at [`MAX_RETAINED`].
    pub retained_titles: Vec<String>,
}

impl Candidate {
    fn new(name: String) -> Self {
        Self {
            name,
            mention_count: 0,
            sources: SourceCounts::default(),
            evidence: Vec::new(),
            retained_titles: Vec::new(),
        }
    }

    fn record_mention(&mut self, title: &str, source: SourceTag) {
        self.mention_count += 1;
        match source {
            SourceTag::Gdelt => self.sources.gdelt += 1,
            SourceTag::Newsdata => self.sources.newsdata += 1,
        }
        if self.evidence.len() < MAX_EVIDENCE {
            self.evidence.push(title.to_string());
        }
        if self.retained_titles.len() < MAX_RETAINED {
            self.retained_titles.push(title.to_string());
        }
    }
}

/// Trim surrounding quote marks and collapse internal whitespace.
/// Idempotent: normalizing an already-normalized name is a no-op.
pub fn normalize_candidate(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches(|c| {
        matches!(c, '"' | '\'' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}')
    });
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The full validity predicate. Every clause must hold.
pub fn is_valid_candidate(name: &str) -> bool {
    let char_count = name.chars().count();
    if char_count < 3 {
        return false;
    }

    let lower = name.to_lowercase();
    if STOPWORDS.contains(&lower.as_str()) {
        return false;
    }

    let upper = name.to_uppercase();
    if SPORTS_ACRONYMS.contains(&upper.as_str()) {
        return false;
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() > 4 {
        return false;
    }

    if words.len() == 1 {
        if char_count < 4 || is_short_all_caps(name) {
            return false;
        }
    }

    words
        .iter()
        .all(|word| !STOPWORDS.contains(&word.to_lowercase().as_str()))
}

/// 2–4 character token written entirely in capitals/digits ("F1", "NBA").
fn is_short_all_caps(token: &str) -> bool {
    let count = token.chars().count();
    (2..=4).contains(&count)
        && token
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// True for tokens that can participate in a candidate span: first char
/// uppercase, remainder letters/digits or embedded `&`, `.`, `'`, `-`.
fn is_capitalized_token(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_uppercase() {
        return false;
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '&' | '.' | '\'' | '-'))
}

/// Maximal runs of consecutive capitalized tokens in one title.
fn candidate_spans(title: &str) -> Vec<String> {
    let mut spans = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    for raw in title.split_whitespace() {
        let token = raw.trim_matches(EDGE_PUNCTUATION);
        if !token.is_empty() && is_capitalized_token(token) {
            run.push(token);
        } else if !run.is_empty() {
            spans.push(run.join(" "));
            run.clear();
        }
    }
    if !run.is_empty() {
        spans.push(run.join(" "));
    }

    spans
}

/// Scan merged titles and return mention-counted candidates, sorted by
/// mention count descending and truncated to the top 12. Ties preserve
/// first-seen order (the sort is stable).
pub fn extract_candidates(articles: &[ArticleRecord]) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for article in articles {
        for span in candidate_spans(&article.title) {
            let name = normalize_candidate(&span);
            if !is_valid_candidate(&name) {
                continue;
            }
            let slot = *index.entry(name.clone()).or_insert_with(|| {
                candidates.push(Candidate::new(name));
                candidates.len() - 1
            });
            candidates[slot].record_mention(&article.title, article.source);
        }
    }

    candidates.sort_by(|a, b| b.mention_count.cmp(&a.mention_count));
    candidates.truncate(MAX_CANDIDATES);
    candidates
}
