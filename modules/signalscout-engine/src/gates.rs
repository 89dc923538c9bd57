//! Pre-verification gates.
//!
//! Pure decisions that cut the candidate list down before the only
//! networked stage (knowledge-graph verification) pays for each survivor.

use signalscout_common::{SignalCategory, SignalMatch};

use crate::extractor::Candidate;

/// Result of evaluating one candidate against the gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Candidate proceeds to knowledge-graph verification.
    Pass,
    /// No leading indicator present. A sponsorship-only match is a lagging
    /// signal and does not count.
    NoPrioritySignal,
    /// Single-source, single-mention noise.
    BelowVolume,
}

/// At least one of {funding, geo, cmo} must be present.
pub fn passes_priority_gate(signals: &[SignalMatch]) -> bool {
    signals.iter().any(|s| {
        matches!(
            s.category,
            SignalCategory::Funding | SignalCategory::Geo | SignalCategory::Cmo
        )
    })
}

/// Two mentions anywhere, or one mention from each feed.
pub fn passes_volume_gate(candidate: &Candidate) -> bool {
    candidate.mention_count >= 2 || candidate.sources.multi_source()
}

/// Canonical gate order: priority signal first, volume second.
pub fn gate_candidate(candidate: &Candidate, signals: &[SignalMatch]) -> GateOutcome {
    if !passes_priority_gate(signals) {
        return GateOutcome::NoPrioritySignal;
    }
    if !passes_volume_gate(candidate) {
        return GateOutcome::BelowVolume;
    }
    GateOutcome::Pass
}
