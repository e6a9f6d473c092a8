//! Interactions: the sensorimotor patterns the agent records and replays.
//!
//! A primitive interaction couples one experiment with one outcome and carries
//! a fixed valence. A composite interaction chains two interactions (pre, then
//! post) and is itself an interaction, so arbitrarily long sequences are built
//! as composites of composites.
//!
//! Parts and alternatives are held as [`InteractionId`] handles into the
//! owning memory, never as owned values: a composite shares its parts with
//! every other composite that reuses them.

use crate::experiment::{ExperimentId, OutcomeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed hedonic value of an interaction.
pub type Valence = i32;

/// Handle of an interaction inside its memory arena.
///
/// Equality of handles is identity of interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InteractionId(usize);

impl InteractionId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural shape of an interaction.
///
/// The primitive/composite split is carried by the variant itself, so an
/// interaction can never have a pre part without a post part or be both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionKind {
    Primitive {
        experiment: ExperimentId,
        outcome: OutcomeId,
        valence: Valence,
    },
    Composite {
        pre: InteractionId,
        post: InteractionId,
        /// Frozen at creation as the saturating sum `valence(pre) + valence(post)`.
        /// Primitive valences never change, so this always equals the
        /// recursive sum.
        valence: Valence,
    },
}

/// A recorded interaction with its reinforcement bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    id: InteractionId,
    label: String,
    kind: InteractionKind,
    weight: u32,
    meaning: Option<String>,
    /// Interactions enacted instead of this one when it was intended.
    alternatives: Vec<InteractionId>,
    /// For composites: the abstract experiment whose intention is this
    /// composite. Primitives answer with their own experiment instead.
    abstract_experiment: Option<ExperimentId>,
}

impl Interaction {
    pub fn primitive(
        id: InteractionId,
        label: impl Into<String>,
        experiment: ExperimentId,
        outcome: OutcomeId,
        valence: Valence,
        meaning: Option<String>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            kind: InteractionKind::Primitive {
                experiment,
                outcome,
                valence,
            },
            weight: 0,
            meaning,
            alternatives: Vec::new(),
            abstract_experiment: None,
        }
    }

    pub fn composite(
        id: InteractionId,
        label: impl Into<String>,
        pre: InteractionId,
        post: InteractionId,
        valence: Valence,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            kind: InteractionKind::Composite { pre, post, valence },
            weight: 0,
            meaning: None,
            alternatives: Vec::new(),
            abstract_experiment: None,
        }
    }

    pub fn id(&self) -> InteractionId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &InteractionKind {
        &self.kind
    }

    pub fn meaning(&self) -> Option<&str> {
        self.meaning.as_deref()
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, InteractionKind::Primitive { .. })
    }

    pub fn valence(&self) -> Valence {
        match self.kind {
            InteractionKind::Primitive { valence, .. } | InteractionKind::Composite { valence, .. } => {
                valence
            }
        }
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// `(pre, post)` for composites, `None` for primitives.
    pub fn parts(&self) -> Option<(InteractionId, InteractionId)> {
        match self.kind {
            InteractionKind::Composite { pre, post, .. } => Some((pre, post)),
            InteractionKind::Primitive { .. } => None,
        }
    }

    pub fn pre(&self) -> Option<InteractionId> {
        self.parts().map(|(pre, _)| pre)
    }

    pub fn post(&self) -> Option<InteractionId> {
        self.parts().map(|(_, post)| post)
    }

    /// The experiment the agent chooses in order to intend this interaction:
    /// the primitive's own experiment, or the abstract experiment wrapping a
    /// composite.
    pub fn experiment(&self) -> Option<ExperimentId> {
        match self.kind {
            InteractionKind::Primitive { experiment, .. } => Some(experiment),
            InteractionKind::Composite { .. } => self.abstract_experiment,
        }
    }

    pub fn outcome(&self) -> Option<OutcomeId> {
        match self.kind {
            InteractionKind::Primitive { outcome, .. } => Some(outcome),
            InteractionKind::Composite { .. } => None,
        }
    }

    pub fn alternatives(&self) -> &[InteractionId] {
        &self.alternatives
    }

    /// Increment the reinforcement count and return the new weight.
    pub fn reinforce(&mut self) -> u32 {
        self.weight = self.weight.saturating_add(1);
        self.weight
    }

    /// Record an interaction that was enacted in place of this one.
    /// Returns `false` if it was already known.
    pub fn add_alternative(&mut self, alternative: InteractionId) -> bool {
        if alternative == self.id || self.alternatives.contains(&alternative) {
            return false;
        }
        self.alternatives.push(alternative);
        true
    }

    /// Bind the abstract experiment that lets the agent choose this
    /// composite as an action. Ignored for primitives.
    pub fn attach_abstract_experiment(&mut self, experiment: ExperimentId) {
        if !self.is_primitive() {
            self.abstract_experiment = Some(experiment);
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, valence {}, weight {}",
            self.label,
            self.valence(),
            self.weight
        )
    }
}

/// Label of the primitive coupling `experiment` with `outcome`.
pub fn primitive_label(experiment: &str, outcome: &str) -> String {
    format!("{experiment}{outcome}")
}

/// Label of the composite `pre` then `post`.
pub fn composite_label(pre: &str, post: &str) -> String {
    format!("<{pre}{post}>")
}

/// Label of the abstract experiment that intends the composite `label`.
pub fn abstract_experiment_label(composite: &str) -> String {
    composite.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim(index: usize, valence: Valence) -> Interaction {
        Interaction::primitive(
            InteractionId::new(index),
            format!("e{index}r1"),
            ExperimentId::new(0),
            OutcomeId::new(0),
            valence,
            None,
        )
    }

    #[test]
    fn test_id_keeps_full_index() {
        let index = usize::MAX - 1;
        assert_eq!(InteractionId::new(index).index(), index);
    }

    #[test]
    fn test_primitive_has_no_parts() {
        let p = prim(0, 3);
        assert!(p.is_primitive());
        assert_eq!(p.parts(), None);
        assert_eq!(p.valence(), 3);
        assert_eq!(p.weight(), 0);
        assert_eq!(p.experiment(), Some(ExperimentId::new(0)));
    }

    #[test]
    fn test_composite_parts_and_experiment() {
        let mut c = Interaction::composite(
            InteractionId::new(2),
            "<e0r1e1r1>",
            InteractionId::new(0),
            InteractionId::new(1),
            -2,
        );
        assert!(!c.is_primitive());
        assert_eq!(c.pre(), Some(InteractionId::new(0)));
        assert_eq!(c.post(), Some(InteractionId::new(1)));
        assert_eq!(c.experiment(), None);
        assert_eq!(c.outcome(), None);

        c.attach_abstract_experiment(ExperimentId::new(7));
        assert_eq!(c.experiment(), Some(ExperimentId::new(7)));
    }

    #[test]
    fn test_primitive_ignores_abstract_experiment() {
        let mut p = prim(0, 1);
        p.attach_abstract_experiment(ExperimentId::new(9));
        assert_eq!(p.experiment(), Some(ExperimentId::new(0)));
    }

    #[test]
    fn test_reinforce_is_monotonic() {
        let mut p = prim(0, 1);
        for expected in 1..=5 {
            assert_eq!(p.reinforce(), expected);
        }
        assert_eq!(p.weight(), 5);
    }

    #[test]
    fn test_alternatives_are_deduplicated() {
        let mut p = prim(0, 1);
        assert!(p.add_alternative(InteractionId::new(1)));
        assert!(!p.add_alternative(InteractionId::new(1)));
        assert!(!p.add_alternative(InteractionId::new(0)), "self is never an alternative");
        assert!(p.add_alternative(InteractionId::new(2)));
        assert_eq!(p.alternatives(), &[InteractionId::new(1), InteractionId::new(2)]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(primitive_label("e1", "r2"), "e1r2");
        assert_eq!(composite_label("e1r2", "e2r1"), "<e1r2e2r1>");
        assert_eq!(abstract_experiment_label("<e1r2e2r1>"), "<E1R2E2R1>");
    }

    #[test]
    fn test_display() {
        let p = prim(1, -1);
        assert_eq!(p.to_string(), "e1r1, valence -1, weight 0");
    }
}
