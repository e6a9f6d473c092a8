//! Enactment: try an interaction against the world, part by part.

use crate::existence::Existence;
use enactive_core::{Environment, ExperimentId, Intent, InteractionId, InteractionKind};

impl<E: Environment> Existence<E> {
    /// Enact `intended` and return what actually happened.
    ///
    /// A composite enacts its pre part first; if that does not come out as
    /// `pre`, the mismatch is returned at once and the post part is never
    /// tried. Otherwise the result is the composite of what was enacted,
    /// which differs from `intended` when only the post part diverged.
    pub(crate) fn enact(&mut self, intended: InteractionId) -> InteractionId {
        match *self.memory.interaction(intended).kind() {
            InteractionKind::Primitive { experiment, .. } => {
                self.enact_primitive(intended, experiment)
            }
            InteractionKind::Composite { pre, post, .. } => {
                let enacted_pre = self.enact(pre);
                if enacted_pre != pre {
                    tracing::debug!(
                        "{} interrupted: {} instead of {}",
                        self.memory.label(intended),
                        self.memory.label(enacted_pre),
                        self.memory.label(pre)
                    );
                    return enacted_pre;
                }
                let enacted_post = self.enact(post);
                self.memory.composite_or_insert(enacted_pre, enacted_post)
            }
        }
    }

    fn enact_primitive(&mut self, intended: InteractionId, experiment: ExperimentId) -> InteractionId {
        let result = {
            let interaction = self.memory.interaction(intended);
            let intent = Intent {
                experiment: self.memory.experiment(experiment).label(),
                interaction: interaction.label(),
                meaning: interaction.meaning(),
            };
            self.environment.enact_primitive(&intent)
        };

        let outcome = match self.memory.lookup_outcome(&result) {
            Some(outcome) => outcome,
            None => {
                tracing::warn!("World reported unknown result {}", result);
                self.memory.outcome_or_insert(&result)
            }
        };
        match self.memory.lookup_primitive(experiment, outcome) {
            Some(enacted) => enacted,
            None => {
                let enacted = self.memory.primitive_or_insert(experiment, outcome, 0, None);
                tracing::warn!(
                    "Registered unexpected primitive {} with valence 0",
                    self.memory.label(enacted)
                );
                enacted
            }
        }
    }
}
