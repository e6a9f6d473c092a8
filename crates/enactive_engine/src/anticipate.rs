//! Anticipation: what the context suggests doing next.

use crate::existence::Existence;
use enactive_core::{
    Anticipations, Candidate, ContextDepth, Environment, InteractionId, Proclivity, Proposal,
};

/// A composite whose pre part matches the context, with the evidence it
/// lends to its post part.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Activation {
    pub post: InteractionId,
    pub proclivity: Proclivity,
}

impl<E: Environment> Existence<E> {
    /// Build this step's scored, deduplicated and shuffled proposals.
    pub(crate) fn anticipate(&mut self) -> Anticipations {
        let mut anticipations = self.default_anticipations();

        let activations = self.activations();
        for activation in &activations {
            let candidate = self.candidate_for(activation.post);
            anticipations.afford(candidate, activation.proclivity);
        }

        if self.config.use_alternatives {
            self.fold_alternatives(&mut anticipations, &activations);
        }

        anticipations.shuffle(&mut self.rng);
        for anticipation in &anticipations {
            tracing::debug!(
                "Anticipation {} proclivity {}",
                self.candidate_label(anticipation.candidate),
                anticipation.proclivity
            );
        }
        anticipations
    }

    /// Proclivity-0 entries for every primitive interaction or every
    /// primitive experiment, depending on what is being proposed.
    fn default_anticipations(&self) -> Anticipations {
        let mut anticipations = Anticipations::new();
        match self.config.proposal {
            Proposal::Interaction => {
                for primitive in self.memory.primitives() {
                    anticipations.propose(Candidate::Interaction(primitive.id()), 0);
                }
            }
            Proposal::Experiment => {
                for experiment in self.memory.primitive_experiments() {
                    anticipations.propose(Candidate::Experiment(experiment.id()), 0);
                }
            }
        }
        anticipations
    }

    /// Interactions whose appearance as a pre part activates a composite:
    /// the last enacted interaction, and at depth 2 also its post part and
    /// the last learned pair.
    pub(crate) fn context_interactions(&self) -> Vec<InteractionId> {
        let mut contexts = Vec::with_capacity(3);
        let Some(context) = self.context_interaction else {
            return contexts;
        };
        contexts.push(context);

        if self.config.context_depth == ContextDepth::Two {
            if let Some(post) = self.memory.interaction(context).post() {
                contexts.push(post);
            }
            if let Some(pair) = self.context_pair_interaction {
                contexts.push(pair);
            }
        }
        contexts.dedup();
        contexts
    }

    pub(crate) fn activations(&self) -> Vec<Activation> {
        let contexts = self.context_interactions();
        if contexts.is_empty() {
            return Vec::new();
        }

        let mut activations = Vec::new();
        for composite in self.memory.composites() {
            let Some((pre, post)) = composite.parts() else {
                continue;
            };
            if !contexts.contains(&pre) {
                continue;
            }
            let proclivity =
                Proclivity::from(composite.weight()) * Proclivity::from(self.memory.valence(post));
            tracing::trace!("Activated {}", composite);
            activations.push(Activation {
                post,
                proclivity,
            });
        }
        activations
    }

    /// What proposing `interaction` means under the configured proposal
    /// mode: the interaction itself, or the experiment that intends it.
    pub(crate) fn candidate_for(&self, interaction: InteractionId) -> Candidate {
        match self.config.proposal {
            Proposal::Interaction => Candidate::Interaction(interaction),
            Proposal::Experiment => match self.memory.interaction(interaction).experiment() {
                Some(experiment) => Candidate::Experiment(experiment),
                None => Candidate::Interaction(interaction),
            },
        }
    }

    /// Add to each candidate the evidence activated composites lend to the
    /// interactions that were enacted in its place before.
    fn fold_alternatives(&self, anticipations: &mut Anticipations, activations: &[Activation]) {
        let mut bonuses = Vec::new();
        for anticipation in anticipations.iter() {
            let alternatives: &[InteractionId] = match anticipation.candidate {
                Candidate::Interaction(id) => self.memory.interaction(id).alternatives(),
                Candidate::Experiment(id) => self.memory.experiment(id).enacted(),
            };
            let bonus: Proclivity = activations
                .iter()
                .filter(|a| alternatives.contains(&a.post))
                .fold(0, |sum, a| sum.saturating_add(a.proclivity));
            if bonus != 0 {
                bonuses.push((anticipation.candidate, bonus));
            }
        }
        for (candidate, bonus) in bonuses {
            tracing::trace!("Alternatives add {} to {}", bonus, self.candidate_label(candidate));
            anticipations.reinforce(candidate, bonus);
        }
    }

    pub(crate) fn candidate_label(&self, candidate: Candidate) -> &str {
        match candidate {
            Candidate::Interaction(id) => self.memory.label(id),
            Candidate::Experiment(id) => self.memory.experiment(id).label(),
        }
    }
}
