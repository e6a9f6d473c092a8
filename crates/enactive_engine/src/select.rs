//! Selection: turn ranked anticipations into one intention.

use crate::existence::Existence;
use enactive_core::{
    Anticipations, Candidate, Environment, ExperimentId, InteractionId, Mood, MoodStrategy,
    NegativePolicy, Proclivity, SelectionKey,
};
use rand::seq::SliceRandom;
use std::cmp::Reverse;

/// What the agent commits to enacting this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intention {
    /// The interaction the agent expects to enact.
    pub interaction: InteractionId,
    /// The experiment chosen to get there, when experiments were proposed.
    pub experiment: Option<ExperimentId>,
}

impl<E: Environment> Existence<E> {
    pub(crate) fn select(&mut self, anticipations: &Anticipations) -> Intention {
        // Ranking by valence only looks at what the context affords; the
        // seeded defaults are what is left when it affords nothing.
        let afforded_only =
            self.config.selection_key == SelectionKey::Valence && anticipations.has_afforded();
        let mut ranked: Vec<(Intention, Proclivity)> = anticipations
            .iter()
            .filter(|a| a.afforded || !afforded_only)
            .filter_map(|a| self.resolve(a.candidate).map(|i| (i, a.proclivity)))
            .collect();

        // Stable: ties keep the shuffled anticipation order.
        match self.config.selection_key {
            SelectionKey::Proclivity => ranked.sort_by_key(|(_, proclivity)| Reverse(*proclivity)),
            SelectionKey::Valence => ranked.sort_by_key(|(intention, proclivity)| {
                (Reverse(self.memory.valence(intention.interaction)), Reverse(*proclivity))
            }),
        }

        if self.config.mood_strategy == MoodStrategy::SwitchWhenSad {
            self.switch_when_sad(&mut ranked);
        }

        let Some(&(chosen, proclivity)) = ranked.first() else {
            let fallback = self.random_primitive();
            tracing::warn!(
                "No anticipation to select from, falling back to {}",
                self.memory.label(fallback)
            );
            return Intention {
                interaction: fallback,
                experiment: None,
            };
        };
        tracing::debug!(
            "Selected {} (proclivity {})",
            self.memory.label(chosen.interaction),
            proclivity
        );

        if self.config.negative_policy == NegativePolicy::Avoid
            && self.memory.valence(chosen.interaction) < 0
        {
            return self.avoid(chosen);
        }
        chosen
    }

    /// The intention behind proposing `candidate`. Experiments resolve to
    /// the interaction they intend.
    fn resolve(&self, candidate: Candidate) -> Option<Intention> {
        match candidate {
            Candidate::Interaction(interaction) => Some(Intention {
                interaction,
                experiment: None,
            }),
            Candidate::Experiment(experiment) => {
                let interaction = self.memory.intended_interaction(experiment)?;
                Some(Intention {
                    interaction,
                    experiment: Some(experiment),
                })
            }
        }
    }

    /// After a sad step, drop candidates that would start by repeating the
    /// experiment that ended the last one, unless nothing else is left.
    fn switch_when_sad(&self, ranked: &mut Vec<(Intention, Proclivity)>) {
        if self.mood != Some(Mood::Sad) {
            return;
        }
        let Some(context) = self.context_interaction else {
            return;
        };
        let last = self.memory.trailing_experiment(context);
        let any_other = ranked
            .iter()
            .any(|(i, _)| self.memory.leading_experiment(i.interaction) != last);
        if any_other {
            ranked.retain(|(i, _)| self.memory.leading_experiment(i.interaction) != last);
            tracing::debug!("Sad: switching away from {}", self.memory.experiment(last).label());
        }
    }

    /// Replace a negative intention with a random primitive that starts with
    /// a different experiment, if there is one.
    fn avoid(&mut self, chosen: Intention) -> Intention {
        let refused = self.memory.leading_experiment(chosen.interaction);
        let others: Vec<InteractionId> = self
            .memory
            .primitives()
            .filter(|p| p.experiment() != Some(refused))
            .map(|p| p.id())
            .collect();
        match others.choose(&mut self.rng) {
            Some(&interaction) => {
                tracing::debug!(
                    "Avoiding {}, trying {} instead",
                    self.memory.label(chosen.interaction),
                    self.memory.label(interaction)
                );
                Intention {
                    interaction,
                    experiment: None,
                }
            }
            None => chosen,
        }
    }

    /// A uniformly random known primitive.
    pub(crate) fn random_primitive(&mut self) -> InteractionId {
        let primitives: Vec<InteractionId> = self.memory.primitives().map(|p| p.id()).collect();
        // Interaction 0 is always a primitive: composites need two parts.
        primitives
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_else(|| InteractionId::new(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enactive_core::{EngineConfig, Intent, PrimitiveSpec};

    struct Silent;

    impl Environment for Silent {
        fn enact_primitive(&mut self, _intent: &Intent<'_>) -> String {
            "r1".to_string()
        }
    }

    fn build(config: EngineConfig) -> Existence<Silent> {
        Existence::new(&PrimitiveSpec::default_table(), Silent, config.with_seed(11)).unwrap()
    }

    fn id(agent: &Existence<Silent>, label: &str) -> InteractionId {
        agent.memory.lookup(label).unwrap()
    }

    #[test]
    fn test_highest_proclivity_wins() {
        let mut agent = build(EngineConfig::constructive());
        let a = id(&agent, "e1r1");
        let c = id(&agent, "e2r1");
        let mut list = Anticipations::new();
        list.propose(Candidate::Interaction(a), -4);
        list.propose(Candidate::Interaction(c), 2);

        assert_eq!(agent.select(&list).interaction, c);
    }

    #[test]
    fn test_valence_key_ignores_proclivity() {
        let mut config = EngineConfig::simple();
        config.negative_policy = NegativePolicy::Accept;
        let mut agent = build(config);
        let a = id(&agent, "e1r1");
        let b = id(&agent, "e1r2");
        let mut list = Anticipations::new();
        list.propose(Candidate::Interaction(a), 100);
        list.propose(Candidate::Interaction(b), -100);

        assert_eq!(agent.select(&list).interaction, b);
    }

    #[test]
    fn test_valence_key_ranks_afforded_candidates_only() {
        let mut agent = build(EngineConfig::simple());
        let b = id(&agent, "e1r2");
        let c = id(&agent, "e2r1");
        let d = id(&agent, "e2r2");
        let mut list = Anticipations::new();
        list.propose(Candidate::Interaction(d), 0);
        list.afford(Candidate::Interaction(b), 2);

        assert_eq!(agent.select(&list).interaction, b);

        // A negative affordance outranks unafforded defaults and triggers avoidance.
        let mut list = Anticipations::new();
        list.propose(Candidate::Interaction(b), 0);
        list.afford(Candidate::Interaction(c), -3);
        let e1 = agent.memory.lookup_experiment("e1");
        for _ in 0..10 {
            let intention = agent.select(&list);
            assert_eq!(agent.memory.interaction(intention.interaction).experiment(), e1);
        }
    }

    #[test]
    fn test_valence_ties_break_by_proclivity() {
        let mut agent = build(EngineConfig::simple());
        let b = id(&agent, "e1r2");
        let d = id(&agent, "e2r2");
        for (first, second) in [(b, d), (d, b)] {
            let mut list = Anticipations::new();
            list.afford(Candidate::Interaction(first), 1);
            list.afford(Candidate::Interaction(second), 7);
            assert_eq!(agent.select(&list).interaction, second);
        }
    }

    #[test]
    fn test_valence_key_follows_learned_sequence() {
        let mut agent = build(EngineConfig::simple());
        let b = id(&agent, "e1r2");
        let d = id(&agent, "e2r2");
        for _ in 0..50 {
            agent.memory.reinforce(b, b);
        }
        agent.context_interaction = Some(b);

        for _ in 0..200 {
            let list = agent.anticipate();
            let intention = agent.select(&list);
            assert_eq!(intention.interaction, b);
            assert_ne!(intention.interaction, d);
        }
    }

    #[test]
    fn test_experiment_resolves_to_intended_interaction() {
        let mut agent = build(EngineConfig::recursive());
        let e2 = agent.memory.lookup_experiment("e2").unwrap();
        let mut list = Anticipations::new();
        list.propose(Candidate::Experiment(e2), 1);

        let intention = agent.select(&list);
        assert_eq!(intention.interaction, id(&agent, "e2r2"));
        assert_eq!(intention.experiment, Some(e2));
    }

    #[test]
    fn test_empty_list_falls_back_to_a_primitive() {
        let mut agent = build(EngineConfig::recursive());
        let intention = agent.select(&Anticipations::new());
        assert!(agent.memory.interaction(intention.interaction).is_primitive());
        assert_eq!(intention.experiment, None);
    }

    #[test]
    fn test_avoid_policy_switches_experiment() {
        let mut agent = build(EngineConfig::simple());
        let a = id(&agent, "e1r1");
        let mut list = Anticipations::new();
        list.propose(Candidate::Interaction(a), 0);

        let e2 = agent.memory.lookup_experiment("e2");
        for _ in 0..10 {
            let intention = agent.select(&list);
            assert_eq!(agent.memory.interaction(intention.interaction).experiment(), e2);
        }
    }

    #[test]
    fn test_accept_policy_keeps_negative_choice() {
        let mut agent = build(EngineConfig::recursive());
        let a = id(&agent, "e1r1");
        let mut list = Anticipations::new();
        list.propose(Candidate::Interaction(a), 0);
        assert_eq!(agent.select(&list).interaction, a);
    }

    #[test]
    fn test_switch_when_sad_skips_last_experiment() {
        let mut config = EngineConfig::constructive();
        config.mood_strategy = MoodStrategy::SwitchWhenSad;
        let mut agent = build(config);
        let a = id(&agent, "e1r1");
        let b = id(&agent, "e1r2");
        let d = id(&agent, "e2r2");
        let mut list = Anticipations::new();
        list.propose(Candidate::Interaction(b), 5);
        list.propose(Candidate::Interaction(d), 1);

        agent.context_interaction = Some(a);
        agent.mood = Some(Mood::Happy);
        assert_eq!(agent.select(&list).interaction, b);

        agent.mood = Some(Mood::Sad);
        assert_eq!(agent.select(&list).interaction, d);
    }
}
