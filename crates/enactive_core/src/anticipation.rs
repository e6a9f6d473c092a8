//! Anticipations: step-scoped proposals scored by proclivity.
//!
//! Two anticipations are the same anticipation when they propose the same
//! candidate, whatever their score. [`Anticipations::propose`] enforces this:
//! a repeated proposal adds its proclivity to the existing entry instead of
//! appending a second one, so evidence from several activating contexts
//! accumulates.

use crate::experiment::ExperimentId;
use crate::interaction::InteractionId;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Accumulated `weight * valence` evidence for a candidate.
pub type Proclivity = i64;

/// What an anticipation proposes to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Candidate {
    Interaction(InteractionId),
    Experiment(ExperimentId),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Anticipation {
    pub candidate: Candidate,
    pub proclivity: Proclivity,
    /// Proposed by at least one activated composite rather than only seeded
    /// as a default.
    #[serde(default)]
    pub afforded: bool,
}

impl Anticipation {
    pub fn new(candidate: Candidate, proclivity: Proclivity) -> Self {
        Self {
            candidate,
            proclivity,
            afforded: false,
        }
    }
}

impl PartialEq for Anticipation {
    fn eq(&self, other: &Self) -> bool {
        self.candidate == other.candidate
    }
}

impl Eq for Anticipation {}

/// Ordered list of anticipations, deduplicated by candidate.
#[derive(Debug, Clone, Default)]
pub struct Anticipations {
    items: Vec<Anticipation>,
}

impl Anticipations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `proclivity` to the entry for `candidate`, creating it if absent.
    pub fn propose(&mut self, candidate: Candidate, proclivity: Proclivity) {
        match self.items.iter_mut().find(|a| a.candidate == candidate) {
            Some(existing) => existing.proclivity = existing.proclivity.saturating_add(proclivity),
            None => self.items.push(Anticipation::new(candidate, proclivity)),
        }
    }

    /// Like [`propose`](Self::propose), and marks the entry as afforded by
    /// the context.
    pub fn afford(&mut self, candidate: Candidate, proclivity: Proclivity) {
        self.propose(candidate, proclivity);
        if let Some(existing) = self.items.iter_mut().find(|a| a.candidate == candidate) {
            existing.afforded = true;
        }
    }

    pub fn has_afforded(&self) -> bool {
        self.items.iter().any(|a| a.afforded)
    }

    /// Add evidence only to an entry that already exists.
    pub fn reinforce(&mut self, candidate: Candidate, proclivity: Proclivity) -> bool {
        match self.items.iter_mut().find(|a| a.candidate == candidate) {
            Some(existing) => {
                existing.proclivity = existing.proclivity.saturating_add(proclivity);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, candidate: Candidate) -> Option<&Anticipation> {
        self.items.iter().find(|a| a.candidate == candidate)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.items.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Anticipation> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Anticipation] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Anticipation> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Anticipations {
    type Item = &'a Anticipation;
    type IntoIter = std::slice::Iter<'a, Anticipation>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
