//! The seam between the agent and whatever world it lives in.

/// What the agent is attempting when it hands a primitive act to the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent<'a> {
    /// Label of the primitive experiment being attempted.
    pub experiment: &'a str,
    /// Label of the primitive interaction the agent expects to enact.
    pub interaction: &'a str,
    /// Diagnostic meaning of the expected interaction, if any.
    pub meaning: Option<&'a str>,
}

/// A world that answers primitive acts.
///
/// The call is synchronous and total: the world must always answer with some
/// outcome label, which may differ from the one the agent expected. The engine
/// makes no assumption about how the answer is derived.
pub trait Environment {
    /// Attempt `intent` and report the outcome label the world produced.
    fn enact_primitive(&mut self, intent: &Intent<'_>) -> String;
}

impl<E: Environment + ?Sized> Environment for &mut E {
    fn enact_primitive(&mut self, intent: &Intent<'_>) -> String {
        (**self).enact_primitive(intent)
    }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn enact_primitive(&mut self, intent: &Intent<'_>) -> String {
        (**self).enact_primitive(intent)
    }
}
