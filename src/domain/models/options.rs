use serde::{Deserialize, Serialize};

/// Tunable parameters for a single model invocation.
///
/// Every field is optional; an unset field means "let the collaborator use
/// its own default". `GenerationOptions::default()` leaves everything unset,
/// which is the documented default used by
/// [`ConversationService::converse`](crate::ConversationService::converse).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    top_p: Option<f32>,
    frequency_penalty: Option<f32>,
    presence_penalty: Option<f32>,
    stop: Option<Vec<String>>,
}

impl GenerationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f32) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f32) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    pub fn top_p(&self) -> Option<f32> {
        self.top_p
    }

    pub fn frequency_penalty(&self) -> Option<f32> {
        self.frequency_penalty
    }

    pub fn presence_penalty(&self) -> Option<f32> {
        self.presence_penalty
    }

    pub fn stop(&self) -> Option<&[String]> {
        self.stop.as_deref()
    }

    /// True when no option is set, i.e. the collaborator's defaults apply.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_leaves_everything_unset() {
        let options = GenerationOptions::default();
        assert!(options.model().is_none());
        assert!(options.temperature().is_none());
        assert!(options.max_tokens().is_none());
        assert!(options.is_default());
    }

    #[test]
    fn builder_sets_fields() {
        let options = GenerationOptions::new()
            .with_model("gpt-4o-mini")
            .with_temperature(0.2)
            .with_max_tokens(256);

        assert_eq!(options.model(), Some("gpt-4o-mini"));
        assert_eq!(options.temperature(), Some(0.2));
        assert_eq!(options.max_tokens(), Some(256));
        assert!(!options.is_default());
    }

    #[test]
    fn new_equals_default() {
        assert_eq!(GenerationOptions::new(), GenerationOptions::default());
    }
}
