//! The hint pipeline: gate, compose, complete.
//!
//! [`Tutor`] owns the read-only pieces built at startup (the session gate,
//! the prompt composer and the service-failure message) and a shared handle
//! to the completion client. It keeps no per-request state, so one instance
//! serves every request concurrently.

use std::sync::Arc;

use tracing::{Instrument, debug, error, info, info_span};

use crate::exercise::Exercise;
use crate::prompt::PromptComposer;
use crate::session::{GateDecision, SessionGate};
use crate::trace::RequestId;
use crate::{CompletionClient, HintRequest, HintResponse};

pub struct Tutor {
    gate: SessionGate,
    composer: PromptComposer,
    service_error: String,
    client: Arc<dyn CompletionClient>,
}

impl Tutor {
    pub fn new(exercise: Exercise, ceiling: usize, client: Arc<dyn CompletionClient>) -> Self {
        let gate = SessionGate::new(&exercise, ceiling);
        let composer = PromptComposer::new(&exercise, &gate);
        Self {
            gate,
            composer,
            service_error: exercise.service_error,
            client,
        }
    }

    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    pub fn composer(&self) -> &PromptComposer {
        &self.composer
    }

    /// Produce the response for one hint request.
    ///
    /// At the attempt ceiling the gate's terminal text is returned and the
    /// completion client is not called. Otherwise the client is called exactly
    /// once and its text is relayed unmodified. A client failure yields the
    /// fixed service-failure message; the cause goes to the log only.
    pub async fn produce_hint(&self, request: &HintRequest) -> HintResponse {
        let span = info_span!(
            "hint",
            request_id = %RequestId::next(),
            mode = %request.mode,
            attempts = request.history.len(),
        );
        self.respond(request).instrument(span).await
    }

    async fn respond(&self, request: &HintRequest) -> HintResponse {
        match self.gate.evaluate(&request.history, request.mode) {
            GateDecision::Terminal(text) => {
                info!(
                    ceiling = self.gate.ceiling(),
                    "Attempt ceiling reached, returning terminal text"
                );
                return HintResponse::hint(text);
            }
            GateDecision::Continue => {
                info!(
                    remaining = self.gate.attempts_remaining(&request.history),
                    "Composing hint prompt"
                );
            }
        }

        let prompt = self.composer.compose(request);
        debug!(
            model = self.client.model(),
            prompt_chars = prompt.chars().count(),
            "Requesting completion"
        );

        match self.client.complete(&prompt).await {
            Ok(hint) => {
                debug!(hint_chars = hint.chars().count(), "Completion received");
                HintResponse::hint(hint)
            }
            Err(e) => {
                error!(error = %e, model = self.client.model(), "Completion failed");
                HintResponse::failure(self.service_error.as_str())
            }
        }
    }
}
