//! Chat assistant.
//!
//! Free text goes to a [`Classifier`], the loosely typed reply is normalized
//! into an [`Intent`] and dispatched against the engine. Each session allows
//! one classification in flight at a time.

use std::{sync::Arc, time::Duration};

use engine::Engine;
use tokio::sync::{Mutex, RwLock};

mod classifier;
mod dispatcher;
mod intent;
mod parsing;
mod prompt;
mod ui;

pub use classifier::{
    CONNECTION_ERROR_MESSAGE, Classifier, ClassifierError, EndpointClassifier, GatewayClassifier,
    QUOTA_EXHAUSTED_MESSAGE, RATE_LIMITED_MESSAGE,
};
pub use dispatcher::dispatch;
pub use intent::{DEFAULT_EXPENSE_DESCRIPTION, Draft, Intent};
pub use parsing::{fallback, parse_reply};
pub use prompt::system_prompt;

/// Outcome of one chat submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatOutcome {
    Replied(String),
    /// Another submission is still being classified; nothing was done.
    Busy,
}

impl ChatOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Replied(text) => text,
            Self::Busy => ui::WAIT_MESSAGE,
        }
    }
}

#[derive(Debug)]
pub struct Assistant {
    classifier: Arc<dyn Classifier>,
    timeout: Duration,
    gate: Mutex<()>,
}

impl Assistant {
    pub fn new(classifier: Arc<dyn Classifier>, timeout: Duration) -> Self {
        Self {
            classifier,
            timeout,
            gate: Mutex::new(()),
        }
    }

    pub fn classifier(&self) -> &Arc<dyn Classifier> {
        &self.classifier
    }

    /// Classifies `message` and applies it to `engine`.
    ///
    /// The engine is write-locked only after classification returns, so
    /// queries keep being served while the model is thinking.
    pub async fn chat(&self, engine: &RwLock<Engine>, message: &str) -> ChatOutcome {
        let Ok(_guard) = self.gate.try_lock() else {
            tracing::debug!("submission refused, classification in flight");
            return ChatOutcome::Busy;
        };

        let message = message.trim();
        if message.is_empty() {
            return ChatOutcome::Replied(fallback("").response);
        }

        let reply = match tokio::time::timeout(self.timeout, self.classifier.classify(message))
            .await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(err)) => {
                tracing::warn!("classification failed: {err}");
                return ChatOutcome::Replied(err.user_message().to_string());
            }
            Err(_) => {
                tracing::warn!("classification timed out after {:?}", self.timeout);
                return ChatOutcome::Replied(ClassifierError::Timeout.user_message().to_string());
            }
        };

        let mut engine = engine.write().await;
        ChatOutcome::Replied(dispatch(&mut engine, &reply))
    }
}
