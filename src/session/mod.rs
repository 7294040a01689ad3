//! Guided conversation session
//!
//! One session walks the flow table step by step, records the chosen
//! option values as history, and keeps a chat transcript of the exchange.
//! Reaching a terminal step sends the joined history to the suggestion
//! provider; the returned dish can then be forwarded to the cart sink.
//!
//! Failure policy: nothing a collaborator does can crash the session.
//! Provider failures become assistant messages, catalog failures degrade to
//! a partial dish, and invalid navigation is logged and ignored. Public
//! operations never propagate collaborator errors to the caller.

pub mod transcript;

use crate::error::{GarcomError, Result};
use crate::flow::{FlowTable, Step, StepOption};
use crate::menu::{CartSink, Dish};
use crate::providers::{ChatMessage, DishCatalog, SuggestionProvider, SuggestionRequest};
use std::fmt;
use std::sync::Arc;

pub use self::transcript::Transcript;

/// Opening messages seeded into every new session
const GREETING_INTRO: &str = "Olá! Eu sou o seu garçom virtual.";
const GREETING_PROMPT: &str =
    "Vou fazer algumas perguntas rápidas para encontrar o prato perfeito para você.";

/// User-facing copy for suggestion failures
const COPY_NO_RESTAURANT: &str =
    "Parece que nenhum restaurante está selecionado. Escolha um restaurante e tente novamente.";
const COPY_NETWORK: &str =
    "Estou com problemas de conexão no momento. Verifique sua internet e tente de novo em instantes.";
const COPY_GENERIC: &str =
    "Desculpe, não consegui preparar uma sugestão agora. Peça uma nova sugestão para tentar de novo.";

/// Phase of the guided session
///
/// `Active` walks non-terminal steps; `AwaitingSuggestion` covers both an
/// in-flight request and the stalled state after a failed one;
/// `Suggested` means a suggestion was delivered and may go to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    AwaitingSuggestion,
    Suggested,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::AwaitingSuggestion => write!(f, "AWAITING"),
            Self::Suggested => write!(f, "SUGGESTED"),
        }
    }
}

/// Mutable state of one guided conversation
///
/// Sessions are ephemeral: they live for one run of the chat loop and are
/// never persisted. Collaborators are explicit objects handed in at
/// construction, so there is no hidden process-global state.
pub struct GuidedSession {
    table: Arc<FlowTable>,
    provider: Arc<dyn SuggestionProvider>,
    catalog: Arc<dyn DishCatalog>,
    cart: Arc<dyn CartSink>,
    restaurant_id: Option<String>,
    current_step_id: String,
    history: Vec<String>,
    transcript: Transcript,
    phase: SessionPhase,
    is_complete: bool,
    suggested_dish: Option<Dish>,
    added_to_cart: bool,
    /// Bumped by [`reset`]; a suggestion response whose captured epoch no
    /// longer matches is stale and gets discarded instead of applied.
    ///
    /// [`reset`]: GuidedSession::reset
    epoch: u64,
}

impl GuidedSession {
    /// Creates a session positioned at the start step
    ///
    /// The transcript is seeded with the two greeting messages.
    pub fn new(
        table: Arc<FlowTable>,
        provider: Arc<dyn SuggestionProvider>,
        catalog: Arc<dyn DishCatalog>,
        cart: Arc<dyn CartSink>,
        restaurant_id: Option<String>,
    ) -> Self {
        let mut transcript = Transcript::new();
        transcript.push_assistant(GREETING_INTRO);
        transcript.push_assistant(GREETING_PROMPT);
        let current_step_id = table.initial_step().id.clone();
        Self {
            table,
            provider,
            catalog,
            cart,
            restaurant_id,
            current_step_id,
            history: Vec::new(),
            transcript,
            phase: SessionPhase::Active,
            is_complete: false,
            suggested_dish: None,
            added_to_cart: false,
            epoch: 0,
        }
    }

    /// The step currently displayed
    pub fn current_step(&self) -> &Step {
        self.table
            .step(&self.current_step_id)
            .expect("current step id always resolves")
    }

    /// Chosen option values, in order
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Full chat transcript
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// All transcript messages, in order
    pub fn messages(&self) -> &[ChatMessage] {
        self.transcript.messages()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True once a terminal step has been reached via [`select_option`]
    ///
    /// [`select_option`]: GuidedSession::select_option
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn suggested_dish(&self) -> Option<&Dish> {
        self.suggested_dish.as_ref()
    }

    pub fn added_to_cart(&self) -> bool {
        self.added_to_cart
    }

    pub fn restaurant_id(&self) -> Option<&str> {
        self.restaurant_id.as_deref()
    }

    /// Handles the user picking an option on the current step
    ///
    /// On a non-terminal step this advances to the next step and appends
    /// its question. On a terminal step this requests a suggestion from the
    /// provider with the joined history as context. Single-flight is
    /// enforced here: a call while the session is not `Active` is rejected
    /// with a log instead of relying on the UI to disable input.
    pub async fn select_option(&mut self, option: &StepOption) {
        if self.phase != SessionPhase::Active {
            tracing::warn!(
                phase = %self.phase,
                option = %option.value,
                "option selected while session is not active, ignoring"
            );
            return;
        }

        self.transcript.push_user(option.label.clone());
        self.history.push(option.value.clone());

        if self.current_step().end {
            self.is_complete = true;
            self.phase = SessionPhase::AwaitingSuggestion;

            let captured_epoch = self.epoch;
            let outcome = self.fetch_suggestion().await;
            if captured_epoch != self.epoch {
                tracing::debug!("discarding stale suggestion response after reset");
                return;
            }
            match outcome {
                Ok((content, dish)) => {
                    self.transcript.push_assistant(content);
                    self.suggested_dish = dish;
                    self.phase = SessionPhase::Suggested;
                }
                Err(error) => {
                    tracing::warn!(error = %error, "suggestion generation failed");
                    self.transcript.push_assistant(failure_copy(&error));
                    // Stalled in AwaitingSuggestion until reset or go_back.
                }
            }
            return;
        }

        match self.table.step(&option.value) {
            Some(next) => {
                self.current_step_id = next.id.clone();
                self.transcript.push_assistant(next.question.clone());
            }
            None => {
                tracing::warn!(
                    step = %self.current_step_id,
                    value = %option.value,
                    "option does not resolve to a step, staying put"
                );
            }
        }
    }

    /// Resolves the suggestion for the current history
    ///
    /// Does not touch session state; the caller applies the outcome after
    /// checking it is not stale.
    async fn fetch_suggestion(&self) -> Result<(String, Option<Dish>)> {
        let restaurant_id = self
            .restaurant_id
            .clone()
            .ok_or(GarcomError::MissingRestaurant)?;

        let context = self.history.join(", ");
        tracing::debug!(context = %context, "requesting suggestion");
        let request = SuggestionRequest {
            restaurant_id: restaurant_id.clone(),
            messages: vec![ChatMessage::user(context)],
        };
        let response = self.provider.generate_suggestion(&request).await?;

        let mut content = response.text.clone();
        let mut dish = None;
        if let Some(summary) = response.dish {
            content.push_str(&format!("\n\n{}: {}", summary.name, summary.description));
            let resolved = match self.catalog.dish_by_id(&summary.id).await {
                Ok(full) => full,
                Err(error) => {
                    tracing::warn!(
                        dish_id = %summary.id,
                        error = %error,
                        "dish lookup failed, using partial dish"
                    );
                    summary.into_partial_dish(restaurant_id)
                }
            };
            dish = Some(resolved);
        }
        Ok((content, dish))
    }

    /// Rewinds the decision tree by one choice
    ///
    /// No-op on empty history. The transcript is never rewound; only the
    /// navigational state moves back. Clears completion and returns the
    /// session to `Active` so the user can pick a different branch.
    pub fn go_back(&mut self) {
        if self.history.is_empty() {
            return;
        }
        self.history.pop();
        match self.history.last() {
            None => {
                self.current_step_id = self.table.initial_step().id.clone();
            }
            Some(last) => match self.table.step(last) {
                Some(step) => self.current_step_id = step.id.clone(),
                None => {
                    tracing::warn!(value = %last, "history entry does not resolve to a step");
                }
            },
        }
        self.is_complete = false;
        self.phase = SessionPhase::Active;
    }

    /// Forwards the suggested dish to the cart sink
    ///
    /// With no suggested dish this neither calls the sink nor appends a
    /// message. The sink treats duplicate adds as quantity increments, so
    /// calling this twice is safe.
    pub async fn add_to_cart(&mut self) {
        let dish = match &self.suggested_dish {
            Some(dish) => dish.clone(),
            None => {
                tracing::debug!("add_to_cart without a suggested dish, ignoring");
                return;
            }
        };
        match self.cart.add_to_cart(&dish).await {
            Ok(()) => {
                self.added_to_cart = true;
                self.transcript.push_assistant(format!(
                    "{} foi adicionado ao seu carrinho. Bom apetite!",
                    dish.name
                ));
            }
            Err(error) => {
                tracing::warn!(error = %error, "cart sink rejected the dish");
            }
        }
    }

    /// Starts a new suggestion walk ("nova sugestão")
    ///
    /// Navigational state returns to the initial step, the suggestion and
    /// cart flags are cleared, and the epoch is bumped so an in-flight
    /// response cannot be applied afterwards. The transcript is retained so
    /// prior attempts stay visible.
    pub fn reset(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.history.clear();
        self.current_step_id = self.table.initial_step().id.clone();
        self.is_complete = false;
        self.suggested_dish = None;
        self.added_to_cart = false;
        self.phase = SessionPhase::Active;
    }
}

/// Picks the user-facing copy for a suggestion failure
///
/// Selection is by substring match on the error text: the missing
/// restaurant domain error maps to configuration copy, transport errors
/// mention "network" and map to connectivity copy, everything else gets
/// the generic copy.
fn failure_copy(error: &anyhow::Error) -> &'static str {
    let text = format!("{:#}", error);
    if text.contains("Restaurante não selecionado") {
        COPY_NO_RESTAURANT
    } else if text.contains("network") {
        COPY_NETWORK
    } else {
        COPY_GENERIC
    }
}
