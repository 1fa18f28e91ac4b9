//! Action id to handler table.

use std::collections::HashMap;

use soapenv::Content;
use tracing::debug;

use crate::ActionHandler;

/// A registered action: the request placeholder the body is decoded into,
/// if any, and the handler producing the response.
#[derive(Clone)]
pub struct Action {
    pub id: String,
    pub request: Option<Content>,
    pub handler: ActionHandler,
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("request", &self.request.as_ref().map(|c| c.name()))
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `id`, replacing any previous action.
    ///
    /// `request` is the placeholder a non-empty request body is decoded
    /// into; `None` means the action ignores the request body.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        request: Option<Content>,
        handler: ActionHandler,
    ) -> &mut Self {
        let id = id.into();
        debug!(action = %id, "Registering action");
        self.actions.insert(
            id.clone(),
            Action {
                id,
                request,
                handler,
            },
        );
        self
    }

    pub fn get(&self, id: &str) -> Option<&Action> {
        self.actions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn action_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch_handler;
    use soapenv::{CommonResponse, ConcreteResponse};

    fn echo() -> ActionHandler {
        dispatch_handler!(|_request| {
            Ok(Content::from(ConcreteResponse {
                common: CommonResponse::success(),
                additional_message: String::new(),
            }))
        })
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ActionRegistry::new();
        registry.register("b", None, echo()).register("a", None, echo());

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a"));
        assert!(!registry.contains("c"));
        assert_eq!(registry.action_ids(), vec!["a", "b"]);
        assert_eq!(registry.get("a").map(|a| a.id.as_str()), Some("a"));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = ActionRegistry::new();
        registry.register("a", None, echo());
        registry.register(
            "a",
            Some(Content::from(soapenv::ProcessARequest::default())),
            echo(),
        );

        assert_eq!(registry.len(), 1);
        assert!(registry.get("a").and_then(|a| a.request.as_ref()).is_some());
    }
}
