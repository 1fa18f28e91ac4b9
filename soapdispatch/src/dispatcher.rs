//! Request dispatching and the two HTTP routes.
//!
//! `POST /dispatch/soapaction` selects the action from the `soapAction`
//! header, `POST /dispatch/soapbody` by sniffing the raw body. Both then go
//! through [`Dispatcher::dispatch`].

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use soapenv::{Content, Decoder, Encoder, Envelope};
use tracing::{debug, error, info, warn};

use crate::sniff::{SniffRule, default_rules, sniff};
use crate::{ActionRegistry, DispatchError};

pub const SOAP_ACTION_PATH: &str = "/dispatch/soapaction";
pub const SOAP_BODY_PATH: &str = "/dispatch/soapbody";

/// Request header naming the action; matched case-insensitively.
pub const SOAP_ACTION_HEADER: &str = "soapaction";

const XML_CONTENT_TYPE: &str = "text/xml; charset=\"utf-8\"";

/// Status and encoded envelope produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReply {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl IntoResponse for DispatchReply {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
            self.body,
        )
            .into_response()
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: ActionRegistry,
    rules: Vec<SniffRule>,
    encoder: Encoder,
    decoder: Decoder,
}

impl Dispatcher {
    pub fn new(registry: ActionRegistry) -> Self {
        Self {
            registry,
            rules: default_rules(),
            encoder: Encoder::new(),
            decoder: Decoder::new(),
        }
    }

    pub fn with_rules(mut self, rules: Vec<SniffRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_encoder(mut self, encoder: Encoder) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn with_decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn rules(&self) -> &[SniffRule] {
        &self.rules
    }

    /// The action selected by sniffing `body`.
    pub fn sniff(&self, body: &[u8]) -> Option<&str> {
        sniff(&self.rules, body)
    }

    /// Runs `action` on `body` and encodes the outcome.
    ///
    /// An unknown or missing action yields 200 with an empty body envelope.
    pub async fn dispatch(&self, action: Option<&str>, body: &[u8]) -> DispatchReply {
        let Some(action) = action.and_then(|id| self.registry.get(id)) else {
            warn!(action = ?action, "No action matches the request");
            return self.reply(StatusCode::OK, &Envelope::default());
        };

        let request = match self.decode_request(&action.id, action.request.as_ref(), body) {
            Ok(request) => request,
            Err(e) => {
                warn!(action = %action.id, error = %e, "Rejecting request");
                return self.fault_reply(&e);
            }
        };

        debug!(action = %action.id, "Running action");
        match (action.handler)(request).await {
            Ok(content) => {
                info!(action = %action.id, response = %content.name(), "Action succeeded");
                self.reply(StatusCode::OK, &Envelope::new(content))
            }
            Err(e) => {
                error!(action = %action.id, error = %e, "Action failed");
                self.fault_reply(&e)
            }
        }
    }

    fn decode_request(
        &self,
        action: &str,
        placeholder: Option<&Content>,
        body: &[u8],
    ) -> Result<Option<Content>, DispatchError> {
        let Some(placeholder) = placeholder else {
            return Ok(None);
        };
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let envelope = self
            .decoder
            .decode(body, Envelope::expecting(placeholder.clone()))
            .map_err(DispatchError::InvalidRequest)?;
        if envelope.body.fault.is_some() {
            return Err(DispatchError::UnexpectedPayload {
                action: action.to_string(),
            });
        }
        Ok(envelope.body.content)
    }

    fn fault_reply(&self, err: &DispatchError) -> DispatchReply {
        self.reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            &Envelope::fault(err.to_fault()),
        )
    }

    fn reply(&self, status: StatusCode, envelope: &Envelope) -> DispatchReply {
        match self.encoder.encode(envelope) {
            Ok(body) => DispatchReply { status, body },
            Err(e) => {
                error!(error = %DispatchError::Encode(e), "Cannot write response");
                DispatchReply {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: Vec::new(),
                }
            }
        }
    }

    /// Router serving both dispatch routes.
    pub fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route(SOAP_ACTION_PATH, post(soap_action_handler))
            .route(SOAP_BODY_PATH, post(soap_body_handler))
            .with_state(self)
    }
}

/// The `soapAction` header value, without surrounding quotes.
pub fn soap_action(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(SOAP_ACTION_HEADER)?.to_str().ok()?;
    let value = value.trim().trim_matches('"');
    (!value.is_empty()).then_some(value)
}

pub async fn soap_action_handler(
    State(dispatcher): State<Arc<Dispatcher>>,
    headers: HeaderMap,
    body: Bytes,
) -> DispatchReply {
    let action = soap_action(&headers);
    debug!(action = ?action, "Request on {}", SOAP_ACTION_PATH);
    dispatcher.dispatch(action, &body).await
}

pub async fn soap_body_handler(
    State(dispatcher): State<Arc<Dispatcher>>,
    body: Bytes,
) -> DispatchReply {
    let action = dispatcher.sniff(&body);
    debug!(action = ?action, "Request on {}", SOAP_BODY_PATH);
    dispatcher.dispatch(action, &body).await
}
