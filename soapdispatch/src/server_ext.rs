//! Mounts the dispatch routes on a `soapserver::Server`.

use std::future::Future;
use std::sync::Arc;

use soapserver::Server;
use tracing::info;

use crate::dispatcher::{SOAP_ACTION_PATH, SOAP_BODY_PATH, soap_action_handler, soap_body_handler};
use crate::Dispatcher;

/// Extension trait registering a [`Dispatcher`] on a server.
///
/// ```rust,ignore
/// use soapdispatch::{ActionRegistry, Dispatcher, SoapDispatchExt, register_demo_actions};
/// use soapserver::ServerBuilder;
///
/// let mut registry = ActionRegistry::new();
/// register_demo_actions(&mut registry);
///
/// let mut server = ServerBuilder::new_configured().build();
/// server.register_dispatch(Dispatcher::new(registry)).await;
/// ```
pub trait SoapDispatchExt {
    /// Adds `POST /dispatch/soapaction` and `POST /dispatch/soapbody`.
    fn register_dispatch(&mut self, dispatcher: Dispatcher) -> impl Future<Output = ()> + Send;
}

impl SoapDispatchExt for Server {
    async fn register_dispatch(&mut self, dispatcher: Dispatcher) {
        let actions = dispatcher.registry().action_ids().join(", ");
        let dispatcher = Arc::new(dispatcher);

        self.add_post_handler_with_state(SOAP_ACTION_PATH, soap_action_handler, dispatcher.clone())
            .await;
        self.add_post_handler_with_state(SOAP_BODY_PATH, soap_body_handler, dispatcher)
            .await;

        info!(actions = %actions, "Dispatch routes registered");
    }
}
