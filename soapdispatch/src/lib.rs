//! # soapdispatch - Action dispatch over HTTP
//!
//! Routes an incoming SOAP request to an async handler and writes the
//! response envelope:
//!
//! - [`ActionRegistry`] maps action ids to a request placeholder and an [`ActionHandler`]
//! - [`SniffRule`] picks an action by looking for a marker in the raw body
//! - [`Dispatcher`] decodes, runs the handler and encodes the reply or a fault
//! - [`SoapDispatchExt`] mounts `/dispatch/soapaction` and `/dispatch/soapbody`
//!   on a `soapserver::Server`
//!
//! ## Example
//!
//! ```rust,no_run
//! use soapdispatch::{ActionRegistry, Dispatcher, SoapDispatchExt, register_demo_actions};
//! use soapserver::ServerBuilder;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut registry = ActionRegistry::new();
//!     register_demo_actions(&mut registry);
//!
//!     let mut server = ServerBuilder::new("Demo", "127.0.0.1", 8080).build();
//!     server.register_dispatch(Dispatcher::new(registry)).await;
//!     server.start().await?;
//!     server.wait().await;
//!     Ok(())
//! }
//! ```

pub mod config_ext;
pub mod dispatcher;
mod error;
mod handler;
mod process;
mod registry;
pub mod server_ext;
pub mod sniff;

#[doc(hidden)]
pub use soapenv;

pub use config_ext::DispatchConfigExt;
pub use dispatcher::{
    DispatchReply, Dispatcher, SOAP_ACTION_HEADER, SOAP_ACTION_PATH, SOAP_BODY_PATH, soap_action,
};
pub use error::DispatchError;
pub use handler::{ActionFuture, ActionHandler};
pub use process::{
    PROCESS_A, PROCESS_B, process_a_response, process_b_response, register_demo_actions,
};
pub use registry::{Action, ActionRegistry};
pub use server_ext::SoapDispatchExt;
pub use sniff::{SniffRule, default_rules, sniff};
