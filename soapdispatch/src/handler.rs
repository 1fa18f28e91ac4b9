//! Asynchronous action handlers.
//!
//! A handler receives the decoded request payload, if the action declares
//! one and the request carried a body, and produces the response payload.
//!
//! ```
//! use soapdispatch::{ActionHandler, dispatch_handler};
//! use soapenv::{CommonResponse, ConcreteResponse, Content};
//!
//! let handler: ActionHandler = dispatch_handler!(|request| {
//!     let message = match request {
//!         Some(_) => "with payload",
//!         None => "without payload",
//!     };
//!     Ok(Content::from(ConcreteResponse {
//!         common: CommonResponse::success(),
//!         additional_message: message.to_string(),
//!     }))
//! });
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use soapenv::Content;

use crate::DispatchError;

/// Future returned by an [`ActionHandler`].
pub type ActionFuture = Pin<Box<dyn Future<Output = Result<Content, DispatchError>> + Send>>;

/// Shareable async function run for one action id.
pub type ActionHandler = Arc<dyn Fn(Option<Content>) -> ActionFuture + Send + Sync>;

/// Builds an [`ActionHandler`] from a closure body.
///
/// The body is wrapped in `async move` and boxed; it must evaluate to
/// `Result<Content, DispatchError>`, so `?` works on `DispatchError`.
#[macro_export]
macro_rules! dispatch_handler {
    (|$request:ident| $body:block) => {
        std::sync::Arc::new(
            |$request: Option<$crate::soapenv::Content>| -> $crate::ActionFuture {
                Box::pin(async move {
                    let result: Result<$crate::soapenv::Content, $crate::DispatchError> = $body;
                    result
                })
            },
        ) as $crate::ActionHandler
    };
}
