//! Application layer for Heroseat
//!
//! Async runtimes that drive the pure state machines from
//! `heroseat-client` over channel-based transport, so the same code runs
//! against a real socket bridge and an in-process test driver.
//!
//! # Components
//!
//! - [`transport_pair`]: Channel pair linking the application to a transport
//! - [`LinkWatch`]: Task folding raw connectivity signals into link states
//! - [`SessionRuntime`]: Task driving one game session end to end
//! - [`SessionView`]: Owned projection of session state for rendering

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod handle;
mod link_watch;
mod runtime;
mod view;

pub use handle::{ServerHandle, TransportClosed, TransportEnd, transport_pair};
pub use link_watch::LinkWatch;
pub use runtime::{PlayerCommand, SessionRuntime};
pub use view::SessionView;
