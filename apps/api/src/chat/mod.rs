// Chat Session Controller: widget state, turn resolution, contact form and the
// HTTP handlers that drive them.

pub mod contact;
pub mod handlers;
pub mod registry;
pub mod resolver;
pub mod session;
