// Module layout
// - bootstrap: configuration and startup context
// - infrastructure: filesystem catalog helpers
// - presentation: HTTP handlers and routing

pub mod bootstrap;
pub mod infrastructure;
pub mod presentation;
