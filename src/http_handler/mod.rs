//! Typed HTTP layer for the aircraft-systems EFB backend.
//!
//! Requests and responses are plain types implementing the small trait
//! families in `http_request` / `http_response`; the wire details live in
//! one place each.

pub mod efb_transport;
pub mod http_client;
pub mod http_request;
pub mod http_response;
