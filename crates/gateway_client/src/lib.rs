//! Routing gateway client for SafeRoute
//!
//! Sends resolved origin/destination coordinates to the gateway's
//! `POST /routes/preview` and normalizes the response into [`RouteData`].
//!
//! The gateway evolves independently of installed clients, so parsing is
//! deliberately defensive: each field is accepted under both its English
//! and Portuguese key name, values may arrive as strings or numbers, and a
//! field absent under both names is `None` rather than an error. Numeric
//! meaning is extracted once here, centrally, never ad hoc at use sites.

mod client;
mod config;
mod error;
mod models;

pub use client::{GatewayClient, HttpGatewayClient};
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use models::{RouteData, extract_numeric};
