//! Integration layer exposing remote financial and retrieval capabilities as tools.
//!
//! This crate wires a vector-search backend, a web-search API, and a financial
//! market-data API behind a small set of uniformly callable async tools for
//! consumption by an external agent runtime. The substantive remote work is
//! delegated to the backing services; the local logic is limited to query
//! routing, parameter extraction, credential resolution, and converting every
//! failure into a human-readable string for the calling agent.
//!
//! # Architecture Overview
//!
//! - **Tool facade**: `Tool` trait, registry, and the three concrete tools
//! - **Query routing**: keyword/regex routing of financial questions to one
//!   of an enumerated set of market-data operations
//! - **Retrieval**: embedding generation and vector-index query clients
//! - **Configuration system**: YAML configuration with environment-aware
//!   credential resolution and an in-process session store fallback

pub mod config;
pub mod errors;
pub mod polygon;
pub mod retrieval;
pub mod session;
pub mod tools;

pub use config::{ConfigLoader, ToolkitConfig};
pub use errors::ToolkitError;
pub use polygon::{route_query, CapabilitySet, RouteDecision};
pub use session::SessionStore;
pub use tools::{Tool, ToolFactory, ToolMetadata, ToolRegistry};
