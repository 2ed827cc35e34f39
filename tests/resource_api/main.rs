//! HTTP integration tests for the resource routes.
//!
//! Starts an axum server and exercises it with reqwest.


#[cfg(feature = "http")]
mod json;
#[cfg(feature = "http")]
mod xml;
#[cfg(feature = "http")]
mod errors;
