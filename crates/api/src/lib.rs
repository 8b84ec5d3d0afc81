//! HTTP front end for the pantry: routing and request/response mapping.

pub mod app;
