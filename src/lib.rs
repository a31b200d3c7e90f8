// [rust] Library root - the binary in main.rs and the integration tests both build on these modules
pub mod config; // Configuration management and environment variable handling
pub mod db; // Connection pool, mutation builder and row decoding
pub mod validation; // Field rule sets applied before any statement runs
pub mod web; // HTTP routing, handlers and response envelopes
