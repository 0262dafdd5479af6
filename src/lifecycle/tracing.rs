//! # Tracing
//!
//! Log lines carry structured fields rather than formatted text: `entity_type` and `id` on
//! every store operation, `error` on failures. Client calls open a span named after the
//! method. Store actors run in their own tasks, so their lines carry no caller span.
//!
//! Verbosity comes from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run
//! RUST_LOG=property_market::purchase=debug,info cargo run
//! ```
//!
//! With `RUST_LOG=info` a purchase looks like:
//!
//! ```text
//! INFO Action ok entity_type="Property" id=6f1c... outcome=MarkSold(true)
//! INFO Created entity_type="Transaction" id=0b9e... size=1
//! INFO purchase:purchase:insert: Transaction recorded id=0b9e...
//! INFO purchase:purchase: Purchase completed transaction_id=0b9e... buyer=a41d...
//! ```
//!
//! Mirror failures show up as `WARN Mirror sync failure` and never as errors to the caller.
//! A failed compensating write is logged at `ERROR`.

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
