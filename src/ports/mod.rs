//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `DocumentStore` - Transactional key-value document storage
//! - `CompletionService` - Opaque text/vision completion provider
//! - `PaymentGateway` - Order creation against the payment provider

mod completion;
mod document_store;
mod payment_gateway;

pub use completion::{CompletionError, CompletionService};
pub use document_store::{
    CommitResult, DocumentKey, DocumentStore, Guard, StoreError, WriteOp,
};
pub use payment_gateway::{CreateOrderRequest, GatewayError, GatewayOrder, PaymentGateway};
