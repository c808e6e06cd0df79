//! Drop contract access: supply counters, claim conditions, and claims.
//!
//! DESIGN
//! ======
//! The view-model never sees gateway payloads. `DropContract` returns plain
//! typed records; the gateway client owns the wire format. One handle is
//! opened per collection contract address through `DropContractFactory`.

pub mod gateway;

use std::sync::Arc;

use serde::Serialize;

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by drop contract calls.
#[derive(Debug, thiserror::Error)]
pub enum DropError {
    /// The HTTP request to the gateway failed.
    #[error("gateway request failed: {0}")]
    Request(String),

    /// The gateway returned a non-success HTTP status.
    #[error("gateway response error: status {status}")]
    Response { status: u16, body: String },

    /// The gateway response could not be deserialized.
    #[error("gateway response parse failed: {0}")]
    Parse(String),

    /// The contract rejected the call (reverted, ineligible, sold out).
    #[error("contract call rejected: {0}")]
    Rejected(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for DropError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_GATEWAY_REQUEST",
            Self::Response { .. } => "E_GATEWAY_RESPONSE",
            Self::Parse(_) => "E_GATEWAY_PARSE",
            Self::Rejected(_) => "E_CONTRACT_REJECTED",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Response { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A token that has already been claimed from the drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimedToken {
    pub token_id: String,
    pub owner: Option<String>,
}

/// Price rule of one claim phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimCondition {
    /// Human-readable price, e.g. `"0.01"`.
    pub display_price: String,
    pub currency_symbol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxReceipt {
    pub transaction_hash: String,
    pub block_number: Option<u64>,
}

/// One token minted by a claim transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimTransaction {
    pub receipt: TxReceipt,
    pub token_id: String,
}

/// Metadata of a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    pub token_id: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub owner: Option<String>,
}

// =============================================================================
// TRAITS
// =============================================================================

/// Read and claim operations on one drop contract. Enables mocking in tests.
#[async_trait::async_trait]
pub trait DropContract: Send + Sync {
    /// Total number of tokens the drop can mint.
    async fn total_supply(&self) -> Result<u64, DropError>;

    /// Every token claimed so far.
    async fn get_all_claimed(&self) -> Result<Vec<ClaimedToken>, DropError>;

    /// All claim conditions in phase order.
    async fn claim_conditions(&self) -> Result<Vec<ClaimCondition>, DropError>;

    /// Claim `quantity` tokens to `receiver`, one transaction record per token.
    async fn claim_to(&self, receiver: &str, quantity: u32) -> Result<Vec<ClaimTransaction>, DropError>;

    /// Fetch the metadata record of a token.
    async fn token(&self, token_id: &str) -> Result<TokenRecord, DropError>;
}

/// Opens contract handles keyed by contract address.
pub trait DropContractFactory: Send + Sync {
    /// `None` when the address is blank and no handle can exist yet.
    fn open(&self, contract_address: &str) -> Option<Arc<dyn DropContract>>;
}
