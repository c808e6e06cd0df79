//! HTTP contract gateway client.
//!
//! The gateway fronts the chain RPC and the signing backend wallet. Every
//! endpoint lives under `<base>/contract/<chain>/<address>/erc721/` and
//! answers `{ "result": ... }`. Quantities come back as JSON numbers or
//! decimal strings depending on the endpoint. Pure parsing in `parse_*` for
//! testability.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{
    ClaimCondition, ClaimTransaction, ClaimedToken, DropContract, DropContractFactory, DropError, TokenRecord,
    TxReceipt,
};
use crate::config::{GatewayConfig, HttpTimeouts};

const BACKEND_WALLET_HEADER: &str = "x-backend-wallet-address";

// =============================================================================
// FACTORY
// =============================================================================

/// Opens gateway-backed contract handles sharing one HTTP client.
pub struct GatewayFactory {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl GatewayFactory {
    /// # Errors
    ///
    /// Returns [`DropError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: GatewayConfig, timeouts: HttpTimeouts) -> Result<Self, DropError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| DropError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }
}

impl DropContractFactory for GatewayFactory {
    fn open(&self, contract_address: &str) -> Option<Arc<dyn DropContract>> {
        let address = contract_address.trim();
        if address.is_empty() {
            return None;
        }
        Some(Arc::new(GatewayDropClient {
            http: self.http.clone(),
            base: contract_base_url(&self.config, address),
            token: self.config.token.clone(),
        }))
    }
}

pub(crate) fn contract_base_url(config: &GatewayConfig, address: &str) -> String {
    format!("{}/contract/{}/{address}/erc721", config.base_url, config.chain)
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct GatewayDropClient {
    http: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl GatewayDropClient {
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, DropError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| DropError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| DropError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(classify_failure(status, text));
        }
        Ok(text)
    }

    async fn get(&self, path: &str) -> Result<String, DropError> {
        let request = self.http.get(format!("{}/{path}", self.base));
        self.send(request).await
    }
}

#[async_trait::async_trait]
impl DropContract for GatewayDropClient {
    async fn total_supply(&self) -> Result<u64, DropError> {
        let body = self.get("total-count").await?;
        let value: Quantity = parse_result(&body)?;
        value.to_u64()
    }

    async fn get_all_claimed(&self) -> Result<Vec<ClaimedToken>, DropError> {
        let body = self.get("get-all-claimed").await?;
        parse_claimed(&body)
    }

    async fn claim_conditions(&self) -> Result<Vec<ClaimCondition>, DropError> {
        let body = self.get("claim-conditions/get-all").await?;
        parse_claim_conditions(&body)
    }

    async fn claim_to(&self, receiver: &str, quantity: u32) -> Result<Vec<ClaimTransaction>, DropError> {
        let payload = serde_json::json!({ "receiver": receiver, "quantity": quantity.to_string() });
        let request = self
            .http
            .post(format!("{}/claim-to", self.base))
            .header(BACKEND_WALLET_HEADER, receiver)
            .json(&payload);
        let body = self.send(request).await?;
        parse_claim_transactions(&body)
    }

    async fn token(&self, token_id: &str) -> Result<TokenRecord, DropError> {
        let request = self
            .http
            .get(format!("{}/get", self.base))
            .query(&[("tokenId", token_id)]);
        let body = self.send(request).await?;
        parse_token(&body)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct Envelope<T> {
    result: T,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// A count or id that may be encoded as a number or a decimal string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Quantity {
    Number(u64),
    Text(String),
}

impl Quantity {
    fn to_u64(&self) -> Result<u64, DropError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| DropError::Parse(format!("not an unsigned integer: {s:?}"))),
        }
    }

    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

#[derive(Deserialize)]
struct WireNft {
    metadata: WireMetadata,
    #[serde(default)]
    owner: Option<String>,
}

#[derive(Deserialize)]
struct WireMetadata {
    id: Quantity,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireClaimCondition {
    currency_metadata: WireCurrency,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCurrency {
    display_value: String,
    #[serde(default)]
    symbol: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireReceipt {
    transaction_hash: String,
    #[serde(default)]
    block_number: Option<u64>,
}

#[derive(Deserialize)]
struct WireClaim {
    id: Quantity,
    receipt: WireReceipt,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_result<T: DeserializeOwned>(json: &str) -> Result<T, DropError> {
    let envelope: Envelope<T> = serde_json::from_str(json).map_err(|e| DropError::Parse(e.to_string()))?;
    Ok(envelope.result)
}

/// Client errors carrying a gateway message are contract rejections; anything
/// else is a transport-level failure.
fn classify_failure(status: u16, body: String) -> DropError {
    if (400..500).contains(&status) && status != 429 {
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
            return DropError::Rejected(envelope.error.message);
        }
    }
    DropError::Response { status, body }
}

fn parse_claimed(json: &str) -> Result<Vec<ClaimedToken>, DropError> {
    let nfts: Vec<WireNft> = parse_result(json)?;
    Ok(nfts
        .into_iter()
        .map(|nft| ClaimedToken { token_id: nft.metadata.id.into_string(), owner: nft.owner })
        .collect())
}

fn parse_claim_conditions(json: &str) -> Result<Vec<ClaimCondition>, DropError> {
    let conditions: Vec<WireClaimCondition> = parse_result(json)?;
    Ok(conditions
        .into_iter()
        .map(|c| ClaimCondition {
            display_price: c.currency_metadata.display_value,
            currency_symbol: c.currency_metadata.symbol,
        })
        .collect())
}

fn parse_claim_transactions(json: &str) -> Result<Vec<ClaimTransaction>, DropError> {
    let claims: Vec<WireClaim> = parse_result(json)?;
    Ok(claims
        .into_iter()
        .map(|c| ClaimTransaction {
            receipt: TxReceipt { transaction_hash: c.receipt.transaction_hash, block_number: c.receipt.block_number },
            token_id: c.id.into_string(),
        })
        .collect())
}

fn parse_token(json: &str) -> Result<TokenRecord, DropError> {
    let nft: WireNft = parse_result(json)?;
    let token_id = nft.metadata.id.into_string();
    Ok(TokenRecord {
        name: nft
            .metadata
            .name
            .unwrap_or_else(|| format!("#{token_id}")),
        token_id,
        description: nft.metadata.description,
        image: nft.metadata.image,
        owner: nft.owner,
    })
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;
