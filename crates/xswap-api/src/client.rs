//! HTTP client for the quote and order lifecycle endpoints.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use xswap_commit::SecretHash;
use xswap_core::{
    ChainId, OrderRequest, OrderSubmission, PreparedOrder, Quote, QuoteParams,
};

use crate::error::{ApiError, ApiResult};

/// Default timeout for service requests. Timeout policy lives here — the
/// coordinator itself never imposes one.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const QUOTE_PATH: &str = "quoter/v1.0/quote/receive";
const CREATE_ORDER_PATH: &str = "relayer/v1.0/order/create";
const SUBMIT_ORDER_PATH: &str = "relayer/v1.0/order/submit";

/// Body for order creation: the quote passed back verbatim plus the
/// assembled order request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderBody<'a> {
    quote: &'a Value,
    order: &'a OrderRequest,
}

/// Body for order submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitOrderBody<'a> {
    src_chain_id: ChainId,
    order: &'a Value,
    quote_id: &'a str,
    secret_hashes: &'a [SecretHash],
}

/// Client for the swap coordinating service.
pub struct SwapApiClient {
    client: Client,
    base_url: String,
    auth_key: String,
}

impl SwapApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Service base URL (e.g., "https://api.example.dev/fusion-plus")
    /// * `auth_key` - Bearer token for the service. Never logged.
    pub fn new(base_url: impl Into<String>, auth_key: impl Into<String>) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Http(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_key: auth_key.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Fetch a quote for the given trade parameters.
    ///
    /// The reply is immutable once fetched; a re-fetch may carry a
    /// different `secretsCount` and restarts commitment construction.
    pub async fn get_quote(&self, params: &QuoteParams) -> ApiResult<Quote> {
        info!(
            src_chain = %params.src_chain_id,
            dst_chain = %params.dst_chain_id,
            amount = %params.amount,
            "Requesting quote"
        );

        let request = self.client.get(self.url(QUOTE_PATH)).query(params);
        let raw = self.execute(request).await?;

        let quote = Quote::from_value(raw, params.src_chain_id)
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        debug!(quote_id = ?quote.quote_id, preset = %quote.recommended_preset, "Quote received");
        Ok(quote)
    }

    /// Create the order server-side from a quote and the assembled request.
    pub async fn create_order(
        &self,
        quote: &Quote,
        order: &OrderRequest,
    ) -> ApiResult<PreparedOrder> {
        info!(
            maker = %order.maker_address,
            fills = order.secret_hashes.len(),
            "Creating order"
        );

        let body = CreateOrderBody {
            quote: &quote.raw,
            order,
        };
        let request = self.client.post(self.url(CREATE_ORDER_PATH)).json(&body);
        let raw = self.execute(request).await?;

        let prepared: PreparedOrder =
            serde_json::from_value(raw).map_err(|e| ApiError::Decode(e.to_string()))?;

        info!(order_hash = %prepared.hash, quote_id = %prepared.quote_id, "Order created");
        Ok(prepared)
    }

    /// Submit a created order for execution.
    pub async fn submit_order(
        &self,
        src_chain_id: ChainId,
        prepared: &PreparedOrder,
        secret_hashes: &[SecretHash],
    ) -> ApiResult<OrderSubmission> {
        info!(order_hash = %prepared.hash, src_chain = %src_chain_id, "Submitting order");

        let body = SubmitOrderBody {
            src_chain_id,
            order: &prepared.order,
            quote_id: &prepared.quote_id,
            secret_hashes,
        };
        let request = self.client.post(self.url(SUBMIT_ORDER_PATH)).json(&body);
        let raw = self.execute(request).await?;

        info!(order_hash = %prepared.hash, "Order submitted");
        Ok(OrderSubmission(raw))
    }

    /// Send a request and decode the JSON reply, capturing the service's
    /// structured error body on non-success statuses.
    async fn execute(&self, request: RequestBuilder) -> ApiResult<Value> {
        let response = request
            .bearer_auth(&self.auth_key)
            .send()
            .await
            .map_err(|e| ApiError::Http(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Http(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Build the error for a non-success status, keeping the structured body
/// when the service sent one.
fn status_error(status: StatusCode, body: &str) -> ApiError {
    let payload = serde_json::from_str::<Value>(body).ok().or_else(|| {
        let trimmed = body.trim();
        (!trimmed.is_empty()).then(|| Value::String(trimmed.to_string()))
    });
    ApiError::Status {
        status: status.as_u16(),
        payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};
    use serde_json::json;
    use xswap_commit::{HashLock, Secret, SecretVault};
    use xswap_core::PresetKind;

    #[test]
    fn test_status_error_parses_structured_body() {
        let err = status_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Bad Request","description":"invalid hash lock"}"#,
        );
        let payload = err.remote_payload().unwrap();
        assert_eq!(payload["description"], json!("invalid hash lock"));
    }

    #[test]
    fn test_status_error_keeps_plain_text_body() {
        let err = status_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(
            err.remote_payload(),
            Some(&Value::String("upstream down".to_string()))
        );
    }

    #[test]
    fn test_status_error_without_body() {
        let err = status_error(StatusCode::UNAUTHORIZED, "");
        assert!(err.remote_payload().is_none());
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_submit_body_wire_shape() {
        let secrets = SecretVault::new().generate(1);
        let hashes: Vec<SecretHash> = secrets.iter().map(Secret::hash).collect();
        let body = SubmitOrderBody {
            src_chain_id: ChainId::BASE,
            order: &json!({ "salt": "1" }),
            quote_id: "q-1",
            secret_hashes: &hashes,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["srcChainId"], json!(8453));
        assert_eq!(value["quoteId"], json!("q-1"));
        assert_eq!(value["order"]["salt"], json!("1"));
        assert_eq!(value["secretHashes"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_create_body_passes_quote_verbatim() {
        let raw = json!({
            "quoteId": "q-2",
            "presets": { "fast": { "secretsCount": 1 } },
            "opaque": { "field": 42 }
        });
        let quote = Quote::from_value(raw.clone(), ChainId::BASE).unwrap();
        let secrets = SecretVault::new().generate(1);
        let order = OrderRequest::assemble(
            &quote,
            Address::ZERO,
            HashLock::build(&secrets).unwrap(),
            secrets.iter().map(Secret::hash).collect(),
            PresetKind::Fast,
            None,
            None,
        )
        .unwrap();

        let body = CreateOrderBody {
            quote: &quote.raw,
            order: &order,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["quote"], raw);
        assert_eq!(value["order"]["makerAddress"], json!(Address::ZERO.to_string()));
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = SwapApiClient::new("https://api.example.dev/fusion-plus/", "key").unwrap();
        assert_eq!(
            client.url(QUOTE_PATH),
            "https://api.example.dev/fusion-plus/quoter/v1.0/quote/receive"
        );
    }

    #[test]
    fn test_quote_params_as_query() {
        let params = QuoteParams {
            src_chain_id: ChainId::BASE,
            dst_chain_id: ChainId::ARBITRUM,
            src_token_address: Address::ZERO,
            dst_token_address: Address::ZERO,
            amount: U256::from(10u8),
            enable_estimate: true,
            wallet_address: Address::ZERO,
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["amount"], json!("10"));
        assert_eq!(value["walletAddress"], json!(Address::ZERO.to_string()));
    }
}
