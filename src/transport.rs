//! Action transport: encode, size-check, sign, send, decode.
//!
//! Actions and receipts are length-delimited protobuf. The size bound is
//! checked on the encoded action and again on the signed bytes, and nothing
//! is sent when either check fails.

use std::time::Duration;

use async_trait::async_trait;
use prost::Message;
use reqwest::header::{HeaderValue, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::client::ClientConfig;
use crate::error::{Result, SdkError};
use crate::proto::{Action, Receipt};
use crate::receipt::check_receipt;
use crate::signing::{sign_action, Signing};

const ACTION_PATH: &str = "/action";
const TIMESTAMP_PATH: &str = "/timestamp";
const BACKOFF_BASE_MS: u64 = 100;
const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Delivers signed action bytes to the engine and returns the raw reply.
#[async_trait]
pub trait ActionTransport: Send + Sync {
    async fn send(&self, signed: Vec<u8>) -> Result<Vec<u8>>;
}

// =============================================================================
// Framing
// =============================================================================

pub fn encode_action(action: &Action) -> Vec<u8> {
    action.encode_length_delimited_to_vec()
}

/// Decodes the framed action at the front of `bytes`. Signed requests carry
/// the auth tag after the frame, so trailing bytes are ignored here.
pub fn decode_action(bytes: &[u8]) -> Result<Action> {
    Ok(Action::decode_length_delimited(bytes)?)
}

pub fn encode_receipt(receipt: &Receipt) -> Vec<u8> {
    receipt.encode_length_delimited_to_vec()
}

/// Decodes a receipt response. The frame must span the whole buffer.
pub fn decode_receipt(bytes: &[u8]) -> Result<Receipt> {
    let mut body = bytes;
    let len = prost::encoding::decode_varint(&mut body)
        .map_err(|e| SdkError::Decode(format!("invalid receipt: {}", e)))?;
    if len != body.len() as u64 {
        return Err(SdkError::Decode(format!(
            "invalid receipt: frame declares {} bytes but {} follow",
            len,
            body.len()
        )));
    }
    Receipt::decode(body).map_err(|e| SdkError::Decode(format!("invalid receipt: {}", e)))
}

fn check_size(size: usize, max: usize) -> Result<()> {
    if size > max {
        return Err(SdkError::SizeLimit { size, max });
    }
    Ok(())
}

/// Sign and submit `action`, returning the engine's receipt.
///
/// Error receipts are turned into `SdkError::Engine` naming `description`;
/// narrowing a successful receipt is left to [`crate::receipt::expect_receipt`].
pub async fn send_action(
    transport: &dyn ActionTransport,
    signing: Signing<'_>,
    action: &Action,
    max_size: usize,
    description: &str,
) -> Result<Receipt> {
    let encoded = encode_action(action);
    check_size(encoded.len(), max_size)?;

    let signed = sign_action(&encoded, signing).await?;
    check_size(signed.len(), max_size)?;

    debug!(
        "Sending {} action: {} bytes encoded, {} bytes signed ({} key)",
        description,
        encoded.len(),
        signed.len(),
        signing.mode()
    );

    let response = transport.send(signed).await?;
    let receipt = decode_receipt(&response)?;
    check_receipt(&receipt, description)?;

    debug!("{} accepted as action {}", description, receipt.action_id);
    Ok(receipt)
}

// =============================================================================
// HTTP transport
// =============================================================================

/// Posts signed actions to the Nord web server as `application/octet-stream`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    max_retries: u32,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SdkError::Config(format!("Failed to build HTTP client: {}", e)))?;

        info!("Nord HTTP transport targeting {}", config.web_server_url);

        Ok(Self {
            client,
            base_url: config.web_server_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Engine's current timestamp, usable as an action's logical "now".
    pub async fn server_timestamp(&self) -> Result<i64> {
        let url = format!("{}{}", self.base_url, TIMESTAMP_PATH);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SdkError::Transport(format!(
                "Failed to fetch timestamp: {}",
                response.status()
            )));
        }

        Ok(response.json::<i64>().await?)
    }
}

fn retry_delay(attempt: u32, retry_after: Option<&HeaderValue>) -> Duration {
    let backoff = Duration::from_millis(BACKOFF_BASE_MS.saturating_mul(1 << attempt.min(16)));
    retry_after
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs).min(MAX_RETRY_AFTER))
        .map_or(backoff, |hinted| hinted.max(backoff))
}

#[async_trait]
impl ActionTransport for HttpTransport {
    async fn send(&self, signed: Vec<u8>) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, ACTION_PATH);
        let mut attempt = 0;

        loop {
            let response = self
                .client
                .post(&url)
                .header(CONTENT_TYPE, "application/octet-stream")
                .body(signed.clone())
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                return Ok(response.bytes().await?.to_vec());
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt < self.max_retries {
                    let delay = retry_delay(attempt, response.headers().get(RETRY_AFTER));
                    warn!(
                        "Rate limited by {}, retrying in {:?} ({}/{})",
                        url,
                        delay,
                        attempt + 1,
                        self.max_retries
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                return Err(SdkError::RateLimited(format!(
                    "{} after {} retries",
                    status, self.max_retries
                )));
            }

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<unreadable body: {}>", e),
            };
            return Err(SdkError::Transport(format!("{}: {}", status, body)));
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MockTransport;
    use super::*;
    use crate::action::create_action;
    use crate::keypair::NordKeypair;
    use crate::proto::{self, action::Kind, atomic_subaction_kind::Inner, receipt, ErrorCode};
    use crate::types::MAX_ACTION_SIZE;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn acl() -> Vec<u8> {
        vec![7u8; 32]
    }

    fn quote() -> Option<proto::QuoteSize> {
        Some(proto::QuoteSize { size: 3, price: 4 })
    }

    fn fee() -> Option<proto::FeeTierConfig> {
        Some(proto::FeeTierConfig {
            maker_fee_ppm: 100,
            taker_fee_ppm: 250,
        })
    }

    fn key() -> Option<proto::TriggerKey> {
        Some(proto::TriggerKey {
            kind: proto::TriggerKind::TakeProfit as i32,
            side: proto::Side::Ask as i32,
        })
    }

    /// One or more payloads per action tag, covering optional fields both ways.
    fn catalogue() -> Vec<Kind> {
        vec![
            Kind::CreateSession(proto::CreateSession {
                user_pubkey: vec![1u8; 32],
                session_pubkey: vec![2u8; 32],
                expiry_timestamp: 1_700_000_000,
            }),
            Kind::RevokeSession(proto::RevokeSession { session_id: 5 }),
            Kind::PlaceOrder(proto::PlaceOrder {
                session_id: 5,
                market_id: 2,
                side: proto::Side::Bid as i32,
                fill_mode: proto::FillMode::PostOnly as i32,
                is_reduce_only: true,
                price: 10_000,
                size: 25,
                quote_size: quote(),
                sender_account_id: Some(3),
                client_order_id: Some(u64::MAX),
            }),
            Kind::PlaceOrder(proto::PlaceOrder {
                session_id: 5,
                market_id: 0,
                side: proto::Side::Ask as i32,
                fill_mode: proto::FillMode::Limit as i32,
                is_reduce_only: false,
                price: 1,
                size: 0,
                quote_size: None,
                sender_account_id: None,
                client_order_id: None,
            }),
            Kind::CancelOrderById(proto::CancelOrderById {
                session_id: 5,
                order_id: 88,
                sender_account_id: None,
            }),
            Kind::Withdraw(proto::Withdraw {
                session_id: 5,
                token_id: 0,
                amount: 1_000_000,
                dest_pubkey: Some(vec![3u8; 32]),
            }),
            Kind::Transfer(proto::Transfer {
                session_id: 5,
                from_account_id: 1,
                token_id: 0,
                amount: 42,
                to_account_id: None,
            }),
            Kind::Atomic(proto::Atomic {
                session_id: 5,
                account_id: Some(0),
                actions: vec![
                    proto::AtomicSubactionKind {
                        inner: Some(Inner::CancelOrder(proto::CancelOrder { order_id: 1 })),
                    },
                    proto::AtomicSubactionKind {
                        inner: Some(Inner::TradeOrPlace(proto::TradeOrPlace {
                            market_id: 1,
                            side: proto::Side::Bid as i32,
                            fill_mode: proto::FillMode::FillOrKill as i32,
                            is_reduce_only: false,
                            price: 9,
                            size: 9,
                            quote_size: None,
                            client_order_id: Some(0),
                        })),
                    },
                ],
            }),
            Kind::AddTrigger(proto::AddTrigger {
                session_id: 5,
                market_id: 1,
                key: key(),
                prices: Some(proto::TriggerPrices {
                    trigger_price: 100,
                    limit_price: Some(99),
                }),
                account_id: None,
            }),
            Kind::RemoveTrigger(proto::RemoveTrigger {
                session_id: 5,
                market_id: 1,
                key: key(),
                account_id: Some(4),
            }),
            Kind::CreateToken(proto::CreateToken {
                acl_pubkey: acl(),
                token_decimals: 6,
                weight_bps: 9_000,
                view_symbol: "USDC".to_string(),
                oracle_symbol: "USDC/USD".to_string(),
                sol_addr: vec![4u8; 32],
            }),
            Kind::CreateMarket(proto::CreateMarket {
                acl_pubkey: acl(),
                size_decimals: 4,
                price_decimals: 2,
                imf_bps: 500,
                cmf_bps: 300,
                mmf_bps: 250,
                market_type: proto::MarketType::Perpetual as i32,
                view_symbol: "BTCUSDC".to_string(),
                oracle_symbol: "BTC/USD".to_string(),
                base_token_id: 1,
            }),
            Kind::UpdateAcl(proto::UpdateAcl {
                acl_pubkey: acl(),
                target_pubkey: vec![5u8; 32],
                roles_mask: 0b11,
                roles_value: 0b01,
            }),
            Kind::Pause(proto::Pause { acl_pubkey: acl() }),
            Kind::Unpause(proto::Unpause { acl_pubkey: acl() }),
            Kind::FreezeMarket(proto::FreezeMarket {
                acl_pubkey: acl(),
                market_id: 3,
            }),
            Kind::UnfreezeMarket(proto::UnfreezeMarket {
                acl_pubkey: acl(),
                market_id: 3,
            }),
            Kind::AddFeeTier(proto::AddFeeTier {
                acl_pubkey: acl(),
                config: fee(),
            }),
            Kind::UpdateFeeTier(proto::UpdateFeeTier {
                acl_pubkey: acl(),
                id: 1,
                config: fee(),
            }),
            Kind::UpdateAccountsTier(proto::UpdateAccountsTier {
                acl_pubkey: acl(),
                accounts: vec![1, 2, 300_000],
                tier_id: 2,
            }),
            Kind::PythSetWormholeGuardians(proto::PythSetWormholeGuardians {
                acl_pubkey: acl(),
                guardian_set_index: 4,
                addresses: vec![vec![0xab; 20], vec![0xcd; 20]],
            }),
            Kind::PythSetSymbolFeed(proto::PythSetSymbolFeed {
                acl_pubkey: acl(),
                oracle_symbol: "ETH/USD".to_string(),
                price_feed_id: vec![0xef; 32],
            }),
        ]
    }

    fn receipt_bytes(kind: receipt::Kind) -> Vec<u8> {
        encode_receipt(&Receipt {
            action_id: 77,
            kind: Some(kind),
        })
    }

    #[test]
    fn test_every_action_tag_roundtrips() {
        for (i, kind) in catalogue().into_iter().enumerate() {
            let action = create_action(-5 + i as i64, i as u32, kind);
            let bytes = encode_action(&action);
            let decoded = decode_action(&bytes).unwrap();
            assert_eq!(decoded, action, "tag #{} changed through decode", i);
            assert_eq!(encode_action(&decoded), bytes, "tag #{} not byte-stable", i);
        }
    }

    #[tokio::test]
    async fn test_signed_request_and_receipt() {
        let keypair = NordKeypair::generate();
        let transport = MockTransport::default();
        transport.push(Ok(receipt_bytes(receipt::Kind::CancelOrderResult(
            proto::CancelOrderResult {
                order_id: 88,
                account_id: 1,
            },
        ))));

        let action = create_action(1, 2, catalogue().swap_remove(4));
        let receipt = send_action(
            &transport,
            Signing::Session(&keypair),
            &action,
            MAX_ACTION_SIZE,
            "cancel order",
        )
        .await
        .unwrap();
        assert_eq!(receipt.action_id, 77);

        let encoded = encode_action(&action);
        let sent = transport.request(0);
        assert_eq!(&sent[..encoded.len()], encoded.as_slice());
        assert!(keypair.verify(&encoded, &sent[encoded.len()..]));
    }

    #[tokio::test]
    async fn test_oversized_action_never_sent() {
        let keypair = NordKeypair::generate();
        let transport = MockTransport::default();
        let action = create_action(
            0,
            0,
            Kind::UpdateAccountsTier(proto::UpdateAccountsTier {
                acl_pubkey: acl(),
                accounts: (100_000..100_400).collect(),
                tier_id: 1,
            }),
        );
        assert!(encode_action(&action).len() > MAX_ACTION_SIZE);

        let err = send_action(
            &transport,
            Signing::Wallet(&keypair),
            &action,
            MAX_ACTION_SIZE,
            "update accounts tier",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SdkError::SizeLimit { max: MAX_ACTION_SIZE, .. }));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_signature_pushing_past_bound_never_sent() {
        let keypair = NordKeypair::generate();
        let transport = MockTransport::default();
        let action = create_action(0, 0, catalogue().swap_remove(1));
        let encoded_len = encode_action(&action).len();

        let err = send_action(
            &transport,
            Signing::Session(&keypair),
            &action,
            encoded_len + 10,
            "revoke session",
        )
        .await
        .unwrap_err();
        match err {
            SdkError::SizeLimit { size, max } => {
                assert_eq!(size, encoded_len + 64);
                assert_eq!(max, encoded_len + 10);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_error_receipt_names_action() {
        let keypair = NordKeypair::generate();
        let transport = MockTransport::default();
        transport.push(Ok(receipt_bytes(receipt::Kind::Err(
            ErrorCode::InsufficientMargin as i32,
        ))));

        let action = create_action(0, 0, catalogue().swap_remove(2));
        let err = send_action(
            &transport,
            Signing::Session(&keypair),
            &action,
            MAX_ACTION_SIZE,
            "place order",
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not place order, reason: InsufficientMargin"
        );
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let keypair = NordKeypair::generate();
        let transport = MockTransport::default();
        transport.push(Err(SdkError::Transport("502 Bad Gateway".to_string())));

        let action = create_action(0, 0, catalogue().swap_remove(1));
        let err = send_action(
            &transport,
            Signing::Wallet(&keypair),
            &action,
            MAX_ACTION_SIZE,
            "revoke session",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SdkError::Transport(_)));
    }

    #[tokio::test]
    async fn test_garbage_response_is_decode_error() {
        let keypair = NordKeypair::generate();
        let transport = MockTransport::default();
        transport.push(Ok(vec![0xff, 0xff, 0xff]));

        let action = create_action(0, 0, catalogue().swap_remove(1));
        let err = send_action(
            &transport,
            Signing::Wallet(&keypair),
            &action,
            MAX_ACTION_SIZE,
            "revoke session",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SdkError::Decode(_)));
    }

    #[test]
    fn test_retry_delay_grows_and_honours_hint() {
        assert_eq!(retry_delay(0, None), Duration::from_millis(100));
        assert_eq!(retry_delay(3, None), Duration::from_millis(800));
        let hint = HeaderValue::from_static("2");
        assert_eq!(retry_delay(0, Some(&hint)), Duration::from_secs(2));
    }

    #[test]
    fn test_retry_after_hint_is_capped() {
        let hint = HeaderValue::from_static("999999999");
        assert_eq!(retry_delay(0, Some(&hint)), MAX_RETRY_AFTER);
    }

    #[test]
    fn test_receipt_frame_must_span_response() {
        let bytes = receipt_bytes(receipt::Kind::Paused(proto::Paused {}));
        assert_eq!(decode_receipt(&bytes).unwrap().action_id, 77);

        let mut padded = bytes.clone();
        padded.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let err = decode_receipt(&padded).unwrap_err();
        assert!(matches!(err, SdkError::Decode(_)));

        assert!(decode_receipt(&bytes[..bytes.len() - 1]).is_err());
        assert!(decode_receipt(&[]).is_err());
    }

    // =========================================================================
    // HTTP transport against a local stub server
    // =========================================================================

    async fn read_request(socket: &mut TcpStream) -> Vec<u8> {
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= end + 4 + body_len {
                    break;
                }
            }
        }
        request
    }

    /// Answers one connection per canned `(status, body)` and records each
    /// raw request as `(lowercased head, body)`.
    async fn stub_server(
        replies: Vec<(u16, Vec<u8>)>,
    ) -> (String, Arc<Mutex<Vec<(String, Vec<u8>)>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&seen);

        tokio::spawn(async move {
            for (status, body) in replies {
                let (mut socket, _) = listener.accept().await.unwrap();
                let raw = read_request(&mut socket).await;
                let end = raw.windows(4).position(|w| w == b"\r\n\r\n").unwrap();
                let head = String::from_utf8_lossy(&raw[..end]).to_lowercase();
                recorded.lock().unwrap().push((head, raw[end + 4..].to_vec()));

                let mut reply = format!(
                    "HTTP/1.1 {} Stub\r\ncontent-length: {}\r\nretry-after: 0\r\nconnection: close\r\n\r\n",
                    status,
                    body.len()
                )
                .into_bytes();
                reply.extend(body);
                socket.write_all(&reply).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), seen)
    }

    fn http(url: &str, max_retries: u32) -> HttpTransport {
        HttpTransport::new(&ClientConfig::new(url).with_max_retries(max_retries)).unwrap()
    }

    #[tokio::test]
    async fn test_http_retries_rate_limit_then_succeeds() {
        let receipt = receipt_bytes(receipt::Kind::Paused(proto::Paused {}));
        let (url, seen) = stub_server(vec![(429, vec![]), (200, receipt.clone())]).await;

        let response = http(&url, 2).send(vec![1, 2, 3]).await.unwrap();
        assert_eq!(response, receipt);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        for (head, body) in seen.iter() {
            assert!(head.starts_with("post /action http/1.1"));
            assert!(head.contains("content-type: application/octet-stream"));
            assert_eq!(body, &vec![1, 2, 3]);
        }
    }

    #[tokio::test]
    async fn test_http_rate_limit_exhausts_retries() {
        let (url, seen) = stub_server(vec![(429, vec![]), (429, vec![])]).await;

        let err = http(&url, 1).send(vec![9]).await.unwrap_err();
        assert!(matches!(err, SdkError::RateLimited(_)));
        assert!(err.is_transient());
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_http_error_status_is_transport_error() {
        let (url, seen) = stub_server(vec![(500, b"boom".to_vec())]).await;
        let keypair = NordKeypair::generate();
        let action = create_action(0, 0, catalogue().swap_remove(1));

        let err = send_action(
            &http(&url, 3),
            Signing::Wallet(&keypair),
            &action,
            MAX_ACTION_SIZE,
            "revoke session",
        )
        .await
        .unwrap_err();

        match err {
            SdkError::Transport(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("boom"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
