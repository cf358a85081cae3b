//! Main NordClient facade for the SDK.
//!
//! Provides a unified interface for all user trading operations.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::action::{
    add_trigger_action, cancel_order_action, create_session_action, place_order_action,
    remove_trigger_action, revoke_session_action, transfer_action, withdraw_action,
};
use crate::atomic::{atomic_action, validate_batch_len};
use crate::error::{Result, SdkError};
use crate::keypair::NordKeypair;
use crate::proto::{self, Action};
use crate::receipt::{expect_receipt, ExpectedReceipt};
use crate::session::Session;
use crate::signing::{Signing, WalletSigner};
use crate::transport::{send_action, ActionTransport, HttpTransport};
use crate::types::{
    ActionOutcome, AtomicSubaction, OrderParams, Pubkey, TransferParams, TriggerParams,
    WithdrawParams, MAX_ACTION_SIZE,
};

pub const DEFAULT_WEB_SERVER_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration for the Nord client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Nord web server base URL (e.g., "http://localhost:3000")
    pub web_server_url: String,
    /// Bound on encoded and signed action size. Keep in sync with the engine.
    pub max_action_size: usize,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Retries on HTTP 429 before giving up.
    pub max_retries: u32,
    /// Where the logical "now" stamped on each action comes from.
    pub timestamp_source: TimestampSource,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            web_server_url: std::env::var("NORD_WEB_SERVER_URL")
                .unwrap_or_else(|_| DEFAULT_WEB_SERVER_URL.to_string()),
            max_action_size: MAX_ACTION_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            timestamp_source: TimestampSource::Local,
        }
    }
}

impl ClientConfig {
    pub fn new(web_server_url: impl Into<String>) -> Self {
        Self {
            web_server_url: web_server_url.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_max_action_size(mut self, max_action_size: usize) -> Self {
        self.max_action_size = max_action_size;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_timestamp_source(mut self, timestamp_source: TimestampSource) -> Self {
        self.timestamp_source = timestamp_source;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.web_server_url.is_empty() {
            return Err(SdkError::Config("web_server_url cannot be empty".to_string()));
        }
        if !self.web_server_url.starts_with("http://")
            && !self.web_server_url.starts_with("https://")
        {
            return Err(SdkError::Config(
                "web_server_url must start with http:// or https://".to_string(),
            ));
        }
        if self.max_action_size == 0 {
            return Err(SdkError::Config(
                "max_action_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Current local unix time in seconds.
pub(crate) fn unix_timestamp() -> Result<i64> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| SdkError::Config(format!("system clock before unix epoch: {}", e)))?
        .as_secs();
    i64::try_from(secs).map_err(|e| SdkError::Config(e.to_string()))
}

/// Source of the `current_timestamp` stamped on every action.
#[derive(Clone, Default)]
pub enum TimestampSource {
    /// Local system clock.
    #[default]
    Local,
    /// Local clock shifted by a fixed number of seconds, e.g. the measured
    /// skew against the engine (see `NordClient::sync_clock`).
    Offset(i64),
    /// Caller-supplied clock.
    Custom(Arc<dyn Fn() -> i64 + Send + Sync>),
}

impl TimestampSource {
    pub fn custom(clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        TimestampSource::Custom(Arc::new(clock))
    }

    /// Unix seconds to stamp on the next action.
    pub fn now(&self) -> Result<i64> {
        match self {
            TimestampSource::Local => unix_timestamp(),
            TimestampSource::Offset(offset) => unix_timestamp()?
                .checked_add(*offset)
                .ok_or_else(|| SdkError::Config(format!("clock offset {} overflows", offset))),
            TimestampSource::Custom(clock) => Ok(clock()),
        }
    }

    /// Offset that maps the local clock onto `server_now`.
    pub(crate) fn offset_to(server_now: i64) -> Result<i64> {
        server_now
            .checked_sub(unix_timestamp()?)
            .ok_or_else(|| SdkError::Config(format!("server time {} out of range", server_now)))
    }
}

impl fmt::Debug for TimestampSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampSource::Local => f.write_str("Local"),
            TimestampSource::Offset(offset) => f.debug_tuple("Offset").field(offset).finish(),
            TimestampSource::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// The main Nord SDK client.
///
/// Session creation and revocation are signed by the wallet key; every
/// other action is signed by the session key once a session exists.
pub struct NordClient<T: ActionTransport = HttpTransport> {
    config: ClientConfig,
    transport: T,
    wallet: Box<dyn WalletSigner>,
    session: Session,
}

impl NordClient<HttpTransport> {
    /// Create a client talking HTTP to `config.web_server_url`, with a fresh
    /// random session key.
    pub fn new(wallet: NordKeypair, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(
            transport,
            wallet,
            NordKeypair::generate(),
            config,
        ))
    }

    /// Engine-side clock, for callers that prefer it over the local one.
    pub async fn server_timestamp(&self) -> Result<i64> {
        self.transport.server_timestamp().await
    }

    /// Stamp future actions with the engine's clock: measures the skew once
    /// and switches to `TimestampSource::Offset`. Returns the offset.
    pub async fn sync_clock(&mut self) -> Result<i64> {
        let offset = TimestampSource::offset_to(self.server_timestamp().await?)?;
        self.config.timestamp_source = TimestampSource::Offset(offset);
        info!("Clock synced to engine, offset {}s", offset);
        Ok(offset)
    }
}

impl<T: ActionTransport> NordClient<T> {
    pub fn with_transport(
        transport: T,
        wallet: impl WalletSigner + 'static,
        session_keypair: NordKeypair,
        config: ClientConfig,
    ) -> Self {
        info!("NordClient initialized for wallet: {}", wallet.identity());
        Self {
            config,
            transport,
            wallet: Box::new(wallet),
            session: Session::new(session_keypair, 0),
        }
    }

    pub fn wallet_pubkey(&self) -> Pubkey {
        self.wallet.identity()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn submit<R: ExpectedReceipt>(
        &self,
        action: &Action,
        signing: Signing<'_>,
        description: &str,
    ) -> Result<ActionOutcome<R>> {
        let receipt = send_action(
            &self.transport,
            signing,
            action,
            self.config.max_action_size,
            description,
        )
        .await?;
        expect_receipt(receipt, description)
    }

    fn now(&self) -> Result<i64> {
        self.config.timestamp_source.now()
    }

    fn session_signing(&self) -> Signing<'_> {
        Signing::Session(self.session.keypair())
    }

    fn wallet_signing(&self) -> Signing<'_> {
        Signing::Wallet(self.wallet.as_ref())
    }

    // =========================================================================
    // Sessions (wallet-signed)
    // =========================================================================

    /// Register this client's session key with the engine.
    ///
    /// `expiry_timestamp` defaults to now + `SESSION_TTL`.
    pub async fn create_session(
        &mut self,
        expiry_timestamp: Option<i64>,
    ) -> Result<ActionOutcome<proto::CreateSessionResult>> {
        let action = create_session_action(
            self.now()?,
            self.session.next_nonce()?,
            &self.wallet.identity(),
            &self.session.pubkey(),
            expiry_timestamp,
        )?;

        info!("Creating session for key {}", self.session.pubkey());

        let outcome: ActionOutcome<proto::CreateSessionResult> = self
            .submit(&action, self.wallet_signing(), "create session")
            .await?;
        self.session.set_session_id(outcome.result.session_id);

        info!("Session {} created", outcome.result.session_id);
        Ok(outcome)
    }

    pub async fn revoke_session(&mut self) -> Result<ActionOutcome<proto::SessionRevoked>> {
        let session_id = self.session.require_session_id()?;
        let action =
            revoke_session_action(self.now()?, self.session.next_nonce()?, session_id);

        let outcome = self
            .submit(&action, self.wallet_signing(), "revoke session")
            .await?;
        self.session.clear_session_id();

        info!("Session {} revoked", session_id);
        Ok(outcome)
    }

    // =========================================================================
    // Trading operations (session-signed)
    // =========================================================================

    pub async fn place_order(
        &self,
        params: &OrderParams,
        sender_account_id: Option<u32>,
    ) -> Result<ActionOutcome<proto::PlaceOrderResult>> {
        let session_id = self.session.require_session_id()?;
        let action = place_order_action(
            self.now()?,
            self.session.next_nonce()?,
            session_id,
            sender_account_id,
            params,
        )?;

        info!(
            "Placing {} order on market {}: price={}, size={}",
            params.side, params.market_id, params.price, params.size
        );

        let outcome: ActionOutcome<proto::PlaceOrderResult> = self
            .submit(&action, self.session_signing(), "place order")
            .await?;

        info!(
            "Order placed as action {}, resting id: {:?}, filled: {}",
            outcome.action_id,
            outcome.result.order_id(),
            outcome.result.filled_size()
        );
        Ok(outcome)
    }

    pub async fn cancel_order(
        &self,
        order_id: u64,
        sender_account_id: Option<u32>,
    ) -> Result<ActionOutcome<proto::CancelOrderResult>> {
        let session_id = self.session.require_session_id()?;
        let action = cancel_order_action(
            self.now()?,
            self.session.next_nonce()?,
            session_id,
            order_id,
            sender_account_id,
        );

        info!("Cancelling order {}", order_id);

        self.submit(&action, self.session_signing(), "cancel order")
            .await
    }

    pub async fn withdraw(
        &self,
        params: &WithdrawParams,
    ) -> Result<ActionOutcome<proto::WithdrawResult>> {
        let session_id = self.session.require_session_id()?;
        let action = withdraw_action(
            self.now()?,
            self.session.next_nonce()?,
            session_id,
            params,
        )?;

        info!("Withdrawing {} of token {}", params.amount, params.token_id);

        self.submit(&action, self.session_signing(), "withdraw")
            .await
    }

    pub async fn transfer(
        &self,
        params: &TransferParams,
    ) -> Result<ActionOutcome<proto::TransferResult>> {
        let session_id = self.session.require_session_id()?;
        let action = transfer_action(
            self.now()?,
            self.session.next_nonce()?,
            session_id,
            params,
        )?;

        info!(
            "Transferring {} of token {} from account {}",
            params.amount, params.token_id, params.from_account_id
        );

        self.submit(&action, self.session_signing(), "transfer")
            .await
    }

    /// Submit 1 to 4 place/cancel sub-actions as one atomic action.
    ///
    /// Within a market, cancels must come before trades and placements last.
    /// `results[i]` of the outcome answers `actions[i]`.
    pub async fn atomic(
        &self,
        account_id: Option<u32>,
        actions: &[AtomicSubaction],
    ) -> Result<ActionOutcome<proto::AtomicResult>> {
        validate_batch_len(actions.len())?;
        let session_id = self.session.require_session_id()?;
        let action = atomic_action(
            self.now()?,
            self.session.next_nonce()?,
            session_id,
            account_id,
            actions,
        )?;

        info!("Submitting atomic batch of {} actions", actions.len());

        let outcome: ActionOutcome<proto::AtomicResult> = self
            .submit(&action, self.session_signing(), "execute atomic")
            .await?;

        if outcome.result.results.len() != actions.len() {
            return Err(SdkError::Decode(format!(
                "atomic receipt carries {} results for {} actions",
                outcome.result.results.len(),
                actions.len()
            )));
        }
        Ok(outcome)
    }

    pub async fn add_trigger(
        &self,
        params: &TriggerParams,
    ) -> Result<ActionOutcome<proto::TriggerAdded>> {
        let session_id = self.session.require_session_id()?;
        let action = add_trigger_action(
            self.now()?,
            self.session.next_nonce()?,
            session_id,
            params,
        )?;

        info!(
            "Adding {:?} trigger on market {} at {}",
            params.kind, params.market_id, params.trigger_price
        );

        self.submit(&action, self.session_signing(), "add trigger")
            .await
    }

    pub async fn remove_trigger(
        &self,
        params: &TriggerParams,
    ) -> Result<ActionOutcome<proto::TriggerRemoved>> {
        let session_id = self.session.require_session_id()?;
        let action = remove_trigger_action(
            self.now()?,
            self.session.next_nonce()?,
            session_id,
            params,
        );

        info!(
            "Removing {:?} trigger on market {}",
            params.kind, params.market_id
        );

        self.submit(&action, self.session_signing(), "remove trigger")
            .await
    }
}
