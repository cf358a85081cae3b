//! Privileged operations, signed by an ACL-holding wallet key.

use tracing::info;

use crate::action::{
    add_fee_tier_action, create_market_action, create_token_action, freeze_market_action,
    pause_action, pyth_set_symbol_feed_action, pyth_set_wormhole_guardians_action,
    unfreeze_market_action, unpause_action, update_accounts_tier_action, update_acl_action,
    update_fee_tier_action,
};
use crate::client::{ClientConfig, TimestampSource};
use crate::error::Result;
use crate::keypair::NordKeypair;
use crate::session::NonceCounter;
use crate::proto::{self, Action};
use crate::receipt::{expect_receipt, ExpectedReceipt};
use crate::signing::{Signing, WalletSigner};
use crate::transport::{send_action, ActionTransport, HttpTransport};
use crate::types::{ActionOutcome, CreateMarketParams, CreateTokenParams, Pubkey};

pub struct NordAdmin<T: ActionTransport = HttpTransport> {
    config: ClientConfig,
    transport: T,
    acl: Box<dyn WalletSigner>,
    nonce: NonceCounter,
}

impl NordAdmin<HttpTransport> {
    pub fn new(acl: NordKeypair, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport, acl, config))
    }

    /// Stamp future admin actions with the engine's clock. Returns the
    /// measured offset in seconds.
    pub async fn sync_clock(&mut self) -> Result<i64> {
        let server_now = self.transport.server_timestamp().await?;
        let offset = TimestampSource::offset_to(server_now)?;
        self.config.timestamp_source = TimestampSource::Offset(offset);
        info!("Admin clock synced to engine, offset {}s", offset);
        Ok(offset)
    }
}

impl<T: ActionTransport> NordAdmin<T> {
    pub fn with_transport(
        transport: T,
        acl: impl WalletSigner + 'static,
        config: ClientConfig,
    ) -> Self {
        info!("NordAdmin initialized for ACL key: {}", acl.identity());
        Self {
            config,
            transport,
            acl: Box::new(acl),
            nonce: NonceCounter::new(0),
        }
    }

    pub fn acl_pubkey(&self) -> Pubkey {
        self.acl.identity()
    }

    fn now(&self) -> Result<i64> {
        self.config.timestamp_source.now()
    }

    async fn submit<R: ExpectedReceipt>(
        &self,
        action: &Action,
        description: &str,
    ) -> Result<ActionOutcome<R>> {
        info!("Admin: {}", description);
        let receipt = send_action(
            &self.transport,
            Signing::Wallet(self.acl.as_ref()),
            action,
            self.config.max_action_size,
            description,
        )
        .await?;
        expect_receipt(receipt, description)
    }

    pub async fn create_token(
        &self,
        params: &CreateTokenParams,
    ) -> Result<ActionOutcome<proto::InsertTokenResult>> {
        let action = create_token_action(
            self.now()?,
            self.nonce.next()?,
            &self.acl_pubkey(),
            params,
        )?;
        self.submit(&action, "create token").await
    }

    pub async fn create_market(
        &self,
        params: &CreateMarketParams,
    ) -> Result<ActionOutcome<proto::InsertMarketResult>> {
        let action = create_market_action(
            self.now()?,
            self.nonce.next()?,
            &self.acl_pubkey(),
            params,
        )?;
        self.submit(&action, "create market").await
    }

    pub async fn update_acl(
        &self,
        target_pubkey: &Pubkey,
        roles_mask: u32,
        roles_value: u32,
    ) -> Result<ActionOutcome<proto::AclUpdated>> {
        let action = update_acl_action(
            self.now()?,
            self.nonce.next()?,
            &self.acl_pubkey(),
            target_pubkey,
            roles_mask,
            roles_value,
        )?;
        self.submit(&action, "update acl").await
    }

    pub async fn pause(&self) -> Result<ActionOutcome<proto::Paused>> {
        let action = pause_action(self.now()?, self.nonce.next()?, &self.acl_pubkey());
        self.submit(&action, "pause").await
    }

    pub async fn unpause(&self) -> Result<ActionOutcome<proto::Unpaused>> {
        let action = unpause_action(self.now()?, self.nonce.next()?, &self.acl_pubkey());
        self.submit(&action, "unpause").await
    }

    pub async fn freeze_market(
        &self,
        market_id: u32,
    ) -> Result<ActionOutcome<proto::MarketFreezeUpdated>> {
        let action = freeze_market_action(
            self.now()?,
            self.nonce.next()?,
            &self.acl_pubkey(),
            market_id,
        );
        self.submit(&action, "freeze market").await
    }

    pub async fn unfreeze_market(
        &self,
        market_id: u32,
    ) -> Result<ActionOutcome<proto::MarketFreezeUpdated>> {
        let action = unfreeze_market_action(
            self.now()?,
            self.nonce.next()?,
            &self.acl_pubkey(),
            market_id,
        );
        self.submit(&action, "unfreeze market").await
    }

    pub async fn add_fee_tier(
        &self,
        maker_fee_ppm: u32,
        taker_fee_ppm: u32,
    ) -> Result<ActionOutcome<proto::FeeTierAdded>> {
        let action = add_fee_tier_action(
            self.now()?,
            self.nonce.next()?,
            &self.acl_pubkey(),
            maker_fee_ppm,
            taker_fee_ppm,
        )?;
        self.submit(&action, "add fee tier").await
    }

    pub async fn update_fee_tier(
        &self,
        tier_id: u32,
        maker_fee_ppm: u32,
        taker_fee_ppm: u32,
    ) -> Result<ActionOutcome<proto::FeeTierUpdated>> {
        let action = update_fee_tier_action(
            self.now()?,
            self.nonce.next()?,
            &self.acl_pubkey(),
            tier_id,
            maker_fee_ppm,
            taker_fee_ppm,
        )?;
        self.submit(&action, "update fee tier").await
    }

    pub async fn update_accounts_tier(
        &self,
        accounts: &[u32],
        tier_id: u32,
    ) -> Result<ActionOutcome<proto::AccountsTierUpdated>> {
        let action = update_accounts_tier_action(
            self.now()?,
            self.nonce.next()?,
            &self.acl_pubkey(),
            accounts,
            tier_id,
        )?;
        self.submit(&action, "update accounts tier").await
    }

    pub async fn pyth_set_wormhole_guardians(
        &self,
        guardian_set_index: u32,
        addresses: &[String],
    ) -> Result<ActionOutcome<proto::GuardianSetUpdated>> {
        let action = pyth_set_wormhole_guardians_action(
            self.now()?,
            self.nonce.next()?,
            &self.acl_pubkey(),
            guardian_set_index,
            addresses,
        )?;
        self.submit(&action, "set wormhole guardians").await
    }

    pub async fn pyth_set_symbol_feed(
        &self,
        oracle_symbol: &str,
        price_feed_id: &str,
    ) -> Result<ActionOutcome<proto::SymbolFeedUpdated>> {
        let action = pyth_set_symbol_feed_action(
            self.now()?,
            self.nonce.next()?,
            &self.acl_pubkey(),
            oracle_symbol,
            price_feed_id,
        )?;
        self.submit(&action, "set symbol feed").await
    }
}
