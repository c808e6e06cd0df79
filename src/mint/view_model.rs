//! Mint view-model: refreshes, dependency wiring, and the mint action.
//!
//! DESIGN
//! ======
//! Refreshes are registered against the dependencies they read. Installing a
//! contract handle fires `Contract` (price and supply); a changed wallet
//! address fires `Address` (supply only). Effects fired by one change run
//! concurrently, so price and supply may land in either order.
//!
//! Overlapping supply refreshes are resolved by generation: every refresh
//! takes a ticket and only the newest ticket may write its counts. Installing
//! a new contract invalidates every in-flight refresh.
//!
//! ERROR HANDLING
//! ==============
//! A failed mint is reported to the user and swallowed. A failed refresh is
//! returned to the caller; when it runs as an effect the dispatcher logs it
//! and shows one generic failure toast. Nothing is retried.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::status::{MintButton, MintStatus};
use crate::chain::{DropContract, DropError, TokenRecord, TxReceipt};
use crate::error::ErrorCode;
use crate::notify::{Notifier, PendingToast, Toast};

/// Tokens claimed per mint action. No batch path exists.
pub const MINT_QUANTITY: u32 = 1;

pub const MINTING_MESSAGE: &str = "Minting NFT...";
pub const MINTED_MESSAGE: &str = "Hooray! You just minted a NFT!";
pub const FAILURE_MESSAGE: &str = "Whoops! Something went wrong!";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MintError {
    #[error(transparent)]
    Drop(#[from] DropError),
    /// The drop has no claim condition, so there is no price to show.
    #[error("drop has no active claim condition")]
    NoActiveClaimCondition,
}

impl ErrorCode for MintError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Drop(e) => e.error_code(),
            Self::NoActiveClaimCondition => "E_NO_CLAIM_CONDITION",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Drop(e) => e.retryable(),
            Self::NoActiveClaimCondition => false,
        }
    }
}

/// Result of one mint action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MintOutcome {
    Minted { receipt: TxReceipt, token_id: String, token: TokenRecord },
    Failed { reason: String },
}

/// Inputs whose change re-runs refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    Contract,
    Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effect {
    RefreshPrice,
    RefreshSupply,
}

struct Subscription {
    deps: &'static [Dependency],
    effect: Effect,
}

fn default_subscriptions() -> Vec<Subscription> {
    vec![
        Subscription { deps: &[Dependency::Contract], effect: Effect::RefreshPrice },
        Subscription { deps: &[Dependency::Contract, Dependency::Address], effect: Effect::RefreshSupply },
    ]
}

// =============================================================================
// VIEW-MODEL
// =============================================================================

pub struct MintViewModel {
    status: Mutex<MintStatus>,
    contract: Mutex<Option<Arc<dyn DropContract>>>,
    notifier: Arc<dyn Notifier>,
    subscriptions: Vec<Subscription>,
    /// Bumped on every contract install.
    contract_epoch: AtomicU64,
    /// Bumped on every supply refresh and contract install.
    supply_generation: AtomicU64,
}

impl MintViewModel {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            status: Mutex::new(MintStatus::unknown()),
            contract: Mutex::new(None),
            notifier,
            subscriptions: default_subscriptions(),
            contract_epoch: AtomicU64::new(0),
            supply_generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current status.
    pub fn status(&self) -> MintStatus {
        self.lock_status().clone()
    }

    pub fn button(&self) -> MintButton {
        self.lock_status().button()
    }

    pub fn has_contract(&self) -> bool {
        self.current_contract().is_some()
    }

    /// Install or replace the contract handle. Status resets to unknown
    /// (keeping the connected address) and dependent refreshes run.
    pub async fn set_contract(&self, contract: Option<Arc<dyn DropContract>>) {
        let available = contract.is_some();
        *self
            .contract
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = contract;
        self.contract_epoch.fetch_add(1, Ordering::SeqCst);
        self.supply_generation.fetch_add(1, Ordering::SeqCst);
        self.update(|s| {
            let address = s.connected_address.take();
            *s = MintStatus { connected_address: address, ..MintStatus::unknown() };
        });

        if available {
            self.dispatch(Dependency::Contract).await;
        }
    }

    /// Record the connected wallet address. Refreshes only when it changed.
    pub async fn set_address(&self, address: Option<String>) {
        let changed = {
            let mut status = self.lock_status();
            if status.connected_address == address {
                false
            } else {
                status.connected_address = address;
                true
            }
        };

        if changed {
            self.dispatch(Dependency::Address).await;
        }
    }

    /// Re-sync an already-open page on a fresh load: record the connected
    /// address and re-read price and supply once. A refresh that failed on an
    /// earlier load gets another attempt here.
    pub async fn remount(&self, address: Option<String>) {
        self.lock_status().connected_address = address;
        self.dispatch(Dependency::Contract).await;
    }

    /// Run every effect subscribed to `dependency`. Failures are reported
    /// here, not propagated.
    pub async fn dispatch(&self, dependency: Dependency) {
        let effects: Vec<Effect> = self
            .subscriptions
            .iter()
            .filter(|sub| sub.deps.contains(&dependency))
            .map(|sub| sub.effect)
            .collect();

        let runs = effects.into_iter().map(|effect| async move {
            let result = match effect {
                Effect::RefreshPrice => self.refresh_price().await,
                Effect::RefreshSupply => self.refresh_supply().await,
            };
            if let Err(e) = result {
                self.report(effect, &e);
            }
        });
        futures::future::join_all(runs).await;
    }

    /// Re-read claimed and total supply. No-op without a contract handle.
    ///
    /// # Errors
    ///
    /// Returns a [`MintError`] if either supply query fails. Loading stays set.
    pub async fn refresh_supply(&self) -> Result<(), MintError> {
        let Some(contract) = self.current_contract() else {
            return Ok(());
        };

        let ticket = self.supply_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.update(|s| s.is_loading = true);

        let claimed = contract.get_all_claimed().await?;
        let total = contract.total_supply().await?;

        let mut status = self.lock_status();
        if self.supply_generation.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "mint: discarding stale supply refresh");
            return Ok(());
        }
        status.claimed_count = u64::try_from(claimed.len()).unwrap_or(u64::MAX);
        status.total_supply = total;
        status.is_loading = false;
        Ok(())
    }

    /// Re-read the price of the first claim condition. No-op without a
    /// contract handle.
    ///
    /// # Errors
    ///
    /// Returns [`MintError::NoActiveClaimCondition`] when the drop has no claim
    /// conditions (the placeholder price is kept), or the query error.
    pub async fn refresh_price(&self) -> Result<(), MintError> {
        let Some(contract) = self.current_contract() else {
            return Ok(());
        };
        let epoch = self.contract_epoch.load(Ordering::SeqCst);

        let conditions = contract.claim_conditions().await?;
        let first = conditions
            .into_iter()
            .next()
            .ok_or(MintError::NoActiveClaimCondition)?;

        let mut status = self.lock_status();
        if self.contract_epoch.load(Ordering::SeqCst) == epoch {
            status.unit_price_display = first.display_price;
        }
        Ok(())
    }

    /// Claim one token to the connected address.
    ///
    /// Returns `None` without touching state or notifying when no contract
    /// handle or no connected address is present.
    pub async fn mint(&self) -> Option<MintOutcome> {
        let contract = self.current_contract()?;
        let address = self.lock_status().connected_address.clone()?;

        self.update(|s| s.is_loading = true);
        let pending = PendingToast::show(self.notifier.as_ref(), MINTING_MESSAGE);

        let outcome = match claim(contract.as_ref(), &address).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "mint: claim failed");
                MintOutcome::Failed { reason: e.to_string() }
            }
        };

        match &outcome {
            MintOutcome::Minted { receipt, token_id, .. } => {
                info!(%token_id, tx = %receipt.transaction_hash, "mint: claimed");
                // A supply read still in flight may predate the claim.
                self.supply_generation.fetch_add(1, Ordering::SeqCst);
                self.update(|s| s.claimed_count += u64::from(MINT_QUANTITY));
                self.notifier.notify(Toast::success(MINTED_MESSAGE));
            }
            MintOutcome::Failed { .. } => {
                self.notifier.notify(Toast::failure(FAILURE_MESSAGE));
            }
        }

        self.update(|s| s.is_loading = false);
        drop(pending);
        Some(outcome)
    }

    fn report(&self, effect: Effect, err: &MintError) {
        warn!(?effect, error = %err, code = err.error_code(), "mint: refresh failed");
        self.notifier.notify(Toast::failure(FAILURE_MESSAGE));
    }

    fn current_contract(&self) -> Option<Arc<dyn DropContract>> {
        self.contract
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_status(&self) -> MutexGuard<'_, MintStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, f: impl FnOnce(&mut MintStatus)) {
        f(&mut self.lock_status());
    }
}

async fn claim(contract: &dyn DropContract, receiver: &str) -> Result<MintOutcome, DropError> {
    let transactions = contract.claim_to(receiver, MINT_QUANTITY).await?;
    let tx = transactions
        .into_iter()
        .next()
        .ok_or_else(|| DropError::Parse("claim returned no transactions".into()))?;
    let token = contract.token(&tx.token_id).await?;
    Ok(MintOutcome::Minted { receipt: tx.receipt, token_id: tx.token_id, token })
}

#[cfg(test)]
#[path = "view_model_test.rs"]
mod tests;
