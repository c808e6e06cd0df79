//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the collaborator handles (content store, contract factory, wallet)
//! and one live `DropPage` per collection slug. A drop page owns the mint
//! view-model and the toast queue it reports into; it is created on the first
//! visit and kept while the server runs.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::chain::DropContractFactory;
use crate::content::ContentStore;
use crate::content::image::ImageUrlBuilder;
use crate::content::types::Collection;
use crate::mint::MintViewModel;
use crate::notify::ToastQueue;
use crate::wallet::WalletConnector;

// =============================================================================
// DROP PAGE
// =============================================================================

/// Live mint state of one collection page.
pub struct DropPage {
    pub view_model: MintViewModel,
    pub toasts: Arc<ToastQueue>,
    /// Contract address the view-model was opened with.
    pub contract_address: Option<String>,
}

impl DropPage {
    #[must_use]
    pub fn new(contract_address: Option<String>) -> Self {
        let toasts = Arc::new(ToastQueue::new());
        Self { view_model: MintViewModel::new(toasts.clone()), toasts, contract_address }
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentStore>,
    pub images: ImageUrlBuilder,
    pub contracts: Arc<dyn DropContractFactory>,
    pub wallet: Arc<dyn WalletConnector>,
    /// Drop pages keyed by collection slug.
    pub drops: Arc<RwLock<HashMap<String, Arc<DropPage>>>>,
}

impl AppState {
    #[must_use]
    pub fn new(
        content: Arc<dyn ContentStore>,
        images: ImageUrlBuilder,
        contracts: Arc<dyn DropContractFactory>,
        wallet: Arc<dyn WalletConnector>,
    ) -> Self {
        Self { content, images, contracts, wallet, drops: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Return the live drop page for `collection`, creating it on first use.
    ///
    /// Every call counts as a page load. A new page (or one whose contract
    /// address changed in the CMS) gets a fresh view-model with the contract
    /// handle installed. An existing page picks up the wallet's current
    /// address and re-reads price and supply.
    pub async fn drop_page(&self, collection: &Collection) -> Arc<DropPage> {
        let slug = collection.slug();
        let existing = self.drops.read().await.get(slug).cloned();

        if let Some(page) = existing {
            if page.contract_address == collection.address {
                page.view_model
                    .remount(self.wallet.current_address())
                    .await;
                return page;
            }
        }

        let page = Arc::new(DropPage::new(collection.address.clone()));
        self.drops
            .write()
            .await
            .insert(slug.to_owned(), page.clone());
        info!(%slug, contract = ?collection.address, "drop: page opened");

        let contract = collection
            .address
            .as_deref()
            .and_then(|address| self.contracts.open(address));
        page.view_model
            .set_address(self.wallet.current_address())
            .await;
        page.view_model.set_contract(contract).await;
        page
    }

    /// Look up an already-open drop page.
    pub async fn existing_drop_page(&self, slug: &str) -> Option<Arc<DropPage>> {
        self.drops.read().await.get(slug).cloned()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::chain::{
        ClaimCondition, ClaimTransaction, ClaimedToken, DropContract, DropError, TokenRecord, TxReceipt,
    };
    use crate::content::ContentError;
    use crate::content::types::{AssetRef, Creator, ImageRef, Slug};
    use crate::notify::{Notifier, Toast, ToastId, ToastKind};
    use crate::wallet::BackendWallet;

    pub const TEST_WALLET: &str = "0x8a9cE6A10C3b5a9aE04c0b8D3c4F1Dbe9F3b1e20";

    // -------------------------------------------------------------------------
    // content
    // -------------------------------------------------------------------------

    /// Build a collection with a contract address.
    #[must_use]
    pub fn sample_collection(slug: &str) -> Collection {
        Collection {
            id: format!("col-{slug}"),
            title: format!("{slug} drop"),
            description: Some("A very serious collection.".into()),
            nft_collection_name: format!("{slug} apes"),
            address: Some(format!("0xcontract-{slug}")),
            main_image: ImageRef { asset: AssetRef { reference: "image-main-600x800-png".into() } },
            preview_image: ImageRef { asset: AssetRef { reference: "image-prev-300x300-jpg".into() } },
            slug: Slug { current: slug.into() },
            creator: Creator {
                id: "creator-1".into(),
                name: "Jimmy".into(),
                address: None,
                slug: Slug { current: "jimmy".into() },
            },
        }
    }

    pub struct MockContentStore {
        pub collections: Vec<Collection>,
        pub fail: bool,
    }

    #[async_trait::async_trait]
    impl ContentStore for MockContentStore {
        async fn list_collections(&self) -> Result<Vec<Collection>, ContentError> {
            if self.fail {
                return Err(ContentError::Request("connection refused".into()));
            }
            Ok(self.collections.clone())
        }

        async fn collection_by_slug(&self, slug: &str) -> Result<Option<Collection>, ContentError> {
            if self.fail {
                return Err(ContentError::Request("connection refused".into()));
            }
            Ok(self.collections.iter().find(|c| c.slug() == slug).cloned())
        }
    }

    // -------------------------------------------------------------------------
    // chain
    // -------------------------------------------------------------------------

    /// In-memory drop: claims succeed and bump the claimed count unless
    /// configured to fail.
    pub struct MockDrop {
        claimed: Mutex<usize>,
        total: u64,
        conditions: Vec<ClaimCondition>,
        claim_failure: Option<String>,
        empty_claim: bool,
        /// Remaining `get_all_claimed` calls that fail.
        supply_failures: AtomicUsize,
        supply_calls: AtomicUsize,
        price_calls: AtomicUsize,
        claim_calls: AtomicUsize,
        last_claim: Mutex<Option<(String, u32)>>,
    }

    impl MockDrop {
        #[must_use]
        pub fn new(claimed: usize, total: u64) -> Self {
            Self {
                claimed: Mutex::new(claimed),
                total,
                conditions: vec![ClaimCondition { display_price: "0.01".into(), currency_symbol: "ETH".into() }],
                claim_failure: None,
                empty_claim: false,
                supply_failures: AtomicUsize::new(0),
                supply_calls: AtomicUsize::new(0),
                price_calls: AtomicUsize::new(0),
                claim_calls: AtomicUsize::new(0),
                last_claim: Mutex::new(None),
            }
        }

        #[must_use]
        pub fn with_conditions(mut self, conditions: Vec<ClaimCondition>) -> Self {
            self.conditions = conditions;
            self
        }

        #[must_use]
        pub fn failing_claim(mut self, reason: &str) -> Self {
            self.claim_failure = Some(reason.into());
            self
        }

        #[must_use]
        pub fn with_empty_claim(mut self) -> Self {
            self.empty_claim = true;
            self
        }

        #[must_use]
        pub fn failing_supply(mut self) -> Self {
            self.supply_failures = AtomicUsize::new(usize::MAX);
            self
        }

        /// Fail only the first `times` supply reads.
        #[must_use]
        pub fn failing_supply_times(mut self, times: usize) -> Self {
            self.supply_failures = AtomicUsize::new(times);
            self
        }

        pub fn supply_calls(&self) -> usize {
            self.supply_calls.load(Ordering::SeqCst)
        }

        pub fn price_calls(&self) -> usize {
            self.price_calls.load(Ordering::SeqCst)
        }

        pub fn claim_calls(&self) -> usize {
            self.claim_calls.load(Ordering::SeqCst)
        }

        pub fn last_receiver(&self) -> Option<String> {
            self.last_claim
                .lock()
                .unwrap()
                .as_ref()
                .map(|(receiver, _)| receiver.clone())
        }

        pub fn last_quantity(&self) -> Option<u32> {
            self.last_claim
                .lock()
                .unwrap()
                .as_ref()
                .map(|(_, quantity)| *quantity)
        }
    }

    #[async_trait::async_trait]
    impl DropContract for MockDrop {
        async fn total_supply(&self) -> Result<u64, DropError> {
            Ok(self.total)
        }

        async fn get_all_claimed(&self) -> Result<Vec<ClaimedToken>, DropError> {
            self.supply_calls.fetch_add(1, Ordering::SeqCst);
            let failing = self
                .supply_failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failing {
                return Err(DropError::Request("rpc timeout".into()));
            }
            let claimed = *self.claimed.lock().unwrap();
            Ok((0..claimed)
                .map(|i| ClaimedToken { token_id: i.to_string(), owner: Some(TEST_WALLET.into()) })
                .collect())
        }

        async fn claim_conditions(&self) -> Result<Vec<ClaimCondition>, DropError> {
            self.price_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.conditions.clone())
        }

        async fn claim_to(&self, receiver: &str, quantity: u32) -> Result<Vec<ClaimTransaction>, DropError> {
            self.claim_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_claim.lock().unwrap() = Some((receiver.to_owned(), quantity));
            if let Some(reason) = &self.claim_failure {
                return Err(DropError::Rejected(reason.clone()));
            }
            if self.empty_claim {
                return Ok(Vec::new());
            }
            let mut claimed = self.claimed.lock().unwrap();
            let token_id = claimed.to_string();
            *claimed += 1;
            Ok(vec![ClaimTransaction {
                receipt: TxReceipt { transaction_hash: format!("0xtx{token_id}"), block_number: Some(1) },
                token_id,
            }])
        }

        async fn token(&self, token_id: &str) -> Result<TokenRecord, DropError> {
            Ok(TokenRecord {
                token_id: token_id.to_owned(),
                name: format!("Drop #{token_id}"),
                description: None,
                image: None,
                owner: Some(TEST_WALLET.into()),
            })
        }
    }

    /// Opens the same mock drop for every non-blank address.
    pub struct MockFactory {
        pub drop: Arc<MockDrop>,
    }

    impl DropContractFactory for MockFactory {
        fn open(&self, contract_address: &str) -> Option<Arc<dyn DropContract>> {
            if contract_address.trim().is_empty() {
                return None;
            }
            Some(self.drop.clone())
        }
    }

    // -------------------------------------------------------------------------
    // notifications
    // -------------------------------------------------------------------------

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum NotifyEvent {
        Shown(ToastId, ToastKind, String),
        Dismissed(ToastId),
    }

    /// Notifier that records every call.
    #[derive(Default)]
    pub struct RecordingNotifier {
        events: Mutex<Vec<NotifyEvent>>,
    }

    impl RecordingNotifier {
        pub fn events(&self) -> Vec<NotifyEvent> {
            self.events.lock().unwrap().clone()
        }

        pub fn count(&self, kind: ToastKind) -> usize {
            self.messages(kind).len()
        }

        pub fn messages(&self, kind: ToastKind) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    NotifyEvent::Shown(_, k, message) if k == kind => Some(message),
                    _ => None,
                })
                .collect()
        }

        /// Every loading toast shown was dismissed exactly once.
        pub fn loading_all_dismissed(&self) -> bool {
            let events = self.events();
            events.iter().all(|e| match e {
                NotifyEvent::Shown(id, ToastKind::Loading, _) => {
                    events
                        .iter()
                        .filter(|other| **other == NotifyEvent::Dismissed(*id))
                        .count()
                        == 1
                }
                _ => true,
            })
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, toast: Toast) -> ToastId {
            let id = ToastId::new();
            self.events
                .lock()
                .unwrap()
                .push(NotifyEvent::Shown(id, toast.kind, toast.message));
            id
        }

        fn dismiss(&self, id: ToastId) {
            self.events.lock().unwrap().push(NotifyEvent::Dismissed(id));
        }
    }

    // -------------------------------------------------------------------------
    // app state
    // -------------------------------------------------------------------------

    /// App state over in-memory collaborators. The wallet starts disconnected.
    #[must_use]
    pub fn test_app_state(collections: Vec<Collection>, drop: Arc<MockDrop>) -> AppState {
        AppState::new(
            Arc::new(MockContentStore { collections, fail: false }),
            ImageUrlBuilder::new("testproj", "production"),
            Arc::new(MockFactory { drop }),
            Arc::new(BackendWallet::new(Some(TEST_WALLET.into()))),
        )
    }

    /// App state whose content store always fails.
    #[must_use]
    pub fn failing_app_state() -> AppState {
        AppState::new(
            Arc::new(MockContentStore { collections: Vec::new(), fail: true }),
            ImageUrlBuilder::new("testproj", "production"),
            Arc::new(MockFactory { drop: Arc::new(MockDrop::new(0, 0)) }),
            Arc::new(BackendWallet::new(None)),
        )
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
