//! Mint status record and its display derivation.

use serde::Serialize;

/// Shown until the first claim condition has been fetched.
pub const PRICE_PLACEHOLDER: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintStatus {
    pub is_loading: bool,
    pub claimed_count: u64,
    pub total_supply: u64,
    pub unit_price_display: String,
    pub connected_address: Option<String>,
}

impl MintStatus {
    /// Nothing known yet: loading, zero counts, placeholder price.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            is_loading: true,
            claimed_count: 0,
            total_supply: 0,
            unit_price_display: PRICE_PLACEHOLDER.to_owned(),
            connected_address: None,
        }
    }

    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.claimed_count >= self.total_supply
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.connected_address.is_some()
    }

    /// Whether the mint control must be disabled: loading, sold out, or signed out.
    #[must_use]
    pub fn mint_disabled(&self) -> bool {
        self.is_loading || self.is_sold_out() || !self.is_signed_in()
    }

    #[must_use]
    pub fn phase(&self) -> MintPhase {
        if self.is_loading {
            MintPhase::Loading
        } else if self.is_sold_out() {
            MintPhase::SoldOut
        } else if !self.is_signed_in() {
            MintPhase::SignedOut
        } else {
            MintPhase::Ready
        }
    }

    #[must_use]
    pub fn button(&self) -> MintButton {
        let phase = self.phase();
        let label = match phase {
            MintPhase::Loading => "Loading...".to_owned(),
            MintPhase::SoldOut => "SOLD OUT".to_owned(),
            MintPhase::SignedOut => "Sign In to Mint".to_owned(),
            MintPhase::Ready => format!("Mint NFT ({} ETH)", self.unit_price_display),
        };
        MintButton { label, disabled: self.mint_disabled(), phase }
    }

    /// Supply line above the mint button.
    #[must_use]
    pub fn supply_line(&self) -> String {
        if self.is_loading {
            "Loading Supply Count...".to_owned()
        } else {
            format!("{} / {} NFT's claimed", self.claimed_count, self.total_supply)
        }
    }
}

impl Default for MintStatus {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Which row of the display table the status falls into. Sold out is
/// checked before signed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MintPhase {
    Loading,
    SoldOut,
    SignedOut,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MintButton {
    pub label: String,
    pub disabled: bool,
    pub phase: MintPhase,
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
