use super::*;

#[tokio::test]
async fn connect_activates_configured_address() {
    let wallet = BackendWallet::new(Some("0xABC".into()));
    assert!(wallet.current_address().is_none());
    let address = wallet.connect().await.unwrap();
    assert_eq!(address, "0xABC");
    assert_eq!(wallet.current_address().as_deref(), Some("0xABC"));
}

#[tokio::test]
async fn connect_without_configuration_leaves_address_unset() {
    let wallet = BackendWallet::new(None);
    let err = wallet.connect().await.unwrap_err();
    assert!(matches!(err, WalletError::NotConfigured));
    assert_eq!(err.error_code(), "E_WALLET_NOT_CONFIGURED");
    assert!(wallet.current_address().is_none());
}

#[tokio::test]
async fn disconnect_clears_address() {
    let wallet = BackendWallet::new(Some("0xABC".into()));
    wallet.connect().await.unwrap();
    wallet.disconnect().await;
    assert!(wallet.current_address().is_none());
}

#[test]
fn short_address_keeps_five_each_side() {
    assert_eq!(short_address("0x8a9cE6A10C3b5a9aE04c0b8D3c4F1Dbe9F3b1e20"), "0x8a9...b1e20");
}

#[test]
fn short_address_leaves_short_values_alone() {
    assert_eq!(short_address("0xABC"), "0xABC");
    assert_eq!(short_address("0123456789"), "0123456789");
}
