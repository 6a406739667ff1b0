use {
    alloy::{network::EthereumWallet, signers::local::PrivateKeySigner},
    anyhow::{Context, Result, anyhow},
};

/// Builds a wallet from hex encoded private keys. The first key becomes the
/// default signer, the rest are registered in order.
pub fn wallet(accounts: &[String]) -> Result<EthereumWallet> {
    let mut signers = accounts.iter().enumerate().map(|(index, key)| {
        key.trim()
            .parse::<PrivateKeySigner>()
            // Not including the parser error, it could contain parts of the key.
            .map_err(|_| anyhow!("account #{index} is not a valid private key"))
    });

    let default = signers.next().context("no accounts configured")??;
    let mut wallet = EthereumWallet::new(default);
    for signer in signers {
        wallet.register_signer(signer?);
    }
    Ok(wallet)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::{
            network::{Ethereum, NetworkWallet},
            primitives::address,
        },
    };

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|key| key.to_string()).collect()
    }

    #[test]
    fn first_account_signs_by_default() {
        let wallet = wallet(&keys(&[
            "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
            "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        ]))
        .unwrap();

        assert_eq!(
            <EthereumWallet as NetworkWallet<Ethereum>>::default_signer_address(&wallet),
            address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8")
        );
        assert!(
            <EthereumWallet as NetworkWallet<Ethereum>>::has_signer_for(
                &wallet,
                &address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
            )
        );
    }

    #[test]
    fn invalid_key_is_reported_by_index() {
        let secret = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff";
        let err = wallet(&keys(&[
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            secret,
        ]))
        .unwrap_err();

        let printed = format!("{err:?}");
        assert!(printed.contains("account #1"), "{printed}");
        assert!(!printed.contains(secret), "{printed}");
    }

    #[test]
    fn empty_accounts() {
        assert!(wallet(&[]).is_err());
    }
}
