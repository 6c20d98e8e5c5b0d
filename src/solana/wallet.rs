use anyhow::{anyhow, Result};
use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::VersionedTransaction,
};
use std::str::FromStr;

use crate::entity::TerminalError;

/// A connected wallet: exposes its public key and signs transactions
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn public_key(&self) -> Pubkey;

    async fn sign_transaction(&self, transaction: VersionedTransaction)
        -> Result<VersionedTransaction>;
}

/// Wallet backed by a local keypair
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn from_base58(keypair_base58: &str) -> Result<Self> {
        Ok(Self::new(keypair_from_base58(keypair_base58)?))
    }
}

#[async_trait]
impl WalletAdapter for KeypairWallet {
    fn public_key(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign_transaction(
        &self,
        transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction> {
        VersionedTransaction::try_new(transaction.message, &[&self.keypair])
            .map_err(|e| TerminalError::Signing(e.to_string()).into())
    }
}

/// Restore Keypair from base58 string (64 bytes).
pub fn keypair_from_base58(keypair_base58: &str) -> Result<Keypair> {
    let keypair_bytes = bs58::decode(keypair_base58.trim())
        .into_vec()
        .map_err(|e| anyhow!("Failed to decode base58 keypair: {}", e))?;

    if keypair_bytes.len() != 64 {
        return Err(anyhow!("Invalid keypair length: {}", keypair_bytes.len()));
    }

    let keypair = Keypair::from_bytes(&keypair_bytes)
        .map_err(|e| anyhow!("Failed to create keypair from bytes: {}", e))?;

    Ok(keypair)
}

/// Convert base58 string to Solana `Pubkey`.
pub fn parse_pubkey(address: &str) -> Result<Pubkey> {
    Pubkey::from_str(address).map_err(|e| anyhow!("Invalid Solana address: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::message::{Message, VersionedMessage};
    use solana_sdk::signature::Signature;

    #[test]
    fn keypair_base58_round_trip() {
        let keypair = Keypair::new();
        let encoded = bs58::encode(keypair.to_bytes()).into_string();
        let decoded = keypair_from_base58(&encoded).unwrap();
        assert_eq!(decoded.pubkey(), keypair.pubkey());
    }

    #[test]
    fn rejects_short_keypair() {
        let encoded = bs58::encode([7u8; 32]).into_string();
        assert!(keypair_from_base58(&encoded).is_err());
    }

    #[tokio::test]
    async fn keypair_wallet_signs_as_fee_payer() {
        let wallet = KeypairWallet::new(Keypair::new());
        let message = VersionedMessage::Legacy(Message::new(&[], Some(&wallet.public_key())));
        let unsigned = VersionedTransaction {
            signatures: vec![Signature::default()],
            message,
        };

        let signed = wallet.sign_transaction(unsigned).await.unwrap();

        assert_ne!(signed.signatures[0], Signature::default());
        assert!(signed.verify_with_results().iter().all(|ok| *ok));
    }
}
