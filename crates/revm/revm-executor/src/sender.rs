//! Sender recovery: `secp256k1` ECDSA public-key recovery plus a Keccak-256 hash to derive the
//! address, for the rare case a [`TransactionSigned`] reaches the processor without an
//! already-recovered `from` (a block source may recover eagerly or defer it here).

use alloy_primitives::{keccak256, Address, B256};
use execore_primitives::Signature;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, SECP256K1};

/// Recovers the signing address from a transaction's signing hash and signature, or `None` if the
/// signature is malformed or does not recover to a valid public key.
pub fn recover_signer(signing_hash: B256, signature: &Signature) -> Option<Address> {
    let recovery_id = RecoveryId::from_i32(i32::from(signature.odd_y_parity)).ok()?;
    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&signature.r.to_be_bytes::<32>());
    compact[32..].copy_from_slice(&signature.s.to_be_bytes::<32>());
    let recoverable = RecoverableSignature::from_compact(&compact, recovery_id).ok()?;

    let message = Message::from_digest(signing_hash.0);
    let public_key = SECP256K1.recover_ecdsa(&message, &recoverable).ok()?;

    let uncompressed = public_key.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    Some(Address::from_slice(&hash[12..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_recovery_id_returns_none() {
        let signature = Signature { r: alloy_primitives::U256::ZERO, s: alloy_primitives::U256::ZERO, odd_y_parity: false };
        assert_eq!(recover_signer(B256::ZERO, &signature), None);
    }
}
