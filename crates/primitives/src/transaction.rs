use std::cell::OnceCell;

use alloy_primitives::{Address, Bytes, ChainId, B256, U256};

/// A single `{address, storage_keys}` entry of an EIP-2930 access list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessListItem {
    pub address: Address,
    pub storage_keys: Vec<B256>,
}

/// An EIP-2930 access list: a list of addresses and associated storage keys that a transaction
/// pre-declares it will touch, in exchange for a flat up-front gas charge and warm (rather than
/// cold) EIP-2929 access pricing for every listed entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessList(pub Vec<AccessListItem>);

impl AccessList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total count of `(address, storage_key)` pairs, for intrinsic gas accounting.
    pub fn storage_key_count(&self) -> usize {
        self.0.iter().map(|item| item.storage_keys.len()).sum()
    }

    pub fn address_count(&self) -> usize {
        self.0.len()
    }
}

/// The signature triple recovered from / attached to a signed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub r: U256,
    pub s: U256,
    /// For legacy transactions this carries EIP-155's `chain_id * 2 + 35/36`; for typed
    /// transactions it is the raw recovery id (0 or 1).
    pub odd_y_parity: bool,
}

/// Legacy (pre-EIP-2930) transaction body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxLegacy {
    pub chain_id: Option<ChainId>,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
}

/// EIP-2930 access-list transaction body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxEip2930 {
    pub chain_id: ChainId,
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub access_list: AccessList,
}

/// EIP-1559 dynamic-fee transaction body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxEip1559 {
    pub chain_id: ChainId,
    pub nonce: u64,
    pub max_priority_fee_per_gas: u128,
    pub max_fee_per_gas: u128,
    pub gas_limit: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub access_list: AccessList,
}

/// The EIP-2718 type byte of each supported transaction envelope.
pub const LEGACY_TX_TYPE_ID: u8 = 0;
pub const EIP2930_TX_TYPE_ID: u8 = 1;
pub const EIP1559_TX_TYPE_ID: u8 = 2;

/// Tagged transaction body, without a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Legacy(TxLegacy),
    AccessList(TxEip2930),
    DynamicFee(TxEip1559),
}

impl Transaction {
    pub fn tx_type(&self) -> u8 {
        match self {
            Self::Legacy(_) => LEGACY_TX_TYPE_ID,
            Self::AccessList(_) => EIP2930_TX_TYPE_ID,
            Self::DynamicFee(_) => EIP1559_TX_TYPE_ID,
        }
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::Legacy(tx) => tx.chain_id,
            Self::AccessList(tx) => Some(tx.chain_id),
            Self::DynamicFee(tx) => Some(tx.chain_id),
        }
    }

    pub fn nonce(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.nonce,
            Self::AccessList(tx) => tx.nonce,
            Self::DynamicFee(tx) => tx.nonce,
        }
    }

    pub fn gas_limit(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.gas_limit,
            Self::AccessList(tx) => tx.gas_limit,
            Self::DynamicFee(tx) => tx.gas_limit,
        }
    }

    pub fn to(&self) -> Option<Address> {
        match self {
            Self::Legacy(tx) => tx.to,
            Self::AccessList(tx) => tx.to,
            Self::DynamicFee(tx) => tx.to,
        }
    }

    pub fn is_create(&self) -> bool {
        self.to().is_none()
    }

    pub fn value(&self) -> U256 {
        match self {
            Self::Legacy(tx) => tx.value,
            Self::AccessList(tx) => tx.value,
            Self::DynamicFee(tx) => tx.value,
        }
    }

    pub fn input(&self) -> &Bytes {
        match self {
            Self::Legacy(tx) => &tx.input,
            Self::AccessList(tx) => &tx.input,
            Self::DynamicFee(tx) => &tx.input,
        }
    }

    pub fn access_list(&self) -> Option<&AccessList> {
        match self {
            Self::Legacy(_) => None,
            Self::AccessList(tx) => Some(&tx.access_list),
            Self::DynamicFee(tx) => Some(&tx.access_list),
        }
    }

    /// `gas_price` for legacy/EIP-2930, `max_fee_per_gas` for EIP-1559.
    pub fn max_fee_per_gas(&self) -> u128 {
        match self {
            Self::Legacy(tx) => tx.gas_price,
            Self::AccessList(tx) => tx.gas_price,
            Self::DynamicFee(tx) => tx.max_fee_per_gas,
        }
    }

    /// `None` for legacy/EIP-2930 (there is no priority-fee/base-fee split pre-London).
    pub fn max_priority_fee_per_gas(&self) -> Option<u128> {
        match self {
            Self::Legacy(_) | Self::AccessList(_) => None,
            Self::DynamicFee(tx) => Some(tx.max_priority_fee_per_gas),
        }
    }

    /// `effective_gas_price = min(max_fee, base_fee + max_priority_fee)` post-London; plain
    /// `gas_price` pre-London (`base_fee` is `None`).
    pub fn effective_gas_price(&self, base_fee_per_gas: Option<u64>) -> u128 {
        match base_fee_per_gas {
            None => self.max_fee_per_gas(),
            Some(base_fee) => match self.max_priority_fee_per_gas() {
                None => self.max_fee_per_gas(),
                Some(priority_fee) => {
                    let base_fee = base_fee as u128;
                    std::cmp::min(self.max_fee_per_gas(), base_fee + priority_fee)
                }
            },
        }
    }

    /// The portion of `effective_gas_price` that goes to the block's beneficiary rather than
    /// being burned: `effective_gas_price - base_fee`, floored at 0 pre-London.
    pub fn priority_fee_per_gas(&self, base_fee_per_gas: Option<u64>) -> u128 {
        let effective = self.effective_gas_price(base_fee_per_gas);
        match base_fee_per_gas {
            None => effective,
            Some(base_fee) => effective.saturating_sub(base_fee as u128),
        }
    }
}

/// A [`Transaction`] together with its signature and the lazily-recovered sender.
///
/// Per the data model invariant, a transaction may only enter execution once `from` has been
/// populated — either by the block source eagerly, or by the processor re-deriving it from the
/// signature on demand.
#[derive(Debug, Clone)]
pub struct TransactionSigned {
    /// The transaction's signing hash (the RLP-encoding preimage that was signed), used both as
    /// the transaction's identity here and as the input to sender recovery. RLP itself is
    /// consumed through a narrow interface (§4.G) rather than computed in this crate.
    pub hash: B256,
    pub transaction: Transaction,
    pub signature: Signature,
    from: OnceCell<Address>,
}

impl PartialEq for TransactionSigned {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.transaction == other.transaction
            && self.signature == other.signature
    }
}
impl Eq for TransactionSigned {}

impl TransactionSigned {
    pub fn new(hash: B256, transaction: Transaction, signature: Signature) -> Self {
        Self { hash, transaction, signature, from: OnceCell::new() }
    }

    /// Constructs an already-recovered transaction, as a block source with eager sender recovery
    /// would hand to the processor.
    pub fn new_with_sender(
        hash: B256,
        transaction: Transaction,
        signature: Signature,
        from: Address,
    ) -> Self {
        let signed = Self::new(hash, transaction, signature);
        let _ = signed.from.set(from);
        signed
    }

    /// The cached recovered sender, if any recovery has happened yet.
    pub fn from_cached(&self) -> Option<Address> {
        self.from.get().copied()
    }

    /// Returns the recovered sender, recovering (and caching) it via `recover` if it is not
    /// already cached. `recover` receives the signing hash and the signature.
    pub fn from_or_recover(
        &self,
        recover: impl FnOnce(B256, &Signature) -> Option<Address>,
    ) -> Option<Address> {
        if let Some(from) = self.from.get() {
            return Some(*from)
        }
        let recovered = recover(self.hash, &self.signature)?;
        let _ = self.from.set(recovered);
        Some(recovered)
    }
}
