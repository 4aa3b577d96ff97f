use execore_primitives::Transaction;

/// Flat per-transaction gas charge (Yellow Paper `Gtransaction`).
pub const TX_BASE_GAS: u64 = 21_000;
/// Additional flat charge for a contract-creation transaction (`Gtxcreate`).
pub const TX_CREATE_GAS: u64 = 32_000;
/// Per zero input byte (`Gtxdatazero`), unchanged across every revision in scope.
pub const TX_DATA_ZERO_GAS: u64 = 4;
/// Per nonzero input byte pre-Istanbul (`Gtxdatanonzero`).
pub const TX_DATA_NONZERO_GAS_FRONTIER: u64 = 68;
/// Per nonzero input byte from Istanbul onward (EIP-2028).
pub const TX_DATA_NONZERO_GAS_ISTANBUL: u64 = 16;
/// Per access-list address, from Berlin onward (EIP-2930).
pub const ACCESS_LIST_ADDRESS_GAS: u64 = 2_400;
/// Per access-list storage key, from Berlin onward (EIP-2930).
pub const ACCESS_LIST_STORAGE_KEY_GAS: u64 = 1_900;

/// Gas a transaction must pay before any EVM execution begins: the flat per-transaction charge,
/// the per-byte cost of its input data, and (from Berlin onward) the flat cost of pre-warming its
/// access list.
///
/// `is_homestead` and `is_istanbul` gate the two revision-dependent terms exactly as silkworm's
/// `intrinsic_gas(txn, is_homestead, is_istanbul)` does: the contract-creation surcharge applies
/// only once Homestead is active, and nonzero input bytes got cheaper at Istanbul (EIP-2028).
pub fn intrinsic_gas(txn: &Transaction, is_homestead: bool, is_istanbul: bool) -> u64 {
    let mut gas = TX_BASE_GAS;

    if txn.is_create() && is_homestead {
        gas += TX_CREATE_GAS;
    }

    let input = txn.input();
    let zero_bytes = input.iter().filter(|byte| **byte == 0).count() as u64;
    let nonzero_bytes = input.len() as u64 - zero_bytes;
    let nonzero_gas =
        if is_istanbul { TX_DATA_NONZERO_GAS_ISTANBUL } else { TX_DATA_NONZERO_GAS_FRONTIER };
    gas += zero_bytes * TX_DATA_ZERO_GAS + nonzero_bytes * nonzero_gas;

    if let Some(access_list) = txn.access_list() {
        gas += access_list.address_count() as u64 * ACCESS_LIST_ADDRESS_GAS;
        gas += access_list.storage_key_count() as u64 * ACCESS_LIST_STORAGE_KEY_GAS;
    }

    gas
}

#[cfg(test)]
mod tests {
    use super::*;
    use execore_primitives::{AccessList, AccessListItem, Transaction, TxLegacy};
    use alloy_primitives::{address, Bytes, B256};

    #[test]
    fn plain_transfer_pays_base_gas_only() {
        let txn = Transaction::Legacy(TxLegacy {
            to: Some(address!("0000000000000000000000000000000000000001")),
            ..Default::default()
        });
        assert_eq!(intrinsic_gas(&txn, true, true), TX_BASE_GAS);
    }

    #[test]
    fn creation_adds_surcharge_only_post_homestead() {
        let txn = Transaction::Legacy(TxLegacy { to: None, ..Default::default() });
        assert_eq!(intrinsic_gas(&txn, false, true), TX_BASE_GAS);
        assert_eq!(intrinsic_gas(&txn, true, true), TX_BASE_GAS + TX_CREATE_GAS);
    }

    #[test]
    fn istanbul_discounts_nonzero_bytes() {
        let txn = Transaction::Legacy(TxLegacy {
            to: Some(address!("0000000000000000000000000000000000000001")),
            input: Bytes::from_static(&[1, 2, 3]),
            ..Default::default()
        });
        assert_eq!(intrinsic_gas(&txn, true, false), TX_BASE_GAS + 3 * TX_DATA_NONZERO_GAS_FRONTIER);
        assert_eq!(intrinsic_gas(&txn, true, true), TX_BASE_GAS + 3 * TX_DATA_NONZERO_GAS_ISTANBUL);
    }

    #[test]
    fn access_list_entries_are_charged() {
        let txn = Transaction::AccessList(execore_primitives::TxEip2930 {
            to: Some(address!("0000000000000000000000000000000000000001")),
            access_list: AccessList(vec![AccessListItem {
                address: address!("0000000000000000000000000000000000000002"),
                storage_keys: vec![B256::ZERO, B256::repeat_byte(1)],
            }]),
            ..Default::default()
        });
        assert_eq!(
            intrinsic_gas(&txn, true, true),
            TX_BASE_GAS + ACCESS_LIST_ADDRESS_GAS + 2 * ACCESS_LIST_STORAGE_KEY_GAS
        );
    }
}
