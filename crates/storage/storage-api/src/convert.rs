/// Bridges the legacy change-set key layout to the current one (§6), ported from
/// `node/silkworm/stagedsync/util.cpp`'s `convert_to_db_format`.
///
/// Two layouts exist for a change-set entry:
/// - account changes: key is `be64(block_number)` alone, and the value is `address ||
///   prior_account_rlp` — this function splits the address out into the key.
/// - storage changes: key is `be64(block_number) || address || incarnation`, and the value is
///   `storage_key || prior_storage_value` — this function moves the storage key into the key.
///
/// Returns `(new_key, new_value)`.
pub fn convert_to_db_format(key: &[u8], value: &[u8]) -> (Vec<u8>, Vec<u8>) {
    const ADDRESS_LEN: usize = 20;
    const HASH_LEN: usize = 32;

    if key.len() == 8 {
        let address = value[..ADDRESS_LEN].to_vec();
        let rest = value[ADDRESS_LEN..].to_vec();
        return (address, rest);
    }

    let address_and_incarnation = key[8..].to_vec();
    let mut new_key = address_and_incarnation;
    new_key.extend_from_slice(&value[..HASH_LEN]);
    let new_value = value[HASH_LEN..].to_vec();
    (new_key, new_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_layout_splits_address_out_of_the_value() {
        let key = 7u64.to_be_bytes().to_vec();
        let mut value = vec![0xAA; 20];
        value.extend_from_slice(&[1, 2, 3]);
        let (new_key, new_value) = convert_to_db_format(&key, &value);
        assert_eq!(new_key, vec![0xAA; 20]);
        assert_eq!(new_value, vec![1, 2, 3]);
    }

    #[test]
    fn storage_layout_moves_the_storage_key_into_the_key() {
        let mut key = 7u64.to_be_bytes().to_vec();
        key.extend_from_slice(&[0xBB; 20 + 8]); // address || incarnation
        let mut value = vec![0xCC; 32]; // storage key
        value.extend_from_slice(&[9, 9]); // prior value
        let (new_key, new_value) = convert_to_db_format(&key, &value);
        assert_eq!(new_key.len(), 20 + 8 + 32);
        assert_eq!(&new_key[..28], &[0xBB; 28]);
        assert_eq!(&new_key[28..], &[0xCC; 32]);
        assert_eq!(new_value, vec![9, 9]);
    }
}
