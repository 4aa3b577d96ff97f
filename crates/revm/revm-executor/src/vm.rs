//! The `Vm` side of §9's `Vm`/`Host` boundary. The bytecode interpreter itself — stack, memory,
//! opcode dispatch — is out of scope (§1): this module only defines the seam a real interpreter
//! would plug into, a `NoopVm` test double that lets the processor's own tests exercise gas and
//! state bookkeeping without one, and the precompile address table each `Vm` implementation is
//! expected to dispatch against before falling through to bytecode.

use alloy_primitives::{address, Address, Bytes, U256};
use execore_chainspec::Hardfork;
use execore_revm_database::Host;

/// One `CALL`/`CREATE` message, as the processor or a nested frame hands it to a `Vm`.
#[derive(Debug, Clone)]
pub struct Message {
    pub sender: Address,
    /// `None` for `CREATE`/`CREATE2`.
    pub recipient: Option<Address>,
    pub value: U256,
    pub input: Bytes,
    pub gas: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Success,
    Revert,
    OutOfGas,
    /// Any other failure (invalid opcode, stack under/overflow, static-call violation, ...).
    Failure,
}

#[derive(Debug, Clone)]
pub struct CallResult {
    pub status: StatusCode,
    pub gas_left: u64,
    pub output: Bytes,
}

impl CallResult {
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::Success
    }
}

/// The external EVM capability this core depends on but does not implement (§9).
///
/// A real implementation executes `msg` against `host`'s World State capability surface,
/// checkpointing before the call and reverting on failure exactly as `CacheState::checkpoint`/
/// `revert_to_checkpoint` are designed to support.
pub trait Vm {
    fn execute(&self, msg: &Message, host: &mut dyn Host) -> CallResult;
}

/// A `Vm` that performs no bytecode execution: it succeeds unconditionally and returns all gas
/// unused. Lets the Execution Processor's own tests exercise gas accounting, fee distribution and
/// substate bookkeeping without a real interpreter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVm;

impl Vm for NoopVm {
    fn execute(&self, msg: &Message, _host: &mut dyn Host) -> CallResult {
        CallResult { status: StatusCode::Success, gas_left: msg.gas, output: Bytes::new() }
    }
}

/// The precompiled contract addresses active at `revision` (§4.D): identity/ecrecover/sha256/
/// ripemd160 have been active since Frontier; modexp and the bn256 pairing-curve operations from
/// Byzantium (EIP-196/197/198); blake2f from Istanbul (EIP-152).
pub fn precompile_addresses(revision: Hardfork) -> Vec<Address> {
    let mut addresses = vec![
        address!("0000000000000000000000000000000000000001"), // ecrecover
        address!("0000000000000000000000000000000000000002"), // sha256
        address!("0000000000000000000000000000000000000003"), // ripemd160
        address!("0000000000000000000000000000000000000004"), // identity
    ];
    if revision >= Hardfork::Byzantium {
        addresses.push(address!("0000000000000000000000000000000000000005")); // modexp
        addresses.push(address!("0000000000000000000000000000000000000006")); // bn256Add
        addresses.push(address!("0000000000000000000000000000000000000007")); // bn256Mul
        addresses.push(address!("0000000000000000000000000000000000000008")); // bn256Pairing
    }
    if revision >= Hardfork::Istanbul {
        addresses.push(address!("0000000000000000000000000000000000000009")); // blake2f
    }
    addresses
}

pub fn is_precompile(address: Address, revision: Hardfork) -> bool {
    precompile_addresses(revision).contains(&address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_vm_returns_all_gas_unused() {
        let msg = Message { sender: Address::ZERO, recipient: None, value: U256::ZERO, input: Bytes::new(), gas: 100_000 };
        let mut state = execore_provider::CacheState::new(
            Box::new(execore_provider::InMemoryDatabase::new()),
            Box::new(execore_storage_api::EmptyStateProvider),
        );
        let result = NoopVm.execute(&msg, &mut state);
        assert!(result.is_success());
        assert_eq!(result.gas_left, 100_000);
    }

    #[test]
    fn bn256_pairing_is_inactive_before_byzantium() {
        let bn256_pairing = address!("0000000000000000000000000000000000000008");
        assert!(!is_precompile(bn256_pairing, Hardfork::Homestead));
        assert!(is_precompile(bn256_pairing, Hardfork::Byzantium));
    }

    #[test]
    fn blake2f_is_inactive_before_istanbul() {
        let blake2f = address!("0000000000000000000000000000000000000009");
        assert!(!is_precompile(blake2f, Hardfork::Berlin));
        assert!(is_precompile(blake2f, Hardfork::Istanbul));
    }
}
