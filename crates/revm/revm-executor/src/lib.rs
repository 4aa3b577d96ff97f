//! The VM Adapter and Execution Processor (§4.D, §4.E): the `Vm`/`Host` boundary to an external
//! EVM engine, precompile dispatch, sender recovery, and the per-transaction/per-block
//! orchestration that ties the World State (`execore-provider`) to a pluggable [`vm::Vm`].

mod processor;
mod sender;
mod vm;

pub use processor::{
    ExecuteAndWriteBlockError, ExecutionProcessor, DAO_DRAINED_ACCOUNTS, DAO_WITHDRAWAL_RECIPIENT,
};
pub use sender::recover_signer;
pub use vm::{is_precompile, precompile_addresses, CallResult, Message, NoopVm, StatusCode, Vm};
