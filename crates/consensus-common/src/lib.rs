//! Stateless validation primitives (§4.B) and block/ommer reward calculations (§4.E's
//! `apply_rewards`), shared by the Execution Processor and the Blockchain Driver.
//!
//! Nothing in this crate touches World State — every function here is a pure predicate or
//! arithmetic helper over [`execore_primitives`] and [`execore_chainspec`] values.

pub mod calc;
mod gas;
mod validation;

pub use gas::{
    intrinsic_gas, ACCESS_LIST_ADDRESS_GAS, ACCESS_LIST_STORAGE_KEY_GAS, TX_BASE_GAS,
    TX_CREATE_GAS, TX_DATA_NONZERO_GAS_FRONTIER, TX_DATA_NONZERO_GAS_ISTANBUL, TX_DATA_ZERO_GAS,
};
pub use validation::{
    pre_validate_block, pre_validate_header, pre_validate_transaction, validate_ommers,
    MAX_OMMERS, MAX_OMMER_DEPTH,
};
