use serde::{Deserialize, Serialize};

/// A named protocol revision. Variants are declared in activation order, so `#[derive(Ord)]`
/// gives the total order the execution core relies on everywhere fork-conditional behavior is
/// decided — no direct block-number comparison is permitted outside [`super::ChainSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Hardfork {
    Frontier,
    Homestead,
    Dao,
    Tangerine,
    SpuriousDragon,
    Byzantium,
    Constantinople,
    Petersburg,
    Istanbul,
    Berlin,
    London,
    Merge,
}

impl Hardfork {
    /// All hard forks in activation order, for iterating a [`super::ChainSpec`]'s schedule.
    pub const ALL: [Hardfork; 12] = [
        Hardfork::Frontier,
        Hardfork::Homestead,
        Hardfork::Dao,
        Hardfork::Tangerine,
        Hardfork::SpuriousDragon,
        Hardfork::Byzantium,
        Hardfork::Constantinople,
        Hardfork::Petersburg,
        Hardfork::Istanbul,
        Hardfork::Berlin,
        Hardfork::London,
        Hardfork::Merge,
    ];
}

/// The block number (or other condition) at which a [`Hardfork`] activates.
///
/// Every fork this workspace models activates at a block number; no timestamp-activated fork is
/// in scope here (those begin at Shanghai, which this core does not model — see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForkCondition {
    Block(u64),
    /// The fork never activates on this chain.
    Never,
}

impl ForkCondition {
    pub fn active_at_block(&self, block_number: u64) -> bool {
        match self {
            Self::Block(activation) => block_number >= *activation,
            Self::Never => false,
        }
    }

    pub fn block_number(&self) -> Option<u64> {
        match self {
            Self::Block(n) => Some(*n),
            Self::Never => None,
        }
    }
}
