//! Encoded privileged instructions.
//!
//! A governance proposal targeting the staking engine carries one of these,
//! bincode-encoded, as its opaque payload. The governance engine never
//! inspects the bytes; the staking engine decodes and dispatches them in
//! [`StakingEngine::execute_instruction`](crate::StakingEngine::execute_instruction).

use crate::error::StakingError;
use crate::terms::StakingTerms;
use serde::{Deserialize, Serialize};

/// A privileged action the staking engine can execute on behalf of a
/// passed proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakingInstruction {
    /// Replace the staking terms.
    Manage(StakingTerms),
}

impl StakingInstruction {
    /// Serialize to the opaque payload format proposals carry.
    pub fn encode(&self) -> Vec<u8> {
        bincode::serialize(self).expect("staking instructions always serialize")
    }

    /// Decode a proposal payload.
    pub fn decode(bytes: &[u8]) -> Result<Self, StakingError> {
        bincode::deserialize(bytes).map_err(|_| StakingError::BadInstruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidelock_types::{AccountId, AssetId};

    #[test]
    fn manage_round_trips() {
        let instruction = StakingInstruction::Manage(StakingTerms {
            stake_asset: AssetId::new("LP"),
            reward_asset: AssetId::new("RWD"),
            tick_secs: 100,
            reward_percent: 3,
            freeze_secs: 0,
            admin: AccountId::new("dao"),
        });
        let decoded = StakingInstruction::decode(&instruction.encode()).unwrap();
        assert_eq!(decoded, instruction);
    }

    #[test]
    fn garbage_payload_is_rejected() {
        assert!(matches!(
            StakingInstruction::decode(b"not an instruction"),
            Err(StakingError::BadInstruction)
        ));
    }
}
