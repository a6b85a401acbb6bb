//! Contract selection.

use tracing::info;

use crate::{
    error::{BalanceError, Result},
    models::Contract,
};

/// Pick the contract to query.
///
/// An empty `filter` selects the first contract. Otherwise the first contract
/// whose number contains `filter` (case-sensitive) wins.
pub fn resolve<'a>(contracts: &'a [Contract], filter: &str) -> Result<&'a Contract> {
    let selected = if filter.is_empty() {
        contracts.first().ok_or(BalanceError::EmptyContractList)?
    } else {
        contracts
            .iter()
            .find(|contract| contract.number.contains(filter))
            .ok_or_else(|| BalanceError::ContractNotFound(filter.to_string()))?
    };
    info!("using contract {}", selected.number);
    Ok(selected)
}
