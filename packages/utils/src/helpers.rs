use crate::error::ValidationError;

/// Separator between the two reserve denoms of a pool id, e.g. `ukava:usdx`.
pub const POOL_ID_SEPARATOR: char = ':';

/// follows cosmos SDK validation logic where denoms can be 3 - 128 characters long
/// and starts with a letter, followed by either a letter, number, or separator
/// ('/', ':', '.', '_' or '-')
/// reference: https://github.com/cosmos/cosmos-sdk/blob/7728516abfab950dc7a9120caad4870f1f962df5/types/coin.go#L865-L867
pub fn validate_native_denom(denom: &str) -> Result<(), ValidationError> {
    if denom.len() < 3 || denom.len() > 128 {
        return Err(ValidationError::InvalidDenom {
            reason: "Invalid denom length".to_string(),
        });
    }

    let mut chars = denom.chars();
    if !chars.next().is_some_and(|first| first.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidDenom {
            reason: "First character is not ASCII alphabetic".to_string(),
        });
    }

    let set = ['/', ':', '.', '_', '-'];
    for c in chars {
        if !(c.is_ascii_alphanumeric() || set.contains(&c)) {
            return Err(ValidationError::InvalidDenom {
                reason: "Not all characters are ASCII alphanumeric or one of:  /  :  .  _  -"
                    .to_string(),
            });
        }
    }

    Ok(())
}

/// A pool id is made of the pool's two reserve denoms, sorted and joined by `:`.
pub fn validate_pool_id(pool_id: &str) -> Result<(), ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidPoolId {
        pool_id: pool_id.to_string(),
        reason: reason.to_string(),
    };

    let Some((denom_a, denom_b)) = pool_id.split_once(POOL_ID_SEPARATOR) else {
        return Err(invalid("expected two denoms separated by ':'"));
    };
    validate_native_denom(denom_a).map_err(|err| invalid(&err.to_string()))?;
    validate_native_denom(denom_b).map_err(|err| invalid(&err.to_string()))?;
    if denom_a >= denom_b {
        return Err(invalid("denoms must be distinct and sorted"));
    }

    Ok(())
}

/// Builds the id of the pool holding `denom_a` and `denom_b`, independent of argument order.
pub fn pool_id(denom_a: &str, denom_b: &str) -> String {
    if denom_a < denom_b {
        format!("{denom_a}{POOL_ID_SEPARATOR}{denom_b}")
    } else {
        format!("{denom_b}{POOL_ID_SEPARATOR}{denom_a}")
    }
}
