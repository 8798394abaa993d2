use crate::error::OpinionError;
use anchor_lang::prelude::*;

pub fn calculate_end_round(start_round: u64, duration: u64) -> Result<u64> {
    let end_round = start_round
        .checked_add(duration)
        .ok_or(OpinionError::ArithmeticOverflow)?;

    Ok(end_round)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_round() {
        assert_eq!(calculate_end_round(1, 25_000).unwrap(), 25_001);
    }

    #[test]
    fn test_end_round_overflow() {
        assert!(calculate_end_round(u64::MAX - 10, 25_000).is_err());
    }
}
