/// Residual balance paid to whoever finalizes an opinion. Zero when the
/// instance holds no more than it must keep reserved.
pub fn calculate_reward(balance: u64, min_balance: u64) -> u64 {
    balance.checked_sub(min_balance).unwrap_or(0)
}
