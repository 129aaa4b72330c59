//! Borrowing, repayment and upgrade purchases.
//!
//! Invalid requests leave the state untouched. The caller surfaces the
//! rejection; the engine never panics over a bad amount.

use crate::state::{GameState, LogKind};

/// Borrow `amount` against the tier's debt ceiling.
///
/// Rejected when the amount is non-positive or the new debt would exceed the
/// ceiling. Taking on debt from a clean slate starts the grace countdown.
pub fn borrow(state: &mut GameState, amount: i64) {
    if amount <= 0 {
        return;
    }
    let tier = state.difficulty.config();
    let new_debt = state.debt + amount;
    if new_debt > tier.debt_ceiling {
        return;
    }
    if state.debt == 0 {
        state.debt_turns_left = tier.debt_grace_months;
    }
    state.money += amount;
    state.debt = new_debt;
    state.borrowed_this_month += amount;
}

/// Repay up to `amount`, clamped to both outstanding debt and cash on hand.
/// Clearing the debt entirely also clears the grace countdown.
pub fn repay(state: &mut GameState, amount: i64) {
    let repaid = amount.min(state.debt).min(state.money).max(0);
    if repaid == 0 {
        return;
    }
    state.money -= repaid;
    state.debt -= repaid;
    if state.debt == 0 {
        state.debt_turns_left = 0;
    }
}

/// Buy the upgrade with the given id.
///
/// Rejected when the id is unknown, the upgrade is already owned, or money
/// is short. A successful purchase applies the reputation bonus immediately;
/// the other effect fields are read passively by the resolver.
pub fn purchase_upgrade(state: &mut GameState, upgrade_id: &str) {
    let Some(index) = state
        .upgrades
        .iter()
        .position(|upgrade| upgrade.id == upgrade_id)
    else {
        return;
    };
    let upgrade = &state.upgrades[index];
    if upgrade.purchased || state.money < upgrade.cost {
        return;
    }

    let cost = upgrade.cost;
    let name = upgrade.name.clone();
    let reputation_bonus = upgrade.effect.reputation_bonus;

    state.money -= cost;
    state.upgrades[index].purchased = true;
    state.add_reputation(reputation_bonus);
    state.push_log(None, LogKind::System, format!("設備投資：{name}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::tier::Difficulty;

    fn state() -> GameState {
        let catalog = Catalog::default_config();
        GameState::new("test", Difficulty::Normal, &catalog, 1)
    }

    #[test]
    fn borrow_starts_grace_and_rejects_over_ceiling() {
        let mut state = state();
        let tier = Difficulty::Normal.config();
        let money_before = state.money;

        borrow(&mut state, 1_000_000);
        assert_eq!(state.debt, 1_000_000);
        assert_eq!(state.money, money_before + 1_000_000);
        assert_eq!(state.debt_turns_left, tier.debt_grace_months);
        assert_eq!(state.borrowed_this_month, 1_000_000);

        // Ceiling is 5M on Normal; this would land at 6M.
        borrow(&mut state, 5_000_000);
        assert_eq!(state.debt, 1_000_000);

        // Exactly at the ceiling is allowed, and the grace is not restarted.
        state.debt_turns_left = 1;
        borrow(&mut state, 4_000_000);
        assert_eq!(state.debt, tier.debt_ceiling);
        assert_eq!(state.debt_turns_left, 1);
    }

    #[test]
    fn borrow_at_the_ceiling_rejects_any_further_amount() {
        let mut state = state();
        let tier = Difficulty::Normal.config();
        borrow(&mut state, tier.debt_ceiling);
        assert_eq!(state.debt, tier.debt_ceiling);
        let money_before = state.money;

        for amount in [1, 50_000, tier.debt_ceiling] {
            borrow(&mut state, amount);
            assert_eq!(state.debt, tier.debt_ceiling);
            assert_eq!(state.money, money_before);
        }
    }

    #[test]
    fn borrow_rejects_non_positive_amounts() {
        let mut state = state();
        borrow(&mut state, 0);
        borrow(&mut state, -500);
        assert_eq!(state.debt, 0);
        assert_eq!(state.borrowed_this_month, 0);
    }

    #[test]
    fn repay_clamps_to_debt_and_cash() {
        let mut state = state();
        borrow(&mut state, 2_000_000);

        // More than owed: clamped to the debt.
        repay(&mut state, 9_999_999);
        assert_eq!(state.debt, 0);
        assert_eq!(state.debt_turns_left, 0);

        borrow(&mut state, 2_000_000);
        state.money = 300_000;
        repay(&mut state, 1_000_000);
        assert_eq!(state.money, 0);
        assert_eq!(state.debt, 1_700_000);
        assert!(state.debt_turns_left > 0);
    }

    #[test]
    fn repay_with_negative_cash_is_a_no_op() {
        let mut state = state();
        borrow(&mut state, 1_000_000);
        state.money = -50_000;
        repay(&mut state, 500_000);
        assert_eq!(state.debt, 1_000_000);
        assert_eq!(state.money, -50_000);
    }

    #[test]
    fn purchase_upgrade_deducts_once() {
        let mut state = state();
        let upgrade = state.upgrades[0].clone();
        let money_before = state.money;
        assert!(money_before >= upgrade.cost);

        purchase_upgrade(&mut state, &upgrade.id);
        assert!(state.upgrades[0].purchased);
        assert_eq!(state.money, money_before - upgrade.cost);

        // Already owned: no second charge.
        purchase_upgrade(&mut state, &upgrade.id);
        assert_eq!(state.money, money_before - upgrade.cost);
    }

    #[test]
    fn purchase_rejects_unknown_and_unaffordable() {
        let mut state = state();
        purchase_upgrade(&mut state, "no-such-upgrade");
        assert!(state.upgrades.iter().all(|upgrade| !upgrade.purchased));

        state.money = 0;
        let id = state.upgrades[0].id.clone();
        purchase_upgrade(&mut state, &id);
        assert!(!state.upgrades[0].purchased);
        assert_eq!(state.money, 0);
    }
}
