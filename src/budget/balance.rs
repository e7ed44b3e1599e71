use rust_decimal::Decimal;

use super::model::{saturating_add, saturating_sub, BudgetData, ExpenseStatus};

/// Account balance over the whole document, regardless of the selected period:
/// all incomes minus the expenses that are already paid.
pub fn calc_global_balance(data: &BudgetData) -> Decimal {
    let incomes = data
        .incomes
        .iter()
        .map(|i| i.amount.0)
        .fold(Decimal::ZERO, saturating_add);
    let spent = data
        .expenses
        .iter()
        .filter(|e| e.status == ExpenseStatus::Oplacony)
        .map(|e| e.amount.0)
        .fold(Decimal::ZERO, saturating_add);
    saturating_sub(incomes, spent)
}
