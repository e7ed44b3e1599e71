//! Pure updates over a [`BudgetData`]. Every function returns a fresh
//! document and leaves its input untouched.

use super::model::{BudgetData, Expense, ExpenseId, Period, PeriodId};

pub fn with_period(data: &BudgetData, period: Period) -> BudgetData {
    let mut next = data.clone();
    next.periods.push(period);
    next
}

pub fn with_expense(data: &BudgetData, expense: Expense) -> BudgetData {
    let mut next = data.clone();
    next.expenses.push(expense);
    next
}

/// Swaps in `updated` where the id matches. Unknown ids leave the document as is.
pub fn replace_expense(data: &BudgetData, updated: &Expense) -> BudgetData {
    BudgetData {
        expenses: data
            .expenses
            .iter()
            .map(|e| if e.id == updated.id { updated.clone() } else { e.clone() })
            .collect(),
        ..data.clone()
    }
}

pub fn without_expense(data: &BudgetData, id: ExpenseId) -> BudgetData {
    BudgetData {
        expenses: data.expenses.iter().filter(|e| e.id != id).cloned().collect(),
        ..data.clone()
    }
}

/// Expenses of one period, in document order. `None` matches nothing.
pub fn expenses_in_period(data: &BudgetData, period_id: Option<PeriodId>) -> Vec<&Expense> {
    match period_id {
        Some(pid) => data.expenses.iter().filter(|e| e.period_id == pid).collect(),
        None => Vec::new(),
    }
}
