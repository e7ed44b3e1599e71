//! What the panel shows, derived fresh from the store on every draw.

use rust_decimal::{Decimal, RoundingStrategy};

use super::balance::calc_global_balance;
use super::document;
use super::model::{saturating_add, BudgetData, Category, Expense, ExpenseId, Period, PeriodId};
use super::store::BudgetStore;

/// Subtotals for the four fixed categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTotals([Decimal; 4]);

impl CategoryTotals {
    pub fn from_expenses<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Self {
        let mut sums = [Decimal::ZERO; 4];
        for e in expenses {
            let slot = &mut sums[e.category.index()];
            *slot = saturating_add(*slot, e.amount.0);
        }
        Self(sums)
    }

    pub fn get(&self, category: Category) -> Decimal {
        self.0[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    pub fn sum(&self) -> Decimal {
        self.0.iter().copied().fold(Decimal::ZERO, saturating_add)
    }
}

#[derive(Debug)]
pub struct PanelView<'a> {
    pub period: Option<&'a Period>,
    pub expenses: Vec<&'a Expense>,
    pub selected: Option<&'a Expense>,
    pub by_category: CategoryTotals,
    pub total: Decimal,
    pub balance: Decimal,
}

impl<'a> PanelView<'a> {
    pub fn derive(store: &'a BudgetStore) -> Self {
        Self::from_parts(
            store.data(),
            store.selected_period_id(),
            store.selected_expense_id(),
        )
    }

    pub fn from_parts(
        data: &'a BudgetData,
        period_id: Option<PeriodId>,
        expense_id: Option<ExpenseId>,
    ) -> Self {
        let period = period_id.and_then(|pid| data.periods.iter().find(|p| p.id == pid));
        let expenses = document::expenses_in_period(data, period_id);
        let selected = expense_id.and_then(|id| expenses.iter().copied().find(|e| e.id == id));
        let by_category = CategoryTotals::from_expenses(expenses.iter().copied());
        let total = expenses
            .iter()
            .map(|e| e.amount.0)
            .fold(Decimal::ZERO, saturating_add);

        Self {
            period,
            expenses,
            selected,
            by_category,
            total,
            balance: calc_global_balance(data),
        }
    }

    pub fn has_period(&self) -> bool {
        self.period.is_some()
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected?.id;
        self.expenses.iter().position(|e| e.id == id)
    }
}

/// Two decimals and the currency suffix, e.g. `50.00 zł`.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("{rounded} zł")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::model::{ExpenseStatus, Money};

    fn expense(id: i64, period_id: i64, amount: Decimal, category: Category) -> Expense {
        Expense {
            id,
            period_id,
            title: String::new(),
            amount: Money(amount),
            description: String::new(),
            date: String::new(),
            status: ExpenseStatus::Oplacony,
            category,
        }
    }

    #[test]
    fn single_expense_period() {
        let data = BudgetData {
            periods: vec![Period { id: 1, name: "Październik".into() }],
            expenses: vec![expense(10, 1, Decimal::from(50), Category::Zakupy)],
            incomes: vec![],
        };
        let view = PanelView::from_parts(&data, Some(1), Some(10));

        assert_eq!(format_amount(view.total), "50.00 zł");
        assert_eq!(format_amount(view.by_category.get(Category::Zakupy)), "50.00 zł");
        for c in [Category::Rachunki, Category::Hobby, Category::Inne] {
            assert_eq!(view.by_category.get(c), Decimal::ZERO);
        }
        assert_eq!(view.selected.map(|e| e.id), Some(10));
        assert_eq!(view.period.map(|p| p.name.as_str()), Some("Październik"));
    }

    #[test]
    fn category_buckets_add_up_to_total() {
        let data = BudgetData {
            periods: vec![Period { id: 1, name: "a".into() }],
            expenses: vec![
                expense(1, 1, Decimal::new(1050, 2), Category::Rachunki),
                expense(2, 1, Decimal::new(333, 2), Category::Zakupy),
                expense(3, 1, Decimal::from(7), Category::Hobby),
                expense(4, 1, Decimal::new(1, 2), Category::Inne),
                expense(5, 1, Decimal::from(20), Category::Zakupy),
                expense(6, 2, Decimal::from(1000), Category::Inne),
            ],
            incomes: vec![],
        };
        let view = PanelView::from_parts(&data, Some(1), None);
        assert_eq!(view.by_category.sum(), view.total);
        assert_eq!(view.total, Decimal::new(4084, 2));
    }

    #[test]
    fn selection_outside_period_is_not_shown() {
        let data = BudgetData {
            periods: vec![Period { id: 1, name: "a".into() }, Period { id: 2, name: "b".into() }],
            expenses: vec![expense(10, 1, Decimal::ONE, Category::Inne)],
            incomes: vec![],
        };
        let view = PanelView::from_parts(&data, Some(2), Some(10));
        assert!(view.selected.is_none());
        assert!(view.expenses.is_empty());
        assert_eq!(view.selected_index(), None);
    }

    #[test]
    fn orphaned_expenses_are_invisible() {
        let data = BudgetData {
            periods: vec![Period { id: 1, name: "a".into() }],
            expenses: vec![
                expense(10, 1, Decimal::from(5), Category::Inne),
                expense(11, 7, Decimal::from(100), Category::Inne),
            ],
            incomes: vec![],
        };
        let view = PanelView::from_parts(&data, Some(1), Some(11));
        assert_eq!(view.expenses.len(), 1);
        assert_eq!(view.total, Decimal::from(5));
        assert!(view.selected.is_none());

        let none = PanelView::from_parts(&data, None, None);
        assert!(!none.has_period());
        assert!(none.expenses.is_empty());
        assert_eq!(data.expenses.len(), 2);
    }

    #[test]
    fn huge_amounts_saturate_instead_of_panicking() {
        let huge = crate::cli::util::parse_amount("79228162514264337593543950335").0;
        let data = BudgetData {
            periods: vec![Period { id: 1, name: "a".into() }],
            expenses: vec![
                expense(1, 1, huge, Category::Zakupy),
                expense(2, 1, huge, Category::Zakupy),
            ],
            incomes: vec![],
        };
        let view = PanelView::from_parts(&data, Some(1), Some(1));
        assert_eq!(view.total, Decimal::MAX);
        assert_eq!(view.by_category.get(Category::Zakupy), Decimal::MAX);
        assert_eq!(view.balance, Decimal::MIN);
        assert!(format_amount(view.total).ends_with(" zł"));
    }

    #[test]
    fn formats_like_to_fixed() {
        assert_eq!(format_amount(Decimal::ZERO), "0.00 zł");
        assert_eq!(format_amount(Decimal::new(12345, 3)), "12.35 zł");
        assert_eq!(format_amount(Decimal::new(-5, 1)), "-0.50 zł");
    }
}
