//! In-memory budget document plus the period/expense cursors.
//!
//! Mutations are synchronous and optimistic: local state changes at once and
//! the returned snapshot is what the caller must hand to the persister.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::document;
use super::model::{
    BudgetData, Category, Expense, ExpenseId, ExpenseStatus, Money, Period, PeriodId,
};
use crate::error::{ApiError, StoreError};

#[derive(Debug)]
pub struct BudgetStore {
    data: BudgetData,
    selected_period: Option<PeriodId>,
    selected_expense: Option<ExpenseId>,
    loading: bool,
    saving: bool,
    last_id: i64,
}

impl Default for BudgetStore {
    fn default() -> Self {
        Self {
            data: BudgetData::default(),
            selected_period: None,
            selected_expense: None,
            loading: true,
            saving: false,
            last_id: 0,
        }
    }
}

impl BudgetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &BudgetData {
        &self.data
    }

    pub fn selected_period_id(&self) -> Option<PeriodId> {
        self.selected_period
    }

    pub fn selected_expense_id(&self) -> Option<ExpenseId> {
        self.selected_expense
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Takes a freshly fetched document and points the cursors at the first
    /// period and its first expense.
    pub fn load(&mut self, data: BudgetData) {
        info!(
            periods = data.periods.len(),
            expenses = data.expenses.len(),
            "budget loaded"
        );
        self.selected_period = data.periods.first().map(|p| p.id);
        self.selected_expense = self
            .selected_period
            .and_then(|pid| data.expenses.iter().find(|e| e.period_id == pid))
            .map(|e| e.id);
        self.data = data;
        self.loading = false;
    }

    /// The fetch failed: show the empty panel instead of spinning forever.
    pub fn load_failed(&mut self) {
        self.loading = false;
    }

    pub fn select_period(&mut self, id: Option<PeriodId>) {
        self.selected_period = id;
        self.selected_expense = self.first_expense_in(id);
    }

    pub fn select_expense(&mut self, id: ExpenseId) {
        self.selected_expense = Some(id);
    }

    /// Blank names mean the prompt was cancelled and change nothing.
    pub fn add_period(&mut self, name: &str) -> Option<BudgetData> {
        // whitespace-only is blank; anything else is stored as typed
        if name.trim().is_empty() {
            return None;
        }
        let period = Period {
            id: self.fresh_id(),
            name: name.to_string(),
        };
        let id = period.id;
        let next = document::with_period(&self.data, period);
        let snapshot = self.commit(next);
        self.selected_period = Some(id);
        self.selected_expense = None;
        Some(snapshot)
    }

    pub fn add_expense(&mut self, today: NaiveDate) -> Result<BudgetData, StoreError> {
        let period_id = self.selected_period.ok_or(StoreError::NoPeriodSelected)?;
        let count = document::expenses_in_period(&self.data, Some(period_id)).len();

        let expense = Expense {
            id: self.fresh_id(),
            period_id,
            title: format!("Nowy wydatek #{}", count + 1),
            amount: Money::zero(),
            description: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
            status: ExpenseStatus::Oplacony,
            category: Category::Rachunki,
        };
        let id = expense.id;
        let next = document::with_expense(&self.data, expense);
        let snapshot = self.commit(next);
        self.selected_expense = Some(id);
        Ok(snapshot)
    }

    pub fn update_expense(&mut self, updated: Expense) -> BudgetData {
        let next = document::replace_expense(&self.data, &updated);
        self.commit(next)
    }

    pub fn remove_expense(&mut self, id: ExpenseId) -> BudgetData {
        let next = document::without_expense(&self.data, id);
        let snapshot = self.commit(next);
        if self.selected_expense == Some(id) {
            self.selected_expense = self.first_expense_in(self.selected_period);
        }
        snapshot
    }

    /// Clears the busy flag once a save has finished. Failures are logged and
    /// otherwise dropped: local state stays as the user left it.
    pub fn finish_save(&mut self, result: Result<(), ApiError>) {
        self.saving = false;
        match result {
            Ok(()) => debug!("budget saved"),
            Err(e) => warn!(error = %e, "budget save failed"),
        }
    }

    fn commit(&mut self, next: BudgetData) -> BudgetData {
        self.data = next;
        self.saving = true;
        self.data.clone()
    }

    fn first_expense_in(&self, period: Option<PeriodId>) -> Option<ExpenseId> {
        document::expenses_in_period(&self.data, period)
            .first()
            .map(|e| e.id)
    }

    /// Millisecond timestamp, bumped so ids stay strictly increasing.
    fn fresh_id(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 16).unwrap()
    }

    fn expense(id: i64, period_id: i64, amount: i64, category: Category) -> Expense {
        Expense {
            id,
            period_id,
            title: format!("e{id}"),
            amount: Money(Decimal::from(amount)),
            description: String::new(),
            date: "2025-10-01".into(),
            status: ExpenseStatus::Oplacony,
            category,
        }
    }

    fn loaded(data: BudgetData) -> BudgetStore {
        let mut store = BudgetStore::new();
        store.load(data);
        store
    }

    fn october() -> BudgetData {
        BudgetData {
            periods: vec![Period { id: 1, name: "Październik".into() }],
            expenses: vec![expense(10, 1, 50, Category::Zakupy)],
            incomes: vec![],
        }
    }

    #[test]
    fn load_selects_first_period_and_its_first_expense() {
        let mut data = october();
        data.periods.push(Period { id: 2, name: "Listopad".into() });
        data.expenses.insert(0, expense(9, 2, 1, Category::Inne));

        let store = loaded(data);
        assert!(!store.is_loading());
        assert_eq!(store.selected_period_id(), Some(1));
        assert_eq!(store.selected_expense_id(), Some(10));
    }

    #[test]
    fn load_of_empty_document_selects_nothing() {
        let store = loaded(BudgetData::default());
        assert_eq!(store.selected_period_id(), None);
        assert_eq!(store.selected_expense_id(), None);
    }

    #[test]
    fn add_expense_without_period_is_rejected_and_changes_nothing() {
        let mut store = loaded(BudgetData::default());
        let before = store.data().clone();

        let err = store.add_expense(today()).unwrap_err();
        assert_eq!(err, StoreError::NoPeriodSelected);
        assert_eq!(err.to_string(), "Najpierw dodaj i wybierz okres/miesiąc.");
        assert_eq!(store.data(), &before);
        assert!(!store.is_saving());
    }

    #[test]
    fn add_period_selects_it_and_clears_expense_cursor() {
        let mut store = loaded(october());
        let snapshot = store.add_period("Listopad").unwrap();

        let added = snapshot.periods.last().unwrap();
        assert_eq!(added.name, "Listopad");
        assert_eq!(store.selected_period_id(), Some(added.id));
        assert_eq!(store.selected_expense_id(), None);
        assert!(store.is_saving());
        assert_eq!(store.data(), &snapshot);
    }

    #[test]
    fn blank_period_name_is_ignored() {
        let mut store = loaded(october());
        assert!(store.add_period("   ").is_none());
        assert_eq!(store.data().periods.len(), 1);
        assert!(!store.is_saving());
    }

    #[test]
    fn period_name_is_stored_as_typed() {
        let mut store = loaded(october());
        let snapshot = store.add_period(" Listopad ").unwrap();
        assert_eq!(snapshot.periods.last().unwrap().name, " Listopad ");
    }

    #[test]
    fn add_expense_uses_defaults_and_numbers_within_period() {
        let mut store = loaded(october());
        let snapshot = store.add_expense(today()).unwrap();

        let e = snapshot.expenses.last().unwrap();
        assert_eq!(e.period_id, 1);
        assert_eq!(e.title, "Nowy wydatek #2");
        assert_eq!(e.amount, Money::zero());
        assert_eq!(e.status, ExpenseStatus::Oplacony);
        assert_eq!(e.category, Category::Rachunki);
        assert_eq!(e.date, "2025-10-16");
        assert!(e.description.is_empty());
        assert_eq!(store.selected_expense_id(), Some(e.id));
    }

    #[test]
    fn fresh_ids_are_strictly_increasing() {
        let mut store = loaded(october());
        store.add_period("a");
        store.add_period("b");
        store.add_expense(today()).unwrap();
        store.add_expense(today()).unwrap();

        let periods: Vec<_> = store.data().periods.iter().skip(1).map(|p| p.id).collect();
        assert!(periods[0] < periods[1]);
        let expenses: Vec<_> = store.data().expenses.iter().skip(1).map(|e| e.id).collect();
        assert!(periods[1] < expenses[0]);
        assert!(expenses[0] < expenses[1]);
    }

    #[test]
    fn update_replaces_by_id() {
        let mut store = loaded(october());
        let mut changed = store.data().expenses[0].clone();
        changed.category = Category::Hobby;
        changed.amount = Money(Decimal::new(1999, 2));

        let snapshot = store.update_expense(changed.clone());
        assert_eq!(snapshot.expenses, vec![changed]);
    }

    #[test]
    fn removing_only_expense_clears_selection() {
        let mut store = loaded(october());
        assert_eq!(store.selected_expense_id(), Some(10));

        let snapshot = store.remove_expense(10);
        assert!(snapshot.expenses.is_empty());
        assert_eq!(store.selected_expense_id(), None);
    }

    #[test]
    fn removing_selected_expense_moves_to_first_remaining_in_period() {
        let mut data = october();
        data.expenses.push(expense(11, 1, 5, Category::Inne));
        data.expenses.push(expense(12, 1, 7, Category::Inne));
        let mut store = loaded(data);
        store.select_expense(11);

        store.remove_expense(11);
        assert_eq!(store.selected_expense_id(), Some(10));
    }

    #[test]
    fn removing_other_expense_keeps_selection() {
        let mut data = october();
        data.expenses.push(expense(11, 1, 5, Category::Inne));
        let mut store = loaded(data);

        store.remove_expense(11);
        assert_eq!(store.selected_expense_id(), Some(10));
        assert_eq!(store.data().expenses.len(), 1);
    }

    #[test]
    fn select_period_moves_expense_cursor() {
        let mut data = october();
        data.periods.push(Period { id: 2, name: "Listopad".into() });
        data.expenses.push(expense(20, 2, 5, Category::Inne));
        let mut store = loaded(data);

        store.select_period(Some(2));
        assert_eq!(store.selected_expense_id(), Some(20));
        store.select_period(None);
        assert_eq!(store.selected_period_id(), None);
        assert_eq!(store.selected_expense_id(), None);
    }

    #[test]
    fn failed_save_keeps_local_state() {
        let mut store = loaded(october());
        let snapshot = store.remove_expense(10);
        store.finish_save(Err(ApiError::Status { status: 500 }));
        assert!(!store.is_saving());
        assert_eq!(store.data(), &snapshot);
    }
}
