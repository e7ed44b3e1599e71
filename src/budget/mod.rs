pub mod balance;
pub mod document;
pub mod model;
pub mod store;
pub mod views;

pub use balance::calc_global_balance;
pub use model::{BudgetData, Category, Expense, ExpenseId, ExpenseStatus, Income, Money, Period, PeriodId};
pub use store::BudgetStore;
pub use views::{format_amount, CategoryTotals, PanelView};
