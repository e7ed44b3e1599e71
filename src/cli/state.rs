use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{error, info};

use crate::api::{BudgetApi, HttpClient};
use crate::budget::{BudgetData, BudgetStore, Category, Expense, PanelView, PeriodId};
use crate::cli::input::LineEdit;
use crate::cli::util;
use crate::error::StoreError;
use crate::login::{LoginForm, LoginState};
use crate::persist::Persister;

pub const INVALID_DATE_MESSAGE: &str = "Nieprawidłowa data, użyj formatu RRRR-MM-DD.";
pub const AMOUNT_TOO_LARGE_MESSAGE: &str = "Kwota jest zbyt duża.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Budget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Title,
    Date,
    Amount,
    Description,
}

impl DetailField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Tytuł",
            Self::Date => "Data",
            Self::Amount => "Kwota",
            Self::Description => "Opis",
        }
    }
}

/// An in-progress edit of one field of the selected expense.
#[derive(Debug, Clone)]
pub struct FieldEdit {
    pub field: DetailField,
    pub buffer: LineEdit,
}

pub struct App {
    pub http: Option<HttpClient>,
    pub persister: Persister,
    pub screen: Screen,
    pub login: LoginForm,
    pub store: BudgetStore,
    pub period_prompt: Option<LineEdit>,
    pub editing: Option<FieldEdit>,
    pub status: String,
    pub quit: bool,
    load_requested: bool,
}

impl App {
    /// Backend mode: login first, then the panel over the same HTTP session.
    pub fn remote(http: HttpClient) -> Self {
        let api: Arc<dyn BudgetApi> = Arc::new(http.clone());
        Self::build(Some(http), api, Screen::Login)
    }

    /// Local mode: no session, straight to the panel.
    pub fn local(api: Arc<dyn BudgetApi>) -> Self {
        Self::build(None, api, Screen::Budget)
    }

    fn build(http: Option<HttpClient>, api: Arc<dyn BudgetApi>, screen: Screen) -> Self {
        Self {
            http,
            persister: Persister::new(api),
            screen,
            login: LoginForm::new(),
            store: BudgetStore::new(),
            period_prompt: None,
            editing: None,
            status: String::new(),
            quit: false,
            load_requested: false,
        }
    }

    pub fn view(&self) -> PanelView<'_> {
        PanelView::derive(&self.store)
    }

    /// Runs the network work requested by the last key press: the login POST,
    /// the one-time document fetch, and collecting a finished save.
    pub async fn tick(&mut self) {
        if self.screen == Screen::Login && self.login.is_submitting() {
            if let Some(http) = self.http.as_ref() {
                if *self.login.submit(http).await == LoginState::Success {
                    self.screen = Screen::Budget;
                    self.status.clear();
                }
            }
        }

        if self.screen == Screen::Budget && self.store.is_loading() && !self.load_requested {
            self.load_requested = true;
            self.load_budget().await;
        }

        if let Some(result) = self.persister.poll().await {
            self.store.finish_save(result);
        }
    }

    async fn load_budget(&mut self) {
        match self.persister.api().get_budget().await {
            Ok(data) => self.store.load(data),
            Err(e) => {
                error!(error = %e, "failed to load budget");
                self.status = format!("Nie udało się wczytać danych: {e}");
                self.store.load_failed();
            }
        }
    }

    /// Waits for a pending save before the process exits.
    pub async fn shutdown(&mut self) {
        if let Some(result) = self.persister.flush().await {
            self.store.finish_save(result);
        }
        info!("shutting down");
    }

    fn persist(&mut self, snapshot: BudgetData) {
        self.persister.submit(snapshot);
    }

    pub fn handle_key(&mut self, k: KeyEvent) {
        if k.kind != KeyEventKind::Press {
            return;
        }
        if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }
        match self.screen {
            Screen::Login => self.handle_login_key(k),
            Screen::Budget => self.handle_budget_key(k),
        }
    }

    fn handle_login_key(&mut self, k: KeyEvent) {
        if self.login.is_submitting() {
            return;
        }
        match k.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_focus()
            }
            KeyCode::Enter => self.login.begin(),
            KeyCode::Char(c) => self.login.focused_mut().push(c),
            KeyCode::Backspace => self.login.focused_mut().backspace(),
            KeyCode::Delete => self.login.focused_mut().delete(),
            KeyCode::Left => self.login.focused_mut().left(),
            KeyCode::Right => self.login.focused_mut().right(),
            _ => {}
        }
    }

    fn handle_budget_key(&mut self, k: KeyEvent) {
        if self.store.is_loading() {
            if k.code == KeyCode::Char('q') {
                self.quit = true;
            }
            return;
        }
        if self.period_prompt.is_some() {
            self.handle_prompt_key(k);
            return;
        }
        if self.editing.is_some() {
            self.handle_edit_key(k);
            return;
        }

        match k.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('[') => self.cycle_period(-1),
            KeyCode::Char(']') => self.cycle_period(1),
            KeyCode::Char('p') => self.period_prompt = Some(LineEdit::default()),
            KeyCode::Char('n') => self.add_expense(),
            KeyCode::Up => self.move_expense(-1),
            KeyCode::Down => self.move_expense(1),
            KeyCode::Char('t') => self.start_edit(DetailField::Title),
            KeyCode::Char('d') => self.start_edit(DetailField::Date),
            KeyCode::Char('a') => self.start_edit(DetailField::Amount),
            KeyCode::Char('o') => self.start_edit(DetailField::Description),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.set_category(Category::ALL[idx]);
            }
            KeyCode::Char('s') => self.toggle_status(),
            KeyCode::Char('x') | KeyCode::Delete => self.remove_selected(),
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, k: KeyEvent) {
        let Some(prompt) = self.period_prompt.as_mut() else { return };
        match k.code {
            KeyCode::Esc => self.period_prompt = None,
            KeyCode::Enter => {
                let name = prompt.value.clone();
                self.period_prompt = None;
                if let Some(snapshot) = self.store.add_period(&name) {
                    self.persist(snapshot);
                }
            }
            KeyCode::Char(c) => prompt.push(c),
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Delete => prompt.delete(),
            KeyCode::Left => prompt.left(),
            KeyCode::Right => prompt.right(),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, k: KeyEvent) {
        let Some(edit) = self.editing.as_mut() else { return };
        match k.code {
            KeyCode::Esc => self.editing = None,
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Char(c) => {
                if edit.field != DetailField::Amount || util::accepts_amount_char(&edit.buffer.value, c) {
                    edit.buffer.push(c);
                }
            }
            KeyCode::Backspace => edit.buffer.backspace(),
            KeyCode::Delete => edit.buffer.delete(),
            KeyCode::Left => edit.buffer.left(),
            KeyCode::Right => edit.buffer.right(),
            _ => {}
        }
    }

    fn selected_expense(&self) -> Option<Expense> {
        self.view().selected.cloned()
    }

    fn cycle_period(&mut self, delta: isize) {
        let mut options: Vec<Option<PeriodId>> = vec![None];
        options.extend(self.store.data().periods.iter().map(|p| Some(p.id)));

        let cur = self
            .store
            .selected_period_id()
            .and_then(|id| options.iter().position(|o| *o == Some(id)))
            .unwrap_or(0) as isize;
        let next = (cur + delta).rem_euclid(options.len() as isize) as usize;
        self.store.select_period(options[next]);
    }

    fn move_expense(&mut self, delta: isize) {
        let ids: Vec<_> = self.view().expenses.iter().map(|e| e.id).collect();
        if ids.is_empty() {
            return;
        }
        let next = match self.view().selected_index() {
            Some(cur) => (cur as isize + delta).rem_euclid(ids.len() as isize) as usize,
            None => 0,
        };
        self.store.select_expense(ids[next]);
    }

    fn add_expense(&mut self) {
        if !self.view().has_period() {
            self.status = StoreError::NoPeriodSelected.to_string();
            return;
        }
        match self.store.add_expense(util::today()) {
            Ok(snapshot) => {
                self.status.clear();
                self.persist(snapshot);
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn start_edit(&mut self, field: DetailField) {
        let Some(e) = self.selected_expense() else { return };
        let value = match field {
            DetailField::Title => e.title,
            DetailField::Date => e.date,
            DetailField::Amount => util::amount_input(e.amount),
            DetailField::Description => e.description,
        };
        self.editing = Some(FieldEdit {
            field,
            buffer: LineEdit::with_value(value),
        });
    }

    fn commit_edit(&mut self) {
        let Some(edit) = self.editing.take() else { return };
        let Some(mut e) = self.selected_expense() else { return };
        let value = edit.buffer.value;
        match edit.field {
            DetailField::Title => e.title = value,
            DetailField::Date => match util::parse_date(&value) {
                Some(date) => e.date = date.format("%Y-%m-%d").to_string(),
                None => {
                    self.status = INVALID_DATE_MESSAGE.to_string();
                    return;
                }
            },
            DetailField::Amount => match util::checked_amount(&value) {
                Some(amount) => e.amount = amount,
                None => {
                    self.status = AMOUNT_TOO_LARGE_MESSAGE.to_string();
                    return;
                }
            },
            DetailField::Description => e.description = value,
        }
        self.status.clear();
        self.update_expense(e);
    }

    fn set_category(&mut self, category: Category) {
        if let Some(mut e) = self.selected_expense() {
            e.category = category;
            self.update_expense(e);
        }
    }

    fn toggle_status(&mut self) {
        if let Some(mut e) = self.selected_expense() {
            e.status = e.status.toggled();
            self.update_expense(e);
        }
    }

    fn update_expense(&mut self, updated: Expense) {
        let snapshot = self.store.update_expense(updated);
        self.persist(snapshot);
    }

    fn remove_selected(&mut self) {
        if self.store.is_saving() {
            return;
        }
        if let Some(e) = self.selected_expense() {
            let snapshot = self.store.remove_expense(e.id);
            self.persist(snapshot);
        }
    }
}
