use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::budget::{format_amount, Category, Expense, ExpenseStatus, PanelView};
use crate::cli::input::LineEdit;
use crate::cli::state::{App, DetailField, Screen};
use crate::login::LoginField;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    // main content | status bar
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(area);

    match app.screen {
        Screen::Login => draw_login(f, root[0], app),
        Screen::Budget => draw_budget(f, root[0], app),
    }
    draw_status(f, root[1], app);

    if let Some(prompt) = &app.period_prompt {
        let modal = center_rect(root[0], 54, 5);
        f.render_widget(Clear, modal);
        draw_period_prompt(f, modal, prompt);
    }
}

// Login

fn draw_login(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.login;
    let modal = center_rect(area, 56, 12);

    let marker = |field: LoginField| if form.focus == field { "> " } else { "  " };
    let button = if form.is_submitting() { "[ Logowanie... ]" } else { "[ Zaloguj się ]" };

    let mut lines = vec![
        Line::from(format!("{}Nazwa użytkownika lub email", marker(LoginField::Login))),
        Line::from(format!("    {}", form.login.rendered())),
        Line::from(format!("{}Hasło", marker(LoginField::Password))),
        Line::from(format!("    {}", form.password.rendered())),
        Line::from(""),
    ];
    if let Some(err) = form.error() {
        lines.push(Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        button,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from("Tab: zmień pole | Enter: zaloguj | Esc: wyjdź"));

    let p = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Zaloguj się"));
    f.render_widget(p, modal);
}

// Budget panel

fn draw_budget(f: &mut Frame, area: Rect, app: &App) {
    if app.store.is_loading() {
        let p = Paragraph::new("Ładowanie…").block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
        return;
    }

    let view = app.view();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(30)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(cols[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(8)])
        .split(cols[1]);

    draw_period_selector(f, left[0], &view);
    draw_expense_list(f, left[1], &view);
    draw_summary(f, right[0], &view);
    draw_details(f, right[1], app, &view);
}

fn draw_period_selector(f: &mut Frame, area: Rect, view: &PanelView) {
    let name = view
        .period
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "(brak / wybierz okres)".into());
    let p = Paragraph::new(format!("◀ {name} ▶"))
        .block(Block::default().borders(Borders::ALL).title("Okres  ([ ] zmień, p dodaj)"));
    f.render_widget(p, area);
}

fn draw_expense_list(f: &mut Frame, area: Rect, view: &PanelView) {
    let title = if view.has_period() {
        "Wydatki  (n dodaj, ↑/↓)"
    } else {
        "Wydatki"
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if view.expenses.is_empty() {
        let p = Paragraph::new("Brak wydatków w tym okresie.").block(block);
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = view
        .expenses
        .iter()
        .map(|e| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    e.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("{}  {}", e.date, format_amount(e.amount.0))),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Green).fg(Color::Black));

    let mut sel = ListState::default();
    sel.select(view.selected_index());
    f.render_stateful_widget(list, area, &mut sel);
}

fn category_color(c: Category) -> Color {
    match c {
        Category::Rachunki => Color::Green,
        Category::Zakupy => Color::LightGreen,
        Category::Hobby => Color::LightYellow,
        Category::Inne => Color::Red,
    }
}

fn draw_summary(f: &mut Frame, area: Rect, view: &PanelView) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(24), Constraint::Length(22)])
        .split(area);

    let heading = match view.period {
        Some(p) => format!("Suma wydatków – {}", p.name),
        None => "Suma wydatków".into(),
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled(heading, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(format_amount(view.total), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];
    for (category, value) in view.by_category.iter() {
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(category_color(category))),
            Span::raw(format!("{:<10}", category.label())),
            Span::raw(format_amount(value)),
        ]));
    }
    let totals = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Podsumowanie"));
    f.render_widget(totals, cols[0]);

    let balance = Paragraph::new(vec![
        Line::from("Saldo konta:"),
        Line::from(Span::styled(
            format_amount(view.balance),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(balance, cols[1]);
}

fn draw_details(f: &mut Frame, area: Rect, app: &App, view: &PanelView) {
    let block = Block::default().borders(Borders::ALL).title("Szczegóły");
    let Some(expense) = view.selected else {
        let p = Paragraph::new("Wybierz wydatek z listy lub dodaj nowy.").block(block);
        f.render_widget(p, area);
        return;
    };

    let mut lines = vec![category_line(expense), Line::from("")];
    for field in [DetailField::Title, DetailField::Date, DetailField::Amount, DetailField::Description] {
        lines.push(field_line(app, expense, field));
    }
    lines.push(Line::from(""));
    lines.push(status_line(expense.status));
    lines.push(Line::from(""));

    let saving = app.store.is_saving();
    let actions = if saving {
        "Zapisywanie..."
    } else {
        "x: Usuń | t/d/a/o: edytuj | 1-4: kategoria | s: status"
    };
    lines.push(Line::from(Span::styled(
        actions,
        if saving {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        },
    )));

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn category_line(expense: &Expense) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, c) in Category::ALL.iter().enumerate() {
        let style = if expense.category == *c {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        spans.push(Span::styled("●", Style::default().fg(category_color(*c))));
        spans.push(Span::styled(format!(" {}:{} ", i + 1, c.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn field_line(app: &App, expense: &Expense, field: DetailField) -> Line<'static> {
    let editing = app.editing.as_ref().filter(|e| e.field == field);
    let value = match editing {
        Some(edit) => format!("{}▏", edit.buffer.value),
        None => match field {
            DetailField::Title => expense.title.clone(),
            DetailField::Date => expense.date.clone(),
            DetailField::Amount => format_amount(expense.amount.0),
            DetailField::Description => expense.description.clone(),
        },
    };
    let label_style = if editing.is_some() {
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{:<7}", field.label()), label_style),
        Span::raw(": "),
        Span::raw(value),
    ])
}

fn status_line(status: ExpenseStatus) -> Line<'static> {
    let pill = |s: ExpenseStatus, icon: &str| {
        let style = if s == status {
            Style::default().bg(Color::Green).fg(Color::Black)
        } else {
            Style::default()
        };
        Span::styled(format!(" {icon} {} ", s.label()), style)
    };
    Line::from(vec![
        pill(ExpenseStatus::Oplacony, "✓"),
        Span::raw("  "),
        pill(ExpenseStatus::Zaplanowany, "⏱"),
    ])
}

fn draw_period_prompt(f: &mut Frame, area: Rect, prompt: &LineEdit) {
    let lines = vec![
        format!("{}▏", prompt.value),
        "Enter: dodaj | Esc: anuluj".into(),
    ]
    .join("\n");
    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Nazwa okresu (np. 'Wydatki w październiku')"),
    );
    f.render_widget(p, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let text = if !app.status.is_empty() {
        app.status.clone()
    } else if app.store.is_saving() {
        "Zapisywanie...".into()
    } else {
        match app.screen {
            Screen::Login => "Ctrl+C: wyjdź".into(),
            Screen::Budget => "q: wyjdź".into(),
        }
    };
    let p = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

fn center_rect(rect: Rect, w: u16, h: u16) -> Rect {
    let x = rect.x + rect.width.saturating_sub(w) / 2;
    let y = rect.y + rect.height.saturating_sub(h) / 2;
    Rect { x, y, width: w.min(rect.width), height: h.min(rect.height) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_rect_clamps_to_parent() {
        let parent = Rect { x: 0, y: 0, width: 20, height: 4 };
        let r = center_rect(parent, 54, 12);
        assert_eq!(r, Rect { x: 0, y: 0, width: 20, height: 4 });

        let r = center_rect(Rect { x: 2, y: 2, width: 100, height: 40 }, 50, 10);
        assert_eq!((r.x, r.y, r.width, r.height), (27, 17, 50, 10));
    }
}
