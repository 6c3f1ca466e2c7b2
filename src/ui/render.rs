// Frame layout and one render function per page

use super::charts::{render_bar_chart, render_gauge, render_line_chart, LineSeries};
use super::widgets::{card, focused_card, truncate, Palette};
use finsight::analytics::income_expense_points;
use finsight::app::{ActivePage, App};
use finsight::filter::SortField;
use finsight::pages::{
    AnalyticsState, AnalyticsView, BudgetState, DashboardState, DashboardView, FilterOption,
    PageContext, SettingsField, SettingsState, StatusMessage, TransactionsState,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, List, ListItem, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.preferences.theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Sidebar + page
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(0)])
        .split(chunks[1]);

    render_header(f, chunks[0], app, &palette);
    render_sidebar(f, body[0], app, &palette);

    let ctx = app.context();
    match app.active() {
        ActivePage::Dashboard(state) => render_dashboard(f, body[1], state, &ctx, &palette),
        ActivePage::Transactions(state) => render_transactions(f, body[1], state, &ctx, &palette),
        ActivePage::Budget(state) => render_budget(f, body[1], state, &ctx, &palette),
        ActivePage::Analytics(state) => render_analytics(f, body[1], state, &ctx, &palette),
        ActivePage::Settings(state) => render_settings(f, body[1], state, &ctx, &palette),
    }

    render_status_bar(f, chunks[2], app, &palette);
}

// ============================================================================
// FRAME
// ============================================================================

fn render_header(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let spans = vec![
        Span::styled("💰 FinSight", palette.heading()),
        Span::raw("  │  "),
        Span::styled(
            app.current_page().title(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  "),
        Span::styled(
            format!("Data as of {}", app.preferences.date_format.format(app.dataset.as_of)),
            Style::default().fg(palette.muted),
        ),
        Span::raw("  │  "),
        Span::styled(app.dataset.user.email.clone(), Style::default().fg(palette.text)),
    ];

    let header = Paragraph::new(Line::from(spans)).block(focused_card("", palette));
    f.render_widget(header, area);
}

fn render_sidebar(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let items: Vec<ListItem> = app
        .nav_panel()
        .items()
        .into_iter()
        .map(|item| {
            let key = format!("F{} ", item.page.index() + 1);
            let style = if item.active {
                Style::default()
                    .fg(palette.highlight)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(palette.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(key, Style::default().fg(palette.muted)),
                Span::styled(item.label, style),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(card("Menu", palette)), area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(palette.highlight));

    let mut spans = match app.active() {
        ActivePage::Dashboard(_) => vec![key("↑/↓"), Span::raw(" Recent | ")],
        ActivePage::Transactions(state) if state.searching => vec![
            key("type"),
            Span::raw(" Search | "),
            key("Enter/Esc"),
            Span::raw(" Done | "),
        ],
        ActivePage::Transactions(state) if state.show_filters => vec![
            key("↑/↓"),
            Span::raw(" Option | "),
            key("Space"),
            Span::raw(" Toggle | "),
            key("←/→"),
            Span::raw(" Date | "),
            key("Del"),
            Span::raw(" Unset | "),
            key("c"),
            Span::raw(" Clear | "),
            key("f"),
            Span::raw(" Close | "),
        ],
        ActivePage::Transactions(_) => vec![
            key("/"),
            Span::raw(" Search | "),
            key("f"),
            Span::raw(" Filters | "),
            key("d/n/g/a"),
            Span::raw(" Sort | "),
            key("e"),
            Span::raw(" Export | "),
        ],
        ActivePage::Budget(_) => vec![key("↑/↓"), Span::raw(" Budget | ")],
        ActivePage::Analytics(_) => vec![
            key("v"),
            Span::raw(" View | "),
            key("[/]"),
            Span::raw(" Start | "),
            key("{/}"),
            Span::raw(" End | "),
            key("r"),
            Span::raw(" Reset | "),
        ],
        ActivePage::Settings(_) => vec![
            key("↑/↓"),
            Span::raw(" Field | "),
            key("←/→"),
            Span::raw(" Change | "),
            key("s"),
            Span::raw(" Save | "),
            key("p/e"),
            Span::raw(" Export | "),
        ],
    };

    spans.push(key("Tab"));
    spans.push(Span::raw(" Page | "));
    spans.push(Span::styled("q", Style::default().fg(palette.expense)));
    spans.push(Span::raw(" Quit"));

    let status = Paragraph::new(Line::from(spans)).block(card("", palette));
    f.render_widget(status, area);
}

fn status_line(status: &Option<StatusMessage>, palette: &Palette) -> Line<'static> {
    match status {
        Some(message) => {
            let color = if message.is_error {
                palette.expense
            } else {
                palette.income
            };
            Line::from(Span::styled(message.text.clone(), Style::default().fg(color)))
        }
        None => Line::from(""),
    }
}

// ============================================================================
// DASHBOARD
// ============================================================================

fn render_dashboard(
    f: &mut Frame,
    area: Rect,
    state: &DashboardState,
    ctx: &PageContext,
    palette: &Palette,
) {
    let view = DashboardView::build(ctx);
    let currency = ctx.preferences.currency;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let card_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    for (summary, slot) in view.cards.iter().zip(card_areas.iter()) {
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                currency.format_amount(summary.value),
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                summary.caption.clone(),
                Style::default().fg(palette.muted),
            )),
        ])
        .block(card(summary.title, palette));
        f.render_widget(body, *slot);
    }

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    let labels: Vec<String> = view.spending.iter().map(|p| p.label.clone()).collect();
    let line = LineSeries::from_points("Spending", palette.accent, &view.spending);
    render_line_chart(f, lower[0], "Spending Overview", &[line], &labels, palette);

    let items: Vec<ListItem> = view
        .recent
        .iter()
        .enumerate()
        .map(|(i, tx)| {
            let marker = if state.selected_recent == Some(i) { "→ " } else { "  " };
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(tx.description.clone(), Style::default().fg(palette.text)),
                    Span::raw("  "),
                    Span::styled(currency.format_signed(tx.amount), palette.amount(tx.amount)),
                ]),
                Line::from(Span::styled(
                    format!("    {}", tx.when),
                    Style::default().fg(palette.muted),
                )),
            ])
        })
        .collect();

    f.render_widget(List::new(items).block(card("Recent Transactions", palette)), lower[1]);
}

// ============================================================================
// TRANSACTIONS
// ============================================================================

fn render_transactions(
    f: &mut Frame,
    area: Rect,
    state: &TransactionsState,
    ctx: &PageContext,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let cursor = if state.searching { "▏" } else { "" };
    let search = Paragraph::new(Line::from(vec![
        Span::styled("Search: ", Style::default().fg(palette.muted)),
        Span::styled(
            format!("{}{}", state.filter.search, cursor),
            Style::default().fg(palette.text),
        ),
    ]))
    .block(if state.searching {
        focused_card("Transactions", palette)
    } else {
        card("Transactions", palette)
    });
    f.render_widget(search, rows[0]);

    let table_area = if state.show_filters {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(rows[1]);
        render_filter_panel(f, split[0], state, ctx, palette);
        split[1]
    } else {
        rows[1]
    };

    render_transaction_table(f, table_area, state, ctx, palette);
    f.render_widget(Paragraph::new(status_line(&state.status, palette)), rows[2]);
}

fn render_filter_panel(
    f: &mut Frame,
    area: Rect,
    state: &TransactionsState,
    ctx: &PageContext,
    palette: &Palette,
) {
    let date_format = ctx.preferences.date_format;
    let show_date = |date: Option<chrono::NaiveDate>| {
        date.map(|d| date_format.format(d))
            .unwrap_or_else(|| "not set".to_string())
    };

    let items: Vec<ListItem> = TransactionsState::filter_options(ctx)
        .into_iter()
        .enumerate()
        .map(|(i, option)| {
            let text = match &option {
                FilterOption::Category(category) => {
                    let mark = if state.filter.categories.contains(category) { "[x]" } else { "[ ]" };
                    format!("{} {}", mark, option.label())
                }
                FilterOption::Type(transaction_type) => {
                    let mark = if state.filter.types.contains(transaction_type) { "[x]" } else { "[ ]" };
                    format!("{} {}", mark, option.label())
                }
                FilterOption::StartDate => format!("{}: {}", option.label(), show_date(state.filter.start)),
                FilterOption::EndDate => format!("{}: {}", option.label(), show_date(state.filter.end)),
            };

            let style = if i == state.filter_cursor {
                Style::default()
                    .fg(palette.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            ListItem::new(Span::styled(text, style))
        })
        .collect();

    f.render_widget(List::new(items).block(focused_card("Filters", palette)), area);
}

fn render_transaction_table(
    f: &mut Frame,
    area: Rect,
    state: &TransactionsState,
    ctx: &PageContext,
    palette: &Palette,
) {
    let visible = state.visible(ctx);
    let currency = ctx.preferences.currency;
    let date_format = ctx.preferences.date_format;

    let header_cells = SortField::ALL.iter().map(|field| {
        let title = if *field == state.sort.field {
            format!("{} {}", field.title(), state.sort.direction.arrow())
        } else {
            field.title().to_string()
        };
        Cell::from(title).style(palette.heading())
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(palette.muted))
        .height(1);

    let rows = visible.iter().map(|tx| {
        Row::new(vec![
            Cell::from(date_format.format(tx.date)),
            Cell::from(truncate(&tx.description, 30)),
            Cell::from(truncate(&tx.category, 18)),
            Cell::from(currency.format_signed(tx.amount)).style(palette.amount(tx.amount)),
        ])
        .height(1)
    });

    let title = format!("{} of {}", visible.len(), ctx.dataset.transactions.len());
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(32),
            Constraint::Length(20),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(card(&title, palette))
    .highlight_style(
        Style::default()
            .bg(palette.muted)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    let mut table_state = TableState::default();
    table_state.select(state.selected);
    f.render_stateful_widget(table, area, &mut table_state);
}

// ============================================================================
// BUDGET
// ============================================================================

fn render_budget(
    f: &mut Frame,
    area: Rect,
    state: &BudgetState,
    ctx: &PageContext,
    palette: &Palette,
) {
    let currency = ctx.preferences.currency;
    let overview = BudgetState::overview(ctx);
    let budget_rows = BudgetState::rows(ctx);

    let mut constraints = vec![Constraint::Length(4)];
    constraints.extend(budget_rows.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Min(0));

    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Spent "),
            Span::styled(currency.format_amount(overview.total_spent), palette.heading()),
            Span::raw(" of "),
            Span::styled(currency.format_amount(overview.total_limit), palette.heading()),
            Span::raw(format!("  ({} remaining)", currency.format_amount(overview.remaining()))),
        ]),
        Line::from(vec![
            Span::styled(format!("{} on track", overview.normal), Style::default().fg(palette.income)),
            Span::raw("  "),
            Span::styled(format!("{} warning", overview.warning), palette.severity(finsight::Severity::Warning)),
            Span::raw("  "),
            Span::styled(format!("{} near limit", overview.critical), palette.severity(finsight::Severity::Critical)),
        ]),
    ])
    .block(card("Budget Overview", palette));
    f.render_widget(summary, slots[0]);

    for (i, row) in budget_rows.iter().enumerate() {
        let slot = slots[i + 1];
        let budget = &row.budget;
        let title = if state.selected == Some(i) {
            format!("→ {} · {}", budget.category, budget.kind_label())
        } else {
            format!("{} · {}", budget.category, budget.kind_label())
        };

        match &row.progress {
            Ok(progress) => {
                let warning = if progress.near_limit { "  ⚠ near limit" } else { "" };
                let label = format!(
                    "{} / {}  {}%{}",
                    currency.format_amount(budget.spent),
                    currency.format_amount(budget.limit),
                    progress.display_percentage,
                    warning
                );
                render_gauge(
                    f,
                    slot,
                    &title,
                    progress.bar_ratio,
                    label,
                    palette.severity(progress.severity),
                    palette,
                );
            }
            Err(e) => {
                let body = Paragraph::new(Span::styled(
                    format!("Invalid budget: {}", e),
                    Style::default().fg(palette.expense),
                ))
                .block(card(&title, palette));
                f.render_widget(body, slot);
            }
        }
    }
}

// ============================================================================
// ANALYTICS
// ============================================================================

fn render_analytics(
    f: &mut Frame,
    area: Rect,
    state: &AnalyticsState,
    ctx: &PageContext,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let selected = match state.view {
        AnalyticsView::Charts => 0,
        AnalyticsView::Predictions => 1,
    };
    let date_format = ctx.preferences.date_format;
    let tabs = Tabs::new(vec![
        AnalyticsView::Charts.title(),
        AnalyticsView::Predictions.title(),
    ])
    .select(selected)
    .highlight_style(palette.heading())
    .block(card(
        &format!(
            "Analytics · {} to {}",
            date_format.format(state.range.start),
            date_format.format(state.range.end)
        ),
        palette,
    ));
    f.render_widget(tabs, rows[0]);

    match state.view {
        AnalyticsView::Charts => render_analytics_charts(f, rows[1], state, ctx, palette),
        AnalyticsView::Predictions => render_predictions(f, rows[1], ctx, palette),
    }
}

fn render_analytics_charts(
    f: &mut Frame,
    area: Rect,
    state: &AnalyticsState,
    ctx: &PageContext,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);

    let history = &ctx.dataset.history;
    let (income, expenses) = income_expense_points(history);
    let labels: Vec<String> = history.iter().map(|m| m.month.clone()).collect();
    let lines = [
        LineSeries::new("Income", palette.income, income),
        LineSeries::new("Expenses", palette.expense, expenses),
    ];
    render_line_chart(f, top[0], "Income vs Expenses", &lines, &labels, palette);

    render_bar_chart(f, top[1], "Spending by Category", &state.spending(ctx), palette);

    let slices = ctx.dataset.distribution.slices();
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);
    for ((name, pct), slot) in slices.iter().zip(slots.iter()) {
        render_gauge(
            f,
            *slot,
            name,
            pct / 100.0,
            format!("{:.0}%", pct),
            Style::default().fg(palette.accent),
            palette,
        );
    }
}

fn render_predictions(f: &mut Frame, area: Rect, ctx: &PageContext, palette: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let prediction = Paragraph::new(AnalyticsState::prediction_text(ctx))
        .wrap(Wrap { trim: true })
        .block(focused_card("Expense Forecast", palette));
    f.render_widget(prediction, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let to_lines = |insights: &[finsight::analytics::Insight]| -> Vec<Line<'static>> {
        insights
            .iter()
            .flat_map(|insight| {
                [
                    Line::from(Span::styled(insight.kind.title(), palette.heading())),
                    Line::from(Span::styled(
                        insight.message.clone(),
                        Style::default().fg(palette.text),
                    )),
                    Line::from(""),
                ]
            })
            .collect()
    };

    let insights = Paragraph::new(to_lines(&ctx.dataset.insights))
        .wrap(Wrap { trim: true })
        .block(card("AI Insights", palette));
    f.render_widget(insights, columns[0]);

    let patterns = Paragraph::new(to_lines(&ctx.dataset.patterns))
        .wrap(Wrap { trim: true })
        .block(card("Spending Patterns", palette));
    f.render_widget(patterns, columns[1]);
}

// ============================================================================
// SETTINGS
// ============================================================================

fn render_settings(
    f: &mut Frame,
    area: Rect,
    state: &SettingsState,
    ctx: &PageContext,
    palette: &Palette,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    let draft = state.draft;
    let fields: Vec<ListItem> = SettingsField::ALL
        .iter()
        .map(|field| {
            let value = match field {
                SettingsField::Currency => draft.currency.to_string(),
                SettingsField::DateFormat => draft.date_format.label().to_string(),
                SettingsField::Theme => draft.theme.name().to_string(),
            };
            let style = if *field == state.cursor {
                Style::default()
                    .fg(palette.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<12}", field.label()), Style::default().fg(palette.muted)),
                Span::styled(format!("‹ {} ›", value), style),
            ]))
        })
        .collect();
    f.render_widget(List::new(fields).block(card("Preferences", palette)), rows[0]);

    let preview = Paragraph::new(vec![
        Line::from(format!(
            "Amount: {}",
            draft.currency.format_signed(-1234.5)
        )),
        Line::from(format!("Date:   {}", draft.date_format.format(ctx.today))),
    ])
    .block(card("Preview", palette));
    f.render_widget(preview, rows[1]);

    let export = Paragraph::new(vec![
        Line::from("p  Export as PDF"),
        Line::from("e  Export as CSV"),
    ])
    .block(card("Data Export", palette));
    f.render_widget(export, rows[2]);

    let saved = if draft == ctx.preferences {
        Line::from(Span::styled("No unsaved changes", Style::default().fg(palette.muted)))
    } else {
        Line::from(Span::styled("Unsaved changes (s to save)", palette.heading()))
    };
    f.render_widget(
        Paragraph::new(vec![saved, status_line(&state.status, palette)]),
        rows[3],
    );
}
