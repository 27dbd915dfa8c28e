use crate::contacts::Contact;
use crate::ledger::{today, Sale, SaleInput, SalesLedger};
use crate::phone::{digits_only, format_phone, MIN_PHONE_DIGITS};
use crate::report::Report;
use crate::tickets::TicketType;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io;

const PRIMARY: Color = Color::Rgb(42, 92, 153);
const ACCENT: Color = Color::Rgb(255, 125, 51);
const SUCCESS: Color = Color::Rgb(76, 175, 80);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Purchase,
    Reports,
}

impl Screen {
    pub fn next(&self) -> Self {
        match self {
            Screen::Home => Screen::Purchase,
            Screen::Purchase => Screen::Reports,
            Screen::Reports => Screen::Home,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Screen::Home => Screen::Reports,
            Screen::Purchase => Screen::Home,
            Screen::Reports => Screen::Purchase,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Screen::Home => "Contatos",
            Screen::Purchase => "Comprar Ingresso",
            Screen::Reports => "Relatórios",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Seller,
    Name,
    Phone,
    TicketType,
    Quantity,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        FormField::Date,
        FormField::Seller,
        FormField::Name,
        FormField::Phone,
        FormField::TicketType,
        FormField::Quantity,
    ];

    fn next(&self) -> Self {
        let idx = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn previous(&self) -> Self {
        let idx = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn label(&self) -> &str {
        match self {
            FormField::Date => "Data",
            FormField::Seller => "Vendedor*",
            FormField::Name => "Nome completo",
            FormField::Phone => "Telefone",
            FormField::TicketType => "Ingresso",
            FormField::Quantity => "Quantidade",
        }
    }
}

/// Sale form state, one field focused at a time
#[derive(Debug, Clone)]
pub struct PurchaseForm {
    pub date: String,
    pub seller_index: usize,
    pub name: String,
    pub phone: String,
    pub ticket_type: TicketType,
    pub quantity: i64,
    pub focus: FormField,
}

impl PurchaseForm {
    pub fn new() -> Self {
        PurchaseForm {
            date: today(),
            seller_index: 0,
            name: String::new(),
            phone: String::new(),
            ticket_type: TicketType::Casal,
            quantity: 1,
            focus: FormField::Name,
        }
    }

    /// Clear customer fields, keep date and seller for the next sale
    fn reset_customer(&mut self) {
        self.name.clear();
        self.phone.clear();
        self.ticket_type = TicketType::Casal;
        self.quantity = 1;
        self.focus = FormField::Name;
    }

    fn push_phone_digit(&mut self, c: char) {
        let digits = digits_only(&self.phone);
        if c.is_ascii_digit() && digits.len() < MIN_PHONE_DIGITS {
            self.phone = format_phone(&format!("{}{}", digits, c));
        }
    }

    fn pop_phone_digit(&mut self) {
        let mut digits = digits_only(&self.phone);
        digits.pop();
        self.phone = format_phone(&digits);
    }
}

impl Default for PurchaseForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Confirmation shown after a sale is recorded
pub fn confirmation(sale: &Sale) -> String {
    format!(
        "Venda registrada para {}\n{}x {}\nTotal: R$ {}",
        sale.seller, sale.quantity, sale.ticket_type, sale.total
    )
}

pub struct App {
    pub ledger: SalesLedger,
    pub screen: Screen,
    pub search: String,
    pub contacts_state: ListState,
    pub form: PurchaseForm,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
}

impl App {
    pub fn new(ledger: SalesLedger) -> Self {
        let mut contacts_state = ListState::default();
        if !ledger.contacts().is_empty() {
            contacts_state.select(Some(0));
        }

        Self {
            ledger,
            screen: Screen::Home,
            search: String::new(),
            contacts_state,
            form: PurchaseForm::new(),
            status: None,
            should_quit: false,
        }
    }

    pub fn filtered_contacts(&self) -> Vec<Contact> {
        self.ledger.contacts().search(&self.search)
    }

    pub fn selected_seller(&self) -> Option<&str> {
        self.ledger
            .sellers()
            .get(self.form.seller_index)
            .map(String::as_str)
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    fn reset_contact_selection(&mut self) {
        let selected = if self.filtered_contacts().is_empty() { None } else { Some(0) };
        self.contacts_state.select(selected);
    }

    /// Record the form as a sale. On success the form is cleared and the home screen shown.
    pub fn submit(&mut self) {
        let input = SaleInput {
            customer_name: self.form.name.clone(),
            phone: self.form.phone.clone(),
            ticket_type: self.form.ticket_type.as_str().to_string(),
            quantity: self.form.quantity,
            seller: self.selected_seller().unwrap_or_default().to_string(),
            date: self.form.date.clone(),
        };

        match self.ledger.record(input) {
            Ok(sale) => {
                self.set_status(StatusKind::Success, confirmation(&sale));
                self.form.reset_customer();
                self.screen = Screen::Home;
                self.reset_contact_selection();
            }
            Err(err) => self.set_status(StatusKind::Error, err.to_string()),
        }
    }

    pub fn next_contact(&mut self) {
        let len = self.filtered_contacts().len();
        if len == 0 {
            return;
        }
        let i = match self.contacts_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.contacts_state.select(Some(i));
    }

    pub fn previous_contact(&mut self) {
        let len = self.filtered_contacts().len();
        if len == 0 {
            return;
        }
        let i = match self.contacts_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.contacts_state.select(Some(i));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.screen = self.screen.next();
                return;
            }
            KeyCode::BackTab => {
                self.screen = self.screen.previous();
                return;
            }
            KeyCode::Esc => {
                if self.screen == Screen::Home {
                    self.should_quit = true;
                } else {
                    self.screen = Screen::Home;
                }
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Purchase => self.handle_form_key(key),
            Screen::Reports => {}
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down => self.next_contact(),
            KeyCode::Up => self.previous_contact(),
            KeyCode::Enter => self.screen = Screen::Purchase,
            KeyCode::Backspace => {
                self.search.pop();
                self.reset_contact_selection();
            }
            KeyCode::Char(c) => {
                self.search.push(c);
                self.reset_contact_selection();
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Enter {
            self.submit();
            return;
        }

        let sellers = self.ledger.sellers().len();
        let form = &mut self.form;

        match key.code {
            KeyCode::Down => form.focus = form.focus.next(),
            KeyCode::Up => form.focus = form.focus.previous(),
            KeyCode::Right | KeyCode::Left => {
                let forward = key.code == KeyCode::Right;
                match form.focus {
                    FormField::Seller if sellers > 0 => {
                        form.seller_index = if forward {
                            (form.seller_index + 1) % sellers
                        } else {
                            (form.seller_index + sellers - 1) % sellers
                        };
                    }
                    FormField::TicketType => {
                        form.ticket_type = if forward {
                            form.ticket_type.next()
                        } else {
                            form.ticket_type.previous()
                        };
                    }
                    FormField::Quantity => {
                        form.quantity = if forward {
                            form.quantity.saturating_add(1)
                        } else {
                            (form.quantity - 1).max(1)
                        };
                    }
                    _ => {}
                }
            }
            KeyCode::Backspace => match form.focus {
                FormField::Date => {
                    form.date.pop();
                }
                FormField::Name => {
                    form.name.pop();
                }
                FormField::Phone => form.pop_phone_digit(),
                _ => {}
            },
            KeyCode::Char(c) => match form.focus {
                FormField::Date => form.date.push(c),
                FormField::Name => form.name.push(c),
                FormField::Phone => form.push_phone_digit(c),
                _ => {}
            },
            _ => {}
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app, event::read);

    // Restore terminal before reporting the loop's outcome
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(|err| {
        tracing::error!(error = %err, "ui loop failed");
        anyhow::Error::new(err).context("Terminal UI stopped with an error")
    })
}

fn run_app<B, E>(terminal: &mut Terminal<B>, app: &mut App, mut next_event: E) -> io::Result<()>
where
    B: ratatui::backend::Backend,
    E: FnMut() -> io::Result<Event>,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = next_event()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(5), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.screen {
        Screen::Home => render_home(f, chunks[1], app),
        Screen::Purchase => render_purchase(f, chunks[1], app),
        Screen::Reports => render_reports(f, chunks[1], &app.ledger.report()),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("Festival Carnes", Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)),
        Span::raw("  "),
    ];

    for (i, screen) in [Screen::Home, Screen::Purchase, Screen::Reports].iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }
        let style = if *screen == app.screen {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(screen.title().to_string(), style));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Controle de Vendas"));
    f.render_widget(header, area);
}

fn render_home(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let search = Paragraph::new(app.search.as_str())
        .block(Block::default().borders(Borders::ALL).title("Buscar contato..."));
    f.render_widget(search, chunks[0]);

    let contacts = app.filtered_contacts();
    if contacts.is_empty() {
        let empty = Paragraph::new("Nenhum contato encontrado")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = contacts
        .iter()
        .map(|c| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<30}", c.name), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(c.phone.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!("{} contatos", contacts.len())))
        .highlight_style(Style::default().bg(PRIMARY).fg(Color::White))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[1], &mut app.contacts_state);
}

fn render_purchase(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let seller = app.selected_seller().unwrap_or("-");
    let ticket_label = format!(
        "{} - R$ {}",
        form.ticket_type,
        app.ledger.prices().unit_price(form.ticket_type)
    );
    let quantity_label = format!("{} unidade(s)", form.quantity);

    let rows: Vec<Row> = FormField::ORDER
        .iter()
        .map(|field| {
            let value = match field {
                FormField::Date => form.date.clone(),
                FormField::Seller => format!("< {} >", seller),
                FormField::Name => form.name.clone(),
                FormField::Phone => {
                    if form.phone.is_empty() {
                        "(00) 00000-0000".to_string()
                    } else {
                        form.phone.clone()
                    }
                }
                FormField::TicketType => format!("< {} >", ticket_label),
                FormField::Quantity => format!("< {} >", quantity_label),
            };

            let style = if *field == form.focus {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            Row::new(vec![Cell::from(field.label().to_string()), Cell::from(value)]).style(style)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(16), Constraint::Min(20)])
        .block(Block::default().borders(Borders::ALL).title("Dados da Venda  (Enter: REGISTRAR VENDA)"));
    f.render_widget(table, area);
}

fn render_reports(f: &mut Frame, area: Rect, report: &Report) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Min(0),
        ])
        .split(area);

    let summary = Paragraph::new(vec![
        Line::from(format!("Total Vendido: R$ {}", report.total_revenue)),
        Line::from(format!("Vendas Registradas: {}", report.sale_count)),
    ])
    .block(Block::default().borders(Borders::ALL).title("Resumo Geral"));
    f.render_widget(summary, chunks[0]);

    let by_seller: Vec<Row> = report
        .revenue_by_seller
        .iter()
        .map(|e| Row::new(vec![e.seller.clone(), format!("R$ {}", e.revenue)]))
        .collect();
    let seller_table = Table::new(by_seller, [Constraint::Min(20), Constraint::Length(16)])
        .block(Block::default().borders(Borders::ALL).title("Por Vendedor"));
    f.render_widget(seller_table, chunks[1]);

    let by_type: Vec<Row> = report
        .quantity_by_ticket_type
        .iter()
        .map(|e| Row::new(vec![e.ticket_type.to_string(), format!("{} un.", e.quantity)]))
        .collect();
    let type_table = Table::new(by_type, [Constraint::Min(20), Constraint::Length(16)])
        .block(Block::default().borders(Borders::ALL).title("Por Tipo"));
    f.render_widget(type_table, chunks[2]);

    let recent: Vec<Row> = report
        .recent_sales
        .iter()
        .map(|s| {
            Row::new(vec![
                s.date.clone(),
                s.customer_name.clone(),
                format!("{}x {}", s.quantity, s.ticket_type),
                s.seller.clone(),
                format!("R$ {}", s.total),
            ])
        })
        .collect();
    let recent_table = Table::new(
        recent,
        [
            Constraint::Length(12),
            Constraint::Min(16),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(14),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Últimas Vendas"));
    f.render_widget(recent_table, chunks[3]);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let help = match app.screen {
        Screen::Home => "Digite para buscar │ ↑↓ navegar │ Enter: comprar │ Tab: telas │ Esc: sair",
        Screen::Purchase => "↑↓ campo │ ←→ escolher │ Enter: registrar │ Esc: voltar",
        Screen::Reports => "Tab: telas │ Esc: voltar",
    };

    let mut lines: Vec<Line> = Vec::new();
    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Success => SUCCESS,
            StatusKind::Error => Color::Red,
        };
        lines.push(Line::from(Span::styled(
            status.text.replace('\n', " │ "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))));

    let status = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

// ============================================================================
// TESTS
// ============================================================================
