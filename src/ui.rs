use anyhow::Result;
use campus_records::{
    Directory, DirectorySnapshot, HasAttendance, HasMarks, HasPayments, Person, RecordBrowser,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Students,
    Teachers,
    Exams,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Students => Page::Teachers,
            Page::Teachers => Page::Exams,
            Page::Exams => Page::Students,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Students => Page::Exams,
            Page::Teachers => Page::Students,
            Page::Exams => Page::Teachers,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Students => "Students",
            Page::Teachers => "Teachers",
            Page::Exams => "Exam Schedule",
        }
    }
}

/// Read-only view over a directory snapshot
pub struct App {
    pub snapshot: DirectorySnapshot,
    pub state: TableState,
    pub current_page: Page,
    pub show_detail: bool,
}

impl App {
    pub fn new(snapshot: DirectorySnapshot) -> Self {
        let mut app = Self {
            snapshot,
            state: TableState::default(),
            current_page: Page::Students,
            show_detail: false,
        };
        app.reset_selection();
        app
    }

    fn reset_selection(&mut self) {
        let first = if self.row_count() > 0 { Some(0) } else { None };
        self.state.select(first);
    }

    pub fn row_count(&self) -> usize {
        match self.current_page {
            Page::Students => self.snapshot.students.len(),
            Page::Teachers => self.snapshot.teachers.len(),
            Page::Exams => self.snapshot.exams.len(),
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
        self.reset_selection();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
        self.reset_selection();
    }

    pub fn next(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.row_count();
        if len == 0 {
            return;
        }
        let i = self.state.selected().map_or(0, |i| (i + 20).min(len - 1));
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let i = self.state.selected().map_or(0, |i| i.saturating_sub(20));
        if self.row_count() > 0 {
            self.state.select(Some(i));
        }
    }

    /// Lines for the detail pane of the selected row
    pub fn detail_lines(&self) -> Vec<String> {
        let Some(i) = self.state.selected() else {
            return vec!["Nothing selected".to_string()];
        };

        match self.current_page {
            Page::Students => match self.snapshot.students.get(i) {
                Some(s) => vec![
                    s.summary(),
                    String::new(),
                    format!("Attendance: {}", s.attendance()),
                    format!(
                        "  present {} / absent {}",
                        s.attendance().present_days(),
                        s.attendance().absent_days()
                    ),
                    format!("Marks: {}", s.marks()),
                    format!("Payments: {}", s.payments()),
                    format!("  total paid {:.2}", s.payments().total()),
                ],
                None => Vec::new(),
            },
            Page::Teachers => match self.snapshot.teachers.get(i) {
                Some(t) => vec![
                    t.summary(),
                    String::new(),
                    format!("Attendance: {}", t.attendance()),
                    format!(
                        "  present {} / absent {}",
                        t.attendance().present_days(),
                        t.attendance().absent_days()
                    ),
                ],
                None => Vec::new(),
            },
            Page::Exams => match self.snapshot.exams.get(i) {
                Some(exam) => vec![exam.to_string()],
                None => Vec::new(),
            },
        }
    }
}

/// Opens the full-screen browser from the console menu
pub struct TerminalBrowser;

impl RecordBrowser for TerminalBrowser {
    fn browse(&mut self, directory: &Directory) -> Result<()> {
        let mut app = App::new(directory.snapshot());
        run_ui(&mut app)
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "record browser failed");
        return Err(err.into());
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => {
                    if app.row_count() > 0 {
                        app.state.select(Some(0));
                    }
                }
                KeyCode::End => {
                    if app.row_count() > 0 {
                        app.state.select(Some(app.row_count() - 1));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    if app.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        render_table(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        render_table(f, chunks[1], app);
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Students, Page::Teachers, Page::Exams];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        app.snapshot.institution.clone(),
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    });
    Row::new(cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1)
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let (header, rows, widths): (Row, Vec<Row>, Vec<Constraint>) = match app.current_page {
        Page::Students => (
            header_row(&["ID", "Name", "Email", "Days", "Subjects", "Paid"]),
            app.snapshot
                .students
                .iter()
                .map(|s| {
                    Row::new(vec![
                        Cell::from(s.id().to_string()),
                        Cell::from(truncate(s.name(), 24)),
                        Cell::from(truncate(s.email(), 32)),
                        Cell::from(s.attendance().len().to_string()),
                        Cell::from(s.marks().len().to_string()),
                        Cell::from(format!("{:.2}", s.payments().total()))
                            .style(Style::default().fg(Color::Green)),
                    ])
                })
                .collect(),
            vec![
                Constraint::Length(6),
                Constraint::Length(26),
                Constraint::Length(34),
                Constraint::Length(6),
                Constraint::Length(9),
                Constraint::Length(12),
            ],
        ),
        Page::Teachers => (
            header_row(&["ID", "Name", "Email", "Department", "Days"]),
            app.snapshot
                .teachers
                .iter()
                .map(|t| {
                    Row::new(vec![
                        Cell::from(t.id().to_string()),
                        Cell::from(truncate(t.name(), 24)),
                        Cell::from(truncate(t.email(), 32)),
                        Cell::from(truncate(t.department(), 20)),
                        Cell::from(t.attendance().len().to_string()),
                    ])
                })
                .collect(),
            vec![
                Constraint::Length(6),
                Constraint::Length(26),
                Constraint::Length(34),
                Constraint::Length(22),
                Constraint::Length(6),
            ],
        ),
        Page::Exams => (
            header_row(&["Subject", "Date", "Max"]),
            app.snapshot
                .exams
                .iter()
                .map(|e| {
                    Row::new(vec![
                        Cell::from(truncate(e.subject(), 30)),
                        Cell::from(e.date().to_string()),
                        Cell::from(e.max_marks().to_string()),
                    ])
                })
                .collect(),
            vec![
                Constraint::Length(32),
                Constraint::Length(12),
                Constraint::Length(6),
            ],
        ),
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", app.current_page.title())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app.detail_lines().into_iter().map(Line::from).collect();

    let panel = Paragraph::new(lines)
        .wrap(ratatui::widgets::Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Details "),
        );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);

    let status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, app.row_count()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Details | "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Page | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Back to menu"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
