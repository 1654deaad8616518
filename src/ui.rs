use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mountain_huts::RegionReport;
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
    Provinces,
    HutsByMunicipality,
    AltitudeRanges,
    Beds,
    MaxBeds,
    HutCounts,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Provinces,
        Page::HutsByMunicipality,
        Page::AltitudeRanges,
        Page::Beds,
        Page::MaxBeds,
        Page::HutCounts,
    ];

    fn position(&self) -> usize {
        Page::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Page::ALL[(self.position() + 1) % Page::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Page::ALL[(self.position() + Page::ALL.len() - 1) % Page::ALL.len()]
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Provinces => "Provinces",
            Page::HutsByMunicipality => "Huts per Municipality",
            Page::AltitudeRanges => "Altitude Ranges",
            Page::Beds => "Beds",
            Page::MaxBeds => "Max Beds",
            Page::HutCounts => "Hut Counts",
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Page::Provinces => &["Province", "Municipalities"],
            Page::HutsByMunicipality => &["Province", "Municipality", "Huts"],
            Page::AltitudeRanges => &["Range", "Huts"],
            Page::Beds => &["Province", "Total Beds"],
            Page::MaxBeds => &["Range", "Max Beds"],
            Page::HutCounts => &["Huts", "Municipalities"],
        }
    }
}

pub struct App {
    pub report: RegionReport,
    pub state: TableState,
    pub current_page: Page,
}

impl App {
    pub fn new(report: RegionReport) -> Self {
        let mut app = Self {
            report,
            state: TableState::default(),
            current_page: Page::Provinces,
        };
        app.reset_selection();
        app
    }

    fn reset_selection(&mut self) {
        if self.rows().is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    /// Rows of the current page, already formatted as cells
    pub fn rows(&self) -> Vec<Vec<String>> {
        let r = &self.report;
        match self.current_page {
            Page::Provinces => r
                .municipalities_by_province
                .iter()
                .map(|(p, n)| vec![p.clone(), n.to_string()])
                .collect(),
            Page::HutsByMunicipality => r
                .huts_by_municipality_by_province
                .iter()
                .flat_map(|(p, per)| {
                    per.iter()
                        .map(move |(m, n)| vec![p.clone(), m.clone(), n.to_string()])
                })
                .collect(),
            Page::AltitudeRanges => r
                .huts_by_altitude_range
                .iter()
                .map(|(range, n)| vec![range.clone(), n.to_string()])
                .collect(),
            Page::Beds => r
                .beds_by_province
                .iter()
                .map(|(p, n)| vec![p.clone(), n.to_string()])
                .collect(),
            Page::MaxBeds => r
                .max_beds_by_altitude_range
                .iter()
                .map(|(range, max)| {
                    let max = max.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string());
                    vec![range.clone(), max]
                })
                .collect(),
            Page::HutCounts => r
                .municipalities_by_hut_count
                .iter()
                .map(|(count, names)| vec![count.to_string(), names.join(", ")])
                .collect(),
        }
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
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i < len - 1 => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
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

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => app.previous_page(),
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_page(),
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.previous_page(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with page tabs
            Constraint::Min(0),    // Query table
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_table(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in Page::ALL.iter().enumerate() {
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

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", app.report.region)),
    );

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let headers = app.current_page.headers();

    let header_cells = headers.iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows: Vec<Row> = app
        .rows()
        .into_iter()
        .map(|cells| Row::new(cells.into_iter().map(Cell::from)).height(1))
        .collect();

    // Last column takes whatever is left (name lists can be long)
    let mut widths = vec![Constraint::Length(24); headers.len() - 1];
    widths.push(Constraint::Min(10));

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", app.current_page.title())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);

    let status_spans = vec![
        Span::styled(
            format!(" Row: {}/{} ", selected, app.rows().len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled(app.report.summary(), Style::default().fg(Color::White)),
        Span::raw(" | "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Page | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mountain_huts::Region;

    fn app() -> App {
        let mut region = Region::new("Piemonte");
        region.set_altitude_ranges(&["0-1999", "2000-INF"]).unwrap();
        let balme = region.get_or_create_municipality("Balme", "TO", 1432);
        let acceglio = region.get_or_create_municipality("Acceglio", "CN", 1200);
        region.get_or_create_mountain_hut("Rifugio Gastaldi", Some(2659), "Rifugio", 80, balme);
        region.get_or_create_mountain_hut("Rifugio Stroppia", None, "Rifugio", 20, acceglio);
        App::new(RegionReport::build(&region))
    }

    #[test]
    fn test_page_cycle() {
        let mut page = Page::Provinces;
        for _ in 0..Page::ALL.len() {
            page = page.next();
        }
        assert_eq!(page, Page::Provinces);
        assert_eq!(Page::Provinces.previous(), Page::HutCounts);
    }

    #[test]
    fn test_rows_match_headers() {
        let mut app = app();
        for _ in 0..Page::ALL.len() {
            let width = app.current_page.headers().len();
            assert!(app.rows().iter().all(|row| row.len() == width));
            app.next_page();
        }
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();
        assert_eq!(app.state.selected(), Some(0));

        app.next();
        assert_eq!(app.state.selected(), Some(1));
        app.next();
        assert_eq!(app.state.selected(), Some(0));
        app.previous();
        assert_eq!(app.state.selected(), Some(1));
    }

    #[test]
    fn test_hut_counts_page() {
        let mut app = app();
        app.current_page = Page::HutCounts;
        assert_eq!(app.rows(), vec![vec!["1".to_string(), "Acceglio, Balme".to_string()]]);
    }
}
