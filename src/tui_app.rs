use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Gauge, Paragraph, Row, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table, TableState, Wrap,
    },
    Frame, Terminal,
};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use tracing::{debug, info};

use crate::charts;
use crate::dashboard::{self, Page, Slider, SLIDER_MAX, SLIDER_MIN};
use crate::error::DashboardError;
use crate::sample_data::DataSource;
use crate::virtual_table::VirtualTable;

pub const MIN_COLS: u16 = 60;
pub const MIN_ROWS: u16 = 24;
const SIDEBAR_WIDTH: u16 = 30;
const SLIDER_PAGE: isize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum Focus {
    Slider,
    Grid,
    Button,
}

impl Focus {
    fn offset(self, delta: isize) -> Focus {
        let all: Vec<Focus> = Focus::iter().collect();
        let len = all.len() as isize;
        let current = all.iter().position(|&f| f == self).unwrap_or(0) as isize;
        all[(current + delta).rem_euclid(len) as usize]
    }

    pub fn next(self) -> Focus {
        self.offset(1)
    }

    pub fn prev(self) -> Focus {
        self.offset(-1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Rerendering,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    SliderStep(isize),
    SliderSet(usize),
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Press,
    None,
}

pub fn translate_key(key: KeyEvent, focus: Focus) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => return Action::Press,
        KeyCode::Tab => return Action::FocusNext,
        KeyCode::BackTab => return Action::FocusPrev,
        _ => {}
    }

    match (focus, key.code) {
        (Focus::Slider | Focus::Grid, KeyCode::Left) => Action::SliderStep(-1),
        (Focus::Slider | Focus::Grid, KeyCode::Right) => Action::SliderStep(1),
        (Focus::Slider, KeyCode::PageUp) => Action::SliderStep(SLIDER_PAGE),
        (Focus::Slider, KeyCode::PageDown) => Action::SliderStep(-SLIDER_PAGE),
        (Focus::Slider, KeyCode::Home) => Action::SliderSet(SLIDER_MIN),
        (Focus::Slider, KeyCode::End) => Action::SliderSet(SLIDER_MAX),
        (Focus::Grid, KeyCode::Up) => Action::ScrollUp,
        (Focus::Grid, KeyCode::Down) => Action::ScrollDown,
        (Focus::Grid, KeyCode::PageUp) => Action::PageUp,
        (Focus::Grid, KeyCode::PageDown) => Action::PageDown,
        (Focus::Button, KeyCode::Enter | KeyCode::Char(' ')) => Action::Press,
        _ => Action::None,
    }
}

pub struct TuiApp {
    pub slider: Slider,
    pub page: Page,
    pub grid: VirtualTable,
    pub source: Box<dyn DataSource>,
    pub focus: Focus,
    pub phase: Phase,
    pub table_state: TableState,
    pub passes: u64,
    pub grid_page_height: usize,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(initial_rows: usize, mut source: Box<dyn DataSource>) -> Self {
        let slider = Slider::new(SLIDER_MIN, SLIDER_MAX, initial_rows);
        let page = dashboard::render(slider, source.as_mut());
        let grid = VirtualTable::new(&page.table);

        let mut table_state = TableState::default();
        if grid.num_rows() > 0 {
            table_state.select(Some(0));
        }
        debug!(rows = slider.value(), pass = 1, "initial render");

        TuiApp {
            slider,
            page,
            grid,
            source,
            focus: Focus::Slider,
            phase: Phase::Idle,
            table_state,
            passes: 1,
            grid_page_height: 1,
            should_quit: false,
        }
    }

    pub fn main_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        tick_rate: Duration,
    ) -> Result<(), DashboardError> {
        loop {
            self.draw_ui(terminal)?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.apply(translate_key(key, self.focus));
                    }
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => {
                info!(passes = self.passes, "quit requested");
                self.should_quit = true;
            }
            Action::FocusNext => self.focus = self.focus.next(),
            Action::FocusPrev => self.focus = self.focus.prev(),
            Action::SliderStep(delta) => {
                if self.slider.step(delta) {
                    self.rerender();
                }
            }
            Action::SliderSet(value) => {
                if self.slider.set(value) {
                    self.rerender();
                }
            }
            Action::ScrollUp => self.scroll_by(-1),
            Action::ScrollDown => self.scroll_by(1),
            Action::PageUp => self.scroll_by(-(self.grid_page_height.max(1) as isize)),
            Action::PageDown => self.scroll_by(self.grid_page_height.max(1) as isize),
            Action::Press => {
                info!(rows = self.slider.value(), "generate new data pressed");
                self.rerender();
            }
            Action::None => {}
        }
    }

    /// A full pass with a fresh draw for the current slider value.
    pub fn rerender(&mut self) {
        self.phase = Phase::Rerendering;
        debug!(phase = ?self.phase, rows = self.slider.value(), "render pass started");
        self.page = dashboard::render(self.slider, self.source.as_mut());
        self.grid = VirtualTable::new(&self.page.table);
        self.passes += 1;
        self.sync_selection();
        debug!(rows = self.slider.value(), pass = self.passes, "render pass complete");
        self.phase = Phase::Idle;
    }

    fn sync_selection(&mut self) {
        let rows = self.grid.num_rows();
        if rows == 0 {
            self.table_state.select(None);
            *self.table_state.offset_mut() = 0;
            return;
        }
        let selected = self.table_state.selected().map_or(0, |i| i.min(rows - 1));
        self.table_state.select(Some(selected));
    }

    fn scroll_by(&mut self, delta: isize) {
        let rows = self.grid.num_rows();
        if rows == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let target = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as usize).min(rows - 1)
        };
        self.table_state.select(Some(target));
    }

    fn draw_ui<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), DashboardError> {
        terminal.draw(|f| self.render(f))?;
        Ok(())
    }

    pub fn render(&mut self, f: &mut Frame) {
        let size = f.area();

        if size.width < MIN_COLS || size.height < MIN_ROWS {
            Self::render_too_small(f, size);
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(size);

        self.render_sidebar(f, columns[0]);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(columns[1]);

        f.render_widget(
            Paragraph::new(self.page.title).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            main[0],
        );
        f.render_widget(
            Paragraph::new(self.page.header).style(Style::default().add_modifier(Modifier::BOLD)),
            main[1],
        );
        f.render_widget(Paragraph::new(self.page.echo.as_str()), main[2]);

        self.render_grid(f, main[3]);
        self.render_charts(f, main[4], main[5]);
        self.render_button(f, main[6]);
        self.render_status(f, main[7]);
    }

    fn focus_style(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    fn render_sidebar(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.page.sidebar_header)
            .border_style(self.focus_style(Focus::Slider));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        f.render_widget(Paragraph::new(self.page.slider_label), chunks[0]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Red).bg(Color::Black))
            .ratio(self.page.slider.ratio())
            .label(self.page.slider.value().to_string());
        f.render_widget(gauge, chunks[1]);

        let bounds = Line::from(vec![
            Span::raw(self.page.slider.min.to_string()),
            Span::raw(" .. "),
            Span::raw(self.page.slider.max.to_string()),
        ]);
        f.render_widget(
            Paragraph::new(bounds).style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );

        let help = Paragraph::new(
            "Left/Right: -1/+1\nPgDn/PgUp: -10/+10\nHome/End: min/max",
        )
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
        f.render_widget(help, chunks[3]);
    }

    fn render_grid(&mut self, f: &mut Frame, area: Rect) {
        // borders + header row
        self.grid_page_height = usize::from(area.height.saturating_sub(3));

        let header_cells = self.grid.headers.iter().map(|h| {
            Cell::from(h.clone()).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
        });
        let header = Row::new(header_cells).height(1).bottom_margin(0);

        let rows = (0..self.grid.num_rows()).map(|row_idx| {
            let cells = self
                .grid
                .row(row_idx)
                .into_iter()
                .enumerate()
                .map(|(col_idx, text)| {
                    let cell = Cell::from(text.to_string());
                    if col_idx == 0 {
                        cell.style(Style::default().fg(Color::DarkGray))
                    } else {
                        cell
                    }
                });
            Row::new(cells).height(1).bottom_margin(0)
        });

        let widths = self
            .grid
            .column_widths()
            .into_iter()
            .map(Constraint::Length)
            .collect::<Vec<_>>();

        let table = Table::new(rows, &widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.page.table_subheader)
                    .border_style(self.focus_style(Focus::Grid)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("-> ")
            .column_spacing(2);

        f.render_stateful_widget(table, area, &mut self.table_state);

        let mut scrollbar_state = ScrollbarState::new(self.grid.num_rows())
            .position(self.table_state.selected().unwrap_or(0));
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }

    fn render_charts(&self, f: &mut Frame, line_area: Rect, area_area: Rect) {
        let rows = self.page.table.num_rows();

        let lines = charts::line_series(&self.page.table);
        f.render_widget(
            charts::line_chart(self.page.line_subheader, rows, &lines),
            line_area,
        );

        let bands = charts::stacked_bands(&self.page.table);
        let outlines = charts::area_outlines(&bands, charts::fill_density(area_area.width));
        f.render_widget(
            charts::area_chart(self.page.area_subheader, rows, &bands, &outlines),
            area_area,
        );
    }

    fn render_button(&self, f: &mut Frame, area: Rect) {
        let style = if self.focus == Focus::Button {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let button = Paragraph::new(Span::styled(format!(" {} ", self.page.button_label), style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.focus_style(Focus::Button)),
            );
        f.render_widget(button, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let status = Line::from(vec![
            Span::styled(
                " [Tab] focus  [←/→] slider  [↑/↓] scroll  [Enter/r] generate  [q]uit ",
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!(" passes: {} ", self.passes),
                Style::default().fg(Color::Cyan),
            ),
        ]);
        f.render_widget(Paragraph::new(status), area);
    }

    fn render_too_small(f: &mut Frame, size: Rect) {
        let msg = Paragraph::new(format!(
            "Terminal too small ({}x{}), need at least {}x{}",
            size.width, size.height, MIN_COLS, MIN_ROWS
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(msg, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_data::NormalSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;

    fn app(rows: usize) -> TuiApp {
        TuiApp::new(rows, Box::new(NormalSource::new(StdRng::seed_from_u64(11))))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen(app: &mut TuiApp, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_translate_key_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
            assert_eq!(translate_key(key(code), Focus::Grid), Action::Quit);
        }
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(ctrl_c, Focus::Button), Action::Quit);
    }

    #[test]
    fn test_translate_key_slider_focus() {
        assert_eq!(translate_key(key(KeyCode::Left), Focus::Slider), Action::SliderStep(-1));
        assert_eq!(translate_key(key(KeyCode::Right), Focus::Slider), Action::SliderStep(1));
        assert_eq!(translate_key(key(KeyCode::PageUp), Focus::Slider), Action::SliderStep(10));
        assert_eq!(translate_key(key(KeyCode::PageDown), Focus::Slider), Action::SliderStep(-10));
        assert_eq!(translate_key(key(KeyCode::Home), Focus::Slider), Action::SliderSet(0));
        assert_eq!(translate_key(key(KeyCode::End), Focus::Slider), Action::SliderSet(100));
        assert_eq!(translate_key(key(KeyCode::Up), Focus::Slider), Action::None);
    }

    #[test]
    fn test_translate_key_grid_and_button_focus() {
        assert_eq!(translate_key(key(KeyCode::Down), Focus::Grid), Action::ScrollDown);
        assert_eq!(translate_key(key(KeyCode::PageUp), Focus::Grid), Action::PageUp);
        assert_eq!(translate_key(key(KeyCode::Right), Focus::Grid), Action::SliderStep(1));
        assert_eq!(translate_key(key(KeyCode::Enter), Focus::Button), Action::Press);
        assert_eq!(translate_key(key(KeyCode::Char(' ')), Focus::Button), Action::Press);
        assert_eq!(translate_key(key(KeyCode::Enter), Focus::Slider), Action::None);
        assert_eq!(translate_key(key(KeyCode::Char('r')), Focus::Slider), Action::Press);
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        assert_eq!(Focus::Slider.next(), Focus::Grid);
        assert_eq!(Focus::Button.next(), Focus::Slider);
        assert_eq!(Focus::Slider.prev(), Focus::Button);
        let mut app = app(5);
        app.apply(Action::FocusNext);
        app.apply(Action::FocusNext);
        assert_eq!(app.focus, Focus::Button);
        app.apply(Action::FocusPrev);
        assert_eq!(app.focus, Focus::Grid);
    }

    #[test]
    fn test_default_state() {
        let app = app(dashboard::SLIDER_DEFAULT);
        assert_eq!(app.slider.value(), 50);
        assert_eq!(app.page.table.num_rows(), 50);
        assert_eq!(app.passes, 1);
        assert_eq!(app.phase, Phase::Idle);
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_slider_move_rerenders_with_new_row_count() {
        let mut app = app(50);
        app.apply(Action::SliderStep(-13));
        assert_eq!(app.page.table.num_rows(), 37);
        assert_eq!(app.page.echo, "Selected value: 37");
        assert_eq!(app.passes, 2);
        assert_eq!(app.phase, Phase::Idle);
    }

    #[test]
    fn test_slider_at_bound_does_not_rerender() {
        let mut app = app(100);
        app.apply(Action::SliderStep(1));
        app.apply(Action::SliderSet(100));
        assert_eq!(app.passes, 1);
        assert_eq!(app.page.table.num_rows(), 100);
    }

    #[test]
    fn test_press_regenerates_same_shape_new_values() {
        let mut app = app(20);
        let before = app.page.table.clone();
        app.apply(Action::Press);
        assert_eq!(app.page.table.num_rows(), 20);
        assert_eq!(app.page.table.num_columns(), 3);
        assert_ne!(app.page.table.columns, before.columns);
        assert_eq!(app.passes, 2);
    }

    #[test]
    fn test_selection_follows_table_size() {
        let mut app = app(30);
        app.focus = Focus::Grid;
        app.grid_page_height = 10;
        app.apply(Action::PageDown);
        app.apply(Action::PageDown);
        app.apply(Action::ScrollDown);
        assert_eq!(app.table_state.selected(), Some(21));
        app.apply(Action::SliderSet(5));
        assert_eq!(app.table_state.selected(), Some(4));
        app.apply(Action::SliderSet(0));
        assert_eq!(app.table_state.selected(), None);
        app.apply(Action::ScrollDown);
        assert_eq!(app.table_state.selected(), None);
        app.apply(Action::SliderSet(3));
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_scroll_stops_at_edges() {
        let mut app = app(3);
        app.apply(Action::ScrollUp);
        assert_eq!(app.table_state.selected(), Some(0));
        app.grid_page_height = 10;
        app.apply(Action::PageDown);
        assert_eq!(app.table_state.selected(), Some(2));
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut app = app(1);
        app.apply(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_shows_page_text() {
        let mut app = app(37);
        let text = screen(&mut app, 120, 60);
        for expected in [
            dashboard::TITLE,
            dashboard::SIDEBAR_HEADER,
            dashboard::SLIDER_LABEL,
            dashboard::MAIN_HEADER,
            "Selected value: 37",
            dashboard::TABLE_SUBHEADER,
            dashboard::LINE_SUBHEADER,
            dashboard::AREA_SUBHEADER,
            dashboard::BUTTON_LABEL,
        ] {
            assert!(text.contains(expected), "missing {expected:?}");
        }
    }

    #[test]
    fn test_render_zero_rows_does_not_panic() {
        let mut app = app(0);
        let text = screen(&mut app, 120, 60);
        assert!(text.contains("Selected value: 0"));
        assert!(text.contains(dashboard::AREA_SUBHEADER));
    }

    #[test]
    fn test_render_full_table() {
        let mut app = app(100);
        app.apply(Action::Press);
        let text = screen(&mut app, 160, 80);
        assert!(text.contains("Selected value: 100"));
        assert_eq!(app.grid.num_rows(), 100);
    }

    #[test]
    fn test_render_single_row() {
        let mut app = app(1);
        let text = screen(&mut app, 100, 40);
        assert!(text.contains("Selected value: 1"));
    }

    #[test]
    fn test_small_terminal_shows_guard() {
        let mut app = app(10);
        let text = screen(&mut app, 40, 10);
        assert!(text.contains("Terminal too small"));
    }
}
