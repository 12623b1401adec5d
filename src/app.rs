use crate::help::Help;
use crate::picker::{DateFilter, OutOfTimeError, Picker, PickerSession, PICKER_WIDTH};
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::{Date, Duration};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<F> {
    session: PickerSession<F>,
    focus: Date,
    state: AppState,
    chosen: Option<Date>,
}

impl<F: DateFilter> App<F> {
    pub(crate) fn new(mut session: PickerSession<F>) -> App<F> {
        session.open();
        let focus = session.anchor();
        App {
            session,
            focus,
            state: AppState::Picking,
            chosen: None,
        }
    }

    /// Runs the picker until the user confirms or cancels.  Returns the
    /// confirmed date, if any.
    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<Option<Date>> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.chosen)
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.cancel();
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Picking => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_focus(Duration::days(-1)),
                KeyCode::Char('l') | KeyCode::Right => self.move_focus(Duration::days(1)),
                KeyCode::Char('k') | KeyCode::Up => self.move_focus(Duration::weeks(-1)),
                KeyCode::Char('j') | KeyCode::Down => self.move_focus(Duration::weeks(1)),
                KeyCode::Char('p') | KeyCode::PageUp => self.navigate(PickerSession::prev_month),
                KeyCode::Char('n') | KeyCode::PageDown => self.navigate(PickerSession::next_month),
                KeyCode::Char('P') | KeyCode::Char('{') => self.navigate(PickerSession::prev_year),
                KeyCode::Char('N') | KeyCode::Char('}') => self.navigate(PickerSession::next_year),
                KeyCode::Char(' ') => self.pick(),
                KeyCode::Enter => self.confirm(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.restart();
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.cancel();
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn move_focus(&mut self, step: Duration) -> bool {
        let Some(target) = self.focus.checked_add(step) else {
            return false;
        };
        let Some(grid) = self.session.grid() else {
            return false;
        };
        if grid.contains(target) {
            self.focus = target;
            true
        } else {
            false
        }
    }

    fn navigate(&mut self, step: fn(&mut PickerSession<F>) -> Result<(), OutOfTimeError>) -> bool {
        if step(&mut self.session).is_ok() {
            self.refocus();
            true
        } else {
            false
        }
    }

    // Keep the focus on the same day-of-month after the cursor moved,
    // clamping down when the new month is shorter
    fn refocus(&mut self) {
        if let Some(date) = self
            .session
            .cursor()
            .and_then(|cursor| cursor.day_clamped(self.focus.day()))
        {
            self.focus = date;
        }
    }

    fn pick(&mut self) -> bool {
        self.session.choose(self.focus).is_ok()
    }

    fn confirm(&mut self) -> bool {
        match self.session.commit() {
            Ok(date) => {
                self.chosen = Some(date);
                self.state = AppState::Quitting;
                true
            }
            Err(_) => false,
        }
    }

    fn restart(&mut self) {
        self.session.open();
        self.focus = self.session.anchor();
    }

    fn cancel(&mut self) {
        self.session.dismiss();
        self.state = AppState::Quitting;
    }
}

impl<F: DateFilter> Widget for &mut App<F> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        if let Some(grid) = self.session.grid() {
            let height = Picker::<F>::height_for(&grid);
            let [picker_area] = Layout::horizontal([PICKER_WIDTH])
                .flex(Flex::Center)
                .areas(area);
            let [picker_area] = Layout::vertical([height])
                .flex(Flex::Center)
                .areas(picker_area);
            Picker::new(self.focus).render(picker_area, buf, &mut self.session);
        }
        if self.state == AppState::Helping {
            Help.render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::FloorDate;
    use crate::picker::cursor::MonthCursor;
    use time::macros::date;
    use time::Month;

    fn floored_app() -> App<FloorDate> {
        App::new(PickerSession::new(
            date!(2024 - 02 - 10),
            FloorDate::new(Some(date!(2024 - 02 - 10))),
        ))
    }

    #[test]
    fn test_pick_on_disabled_day_is_rejected() {
        let mut app = floored_app();
        assert!(!app.handle_key(KeyCode::Char(' ')));
        assert_eq!(app.session.selection(), None);
    }

    #[test]
    fn test_pick_and_confirm() {
        let mut app = floored_app();
        assert!(app.handle_key(KeyCode::Right));
        assert_eq!(app.focus, date!(2024 - 02 - 11));
        assert!(app.handle_key(KeyCode::Char(' ')));
        assert_eq!(app.session.selection(), Some(date!(2024 - 02 - 11)));
        assert!(app.handle_key(KeyCode::Enter));
        assert!(app.quitting());
        assert_eq!(app.chosen, Some(date!(2024 - 02 - 11)));
        assert!(!app.session.is_open());
    }

    #[test]
    fn test_confirm_without_pick_is_rejected() {
        let mut app = floored_app();
        assert!(!app.handle_key(KeyCode::Enter));
        assert!(!app.quitting());
    }

    #[test]
    fn test_month_navigation_wraps_and_refocuses() {
        let mut app = App::new(PickerSession::new(
            date!(2024 - 01 - 31),
            FloorDate::new(None),
        ));
        assert!(app.handle_key(KeyCode::Char('p')));
        assert_eq!(
            app.session.cursor(),
            Some(MonthCursor::new(2023, Month::December))
        );
        assert_eq!(app.focus, date!(2023 - 12 - 31));
        assert!(app.handle_key(KeyCode::Char('n')));
        assert!(app.handle_key(KeyCode::Char('n')));
        // January's day 31 clamps down in February
        assert_eq!(app.focus, date!(2024 - 02 - 29));
    }

    #[test]
    fn test_focus_stays_on_displayed_grid() {
        let mut app = floored_app();
        // Feb 10, 2024 is the Saturday of the grid's second row
        assert!(app.handle_key(KeyCode::Up));
        assert_eq!(app.focus, date!(2024 - 02 - 03));
        // The row above the top one is off the grid
        assert!(!app.handle_key(KeyCode::Up));
        assert_eq!(app.focus, date!(2024 - 02 - 03));
    }

    #[test]
    fn test_restart_discards_pick_and_cursor() {
        let mut app = floored_app();
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char(' '));
        app.handle_key(KeyCode::Char('n'));
        app.handle_key(KeyCode::Home);
        assert_eq!(
            app.session.cursor(),
            Some(MonthCursor::new(2024, Month::February))
        );
        assert_eq!(app.session.selection(), None);
        assert_eq!(app.focus, date!(2024 - 02 - 10));
    }

    #[test]
    fn test_cancel_yields_no_date() {
        let mut app = floored_app();
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Char(' '));
        assert!(app.handle_key(KeyCode::Esc));
        assert!(app.quitting());
        assert_eq!(app.chosen, None);
        assert!(!app.session.is_open());
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = floored_app();
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_key(KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Picking);
        assert_eq!(
            app.session.cursor(),
            Some(MonthCursor::new(2024, Month::February))
        );
    }
}
