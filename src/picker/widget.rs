use super::grid::{DayCell, Membership, MonthGrid, Week};
use super::session::PickerSession;
use super::DateFilter;
use crate::theme::{
    ADJACENT_STYLE, BASE_STYLE, DISABLED_STYLE, SELECTED_STYLE, TITLE_STYLE, WEEKDAY_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Paragraph, StatefulWidget, Widget},
};
use std::marker::PhantomData;
use time::{Date, Weekday, Weekday::*};

/// Width of the grid in columns: seven days at four columns each
pub(crate) const PICKER_WIDTH: u16 = 28;

/// Number of lines taken up by the month title and the weekday header
const HEADER_LINES: u16 = 2;

static WEEKDAYS: [Weekday; 7] = [
    Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, Saturday,
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Picker<F> {
    focus: Date,
    _data: PhantomData<F>,
}

impl<F> Picker<F> {
    pub(crate) fn new(focus: Date) -> Picker<F> {
        Picker {
            focus,
            _data: PhantomData,
        }
    }

    pub(crate) fn height_for(grid: &MonthGrid) -> u16 {
        let weeks = u16::try_from(grid.weeks().len()).unwrap_or(u16::MAX);
        HEADER_LINES.saturating_add(weeks)
    }

    fn week_line(&self, week: &Week, selection: Option<Date>) -> Line<'static> {
        Line::from_iter(WEEKDAYS.iter().map(|&wd| match week.get(wd) {
            Some(cell) => self.day_span(cell, selection),
            None => Span::styled("    ", BASE_STYLE),
        }))
    }

    fn day_span(&self, cell: DayCell, selection: Option<Date>) -> Span<'static> {
        let selected = selection == Some(cell.date);
        let day = cell.date.day();
        let text = if selected {
            format!("[{day:2}]")
        } else {
            format!(" {day:2} ")
        };
        let mut style = if selected {
            SELECTED_STYLE
        } else if !cell.selectable {
            DISABLED_STYLE
        } else if cell.membership == Membership::Current {
            BASE_STYLE
        } else {
            ADJACENT_STYLE
        };
        if cell.date == self.focus {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Span::styled(text, style)
    }
}

impl<F: DateFilter> StatefulWidget for Picker<F> {
    type State = PickerSession<F>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let Some(grid) = state.grid() else {
            return;
        };
        let month = grid.cursor().month();
        let year = grid.cursor().year();
        let mut lines = Vec::with_capacity(grid.weeks().len() + 2);
        lines.push(Line::styled(format!("{month} {year}"), TITLE_STYLE).centered());
        lines.push(Line::from_iter(WEEKDAYS.iter().map(|&wd| {
            Span::styled(format!(" {} ", weekday_abbrev(wd)), WEEKDAY_STYLE)
        })));
        let selection = state.selection();
        for week in grid.weeks() {
            lines.push(self.week_line(week, selection));
        }
        Paragraph::new(Text::from(lines)).render(area, buf);
    }
}

fn weekday_abbrev(wd: Weekday) -> &'static str {
    match wd {
        Sunday => "Su",
        Monday => "Mo",
        Tuesday => "Tu",
        Wednesday => "We",
        Thursday => "Th",
        Friday => "Fr",
        Saturday => "Sa",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::FloorDate;
    use time::macros::date;

    fn buffer_rows(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf.cell((x, y)).map_or(" ", |cell| cell.symbol()))
                    .collect()
            })
            .collect()
    }

    fn render_picker(session: &mut PickerSession<FloorDate>, focus: Date, height: u16) -> Buffer {
        let area = Rect::new(0, 0, PICKER_WIDTH, height);
        let mut buffer = Buffer::empty(area);
        Picker::new(focus).render(area, &mut buffer, session);
        buffer
    }

    #[test]
    fn test_february_grid_layout() {
        let mut session = PickerSession::new(
            date!(2024 - 02 - 10),
            FloorDate::new(Some(date!(2024 - 02 - 10))),
        );
        session.open();
        let buffer = render_picker(&mut session, date!(2024 - 02 - 11), 7);
        assert_eq!(
            buffer_rows(&buffer),
            [
                "       February 2024        ",
                " Su  Mo  Tu  We  Th  Fr  Sa ",
                " 28  29  30  31   1   2   3 ",
                "  4   5   6   7   8   9  10 ",
                " 11  12  13  14  15  16  17 ",
                " 18  19  20  21  22  23  24 ",
                " 25  26  27  28  29   1   2 ",
            ]
        );
        // The weekday header is bold
        assert_eq!(buffer.cell((0, 1)).unwrap().style(), WEEKDAY_STYLE);
        // Feb 10 (the floor) is disabled; Feb 11 is focused
        assert_eq!(buffer.cell((24, 3)).unwrap().style(), DISABLED_STYLE);
        assert_eq!(
            buffer.cell((0, 4)).unwrap().style(),
            BASE_STYLE.add_modifier(Modifier::REVERSED)
        );
        // Mar 1 is an adjacent-month day past the floor
        assert_eq!(buffer.cell((20, 6)).unwrap().style(), ADJACENT_STYLE);
    }

    #[test]
    fn test_selected_day_is_bracketed() {
        let mut session = PickerSession::new(
            date!(2024 - 02 - 10),
            FloorDate::new(Some(date!(2024 - 02 - 10))),
        );
        session.open();
        session.choose(date!(2024 - 02 - 11)).unwrap();
        let buffer = render_picker(&mut session, date!(2024 - 02 - 12), 7);
        assert_eq!(buffer_rows(&buffer)[4], "[11] 12  13  14  15  16  17 ");
        assert_eq!(buffer.cell((0, 4)).unwrap().style(), SELECTED_STYLE);
    }

    #[test]
    fn test_closed_session_renders_nothing() {
        let mut session = PickerSession::new(date!(2024 - 02 - 10), FloorDate::new(None));
        let area = Rect::new(0, 0, PICKER_WIDTH, 7);
        let mut buffer = Buffer::empty(area);
        Picker::new(date!(2024 - 02 - 10)).render(area, &mut buffer, &mut session);
        assert_eq!(buffer, Buffer::empty(area));
    }
}
