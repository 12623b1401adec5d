use super::cursor::MonthCursor;
use super::grid::MonthGrid;
use super::DateFilter;
use thiserror::Error;
use time::Date;

/// One open-to-close lifetime of the picker.  The anchor date and the filter
/// are fixed at construction; the cursor and the chosen day live only while
/// the session is open and are rebuilt from scratch on every `open()`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PickerSession<F> {
    anchor: Date,
    filter: F,
    state: SessionState,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SessionState {
    Closed,
    Open {
        cursor: MonthCursor,
        selection: Option<Date>,
    },
}

impl<F: DateFilter> PickerSession<F> {
    pub(crate) fn new(anchor: Date, filter: F) -> PickerSession<F> {
        PickerSession {
            anchor,
            filter,
            state: SessionState::Closed,
        }
    }

    pub(crate) fn open(&mut self) {
        self.state = SessionState::Open {
            cursor: MonthCursor::from_date(self.anchor),
            selection: None,
        };
    }

    pub(crate) fn dismiss(&mut self) {
        self.state = SessionState::Closed;
    }

    pub(crate) fn is_open(&self) -> bool {
        self.state != SessionState::Closed
    }

    pub(crate) fn anchor(&self) -> Date {
        self.anchor
    }

    pub(crate) fn cursor(&self) -> Option<MonthCursor> {
        match self.state {
            SessionState::Open { cursor, .. } => Some(cursor),
            SessionState::Closed => None,
        }
    }

    pub(crate) fn selection(&self) -> Option<Date> {
        match self.state {
            SessionState::Open { selection, .. } => selection,
            SessionState::Closed => None,
        }
    }

    pub(crate) fn grid(&self) -> Option<MonthGrid> {
        self.cursor()
            .map(|cursor| MonthGrid::compute(cursor, &self.filter))
    }

    pub(crate) fn choose(&mut self, date: Date) -> Result<(), ChooseError> {
        let SessionState::Open { selection, .. } = &mut self.state else {
            return Err(ChooseError::Closed);
        };
        if self.filter.is_selectable(date) {
            *selection = Some(date);
            Ok(())
        } else {
            Err(ChooseError::Disabled)
        }
    }

    pub(crate) fn commit(&mut self) -> Result<Date, CommitError> {
        match self.state {
            SessionState::Open {
                selection: Some(date),
                ..
            } => {
                self.state = SessionState::Closed;
                Ok(date)
            }
            SessionState::Open {
                selection: None, ..
            } => Err(CommitError::NoSelection),
            SessionState::Closed => Err(CommitError::Closed),
        }
    }

    pub(crate) fn prev_month(&mut self) -> Result<(), OutOfTimeError> {
        self.step(MonthCursor::prev_month)
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        self.step(MonthCursor::next_month)
    }

    pub(crate) fn prev_year(&mut self) -> Result<(), OutOfTimeError> {
        self.step(MonthCursor::prev_year)
    }

    pub(crate) fn next_year(&mut self) -> Result<(), OutOfTimeError> {
        self.step(MonthCursor::next_year)
    }

    fn step(&mut self, op: fn(MonthCursor) -> MonthCursor) -> Result<(), OutOfTimeError> {
        let SessionState::Open { cursor, .. } = &mut self.state else {
            return Ok(());
        };
        let stepped = op(*cursor);
        if stepped.first_day().is_some() {
            *cursor = stepped;
            Ok(())
        } else {
            Err(OutOfTimeError)
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ChooseError {
    #[error("date is not selectable")]
    Disabled,
    #[error("picker is not open")]
    Closed,
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum CommitError {
    #[error("no date has been chosen")]
    NoSelection,
    #[error("picker is not open")]
    Closed,
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
