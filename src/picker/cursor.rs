use time::{Date, Month};

/// The (year, month) pair currently on display.  Stepping is pure and
/// unbounded; converting to concrete `Date`s is fallible at the far ends of
/// `time`'s representable range.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthCursor {
    year: i32,
    month: Month,
}

impl MonthCursor {
    pub(crate) fn new(year: i32, month: Month) -> MonthCursor {
        MonthCursor { year, month }
    }

    pub(crate) fn from_date(date: Date) -> MonthCursor {
        MonthCursor {
            year: date.year(),
            month: date.month(),
        }
    }

    pub(crate) fn year(self) -> i32 {
        self.year
    }

    pub(crate) fn month(self) -> Month {
        self.month
    }

    pub(crate) fn prev_month(self) -> MonthCursor {
        let year = if self.month == Month::January {
            self.year - 1
        } else {
            self.year
        };
        MonthCursor {
            year,
            month: self.month.previous(),
        }
    }

    pub(crate) fn next_month(self) -> MonthCursor {
        let year = if self.month == Month::December {
            self.year + 1
        } else {
            self.year
        };
        MonthCursor {
            year,
            month: self.month.next(),
        }
    }

    pub(crate) fn prev_year(self) -> MonthCursor {
        MonthCursor {
            year: self.year - 1,
            month: self.month,
        }
    }

    pub(crate) fn next_year(self) -> MonthCursor {
        MonthCursor {
            year: self.year + 1,
            month: self.month,
        }
    }

    pub(crate) fn first_day(self) -> Option<Date> {
        Date::from_calendar_date(self.year, self.month, 1).ok()
    }

    pub(crate) fn last_day(self) -> Option<Date> {
        let first = self.first_day()?;
        match self.next_month().first_day() {
            Some(next_first) => next_first.previous_day(),
            // Only December 9999 has no following month
            None => Some(Date::MAX),
        }
        .filter(|last| *last >= first)
    }

    /// The given day of this month, clamped down to the month's length
    pub(crate) fn day_clamped(self, day: u8) -> Option<Date> {
        let last = self.last_day()?;
        Date::from_calendar_date(self.year, self.month, day.min(last.day())).ok()
    }
}
