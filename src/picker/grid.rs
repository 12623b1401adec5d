use super::cursor::MonthCursor;
use super::util::{iter_days_after, iter_days_before, WeekdayExt};
use super::DateFilter;
use std::iter::successors;
use time::{Date, Weekday, Weekday::*};

const DAYS_IN_WEEK: usize = 7;

/// Which month of the grid a cell's date falls in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Membership {
    Previous,
    Current,
    Next,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) date: Date,
    pub(crate) membership: Membership,
    pub(crate) selectable: bool,
}

impl DayCell {
    fn new<F: DateFilter>(date: Date, membership: Membership, filter: &F) -> DayCell {
        DayCell {
            date,
            membership,
            selectable: filter.is_selectable(date),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
// Slots run Sunday through Saturday.  A slot is None only when the day it
// would hold lies outside time's representable range.
pub(crate) struct Week([Option<DayCell>; DAYS_IN_WEEK]);

impl Week {
    pub(crate) fn get(&self, wd: Weekday) -> Option<DayCell> {
        self.0.get(usize::from(wd.index0())).copied().flatten()
    }

    pub(crate) fn enumerate(&self) -> EnumerateWeek<'_> {
        EnumerateWeek::new(self)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct EnumerateWeek<'a> {
    week: &'a Week,
    next_weekday: Option<Weekday>,
}

impl<'a> EnumerateWeek<'a> {
    fn new(week: &'a Week) -> Self {
        EnumerateWeek {
            week,
            next_weekday: Some(Sunday),
        }
    }
}

impl Iterator for EnumerateWeek<'_> {
    type Item = (Weekday, DayCell);

    fn next(&mut self) -> Option<(Weekday, DayCell)> {
        loop {
            let wd = self.next_weekday?;
            self.next_weekday = match wd.next() {
                Sunday => None,
                wd2 => Some(wd2),
            };
            if let Some(cell) = self.week.get(wd) {
                return Some((wd, cell));
            }
        }
    }
}

/// One month's worth of whole weeks: the displayed month's days plus however
/// many days of the adjacent months it takes to fill the first and last week.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    cursor: MonthCursor,
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub(crate) fn compute<F: DateFilter>(cursor: MonthCursor, filter: &F) -> MonthGrid {
        let Some(first) = cursor.first_day() else {
            return MonthGrid {
                cursor,
                weeks: Vec::new(),
            };
        };
        let leading = usize::from(first.weekday().index0());
        let mut before = iter_days_before(first)
            .take(leading)
            .map(|date| DayCell::new(date, Membership::Previous, filter))
            .collect::<Vec<_>>();
        before.reverse();
        // Days before Date::MIN come up empty, so pad the difference
        let mut cells: Vec<Option<DayCell>> = vec![None; leading - before.len()];
        cells.extend(before.into_iter().map(Some));
        let mut last = first;
        for date in successors(Some(first), |&d| d.next_day())
            .take_while(|&d| (d.year(), d.month()) == (cursor.year(), cursor.month()))
        {
            cells.push(Some(DayCell::new(date, Membership::Current, filter)));
            last = date;
        }
        let target = cells.len().next_multiple_of(DAYS_IN_WEEK);
        cells.extend(
            iter_days_after(last)
                .take(target - cells.len())
                .map(|date| Some(DayCell::new(date, Membership::Next, filter))),
        );
        // Days after Date::MAX come up empty, too
        cells.resize(target, None);
        let weeks = cells
            .chunks_exact(DAYS_IN_WEEK)
            .map(|chunk| {
                Week(
                    chunk
                        .try_into()
                        .expect("chunks_exact yields slices of length DAYS_IN_WEEK"),
                )
            })
            .collect();
        MonthGrid { cursor, weeks }
    }

    pub(crate) fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub(crate) fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub(crate) fn cell(&self, date: Date) -> Option<DayCell> {
        self.weeks
            .iter()
            .flat_map(|week| week.enumerate().map(|(_, cell)| cell))
            .find(|cell| cell.date == date)
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.cell(date).is_some()
    }
}
