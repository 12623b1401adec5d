use std::iter::successors;
use time::{Date, Weekday};

pub(super) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

pub(super) fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

pub(super) fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Weekday::*;

    #[test]
    fn test_index0() {
        assert_eq!(Sunday.index0(), 0);
        assert_eq!(Wednesday.index0(), 3);
        assert_eq!(Saturday.index0(), 6);
    }

    #[test]
    fn test_iter_days_before_crosses_month() {
        let mut iter = iter_days_before(date!(2024 - 03 - 01));
        assert_eq!(iter.next(), Some(date!(2024 - 02 - 29)));
        assert_eq!(iter.next(), Some(date!(2024 - 02 - 28)));
    }

    #[test]
    fn test_iter_days_after_crosses_year() {
        let mut iter = iter_days_after(date!(2024 - 12 - 30));
        assert_eq!(iter.next(), Some(date!(2024 - 12 - 31)));
        assert_eq!(iter.next(), Some(date!(2025 - 01 - 01)));
    }

    #[test]
    fn test_iter_days_after_stops_at_end_of_time() {
        let mut iter = iter_days_after(Date::MAX);
        assert_eq!(iter.next(), None);
    }
}
