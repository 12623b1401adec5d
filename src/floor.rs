use crate::picker::DateFilter;
use time::Date;

/// Optional exclusive lower bound on choosable dates: the floor day itself
/// and everything before it are off-limits, so a range built on top of the
/// picked date always ends strictly after it starts.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct FloorDate(Option<Date>);

impl FloorDate {
    pub(crate) fn new(floor: Option<Date>) -> FloorDate {
        FloorDate(floor)
    }
}

impl DateFilter for FloorDate {
    fn is_selectable(&self, date: Date) -> bool {
        match self.0 {
            Some(floor) => date > floor,
            None => true,
        }
    }
}
