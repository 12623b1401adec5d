pub(crate) mod cursor;
pub(crate) mod grid;
pub(crate) mod session;
mod util;
mod widget;
pub(crate) use self::session::{OutOfTimeError, PickerSession};
pub(crate) use self::widget::{Picker, PICKER_WIDTH};
use time::Date;

pub(crate) trait DateFilter {
    fn is_selectable(&self, date: Date) -> bool;
}
