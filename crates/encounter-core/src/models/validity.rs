use jiff::civil::Date;

/// Whether `date` falls inside an inclusive `[start, end]` window.
/// A missing bound is open on that side.
pub fn is_effective_on(start: Option<Date>, end: Option<Date>, date: Date) -> bool {
    start.is_none_or(|s| s <= date) && end.is_none_or(|e| date <= e)
}
