use std::ops::Range;

pub type IntentName = String;
pub type SlotName = String;
pub type EntityName = String;

pub fn ranges_overlap(lhs: &Range<usize>, rhs: &Range<usize>) -> bool {
    lhs.start < rhs.end && lhs.end > rhs.start
}

/// Whether `inner` lies entirely within `outer`
pub fn range_contains(outer: &Range<usize>, inner: &Range<usize>) -> bool {
    outer.start <= inner.start
        && inner.start < outer.end
        && outer.start < inner.end
        && inner.end <= outer.end
}
