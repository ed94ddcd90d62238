//! Feed ordering.

use std::cmp::Ordering;

use notifeed_common_config::OrderingMode;

use crate::raw::Priority;

/// Higher priority first. Uses the IEEE total order, so the result is
/// defined for every value.
pub fn compare_priority(a: Priority, b: Priority) -> Ordering {
    b.0.total_cmp(&a.0)
}

/// Order `items` in place according to `mode`.
///
/// The sort is stable, so items of equal priority keep their relative order.
pub fn order_by<T>(items: &mut [T], mode: OrderingMode, priority: impl Fn(&T) -> Priority) {
    match mode {
        OrderingMode::Discovery => {}
        OrderingMode::Priority => items.sort_by(|a, b| compare_priority(priority(a), priority(b))),
    }
}
