use std::cmp::Reverse;

use crate::types::Detail;

/// Sorts details by area, largest first. The sort is stable, so details of
/// equal area keep their input order.
pub fn sort_by_area_desc(details: &mut [Detail]) {
    details.sort_by_key(|d| Reverse(d.area()));
}
