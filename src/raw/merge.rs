use std::collections::VecDeque;

use crate::order::Order;

/// Merges lists that are each already sorted in `order` into one sorted list.
///
/// Each step takes the head that comes first in `order` across all remaining lists;
/// ties go to the earlier list. Lists are dropped as soon as they run dry, so a
/// candidate always exists while any list remains.
pub(crate) fn merge<T: Ord>(lists: Vec<Vec<T>>, order: Order) -> Vec<T> {
    let total = lists.iter().map(Vec::len).sum();
    let mut lists: Vec<VecDeque<T>> = lists
        .into_iter()
        .filter(|list| !list.is_empty())
        .map(VecDeque::from)
        .collect();

    if lists.len() == 1 {
        return lists.pop().map(Vec::from).unwrap_or_default();
    }

    let mut merged = Vec::with_capacity(total);
    while !lists.is_empty() {
        let mut chosen = 0;
        for (index, list) in lists.iter().enumerate().skip(1) {
            if let (Some(head), Some(best)) = (list.front(), lists[chosen].front())
                && order.precedes(head, best)
            {
                chosen = index;
            }
        }

        if let Some(item) = lists[chosen].pop_front() {
            merged.push(item);
        }
        if lists[chosen].is_empty() {
            lists.remove(chosen);
        }
    }
    merged
}
