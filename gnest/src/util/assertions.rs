use itertools::Itertools;

//Checks on the state of the search, used in debug_assert!() blocks and tests

/// `order` contains every id in `0..n` exactly once.
pub fn is_permutation(order: &[usize], n: usize) -> bool {
    let mut seen = vec![false; n];
    order.len() == n
        && order
            .iter()
            .all(|&id| id < n && !std::mem::replace(&mut seen[id], true))
}

pub fn is_non_increasing(history: &[f64]) -> bool {
    history.iter().tuple_windows().all(|(a, b)| b <= a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutations() {
        assert!(is_permutation(&[], 0));
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
    }

    #[test]
    fn histories() {
        assert!(is_non_increasing(&[]));
        assert!(is_non_increasing(&[5.0, 5.0, 3.0]));
        assert!(!is_non_increasing(&[5.0, 6.0]));
    }
}
