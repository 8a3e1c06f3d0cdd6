//! Checked-in-debug slice access
//!
//! Broad-phase cell indices are validated once (`Grid::cell_index`) and then
//! used for several reads/writes in a row. In debug builds every access keeps
//! its bounds check; release builds skip the repeated checks.
//!
//! Usage:
//! ```rust
//! use fixphys_engine::fast;
//!
//! let cells = vec![vec![1u32], vec![], vec![7, 9]];
//! let idx = 2;
//! assert_eq!(fast!(cells, [idx]).len(), 2);
//!
//! let mut counts = vec![0u32; 3];
//! fast!(counts, [idx] = 2);
//! assert_eq!(counts[idx], 2);
//! ```

/// Slice access that is bounds-checked only in debug builds.
///
/// - `fast!(slice, [i])` yields `&slice[i]`
/// - `fast!(slice, [i] = v)` writes `v`
/// - `fast!(mut slice, [i])` yields `&mut slice[i]`
///
/// Callers must have validated `i` already.
#[macro_export]
macro_rules! fast {
    (mut $slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &mut $slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked_mut($index) }
        }
    }};

    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { *$slice.get_unchecked_mut($index) = $val; }
        }
    }};

    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn read_cell() {
        let cells: Vec<Vec<u32>> = vec![vec![], vec![4, 5]];
        assert_eq!(fast!(cells, [1]).as_slice(), &[4, 5]);
    }

    #[test]
    fn mutate_cell() {
        let mut cells: Vec<Vec<u32>> = vec![vec![], vec![]];
        fast!(mut cells, [0]).push(3);
        fast!(cells, [1] = vec![8]);
        assert_eq!(cells, vec![vec![3], vec![8]]);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn out_of_range_panics_in_debug() {
        let cells: Vec<Vec<u32>> = vec![vec![]];
        let _ = fast!(cells, [4]);
    }
}
