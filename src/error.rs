use ndarray::Array2;
use num_traits::Float;
use thiserror::Error;

/// Errors returned by the dynamic programming routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An input value was rejected before the table was built.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The DP table would need more cells than can be addressed.
    #[error("dp table of {rows} x {cols} cells is too large")]
    TableTooLarge { rows: usize, cols: usize },
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Allocates a `rows` x `cols` table filled with `fill`.
    ///
    /// Fails with [`Error::TableTooLarge`] instead of aborting when the
    /// allocator cannot provide the memory.
    pub(crate) fn alloc_table<C: Clone>(rows: usize, cols: usize, fill: C) -> Result<Array2<C>> {
        let too_large = Error::TableTooLarge { rows, cols };
        let cells = rows.checked_mul(cols).ok_or_else(|| too_large.clone())?;

        let mut cells_vec = Vec::new();
        cells_vec
            .try_reserve_exact(cells)
            .map_err(|_| too_large.clone())?;
        cells_vec.resize(cells, fill);

        Array2::from_shape_vec((rows, cols), cells_vec).map_err(|_| too_large)
    }

    /// Rejects a DP cell whose value overflowed to a non-finite float.
    pub(crate) fn check_cell<T: Float>(value: T, i: usize, j: usize) -> Result<T> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Error::invalid_input(format!(
                "dp cell ({i}, {j}) overflows the value type"
            )))
        }
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = Error::invalid_input("request 2 is NaN");
        assert_eq!(err, Error::InvalidInput("request 2 is NaN".to_string()));
        assert_eq!(err.to_string(), "invalid input: request 2 is NaN");
    }

    #[test]
    fn test_alloc_table() {
        let table = Error::alloc_table(2, 3, 1.5f64).unwrap();
        assert_eq!(table.dim(), (2, 3));
        assert!(table.iter().all(|&cell| cell == 1.5));
    }

    #[test]
    fn test_alloc_table_too_large() {
        assert_eq!(
            Error::alloc_table(usize::MAX, 2, 0u8),
            Err(Error::TableTooLarge {
                rows: usize::MAX,
                cols: 2
            })
        );
        // Fits in a usize, but not in any address space.
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            Error::alloc_table(1 << 24, 1 << 24, 0.0f64),
            Err(Error::TableTooLarge {
                rows: 1 << 24,
                cols: 1 << 24
            })
        );
    }

    #[test]
    fn test_check_cell() {
        assert_eq!(Error::check_cell(2.5f64, 0, 0), Ok(2.5));
        assert!(matches!(
            Error::check_cell(f64::INFINITY, 3, 4),
            Err(Error::InvalidInput(_))
        ));
    }
}
