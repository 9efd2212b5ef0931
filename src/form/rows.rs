use super::FormError;

/// Marker for entities without repeatable row groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoRows {}

impl std::fmt::Display for NoRows {
    fn fmt(&self, _f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {}
    }
}

/// Pushes `row` to the end of `rows` and returns its index.
pub fn append_row<T>(rows: &mut Vec<T>, row: T) -> usize {
    rows.push(row);
    rows.len() - 1
}

/// Removes the row at `index`; later rows shift down by one, order is kept.
pub fn remove_row<T>(rows: &mut Vec<T>, group: &str, index: usize) -> Result<T, FormError> {
    if index >= rows.len() {
        return Err(FormError::RowOutOfRange {
            group: group.to_string(),
            index,
            len: rows.len(),
        });
    }
    Ok(rows.remove(index))
}

pub fn row<'a, T>(rows: &'a [T], group: &str, index: usize) -> Result<&'a T, FormError> {
    rows.get(index).ok_or_else(|| FormError::RowOutOfRange {
        group: group.to_string(),
        index,
        len: rows.len(),
    })
}

pub fn row_mut<'a, T>(
    rows: &'a mut [T],
    group: &str,
    index: usize,
) -> Result<&'a mut T, FormError> {
    let len = rows.len();
    rows.get_mut(index).ok_or_else(|| FormError::RowOutOfRange {
        group: group.to_string(),
        index,
        len,
    })
}
