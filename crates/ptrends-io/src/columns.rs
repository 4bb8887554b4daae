//! Column resolution
//!
//! Decides which columns hold the element symbols and the values. This is a
//! pure step over the column names; it never guesses when the table is
//! wider than two columns.

use crate::reader::{IoError, IoResult};

/// Resolve `(elements, data)` column indices
///
/// Two-column tables default to `(0, 1)`. If only one of the two names
/// matches a column there, the other column takes the remaining slot. Wider
/// tables require both names.
pub fn resolve_columns(
    columns: &[String],
    elements: Option<&str>,
    data: Option<&str>,
) -> IoResult<(usize, usize)> {
    let find = |name: &str| columns.iter().position(|c| c == name);

    if columns.len() < 2 {
        return Err(IoError::InvalidFormat(format!(
            "the table has {} column(s), at least 2 are required",
            columns.len()
        )));
    }

    let resolved = if columns.len() > 2 {
        let (Some(elements), Some(data)) = (elements, data) else {
            return Err(IoError::AmbiguousColumn {
                columns: columns.len(),
            });
        };
        let elements = find(elements).ok_or_else(|| IoError::ColumnNotFound(elements.to_string()))?;
        let data = find(data).ok_or_else(|| IoError::ColumnNotFound(data.to_string()))?;
        (elements, data)
    } else {
        match (elements.and_then(find), data.and_then(find)) {
            (Some(e), Some(d)) => (e, d),
            (Some(e), None) => (e, 1 - e),
            (None, Some(d)) => (1 - d, d),
            (None, None) => match (elements, data) {
                (None, None) => (0, 1),
                (Some(name), _) | (None, Some(name)) => {
                    return Err(IoError::ColumnNotFound(name.to_string()))
                }
            },
        }
    };

    if resolved.0 == resolved.1 {
        return Err(IoError::InvalidFormat(format!(
            "elements and data both refer to column '{}'",
            columns[resolved.0]
        )));
    }
    Ok(resolved)
}
