use crate::domain::model::Cell;

/// Turn a raw cell into `None` or its trimmed string form.
///
/// NaN and infinite floats count as missing. A whitespace-only value comes back
/// as `Some("")`; use [`present`] when an empty string should count as absent.
pub fn normalize(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Missing => None,
        Cell::Float(value) if !value.is_finite() => None,
        Cell::Float(value) => Some(value.to_string().trim().to_string()),
        Cell::Integer(value) => Some(value.to_string()),
        Cell::Text(value) => Some(value.trim().to_string()),
    }
}

/// 呼叫端使用的真值判斷：空字串視為不存在
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
