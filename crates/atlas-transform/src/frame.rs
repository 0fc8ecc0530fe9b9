//! Column access helpers shared by the transformation stages.

use polars::prelude::{Column, DataFrame, DataType};

use crate::error::{Result, TransformError};

/// Borrow a column, reporting its name when absent.
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| TransformError::MissingColumn {
        column: name.to_string(),
    })
}

/// Owned text values of a column; non-text columns are cast first.
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = require_column(df, name)?;
    let casted = column.cast(&DataType::String)?;
    let values = casted
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();
    Ok(values)
}

/// Numeric values of a column.
///
/// Text cells are parsed; a non-empty cell that is not a number is an
/// error rather than a silent null.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = require_column(df, name)?;
    match column.dtype() {
        DataType::String => {
            let mut values = Vec::with_capacity(column.len());
            for (row, value) in column.str()?.into_iter().enumerate() {
                values.push(parse_cell(name, row, value)?);
            }
            Ok(values)
        }
        DataType::Null => Ok(vec![None; column.len()]),
        dtype if dtype.is_numeric() => {
            let casted = column.cast(&DataType::Float64)?;
            Ok(casted.f64()?.into_iter().collect())
        }
        other => Err(TransformError::UnexpectedType {
            column: name.to_string(),
            dtype: other.to_string(),
        }),
    }
}

/// Integer values of a column (years).
pub fn year_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i32>>> {
    let column = require_column(df, name)?;
    let casted = column.strict_cast(&DataType::Int32)?;
    Ok(casted.i32()?.into_iter().collect())
}

/// Parses one text cell; blank cells are null.
pub fn parse_cell(column: &str, row: usize, value: Option<&str>) -> Result<Option<f64>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| TransformError::InvalidNumber {
            column: column.to_string(),
            row,
            value: raw.to_string(),
        })
}

/// Column names of a frame, owned.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn parse_cell_handles_blanks_and_garbage() {
        assert_eq!(parse_cell("GDP", 0, None).unwrap(), None);
        assert_eq!(parse_cell("GDP", 0, Some("  ")).unwrap(), None);
        assert_eq!(parse_cell("GDP", 0, Some(" 1.5 ")).unwrap(), Some(1.5));
        assert!(matches!(
            parse_cell("GDP", 3, Some("n/a")),
            Err(TransformError::InvalidNumber { row: 3, .. })
        ));
    }

    #[test]
    fn numeric_values_accepts_numbers_and_text() {
        let df = DataFrame::new(vec![
            Series::new("a".into(), vec![Some(1i64), None]).into(),
            Series::new("b".into(), vec![Some("2.5"), None]).into(),
        ])
        .unwrap();

        assert_eq!(numeric_values(&df, "a").unwrap(), vec![Some(1.0), None]);
        assert_eq!(numeric_values(&df, "b").unwrap(), vec![Some(2.5), None]);
        assert!(matches!(
            numeric_values(&df, "c"),
            Err(TransformError::MissingColumn { .. })
        ));
    }
}
