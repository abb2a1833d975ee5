//! Default cell formatting rules.

use serde_json::Value;

use super::Column;
use crate::Labels;
use crate::model::Cell;
use crate::model::Row;

/// Field whose numeric values are shown as money.
pub const PRICE_FIELD: &str = "price";

/// Formats a resolved value for display.
///
/// Rules, in order:
/// 1. missing, `null` or `""` shows nothing;
/// 2. the column formatter, if any, decides;
/// 3. booleans use the yes/no words of `labels`;
/// 4. numbers, and strings holding a number, in the [`PRICE_FIELD`] column
///    show as currency with two decimals;
/// 5. anything else shows its raw value.
pub fn format_value(value: Option<&Value>, column: &Column, row: &Row, labels: &Labels) -> Cell {
    let value = match value {
        None | Some(Value::Null) => return Cell::Empty,
        Some(Value::String(s)) if s.is_empty() => return Cell::Empty,
        Some(value) => value,
    };

    if let Some(formatter) = &column.formatter {
        return formatter(value, row);
    }

    match value {
        Value::Bool(b) => Cell::text(labels.boolean(*b)),
        other if column.field == PRICE_FIELD => match amount(other) {
            Some(amount) => Cell::text(labels.currency(amount)),
            None => Cell::text(raw_text(other)),
        },
        other => Cell::text(raw_text(other)),
    }
}

/// Numeric value of a number or of a decimal string such as `"59.90"`.
///
/// Decimal columns usually arrive as strings from the storefront API.
fn amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Text of a value shown without formatting.
///
/// Whole floats drop their fractional part so `10.0` reads as `10`.
pub fn raw_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::column::resolve;

    fn row() -> Row {
        Row::from_json(json!({
            "id": 1,
            "name": "Runner",
            "price": 30,
            "cost": 30,
            "is_active": true,
            "note": "",
            "missing_brand": null,
            "tags": ["a", "b"],
            "weight": 2.0
        }))
        .unwrap()
    }

    fn fmt(field: &str, column: &Column) -> Cell {
        let row = row();
        format_value(resolve(&row, field), column, &row, &Labels::default())
    }

    #[test]
    fn test_empty_values() {
        for field in ["note", "missing_brand", "nope"] {
            assert_eq!(fmt(field, &Column::new(field, "x")), Cell::Empty);
        }
    }

    #[test]
    fn test_empty_skips_formatter() {
        let column = Column::new("note", "Note").formatter(|_, _| Cell::text("called"));
        assert_eq!(fmt("note", &column), Cell::Empty);
    }

    #[test]
    fn test_boolean_words() {
        assert_eq!(fmt("is_active", &Column::new("is_active", "Active")), Cell::text("Yes"));
        let row = row().set("is_active", false);
        let column = Column::new("is_active", "Active");
        assert_eq!(
            format_value(resolve(&row, "is_active"), &column, &row, &Labels::french()),
            Cell::text("Non")
        );
    }

    #[test]
    fn test_price_is_currency() {
        assert_eq!(fmt("price", &Column::new("price", "Price")), Cell::text("€30.00"));
        let row = row().set("price", "59.90");
        let column = Column::new("price", "Price");
        assert_eq!(
            format_value(resolve(&row, "price"), &column, &row, &Labels::default()),
            Cell::text("€59.90")
        );
        let row = row.set("price", "on request");
        assert_eq!(
            format_value(resolve(&row, "price"), &column, &row, &Labels::default()),
            Cell::text("on request")
        );
        // Only the canonical price field gets money formatting.
        assert_eq!(fmt("cost", &Column::new("cost", "Cost")), Cell::text("30"));
    }

    #[test]
    fn test_formatter_receives_value_and_row() {
        let column = Column::new("name", "Name").formatter(|value, row| {
            Cell::markup(format!("<b>{}#{}</b>", value.as_str().unwrap_or(""), row.id()))
        });
        assert_eq!(fmt("name", &column), Cell::markup("<b>Runner#1</b>"));
    }

    #[test]
    fn test_raw_values() {
        assert_eq!(fmt("name", &Column::new("name", "Name")), Cell::text("Runner"));
        assert_eq!(fmt("weight", &Column::new("weight", "W")), Cell::text("2"));
        assert_eq!(fmt("tags", &Column::new("tags", "Tags")), Cell::text(r#"["a","b"]"#));
    }

    #[test]
    #[should_panic(expected = "formatter failed")]
    fn test_formatter_panic_propagates() {
        let column = Column::new("name", "Name").formatter(|_, _| panic!("formatter failed"));
        fmt("name", &column);
    }
}
