//! Ready-made cell renderers for the columns record pages commonly need.
//!
//! Each helper returns a [`Renderer`] to attach with
//! [`Column::with_renderer`](crate::Column::with_renderer). All of them read
//! the column's own field unless they take explicit keys.

use std::sync::Arc;

use crate::cell::{Action, Cell, CellContext, Tone};
use crate::column::Renderer;
use crate::error::{FieldError, MissingAsNull, RenderError};
use crate::model::{Money, Value};

/// Show the field as text, or `fallback` when it is missing, null or empty.
pub fn text_or(fallback: impl Into<String>) -> Renderer {
    let fallback = fallback.into();
    Arc::new(move |cx: &CellContext<'_>| -> Result<Cell, RenderError> {
        let text = cx
            .value()
            .and_then(Value::display)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback.clone());
        Ok(Cell::Text(text))
    })
}

/// Show the field as a badge.
pub fn badge(tone: Tone) -> Renderer {
    Arc::new(move |cx: &CellContext<'_>| -> Result<Cell, RenderError> {
        let text = cx
            .value()
            .and_then(Value::display)
            .ok_or_else(|| FieldError::missing(cx.key()))?;
        Ok(Cell::badge(text, tone))
    })
}

/// Show the field as a counted badge, such as "3 cases".
///
/// A missing or null count shows as zero.
pub fn count(noun: impl Into<String>, tone: Tone) -> Renderer {
    let noun = noun.into();
    Arc::new(move |cx: &CellContext<'_>| -> Result<Cell, RenderError> {
        let n = cx
            .row()
            .get_decimal(cx.key())
            .missing_as_null()?
            .unwrap_or_default();
        Ok(Cell::badge(format!("{} {}", n.normalize(), noun), tone))
    })
}

/// Show a status badge, picking the tone from the status text.
///
/// `tones` maps lower-cased status values to tones; unknown statuses are neutral.
pub fn status(tones: &[(&str, Tone)]) -> Renderer {
    let tones: Vec<(String, Tone)> = tones
        .iter()
        .map(|(status, tone)| (status.to_lowercase(), *tone))
        .collect();
    Arc::new(move |cx: &CellContext<'_>| -> Result<Cell, RenderError> {
        let text = cx
            .value()
            .and_then(Value::display)
            .ok_or_else(|| FieldError::missing(cx.key()))?;
        let lowered = text.to_lowercase();
        let tone = tones
            .iter()
            .find(|(status, _)| *status == lowered)
            .map(|(_, tone)| *tone)
            .unwrap_or_default();
        Ok(Cell::badge(text, tone))
    })
}

/// Format the field as a date using a chrono format string.
///
/// Null shows as not available; text that is not a date is an error.
pub fn date(format: impl Into<String>) -> Renderer {
    let format = format.into();
    Arc::new(move |cx: &CellContext<'_>| -> Result<Cell, RenderError> {
        match cx.row().get_date(cx.key())? {
            Some(date) => Ok(Cell::text(date.format(&format).to_string())),
            None => Ok(Cell::NotAvailable),
        }
    })
}

/// Format the field as a monetary amount with two decimals.
pub fn money() -> Renderer {
    Arc::new(|cx: &CellContext<'_>| -> Result<Cell, RenderError> {
        match cx.row().get_decimal(cx.key())? {
            Some(amount) => Ok(Cell::text(Money::new(amount).to_string())),
            None => Ok(Cell::NotAvailable),
        }
    })
}

/// Show `total - paid` as a monetary amount.
///
/// A null `paid` counts as nothing paid yet. Fully paid balances show as a
/// success badge.
pub fn balance(total: impl Into<String>, paid: impl Into<String>) -> Renderer {
    let total_key = total.into();
    let paid_key = paid.into();
    Arc::new(move |cx: &CellContext<'_>| -> Result<Cell, RenderError> {
        let total = cx
            .row()
            .get_decimal(&total_key)?
            .ok_or_else(|| RenderError::invalid(total_key.as_str(), "total is null"))?;
        let paid = cx
            .row()
            .get_decimal(&paid_key)
            .missing_as_null()?
            .unwrap_or_default();
        let pending = Money::new(total) - Money::new(paid);
        if pending.value().is_sign_positive() && !pending.value().is_zero() {
            Ok(Cell::text(pending.to_string()))
        } else {
            Ok(Cell::badge("Paid", Tone::Success))
        }
    })
}

/// Show `field` of the related record held in this column's field.
///
/// Used for relations joined onto a row, such as a case's client.
pub fn related(field: impl Into<String>) -> Renderer {
    let field = field.into();
    Arc::new(move |cx: &CellContext<'_>| -> Result<Cell, RenderError> {
        let Some(related) = cx.row().get_record(cx.key())? else {
            return Ok(Cell::NotAvailable);
        };
        Ok(Cell::from_value(related.get(&field)))
    })
}

/// Show a fixed set of actions on every row.
pub fn actions(actions: Vec<Action>) -> Renderer {
    Arc::new(move |_: &CellContext<'_>| -> Result<Cell, RenderError> {
        Ok(Cell::Actions(actions.clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::resolve_cell;
    use crate::column::Column;
    use crate::model::Row;

    fn resolve(renderer: Renderer, key: &str, row: &Row) -> Cell {
        resolve_cell(&Column::new(key, key).with_renderer(renderer), row)
    }

    #[test]
    fn test_text_or_replaces_empty() {
        let row = Row::new().set("contact_number", "").set("address", "Lahore");
        assert_eq!(resolve(text_or("N/A"), "contact_number", &row), Cell::text("N/A"));
        assert_eq!(resolve(text_or("N/A"), "address", &row), Cell::text("Lahore"));
        assert_eq!(resolve(text_or("-"), "missing", &row), Cell::text("-"));
    }

    #[test]
    fn test_badge_missing_falls_back() {
        let row = Row::new().set("case_count", 3i64);
        assert_eq!(
            resolve(badge(Tone::Info), "case_count", &row),
            Cell::badge("3", Tone::Info)
        );
        assert_eq!(resolve(badge(Tone::Info), "other", &row), Cell::NotAvailable);
    }

    #[test]
    fn test_status_tone() {
        let tones = [("Decided", Tone::Success), ("pending", Tone::Warning)];
        let row = Row::new().set("status", "Pending");
        assert_eq!(
            resolve(status(&tones), "status", &row),
            Cell::badge("Pending", Tone::Warning)
        );
        let row = Row::new().set("status", "Adjourned");
        assert_eq!(
            resolve(status(&tones), "status", &row),
            Cell::badge("Adjourned", Tone::Neutral)
        );
    }

    #[test]
    fn test_count_defaults_to_zero() {
        let column = Column::new("case_count", "Cases").with_renderer(count("cases", Tone::Info));
        let with_count = Row::new().set("case_count", 3i64);
        let null_count = Row::new().set("case_count", Value::Null);
        assert_eq!(resolve_cell(&column, &with_count), Cell::badge("3 cases", Tone::Info));
        assert_eq!(resolve_cell(&column, &null_count), Cell::badge("0 cases", Tone::Info));
        assert_eq!(resolve_cell(&column, &Row::new()), Cell::badge("0 cases", Tone::Info));
    }

    #[test]
    fn test_date_formats_text_dates() {
        let row = Row::new().set("next_date", "2024-03-09");
        assert_eq!(
            resolve(date("%d/%m/%Y"), "next_date", &row),
            Cell::text("09/03/2024")
        );
    }

    #[test]
    fn test_date_invalid_falls_back_to_raw() {
        let row = Row::new().set("next_date", "soon");
        assert_eq!(resolve(date("%d/%m/%Y"), "next_date", &row), Cell::text("soon"));
    }

    #[test]
    fn test_money() {
        let row = Row::new().set("fee", "2500").set("paid", 99.5);
        assert_eq!(resolve(money(), "fee", &row), Cell::text("2500.00"));
        assert_eq!(resolve(money(), "paid", &row), Cell::text("99.50"));
    }

    #[test]
    fn test_balance() {
        let row = Row::new().set("fee", 5000i64).set("paid", "1250.5");
        assert_eq!(
            resolve(balance("fee", "paid"), "pending", &row),
            Cell::text("3749.50")
        );

        let settled = Row::new().set("fee", 5000i64).set("paid", 5000i64);
        assert_eq!(
            resolve(balance("fee", "paid"), "pending", &settled),
            Cell::badge("Paid", Tone::Success)
        );

        let unpaid = Row::new().set("fee", 800i64);
        assert_eq!(
            resolve(balance("fee", "paid"), "pending", &unpaid),
            Cell::text("800.00")
        );
    }

    #[test]
    fn test_related() {
        let row = Row::new().set("clients", Row::with_id("k1").set("name", "Khan"));
        assert_eq!(resolve(related("name"), "clients", &row), Cell::text("Khan"));
        let orphan = Row::new().set("clients", Value::Null);
        assert_eq!(resolve(related("name"), "clients", &orphan), Cell::NotAvailable);
    }
}
