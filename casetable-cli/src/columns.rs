//! Column sets for the CLI: presets, `--column` specs, or inferred from rows.

use std::collections::BTreeSet;

use casetable::{Action, Column, Row, Tone, render};
use log::info;

use crate::args::Preset;
use crate::error::CliError;

const DATE_FORMAT: &str = "%d %b %Y";

/// Parse `key[:label[:kind[:arg]]]`.
pub fn parse(spec: &str, placeholder: &str) -> Result<Column, CliError> {
    let mut parts = spec.splitn(4, ':');
    let key = parts.next().unwrap_or_default().trim();
    if key.is_empty() {
        return Err(invalid(spec, "missing key"));
    }
    let label = parts
        .next()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(key);
    let kind = parts.next().map(str::trim).unwrap_or("text");
    let arg = parts.next();

    let column = Column::new(key, label);
    let column = match kind {
        "text" => column,
        "text_or" => column.with_renderer(render::text_or(arg.unwrap_or(placeholder))),
        "badge" => column.with_renderer(render::badge(Tone::Info)),
        "status" => column.with_renderer(status_renderer()),
        "date" => column.with_renderer(render::date(arg.unwrap_or(DATE_FORMAT))),
        "money" => column.with_renderer(render::money()),
        "related" => {
            let field = arg.ok_or_else(|| invalid(spec, "related needs a field to show"))?;
            column.with_renderer(render::related(field))
        }
        other => return Err(invalid(spec, &format!("unknown kind '{other}'"))),
    };
    Ok(column)
}

fn invalid(spec: &str, reason: &str) -> CliError {
    CliError::Column {
        spec: spec.to_string(),
        reason: reason.to_string(),
    }
}

fn status_renderer() -> casetable::Renderer {
    render::status(&[
        ("decided", Tone::Success),
        ("disposed", Tone::Success),
        ("pending", Tone::Warning),
        ("adjourned", Tone::Info),
        ("dismissed", Tone::Danger),
    ])
}

/// Actions column shared by the presets. The handlers only report the request.
fn row_actions(entity: &'static str) -> Column {
    let action = |id: &'static str, label: &'static str| {
        Action::new(id, label, move |row: &Row| {
            let id_text = row.id().unwrap_or("?");
            info!("{} requested for {} {}", label, entity, id_text);
            println!("{label} {entity} {id_text}");
        })
    };
    Column::new("actions", "Actions").with_renderer(render::actions(vec![
        action("edit", "Edit"),
        action("delete", "Delete"),
    ]))
}

/// Columns of a record page.
pub fn preset(preset: Preset, placeholder: &str) -> Vec<Column> {
    match preset {
        Preset::Clients => vec![
            Column::new("name", "Client Name"),
            Column::new("contact_number", "Contact").with_renderer(render::text_or(placeholder)),
            Column::new("address", "Address").with_renderer(render::text_or(placeholder)),
            Column::new("case_count", "Cases").with_renderer(render::count("cases", Tone::Info)),
            row_actions("client"),
        ],
        Preset::Cases => vec![
            Column::new("sr_no", "Sr. No"),
            Column::new("case_title", "Title"),
            Column::new("case_description", "Description"),
            Column::new("computer_code", "Computer Code"),
            Column::new("previous_date", "Previous Date").with_renderer(render::date(DATE_FORMAT)),
            Column::new("case_proceeding", "Proceeding"),
            Column::new("next_date", "Next Date").with_renderer(render::date(DATE_FORMAT)),
            Column::new("court_name", "Court Name"),
            Column::new("case_decision", "Decision"),
            Column::new("status", "Status").with_renderer(status_renderer()),
            row_actions("case"),
        ],
    }
}

/// One plain column per field seen in `rows`, `id` first, the rest sorted.
pub fn infer(rows: &[Row]) -> Vec<Column> {
    let keys: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.fields().keys().map(String::as_str))
        .collect();

    let id = keys.contains("id").then(|| Column::new("id", "id"));
    id.into_iter()
        .chain(
            keys.into_iter()
                .filter(|key| *key != "id")
                .map(|key| Column::new(key, key)),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use casetable::{Cell, resolve_cell};

    use super::*;

    #[test]
    fn test_parse_plain() {
        let column = parse("case_title", "N/A").unwrap();
        assert_eq!(column.key, "case_title");
        assert_eq!(column.label, "case_title");
        assert!(column.renderer().is_none());
    }

    #[test]
    fn test_parse_with_kind_and_arg() {
        let column = parse("next_date:Next Date:date:%Y/%m/%d", "N/A").unwrap();
        assert_eq!(column.label, "Next Date");
        let row = Row::new().set("next_date", "2024-01-31");
        assert_eq!(resolve_cell(&column, &row), Cell::text("2024/01/31"));
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert!(matches!(
            parse("fee:Fee:currency", "N/A"),
            Err(CliError::Column { .. })
        ));
        assert!(parse(":Fee", "N/A").is_err());
        assert!(parse("client:Client:related", "N/A").is_err());
    }

    #[test]
    fn test_infer_puts_id_first() {
        let rows = vec![
            Row::new().set("name", "A").set("id", 1i64),
            Row::new().set("address", "B"),
        ];
        let keys: Vec<String> = infer(&rows).into_iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["id", "address", "name"]);
    }

    #[test]
    fn test_clients_preset_placeholders() {
        let columns = preset(Preset::Clients, "N/A");
        let row = Row::with_id("1").set("name", "Alpha").set("contact_number", "");
        assert_eq!(resolve_cell(&columns[1], &row), Cell::text("N/A"));
        assert_eq!(resolve_cell(&columns[3], &row), Cell::badge("0 cases", Tone::Info));
        let row = row.set("case_count", 2i64);
        assert_eq!(resolve_cell(&columns[3], &row), Cell::badge("2 cases", Tone::Info));
        assert!(resolve_cell(&columns[4], &row).find_action("delete").is_some());
    }
}
