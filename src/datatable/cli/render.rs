//! Terminal rendering. Every function returns a `String`; the shell decides where
//! it goes.

use colored::Colorize;
use datatable::api::{CmdMessage, MessageLevel};
use datatable::error::DataTableError;
use datatable::form::{Draft, FormMode, ValidationErrors};
use datatable::model::{format_date, format_value, Field};
use datatable::query::{PageView, SortSpec};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const DATE_WIDTH: usize = 10;
const EMPTY_FIELD: &str = "(empty)";

/// What the table footer and header need beyond the rows themselves.
pub struct TableContext<'a> {
    pub search: &'a str,
    pub sort: Option<SortSpec>,
    pub name_width: usize,
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|message| match message.level {
            MessageLevel::Info => message.content.dimmed().to_string(),
            MessageLevel::Success => message.content.green().to_string(),
            MessageLevel::Warning => message.content.yellow().to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_error(error: &DataTableError) -> String {
    match error {
        DataTableError::Validation(errors) => render_validation_errors(errors),
        other => format!("{} {}", "Error:".red().bold(), other),
    }
}

pub fn render_validation_errors(errors: &ValidationErrors) -> String {
    let mut out = vec!["Cannot save, please fix:".red().bold().to_string()];
    out.extend(errors.iter().map(|e| format!("  - {}", e).red().to_string()));
    out.join("\n")
}

pub fn render_table(page: &PageView, ctx: &TableContext<'_>) -> String {
    if page.total_items == 0 {
        return if ctx.search.is_empty() {
            "No records.".dimmed().to_string()
        } else {
            format!("No records match \"{}\".", ctx.search)
                .dimmed()
                .to_string()
        };
    }

    let ids: Vec<String> = page.records.iter().map(|r| r.id.to_string()).collect();
    let names: Vec<String> = page
        .records
        .iter()
        .map(|r| truncate_to_width(&r.name, ctx.name_width))
        .collect();
    let values: Vec<String> = page.records.iter().map(|r| format_value(r.value)).collect();

    let id_header = "ID".to_string();
    let name_header = header_label(Field::Name, ctx.sort);
    let date_header = header_label(Field::Date, ctx.sort);
    let value_header = header_label(Field::Value, ctx.sort);

    let id_w = column_width(&id_header, &ids);
    let name_w = column_width(&name_header, &names);
    let date_w = DATE_WIDTH.max(date_header.width());
    let value_w = column_width(&value_header, &values);

    let mut lines = Vec::with_capacity(page.records.len() + 3);
    let header = format!(
        "{}  {}  {}  {}",
        pad_left(&id_header, id_w),
        pad_right(&name_header, name_w),
        pad_right(&date_header, date_w),
        pad_left(&value_header, value_w),
    );
    lines.push(header.bold().to_string());

    for (i, record) in page.records.iter().enumerate() {
        lines.push(format!(
            "{}  {}  {}  {}",
            pad_left(&ids[i], id_w).yellow(),
            pad_right(&names[i], name_w),
            pad_right(&format_date(record.date), date_w),
            pad_left(&values[i], value_w),
        ));
    }

    lines.push(render_footer(page, ctx).dimmed().to_string());
    lines.join("\n")
}

fn render_footer(page: &PageView, ctx: &TableContext<'_>) -> String {
    let noun = if page.total_items == 1 {
        "record"
    } else {
        "records"
    };
    let mut parts = vec![
        format!("Page {} of {}", page.page, page.total_pages),
        format!("{} {}", page.total_items, noun),
    ];
    if !ctx.search.is_empty() {
        parts.push(format!("search: \"{}\"", ctx.search));
    }
    if let Some(sort) = ctx.sort {
        parts.push(format!("sort: {}", sort));
    }
    parts.join(" | ")
}

fn header_label(field: Field, sort: Option<SortSpec>) -> String {
    let title = match field {
        Field::Name => "Name",
        Field::Date => "Date",
        Field::Value => "Value",
    };
    match sort {
        Some(spec) if spec.field == field => format!("{} {}", title, spec.direction.arrow()),
        _ => title.to_string(),
    }
}

pub fn render_form(mode: FormMode, draft: &Draft, errors: Option<&ValidationErrors>) -> String {
    let title = match mode {
        FormMode::Creating => "Add record".to_string(),
        FormMode::Editing(id) => format!("Edit record #{}", id),
    };
    let mut lines = vec![title.bold().to_string()];

    for field in Field::ALL {
        let text = match field {
            Field::Name => Some(draft.name.clone()).filter(|n| !n.is_empty()),
            Field::Date => draft.date.map(format_date),
            Field::Value => draft.value.map(format_value),
        };
        let shown = match text {
            Some(t) => t,
            None => EMPTY_FIELD.dimmed().to_string(),
        };
        lines.push(format!("  {:<7}{}", format!("{}:", field), shown));
        if let Some(errors) = errors {
            for error in errors.for_field(field) {
                lines.push(format!("         {}", error).red().to_string());
            }
        }
    }

    lines.push("Use `set <field> <text>`, then `save` or `cancel`.".dimmed().to_string());
    lines.join("\n")
}

fn column_width(header: &str, cells: &[String]) -> usize {
    cells
        .iter()
        .map(|c| c.width())
        .chain(std::iter::once(header.width()))
        .max()
        .unwrap_or(0)
}

fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", " ".repeat(fill), s)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
