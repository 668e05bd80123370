use super::render::{
    render_error, render_form, render_messages, render_table, render_validation_errors,
    TableContext,
};
use super::setup::{FormArgs, ShellCommand, ShellLine};
use clap::CommandFactory;
use colored::Colorize;
use datatable::api::{CmdResult, DataTableApi};
use datatable::error::DataTableError;
use datatable::form::ValidationErrors;
use datatable::model::Field;
use datatable::store::RecordStore;
use std::io::{self, Write};

/// Whether the shell keeps reading lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Per-shell settings the handlers need for rendering.
pub struct ShellContext {
    pub name_width: usize,
}

pub fn dispatch<S: RecordStore, W: Write>(
    api: &mut DataTableApi<S>,
    command: ShellCommand,
    ctx: &ShellContext,
    out: &mut W,
) -> io::Result<Flow> {
    match command {
        ShellCommand::Add(form) => {
            let opened = api.begin_create();
            handle_form_args(api, opened, form, out)?;
        }
        ShellCommand::Edit { id, form } => match api.begin_edit(id) {
            Ok(opened) => handle_form_args(api, opened, form, out)?,
            Err(e) => writeln!(out, "{}", render_error(&e))?,
        },
        ShellCommand::Set { field, text } => {
            let text = text.join(" ");
            match api.draft_mut() {
                Ok(draft) => {
                    if !draft.set_text(field, &text) {
                        writeln!(out, "{}", invalid_input(field, &text))?;
                    }
                    print_form(api, None, out)?;
                }
                Err(e) => writeln!(out, "{}", render_error(&e))?,
            }
        }
        ShellCommand::Form => print_form(api, None, out)?,
        ShellCommand::Save => save(api, out)?,
        ShellCommand::Cancel => print_result(&api.cancel(), out)?,
        ShellCommand::Delete { id } => match api.delete_record(id) {
            Ok(result) => print_result(&result, out)?,
            Err(e) => writeln!(out, "{}", render_error(&e))?,
        },
        ShellCommand::Search { text } => {
            api.set_search(text.join(" "));
            print_table(api, 1, ctx, out)?;
        }
        ShellCommand::Sort { column, direction } => {
            match (column.field(), direction) {
                (None, _) => api.set_sort(None),
                (Some(field), Some(direction)) => api.sort_by(field, direction),
                (Some(field), None) => {
                    api.toggle_sort(field);
                }
            }
            print_table(api, 1, ctx, out)?;
        }
        ShellCommand::List { page, json } => {
            if json {
                let page = api.view(page);
                let text = serde_json::to_string_pretty(&page).map_err(io::Error::other)?;
                writeln!(out, "{}", text)?;
            } else {
                print_table(api, page, ctx, out)?;
            }
        }
        ShellCommand::Help => {
            let help = ShellLine::command().render_help();
            write!(out, "{}", help)?;
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Fills the freshly opened form from `--name/--date/--value`, then either
/// saves it (`--save`) or shows it.
fn handle_form_args<S: RecordStore, W: Write>(
    api: &mut DataTableApi<S>,
    opened: CmdResult,
    form: FormArgs,
    out: &mut W,
) -> io::Result<()> {
    print_result(&opened, out)?;

    let inputs = [
        (Field::Name, form.name),
        (Field::Date, form.date),
        (Field::Value, form.value),
    ];
    for (field, text) in inputs {
        let Some(text) = text else { continue };
        match api.draft_mut() {
            Ok(draft) => {
                if !draft.set_text(field, &text) {
                    writeln!(out, "{}", invalid_input(field, &text))?;
                }
            }
            Err(e) => {
                writeln!(out, "{}", render_error(&e))?;
                return Ok(());
            }
        }
    }

    if form.save {
        save(api, out)
    } else {
        print_form(api, None, out)
    }
}

fn save<S: RecordStore, W: Write>(api: &mut DataTableApi<S>, out: &mut W) -> io::Result<()> {
    match api.commit() {
        Ok(result) => print_result(&result, out),
        Err(DataTableError::Validation(errors)) => {
            writeln!(out, "{}", render_validation_errors(&errors))?;
            print_form(api, Some(&errors), out)
        }
        Err(e) => writeln!(out, "{}", render_error(&e)),
    }
}

fn print_form<S: RecordStore, W: Write>(
    api: &DataTableApi<S>,
    errors: Option<&ValidationErrors>,
    out: &mut W,
) -> io::Result<()> {
    match (api.form_mode(), api.draft()) {
        (Some(mode), Some(draft)) => writeln!(out, "{}", render_form(mode, draft, errors)),
        _ => writeln!(out, "{}", render_error(&DataTableError::NoActiveForm)),
    }
}

fn print_table<S: RecordStore, W: Write>(
    api: &DataTableApi<S>,
    page: usize,
    ctx: &ShellContext,
    out: &mut W,
) -> io::Result<()> {
    let view = api.view(page);
    let table_ctx = TableContext {
        search: api.search(),
        sort: api.sort(),
        name_width: ctx.name_width,
    };
    writeln!(out, "{}", render_table(&view, &table_ctx))
}

fn print_result<W: Write>(result: &CmdResult, out: &mut W) -> io::Result<()> {
    if result.messages.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", render_messages(&result.messages))
}

fn invalid_input(field: Field, text: &str) -> String {
    let hint = match field {
        Field::Date => "expected YYYY-MM-DD",
        Field::Value => "expected a number",
        Field::Name => "",
    };
    format!("Not a valid {} ({}): \"{}\"", field, hint, text)
        .yellow()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use datatable::store::memory::InMemoryStore;

    struct Shell {
        api: DataTableApi<InMemoryStore>,
        ctx: ShellContext,
    }

    impl Shell {
        fn new() -> Self {
            colored::control::set_override(false);
            Self {
                api: DataTableApi::new(InMemoryStore::new()),
                ctx: ShellContext { name_width: 32 },
            }
        }

        fn run(&mut self, line: &str) -> (Flow, String) {
            let words = shlex::split(line).unwrap();
            let command = ShellLine::try_parse_from(words).unwrap().command;
            let mut out = Vec::new();
            let flow = dispatch(&mut self.api, command, &self.ctx, &mut out).unwrap();
            (flow, String::from_utf8(out).unwrap())
        }

        fn out(&mut self, line: &str) -> String {
            self.run(line).1
        }
    }

    #[test]
    fn test_add_with_save_creates_record() {
        let mut shell = Shell::new();
        let out = shell.out("add --name Bob --date 2024-01-05 --value 10 --save");
        assert!(out.contains("Record created (#1): Bob"));
        assert_eq!(shell.api.list_records().len(), 1);
        assert!(shell.api.draft().is_none());
    }

    #[test]
    fn test_add_then_set_then_save() {
        let mut shell = Shell::new();
        let out = shell.out("add");
        assert!(out.contains("Add record"));

        shell.out("set name Mary Ann");
        shell.out("set date 2024-02-01");
        let out = shell.out("set value 5");
        assert!(out.contains("name:  Mary Ann"));

        let out = shell.out("save");
        assert!(out.contains("Record created (#1): Mary Ann"));
    }

    #[test]
    fn test_invalid_save_shows_errors_and_keeps_form() {
        let mut shell = Shell::new();
        let out = shell.out("add --name '' --date 2024-01-01 --value 3 --save");
        assert!(out.contains("Cannot save"));
        assert!(out.contains("name is required"));
        assert!(!out.contains("date is required"));
        assert!(shell.api.draft().is_some());
        assert!(shell.api.list_records().is_empty());
    }

    #[test]
    fn test_negative_value_is_reported() {
        let mut shell = Shell::new();
        let out = shell.out("add --name Bob --date 2024-01-01 --value -1 --save");
        assert!(out.contains("value must be greater than or equal to 0"));
    }

    #[test]
    fn test_bad_date_warns_and_clears() {
        let mut shell = Shell::new();
        shell.out("add --name Bob --value 1");
        let out = shell.out("set date 05/01/2024");
        assert!(out.contains("Not a valid date"));
        assert!(out.contains("date:  (empty)"));
    }

    #[test]
    fn test_edit_keeps_record_count() {
        let mut shell = Shell::new();
        shell.out("add --name Bob --date 2024-01-05 --value 10 --save");
        let out = shell.out("edit 1 --value 11 --save");
        assert!(out.contains("Editing record #1: Bob"));
        assert!(out.contains("Record updated (#1): Bob"));
        assert_eq!(shell.api.list_records().len(), 1);
        assert_eq!(shell.api.list_records()[0].value, 11.0);
    }

    #[test]
    fn test_edit_unknown_id_reports_not_found() {
        let mut shell = Shell::new();
        let out = shell.out("edit 7");
        assert!(out.contains("Record not found: 7"));
    }

    #[test]
    fn test_set_without_form_reports_error() {
        let mut shell = Shell::new();
        let out = shell.out("set name Bob");
        assert!(out.contains("No form is open"));
    }

    #[test]
    fn test_delete_twice_reports_not_found() {
        let mut shell = Shell::new();
        shell.out("add --name Bob --date 2024-01-05 --value 10 --save");
        assert!(shell.out("delete 1").contains("Record deleted (#1): Bob"));
        assert!(shell.out("delete 1").contains("Record not found: 1"));
    }

    #[test]
    fn test_search_and_sort_render_the_table() {
        let mut shell = Shell::new();
        shell.out("add --name Bob --date 2024-01-05 --value 10 --save");
        shell.out("add --name Amy --date 2024-02-01 --value 5 --save");

        let out = shell.out("search 2024-01");
        assert!(out.contains("Bob"));
        assert!(!out.contains("Amy"));

        shell.out("search");
        let out = shell.out("sort name");
        let amy = out.find("Amy").unwrap();
        let bob = out.find("Bob").unwrap();
        assert!(amy < bob);
        assert!(out.contains("sort: name ↑"));

        let out = shell.out("sort off");
        assert!(out.find("Bob").unwrap() < out.find("Amy").unwrap());
    }

    #[test]
    fn test_list_json_is_parseable() {
        let mut shell = Shell::new();
        shell.out("add --name Bob --date 2024-01-05 --value 10 --save");
        let out = shell.out("list --json");
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["total_items"], 1);
        assert_eq!(json["records"][0]["date"], "2024-01-05");
    }

    #[test]
    fn test_quit_stops_the_loop() {
        let mut shell = Shell::new();
        assert_eq!(shell.run("quit").0, Flow::Quit);
        assert_eq!(shell.run("form").0, Flow::Continue);
    }
}
