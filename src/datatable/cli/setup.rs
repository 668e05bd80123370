use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use datatable::model::{Field, RecordId};
use datatable::query::SortDirection;
use std::path::PathBuf;

/// Returns the version string, with the git hash for non-release builds.
/// Format for releases: "v0.1.0"
/// Format for dev builds: "v0.1.0 (dev abc1234)"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} (dev {})", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "datatable",
    bin_name = "datatable",
    version = get_version(),
    about = "Interactive in-memory record table",
    after_help = "Type `help` at the prompt for the list of table commands."
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print a sample config file and exit
    #[arg(long)]
    pub config_template: bool,
}

/// One line typed at the prompt.
#[derive(Parser, Debug)]
#[command(
    name = "datatable",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    help_template = "{all-args}"
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShellCommand {
    /// Open the form for a new record
    #[command(alias = "new")]
    Add(FormArgs),

    /// Open the form for an existing record
    #[command(alias = "e")]
    Edit {
        /// Record id (as shown in the ID column)
        id: RecordId,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Set one field of the open form
    Set {
        /// name, date or value
        field: Field,

        /// New text for the field
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Show the open form
    Form,

    /// Validate and save the open form
    #[command(alias = "ok")]
    Save,

    /// Discard the open form
    Cancel,

    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Record id
        id: RecordId,
    },

    /// Filter rows by text (no text clears the search)
    #[command(alias = "s")]
    Search {
        #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Sort by a column; without a direction, cycles asc, desc, off
    Sort {
        column: SortColumn,

        /// asc or desc
        direction: Option<SortDirection>,
    },

    /// Show the table
    #[command(alias = "ls")]
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show this help
    Help,

    /// Leave the shell
    #[command(aliases = ["exit", "q"])]
    Quit,
}

#[derive(Args, Debug, Default)]
pub struct FormArgs {
    /// Record name
    #[arg(long)]
    pub name: Option<String>,

    /// Date as YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,

    /// Number, 0 or more
    #[arg(long, allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Save right away instead of leaving the form open
    #[arg(short, long)]
    pub save: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    Name,
    Date,
    Value,
    Off,
}

impl SortColumn {
    pub fn field(&self) -> Option<Field> {
        match self {
            SortColumn::Name => Some(Field::Name),
            SortColumn::Date => Some(Field::Date),
            SortColumn::Value => Some(Field::Value),
            SortColumn::Off => None,
        }
    }
}
