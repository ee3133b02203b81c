use clap::{Args as ClapArgs, Parser, Subcommand};

/// Keeps the convoy log and runs the lucky dip over the member pool.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file describing the name pool and the log
    /// sources. Paths in the configuration are relative to the directory of this file.
    #[clap(short, long, value_parser, global = true)]
    pub config: Option<String>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Draws names from the pool, avoiding the members already in the log.
    Pick {
        #[clap(flatten)]
        sources: SourceArgs,

        /// (file path) The name pool: names separated by newlines or commas, or a JSON record
        /// with a `names` list. Overrides the pool source of the configuration.
        #[clap(short, long, value_parser)]
        pool: Option<String>,

        /// (default 1) How many names to draw in this session.
        #[clap(short = 'n', long, value_parser)]
        count: Option<usize>,

        /// (integer, optional) Seed of the random generator, to repeat a draw.
        #[clap(long, value_parser)]
        seed: Option<u64>,
    },
    /// Writes how many times each member was selected, in JSON format.
    Stats {
        #[clap(flatten)]
        sources: SourceArgs,

        /// (file path, 'stdout' or empty) Where to write the summary.
        #[clap(short, long, value_parser)]
        out: Option<String>,

        /// (file path) A reference summary in JSON format. If provided, the computed summary
        /// must match it.
        #[clap(short, long, value_parser)]
        reference: Option<String>,
    },
    /// Prints the log, newest entries first.
    List {
        #[clap(flatten)]
        sources: SourceArgs,

        /// (optional) The signed-in admin. The entry ids are shown to admins.
        #[clap(short, long, value_parser)]
        user: Option<String>,
    },
    /// Adds an entry to a JSON log.
    Add {
        #[clap(flatten)]
        sources: SourceArgs,

        #[clap(flatten)]
        entry: EntryArgs,
    },
    /// Changes an entry of a JSON log.
    Edit {
        /// The id of the entry, as shown by `list`.
        #[clap(value_parser)]
        id: String,

        #[clap(flatten)]
        sources: SourceArgs,

        #[clap(flatten)]
        entry: EntryArgs,
    },
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct SourceArgs {
    /// (file path, repeatable) A log file. The format is deduced from the extension
    /// (json, csv or xlsx). Overrides the log sources of the configuration.
    #[clap(short, long, value_parser)]
    pub log: Vec<String>,

    /// (default: first worksheet) When reading an Excel log, the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct EntryArgs {
    /// The signed-in admin. Changes are refused without it.
    #[clap(short, long, value_parser)]
    pub user: Option<String>,

    /// (YYYY-MM-DD) The date of the convoy. Defaults to today for a new entry.
    #[clap(short, long, value_parser)]
    pub date: Option<String>,

    /// The convoy leader.
    #[clap(long, value_parser)]
    pub person1: Option<String>,

    /// The first deputy convoy leader.
    #[clap(long, value_parser)]
    pub person2: Option<String>,

    /// The second deputy convoy leader.
    #[clap(long, value_parser)]
    pub person3: Option<String>,
}
