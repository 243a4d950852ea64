use std::ffi::OsString;
use std::path::PathBuf;
use structopt::StructOpt;


/// Evaluates reverse-Polish expressions over fixed-width integers and floats
/// and shows their machine representation.
///
/// With no script, reads from the terminal interactively, or from stdin
/// line by line when stdin is not a terminal.
#[derive(StructOpt, Debug)]
#[structopt(name = "bits")]
pub struct Options {
    /// Read the script from the files named by the positional arguments.
    #[structopt(short = "f", long = "file")]
    pub file: bool,

    /// Use the positional arguments as the script, even if one of them names a file.
    #[structopt(short = "c", long = "command")]
    pub command: bool,

    /// Do not print the stack when input ends.
    #[structopt(short = "q", long = "quiet")]
    pub quiet: bool,

    /// Enable debug logging. `RUST_LOG` overrides this.
    #[structopt(short = "v", long = "verbose")]
    pub verbose: bool,

    /// Settings file. The default is `$XDG_CONFIG_HOME/bits/config.toml`.
    #[structopt(long = "config", parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Do not load or save the line history of interactive sessions.
    #[structopt(long = "no-history")]
    pub no_history: bool,

    /// Script text, or file names with `-f`.
    pub script: Vec<String>,
}

impl Options {
    pub fn from_env() -> Self {
        Self::from_iter(sanitize_args(std::env::args_os()))
    }
}

/// Options that consume the following argument as their value.
const VALUE_OPTIONS: &[&str] = &["--config"];

/// Inserts `--` ahead of the first argument that is not an option, so that
/// script text such as `-1 2 +` is never mistaken for flags. Arguments are
/// returned unchanged if they already contain `--`.
///
/// An argument is not an option if it is empty, does not start with `-`, or
/// starts with `-` followed by a digit or `.` (a negative number).
pub fn sanitize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    let mut i = 1;
    while i < args.len() {
        let arg = args[i].to_string_lossy().into_owned();
        if arg == "--" {
            return args;
        }
        if !is_option(&arg) {
            args.insert(i, OsString::from("--"));
            return args;
        }
        if VALUE_OPTIONS.contains(&arg.as_str()) {
            i += 1;
        }
        i += 1;
    }
    args
}

fn is_option(arg: &str) -> bool {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some('-'), Some(c)) => !(c.is_ascii_digit() || c == '.'),
        (Some('-'), None) => true,
        _ => false,
    }
}
