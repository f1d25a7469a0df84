pub mod options;
pub mod shell;

pub use options::{ParsedQuery, RejectedOption, Rejection, ordinal, parse_query_line};
pub use shell::{OutputFormat, Shell, ShellError, load_with_retry};
