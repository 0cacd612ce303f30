//! CLI command handlers, one file per command.

mod add;
mod completions;
mod interrupt;
mod list;
mod remove;
mod search;

pub use add::run_add;
pub use completions::{run_completions, run_manpage};
pub use interrupt::{Interrupted, EXIT_INTERRUPTED};
pub use list::run_list;
pub use remove::{run_remove, RemoveTarget};
pub use search::{parse_title, run_search};
