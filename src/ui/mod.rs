mod contact;
mod detail;
mod header;
mod help;
mod messages;
mod pane;
mod state;

pub use contact::*;
pub use detail::*;
pub use header::*;
pub use help::*;
pub use messages::*;
pub use pane::*;
pub use state::*;
