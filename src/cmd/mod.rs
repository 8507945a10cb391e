//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module      | Commands handled                                |
//! |-------------|-------------------------------------------------|
//! | `board`     | `Board`                                         |
//! | `case`      | `Case` (create, move, note, task, remind)       |
//! | `research`  | `Research`                                      |
//! | `documents` | `Documents`                                     |
//! | `serve`     | `Serve`                                         |

pub mod board;
pub mod case;
pub mod documents;
pub mod research;
pub mod serve;

pub use board::cmd_board;
pub use case::{cmd_case_create, cmd_case_move, cmd_case_note, cmd_case_remind, cmd_case_task};
pub use documents::cmd_documents;
pub use research::cmd_research;
pub use serve::cmd_serve;
