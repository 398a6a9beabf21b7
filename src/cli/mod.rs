//! 交互式命令行模块
//!
//! 扮演引擎边界外的「外部表现层」：维护可变的编辑工作区，
//! 计算前快照、计算后渲染结果

mod commands;
mod completer;
mod printer;
mod workspace;

pub use commands::{handle_command, CommandResult, Session};
pub use completer::CommandCompleter;
pub use printer::Printer;
pub use workspace::{Workspace, DEFAULT_CAPACITY};
