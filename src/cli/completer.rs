//! 命令补全器
//!
//! 基于 rustyline 实现 Tab 补全功能

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// 命令列表
const COMMANDS: &[&str] = &[
    "help", "quit", "exit", "stats", "info", "metrics",
    "node", "edge", "connect", "disconnect", "capacity",
    "source", "sink", "reset",
    "compute", "flow", "paths", "table", "export",
    "load", "save",
];

/// 子命令映射
fn get_sub_commands(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "node" => Some(&["add", "list", "remove", "rename"]),
        "edge" => Some(&["list"]),
        "compute" | "flow" => Some(&["bfs", "dfs"]),
        _ => None,
    }
}

/// FlowGraph CLI 补全器
#[derive(Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let words: Vec<&str> = line_to_cursor.split_whitespace().collect();

        if words.is_empty() {
            return Ok((0, vec![]));
        }

        // 光标是否在单词末尾
        let at_word_end = !line_to_cursor.ends_with(' ');

        if at_word_end {
            // 补全正在输入的单词
            let current_word = words.last().unwrap().to_lowercase();
            let start_pos = pos - current_word.len();

            // 前一个单词是否有子命令
            if words.len() > 1 {
                let prev_word = words[words.len() - 2].to_lowercase();
                if let Some(sub_cmds) = get_sub_commands(&prev_word) {
                    let completions: Vec<Pair> = sub_cmds
                        .iter()
                        .filter(|kw| kw.starts_with(&current_word))
                        .map(|kw| Pair {
                            display: kw.to_string(),
                            replacement: kw.to_string(),
                        })
                        .collect();
                    if !completions.is_empty() {
                        return Ok((start_pos, completions));
                    }
                }
                return Ok((start_pos, vec![]));
            }

            // 首个单词按命令列表补全
            let completions: Vec<Pair> = COMMANDS
                .iter()
                .filter(|kw| kw.starts_with(&current_word))
                .map(|kw| Pair {
                    display: kw.to_string(),
                    replacement: kw.to_string(),
                })
                .collect();

            Ok((start_pos, completions))
        } else {
            // 空格之后给出子命令建议
            let last_word = words.last().unwrap().to_lowercase();
            if let Some(sub_cmds) = get_sub_commands(&last_word) {
                let completions: Vec<Pair> = sub_cmds
                    .iter()
                    .map(|kw| Pair {
                        display: kw.to_string(),
                        replacement: kw.to_string(),
                    })
                    .collect();
                return Ok((pos, completions));
            }
            Ok((pos, vec![]))
        }
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}
