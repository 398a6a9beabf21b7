//! FlowGraph CLI 工具
//!
//! 交互式最大流计算命令行界面

use clap::Parser;
use colored::Colorize;
use flowgraph::cli::{handle_command, CommandCompleter, CommandResult, Session, Workspace};
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::Editor;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "flowgraph-cli")]
#[command(about = "FlowGraph 交互式最大流计算工具")]
struct Args {
    /// 启动时加载的会话文件 (JSON)
    #[arg(short, long)]
    load: Option<String>,

    /// 执行单个命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("FlowGraph CLI - 交互式最大流计算引擎");
    println!("======================================");

    let mut session = match args.load {
        Some(ref path) => {
            let workspace = Workspace::load(path)?;
            println!(
                "会话已加载: {} (节点 {}, 边 {})",
                path,
                workspace.node_count(),
                workspace.edge_count()
            );
            Session::with_workspace(workspace)
        }
        None => Session::new(),
    };

    // 单命令模式
    if let Some(command) = args.execute {
        match handle_command(&mut session, &command) {
            CommandResult::Message(message) => println!("{}", message),
            CommandResult::Error(message) => {
                println!("{}", format!("错误: {}", message).red());
                std::process::exit(1);
            }
            _ => {}
        }
        return Ok(());
    }

    // 交互模式
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    let mut rl: Editor<CommandCompleter, FileHistory> = Editor::new()?;
    rl.set_helper(Some(CommandCompleter::new()));

    let history_path = history_file();
    if let Some(ref path) = history_path {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline("flowgraph> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match handle_command(&mut session, line) {
                    CommandResult::Continue => {}
                    CommandResult::Exit => break,
                    CommandResult::Message(message) => println!("{}", message),
                    CommandResult::Error(message) => {
                        println!("{}", format!("错误: {}", message).red())
                    }
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                println!("读取输入失败: {}", e);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }

    println!("再见！");
    Ok(())
}

/// 历史记录文件位置
fn history_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("flowgraph").join("history.txt"))
}
