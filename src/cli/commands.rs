//! 命令处理
//!
//! 解析并执行交互会话中的编辑与计算命令

use crate::cli::printer::Printer;
use crate::cli::workspace::Workspace;
use crate::engine::{FlowEngine, MaxFlowAnalysis};
use crate::error::Error;
use crate::graph::FlowGraph;
use crate::metrics::global_metrics;
use crate::types::{Capacity, StrategyKind};
use std::fs;

/// 命令执行结果
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// 交互会话状态
///
/// 工作区是会话中唯一的可变状态；计算结果与当时的快照一起保存，
/// 后续编辑不会改写已有结果
pub struct Session {
    /// 编辑器工作区
    pub workspace: Workspace,
    /// 最近一次计算的快照与结果
    last_analysis: Option<(FlowGraph, MaxFlowAnalysis)>,
    /// 打印器
    printer: Printer,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            last_analysis: None,
            printer: Printer::new(),
        }
    }

    pub fn with_workspace(workspace: Workspace) -> Self {
        Self {
            workspace,
            last_analysis: None,
            printer: Printer::new(),
        }
    }
}

/// 解析并执行一条命令
pub fn handle_command(session: &mut Session, input: &str) -> CommandResult {
    let parts: Vec<&str> = input.trim().splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let args = parts.get(1).copied().unwrap_or("").trim();

    match cmd.as_str() {
        "quit" | "exit" | "q" => CommandResult::Exit,

        "help" | "h" | "?" => CommandResult::Message(help_text()),

        "stats" | "info" => CommandResult::Message(session.printer.workspace_overview(&session.workspace)),

        "metrics" => CommandResult::Message(global_metrics().to_prometheus().content),

        "node" | "n" => handle_node_command(session, args),

        "edge" | "e" => handle_edge_command(session, args),

        "connect" | "c" => {
            let argv: Vec<&str> = args.split_whitespace().collect();
            match argv.as_slice() {
                [from, to] => connect(session, from, to, None),
                [from, to, capacity] => match capacity.parse::<Capacity>() {
                    Ok(capacity) => connect(session, from, to, Some(capacity)),
                    Err(_) => CommandResult::Error(format!("无效的容量: {}", capacity)),
                },
                _ => CommandResult::Error("用法: connect <起点> <终点> [容量]".to_string()),
            }
        }

        "disconnect" => {
            let argv: Vec<&str> = args.split_whitespace().collect();
            if let [from, to] = argv.as_slice() {
                session.last_analysis = None;
                match session.workspace.disconnect(from, to) {
                    Ok(edge) => CommandResult::Message(format!("边 {} 已删除", edge.id())),
                    Err(e) => CommandResult::Error(e.to_string()),
                }
            } else {
                CommandResult::Error("用法: disconnect <起点> <终点>".to_string())
            }
        }

        "capacity" | "cap" => {
            let argv: Vec<&str> = args.split_whitespace().collect();
            if let [from, to, value] = argv.as_slice() {
                let capacity = match value.parse::<Capacity>() {
                    Ok(c) => c,
                    Err(_) => return CommandResult::Error(format!("无效的容量: {}", value)),
                };
                session.last_analysis = None;
                match session.workspace.set_capacity(from, to, capacity) {
                    Ok(()) => CommandResult::Message(format!("容量已更新为 {}", capacity)),
                    Err(e) => CommandResult::Error(e.to_string()),
                }
            } else {
                CommandResult::Error("用法: capacity <起点> <终点> <容量>".to_string())
            }
        }

        "source" => {
            if args.is_empty() {
                return CommandResult::Error("用法: source <节点>".to_string());
            }
            session.last_analysis = None;
            match session.workspace.set_source(args) {
                Ok(()) => CommandResult::Message(format!("节点 {} 已设为源点", args)),
                Err(e) => CommandResult::Error(e.to_string()),
            }
        }

        "sink" | "target" => {
            if args.is_empty() {
                return CommandResult::Error("用法: sink <节点>".to_string());
            }
            session.last_analysis = None;
            match session.workspace.set_sink(args) {
                Ok(()) => CommandResult::Message(format!("节点 {} 已设为汇点", args)),
                Err(e) => CommandResult::Error(e.to_string()),
            }
        }

        "compute" | "flow" | "maxflow" => {
            let graph = match session.workspace.snapshot() {
                Ok(graph) => graph,
                Err(e) => return CommandResult::Error(e.to_string()),
            };

            // 指定单一策略时只跑该策略；缺省跑两种并交叉核对
            match args {
                "" => match FlowEngine::analyze(&graph) {
                    Ok(analysis) => {
                        let message = session.printer.analysis_summary(&graph, &analysis);
                        session.last_analysis = Some((graph, analysis));
                        CommandResult::Message(message)
                    }
                    Err(e) => CommandResult::Error(e.to_string()),
                },
                "bfs" | "dfs" => {
                    let kind = if args == "bfs" {
                        StrategyKind::BreadthFirst
                    } else {
                        StrategyKind::DepthFirst
                    };
                    match FlowEngine::compute(&graph, kind) {
                        Ok(report) => CommandResult::Message(
                            session.printer.report_summary(&graph, &report, kind),
                        ),
                        Err(e) => CommandResult::Error(e.to_string()),
                    }
                }
                _ => CommandResult::Error("用法: compute [bfs|dfs]".to_string()),
            }
        }

        "paths" => match session.last_analysis {
            Some((ref graph, ref analysis)) => {
                CommandResult::Message(session.printer.paths_overview(graph, analysis))
            }
            None => CommandResult::Error("尚未计算，请先执行 'compute'".to_string()),
        },

        "table" => match session.last_analysis {
            Some((ref graph, ref analysis)) => CommandResult::Message(
                session
                    .printer
                    .residual_steps_table(graph, &analysis.depth_first.residual_table),
            ),
            None => CommandResult::Error("尚未计算，请先执行 'compute'".to_string()),
        },

        "export" => {
            if args.is_empty() {
                return CommandResult::Error("用法: export <文件>".to_string());
            }
            match session.last_analysis {
                Some((_, ref analysis)) => match export_analysis(analysis, args) {
                    Ok(()) => CommandResult::Message(format!("结果已导出到 {}", args)),
                    Err(e) => CommandResult::Error(e.to_string()),
                },
                None => CommandResult::Error("尚未计算，请先执行 'compute'".to_string()),
            }
        }

        "load" => {
            if args.is_empty() {
                return CommandResult::Error("用法: load <文件>".to_string());
            }
            match Workspace::load(args) {
                Ok(workspace) => {
                    session.workspace = workspace;
                    session.last_analysis = None;
                    CommandResult::Message(format!(
                        "会话已加载: {} (节点 {}, 边 {})",
                        args,
                        session.workspace.node_count(),
                        session.workspace.edge_count()
                    ))
                }
                Err(e) => CommandResult::Error(e.to_string()),
            }
        }

        "save" => {
            if args.is_empty() {
                return CommandResult::Error("用法: save <文件>".to_string());
            }
            match session.workspace.save(args) {
                Ok(()) => CommandResult::Message(format!("会话已保存到 {}", args)),
                Err(e) => CommandResult::Error(e.to_string()),
            }
        }

        "reset" => {
            session.workspace.reset();
            session.last_analysis = None;
            CommandResult::Message("工作区已重置".to_string())
        }

        "" => CommandResult::Continue,

        _ => CommandResult::Error(format!("未知命令: {}。输入 'help' 查看帮助。", cmd)),
    }
}

fn handle_node_command(session: &mut Session, args: &str) -> CommandResult {
    let parts: Vec<&str> = args.splitn(2, ' ').collect();
    let sub = parts[0].to_lowercase();
    let rest = parts.get(1).copied().unwrap_or("").trim();

    match sub.as_str() {
        "add" => {
            session.last_analysis = None;
            let label = if rest.is_empty() { None } else { Some(rest) };
            let node = session.workspace.add_node(label);
            CommandResult::Message(format!("节点 {} ({}) 已创建", node.label(), node.id()))
        }

        "list" | "" => CommandResult::Message(session.printer.nodes_table(&session.workspace)),

        "remove" | "rm" => {
            if rest.is_empty() {
                return CommandResult::Error("用法: node remove <节点>".to_string());
            }
            session.last_analysis = None;
            match session.workspace.remove_node(rest) {
                Ok(node) => CommandResult::Message(format!("节点 {} 已删除", node.label())),
                Err(e) => CommandResult::Error(e.to_string()),
            }
        }

        "rename" => {
            let argv: Vec<&str> = rest.split_whitespace().collect();
            if let [key, label] = argv.as_slice() {
                session.last_analysis = None;
                match session.workspace.rename_node(key, label) {
                    Ok(()) => CommandResult::Message(format!("节点已重命名为 {}", label)),
                    Err(e) => CommandResult::Error(e.to_string()),
                }
            } else {
                CommandResult::Error("用法: node rename <节点> <新名称>".to_string())
            }
        }

        _ => CommandResult::Error(format!("未知子命令: node {}", sub)),
    }
}

fn handle_edge_command(session: &mut Session, args: &str) -> CommandResult {
    let sub = args.split_whitespace().next().unwrap_or("");

    match sub {
        "list" | "" => CommandResult::Message(session.printer.edges_table(&session.workspace)),
        _ => CommandResult::Error(format!(
            "未知子命令: edge {}。创建边请用 connect，删除请用 disconnect。",
            sub
        )),
    }
}

fn connect(session: &mut Session, from: &str, to: &str, capacity: Option<Capacity>) -> CommandResult {
    session.last_analysis = None;
    match session.workspace.connect(from, to, capacity) {
        Ok(edge) => CommandResult::Message(format!(
            "边 {} 已创建 (容量 {})",
            edge.id(),
            edge.capacity()
        )),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn export_analysis(analysis: &MaxFlowAnalysis, path: &str) -> crate::error::Result<()> {
    let json = serde_json::to_string_pretty(analysis)
        .map_err(|e| Error::SerializationError(e.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}

fn help_text() -> String {
    r#"
═══════════════════════════════════════════════════════════════
                   FlowGraph CLI 命令帮助
═══════════════════════════════════════════════════════════════

基础命令:
  help, h, ?               显示帮助
  quit, exit, q            退出程序
  stats, info              显示工作区概览
  metrics                  导出运行指标 (Prometheus 格式)

图编辑:
  node add [名称]          添加节点（缺省按 A, B, C... 命名）
  node list                列出所有节点
  node remove <节点>       删除节点及其关联边
  node rename <节点> <名>  重命名节点

  connect <起点> <终点> [容量]
                           创建有向边（容量缺省为 10）
  disconnect <起点> <终点> 删除有向边
  capacity <起点> <终点> <容量>
                           更新边容量
  edge list                列出所有边

  source <节点>            设为源点
  sink <节点>              设为汇点
  reset                    清空工作区

计算与结果:
  compute, flow            计算最大流（两种策略交叉核对）
  compute bfs|dfs          只用指定策略计算
  paths                    查看增广路径与推荐路径
  table                    查看逐步残余表（深度优先）
  export <文件>            导出完整结果为 JSON

会话:
  load <文件>              从 JSON 文件加载会话
  save <文件>              保存会话到 JSON 文件

节点可以用 ID 或名称引用，例如:
  connect A B 15
  source A

═══════════════════════════════════════════════════════════════
"#
    .to_string()
}
