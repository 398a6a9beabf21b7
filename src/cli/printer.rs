//! 结果打印器
//!
//! 将分析结果渲染为终端表格

use crate::algorithm::ResidualTrace;
use crate::cli::workspace::Workspace;
use crate::engine::{FlowEdge, FlowReport, MaxFlowAnalysis, PathCapacity, PathFlow};
use crate::graph::{FlowGraph, NodeId};
use crate::types::{EdgeStatus, StrategyKind};
use colored::Colorize;
use prettytable::{format, row, Cell, Row, Table};

/// 结果打印器
#[derive(Debug, Default)]
pub struct Printer;

impl Printer {
    pub fn new() -> Self {
        Self
    }

    /// 计算结果总览：最大流量、两种策略的路径数、流量分配表
    pub fn analysis_summary(&self, graph: &FlowGraph, analysis: &MaxFlowAnalysis) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n",
            "最大流量:".bold(),
            analysis.max_flow.to_string().green().bold()
        ));
        output.push_str(&format!(
            "广度优先: {} 轮增广; 深度优先: {} 轮增广 (结果已交叉核对)\n\n",
            analysis.breadth_first.paths.len(),
            analysis.depth_first.paths.len()
        ));

        output.push_str(&self.flow_edges_table(graph, &analysis.breadth_first.flow_edges));
        output.push_str("\n输入 'paths' 查看增广路径，'table' 查看逐步残余表\n");
        output
    }

    /// 单策略计算结果
    pub fn report_summary(
        &self,
        graph: &FlowGraph,
        report: &FlowReport,
        kind: StrategyKind,
    ) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {} ({})\n\n",
            "最大流量:".bold(),
            report.max_flow.to_string().green().bold(),
            kind
        ));
        output.push_str(&self.flow_edges_table(graph, &report.flow_edges));

        output.push_str(&format!("\n{}\n", "增广路径:".bold()));
        if report.paths.is_empty() {
            output.push_str("  (无增广路径)\n");
        }
        for (i, PathFlow { path, flow }) in report.paths.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} (流量 {})\n",
                i + 1,
                path_display(graph, path),
                flow
            ));
        }

        output
    }

    /// 流量分配表
    pub fn flow_edges_table(&self, graph: &FlowGraph, flow_edges: &[FlowEdge]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["边", "起点", "终点", "流量/容量", "状态"]);

        for fe in flow_edges {
            let status = if fe.capacity > 0 && fe.flow == fe.capacity {
                "饱和"
            } else if fe.flow > 0 {
                "部分使用"
            } else {
                "未使用"
            };
            table.add_row(Row::new(vec![
                Cell::new(fe.id.as_str()),
                Cell::new(&label_of(graph, &fe.source)),
                Cell::new(&label_of(graph, &fe.target)),
                Cell::new(&format!("{}/{}", fe.flow, fe.capacity)),
                Cell::new(status),
            ]));
        }

        table.to_string()
    }

    /// 两种策略的增广路径列表
    pub fn paths_overview(&self, graph: &FlowGraph, analysis: &MaxFlowAnalysis) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "广度优先路径:".bold()));
        if analysis.breadth_first.paths.is_empty() {
            output.push_str("  (无增广路径)\n");
        }
        for (i, PathFlow { path, flow }) in analysis.breadth_first.paths.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} (流量 {})\n",
                i + 1,
                path_display(graph, path),
                flow
            ));
        }

        output.push_str(&format!("\n{}\n", "深度优先路径:".bold()));
        if analysis.depth_first.paths.is_empty() {
            output.push_str("  (无增广路径)\n");
        }
        for (i, PathCapacity { path, capacity }) in analysis.depth_first.paths.iter().enumerate() {
            output.push_str(&format!(
                "  {}. {} (瓶颈 {})\n",
                i + 1,
                path_display(graph, path),
                capacity
            ));
        }

        if let Some(ref recommended) = analysis.depth_first.recommended_path {
            output.push_str(&format!(
                "\n{} {} (瓶颈 {})\n",
                "推荐路径:".green().bold(),
                path_display(graph, &recommended.path),
                recommended.capacity
            ));
        }
        if let Some(ref longest) = analysis.depth_first.longest_path {
            output.push_str(&format!(
                "{} {} ({} 跳)\n",
                "最长路径:".bold(),
                path_display(graph, &longest.path),
                longest.path.len().saturating_sub(1)
            ));
        }

        output
    }

    /// 逐步残余表：第 0 列为初始容量，之后每轮增广一列
    pub fn residual_steps_table(&self, graph: &FlowGraph, traces: &[ResidualTrace]) -> String {
        if traces.is_empty() {
            return "(图中没有边)\n".to_string();
        }

        let steps = traces[0].values.len();
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let mut titles = vec![Cell::new("边")];
        titles.push(Cell::new("初始"));
        for step in 1..steps {
            titles.push(Cell::new(&format!("第{}轮", step)));
        }
        titles.push(Cell::new("最终状态"));
        table.set_titles(Row::new(titles));

        for trace in traces {
            let mut cells = vec![Cell::new(&format!(
                "{} -> {}",
                label_of(graph, &trace.source),
                label_of(graph, &trace.target)
            ))];
            for value in &trace.values {
                cells.push(Cell::new(&value.to_string()));
            }
            let final_status = trace
                .statuses
                .last()
                .map(|s| status_display(*s))
                .unwrap_or("-");
            cells.push(Cell::new(final_status));
            table.add_row(Row::new(cells));
        }

        let mut output = table.to_string();
        output.push_str(&format!(
            "状态说明: {} 残余为 0; {} 有流量且无法再到达汇点; {} 尚未使用; {} 仍可增广\n",
            "饱和".yellow(),
            "受阻".red(),
            "未使用".dimmed(),
            "可用".green()
        ));
        output
    }

    /// 工作区概览
    pub fn workspace_overview(&self, workspace: &Workspace) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["属性", "值"]);
        table.add_row(row!["节点数", workspace.node_count().to_string()]);
        table.add_row(row!["边数", workspace.edge_count().to_string()]);
        table.add_row(row![
            "源点",
            workspace
                .source()
                .map(|n| n.label().to_string())
                .unwrap_or_else(|| "未设置".to_string())
        ]);
        table.add_row(row![
            "汇点",
            workspace
                .sink()
                .map(|n| n.label().to_string())
                .unwrap_or_else(|| "未设置".to_string())
        ]);
        table.to_string()
    }

    /// 节点列表
    pub fn nodes_table(&self, workspace: &Workspace) -> String {
        if workspace.node_count() == 0 {
            return "(工作区为空，使用 'node add' 添加节点)\n".to_string();
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["ID", "名称", "角色"]);
        for node in workspace.nodes() {
            let role = if node.is_source() {
                "源点"
            } else if node.is_sink() {
                "汇点"
            } else {
                "-"
            };
            table.add_row(row![node.id().as_str(), node.label(), role]);
        }
        table.to_string()
    }

    /// 边列表
    pub fn edges_table(&self, workspace: &Workspace) -> String {
        if workspace.edge_count() == 0 {
            return "(没有边，使用 'connect' 创建)\n".to_string();
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["ID", "起点", "终点", "容量"]);
        for edge in workspace.edges() {
            let source_label = workspace
                .find_node(edge.source().as_str())
                .map(|n| n.label().to_string())
                .unwrap_or_else(|| edge.source().to_string());
            let target_label = workspace
                .find_node(edge.target().as_str())
                .map(|n| n.label().to_string())
                .unwrap_or_else(|| edge.target().to_string());
            table.add_row(row![
                edge.id().as_str(),
                source_label,
                target_label,
                edge.capacity().to_string()
            ]);
        }
        table.to_string()
    }
}

/// 节点的显示名称（缺失时退回 ID）
fn label_of(graph: &FlowGraph, id: &NodeId) -> String {
    graph
        .node(id)
        .map(|n| n.label().to_string())
        .unwrap_or_else(|| id.to_string())
}

/// 以显示名称拼接路径
fn path_display(graph: &FlowGraph, path: &[NodeId]) -> String {
    path.iter()
        .map(|id| label_of(graph, id))
        .collect::<Vec<_>>()
        .join(" → ")
}

/// 状态的终端显示文本
fn status_display(status: EdgeStatus) -> &'static str {
    match status {
        EdgeStatus::Unused => "未使用",
        EdgeStatus::Open => "可用",
        EdgeStatus::Blocked => "受阻",
        EdgeStatus::Saturated => "饱和",
    }
}
