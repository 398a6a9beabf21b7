//! FlowGraph 演示脚本
//!
//! 构建示例网络并计算最大流

use flowgraph::cli::Printer;
use flowgraph::{Edge, FlowEngine, FlowGraph, Node};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("FlowGraph 演示");
    println!("===============\n");

    // 构建示例网络：菱形拓扑加一条交叉边
    println!("1. 构建示例网络...");
    let graph = FlowGraph::new(
        vec![
            Node::source("S", "水源"),
            Node::new("A", "泵站A"),
            Node::new("B", "泵站B"),
            Node::sink("T", "储罐"),
        ],
        vec![
            Edge::new("e1", "S", "A", 10),
            Edge::new("e2", "S", "B", 5),
            Edge::new("e3", "A", "T", 5),
            Edge::new("e4", "B", "T", 10),
            Edge::new("e5", "A", "B", 3),
        ],
    )?;
    println!(
        "   节点: {}, 边: {}\n",
        graph.node_count(),
        graph.edge_count()
    );

    // 两种策略独立求解并交叉核对
    println!("2. 计算最大流...");
    let analysis = FlowEngine::analyze(&graph)?;

    let printer = Printer::new();
    println!("{}", printer.analysis_summary(&graph, &analysis));

    println!("3. 增广路径明细...");
    println!("{}", printer.paths_overview(&graph, &analysis));

    println!("4. 逐步残余表 (深度优先)...");
    println!(
        "{}",
        printer.residual_steps_table(&graph, &analysis.depth_first.residual_table)
    );

    println!("演示完成！");
    Ok(())
}
