use std::path::PathBuf;

use autoflow::utils::LoggingConfig;
use autoflow::{StepResult, WorkflowRunner};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "autoflow",
    version,
    about = "Run automation workflows defined in YAML files"
)]
struct Cli {
    /// Path to the workflow YAML file
    workflow: PathBuf,

    /// Enable verbose per-step trace output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        LoggingConfig::init_with_filter("autoflow=debug,info");
    } else {
        LoggingConfig::init();
    }

    let runner = WorkflowRunner::with_builtin_agents();
    // 结构级错误（文件损坏、未知 Agent）从这里以非零状态退出；
    // 单步失败只出现在结果表里。
    let results = runner.run_path(&cli.workflow).await?;

    if results.is_empty() {
        println!("Workflow `{}` has no steps", cli.workflow.display());
    } else {
        render_result_table(&results);
    }
    Ok(())
}

fn render_result_table(results: &[StepResult]) {
    println!(
        "{:<6} {:<24} {:<8} {:<10} {}",
        "Step", "Agent", "Status", "Elapsed", "Output / Error"
    );
    for result in results {
        let status = if result.success { "ok" } else { "failed" };
        let detail = match (&result.output, &result.error) {
            (Some(output), _) => truncate(&output.to_string(), 72),
            (None, Some(error)) => truncate(error, 72),
            (None, None) => String::new(),
        };
        println!(
            "{:<6} {:<24} {:<8} {:<10} {}",
            result.index,
            result.agent,
            status,
            format!("{:.1?}", result.elapsed),
            detail
        );
    }

    let failed = results.iter().filter(|r| !r.success).count();
    if failed > 0 {
        println!("{failed} of {} steps failed", results.len());
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
