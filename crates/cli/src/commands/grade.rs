// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use opr_kernel::grader::DifficultyGrader;
use opr_kernel::{AssetRate, GradeOutcome, Height};
use opr_node::config::NodeConfig;
use opr_node::network::FactomClient;
use opr_node::pipeline::GradingPipeline;
use std::sync::Arc;

pub struct GradeArgs {
    pub height: Height,
    pub factomd: Option<String>,
    pub workers: Option<usize>,
    pub json: bool,
}

/// `NAME=rate` pairs in quoted order.
pub fn format_rates(assets: &[AssetRate]) -> String {
    assets
        .iter()
        .map(|a| format!("{}={}", a.name, a.rate))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Human readable (or JSON) rendering of an outcome.
pub fn render(outcome: &GradeOutcome, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(outcome)?);
    }

    let report = match outcome {
        GradeOutcome::UngradedNoBlock { height } => {
            return Ok(format!("ungraded: no OPR block at height {}", height));
        }
        GradeOutcome::Graded(report) => report,
    };

    let Some(top) = report.top_winner() else {
        return Ok(format!(
            "block not graded, no winners ({} entries, {} rejected)",
            report.entries,
            report.rejected.len()
        ));
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rank", "Short Hash", "Difficulty", "Entry"]);
    for (rank, winner) in report.winners.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            winner.short_hash.clone(),
            format!("{:016x}", winner.difficulty),
            winner.hash.to_string(),
        ]);
    }

    Ok(format!(
        "height {} ({}): {} entries, {} valid, {} rejected\nwinner: {}\nwinner rate: {}\n{}",
        report.height,
        report.version,
        report.entries,
        report.valid,
        report.rejected.len(),
        top.short_hash,
        format_rates(&top.assets),
        table,
    ))
}

pub async fn run(args: GradeArgs) -> anyhow::Result<()> {
    let mut cfg = NodeConfig::from_env()?;
    if let Some(url) = args.factomd {
        cfg.factomd_url = url;
    }
    if let Some(workers) = args.workers {
        cfg.fetch_workers = workers;
    }
    cfg.validate()?;

    let client = FactomClient::new(cfg.factomd_url.clone(), cfg.request_timeout())?;
    let pipeline = GradingPipeline::new(Arc::new(client), DifficultyGrader, &cfg);
    let outcome = pipeline.grade_height(args.height).await?;

    println!("{}", render(&outcome, args.json)?);
    Ok(())
}
