use anyhow::Context;
use colored::Colorize;
use votechain_ledger::{
    ChainExport, InMemoryLedger, LedgerReader, RecordView, StreamValidator, ValidationReport,
    VoteOutcome,
};
use votechain_server::{ServerConfig, VoteServer};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Demo => cmd_demo(cli.format),
        Command::Verify(args) => cmd_verify(args, cli.format),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    tracing::debug!(config = ?args.config, bind = ?args.bind, "preparing server");
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    println!(
        "{} VoteChain server on {}",
        "✓".green().bold(),
        config.bind_addr.to_string().bold()
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(VoteServer::new(config)?.serve())?;
    Ok(())
}

/// Votes cast by the demo, in order.
const DEMO_VOTES: [(&str, &str); 3] = [("V1", "Alice"), ("V1", "Bob"), ("V2", "Bob")];

type DemoStep = (&'static str, &'static str, VoteOutcome);

fn run_demo() -> anyhow::Result<(Vec<DemoStep>, InMemoryLedger)> {
    let ledger = InMemoryLedger::new()?;
    let outcomes = DEMO_VOTES
        .iter()
        .map(|&(voter, candidate)| (voter, candidate, ledger.cast_vote(voter, candidate)))
        .collect();
    Ok((outcomes, ledger))
}

fn cmd_demo(format: OutputFormat) -> anyhow::Result<()> {
    let (outcomes, ledger) = run_demo()?;
    let export = ledger.export()?;

    if format == OutputFormat::Json {
        let steps: Vec<_> = outcomes
            .iter()
            .map(|(voter, candidate, outcome)| {
                serde_json::json!({ "voter_id": voter, "candidate": candidate, "outcome": outcome })
            })
            .collect();
        let doc = serde_json::json!({
            "steps": steps,
            "chain": export,
            "valid": ledger.is_valid(),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    for (voter, candidate, outcome) in &outcomes {
        let mark = if outcome.ok { "✓".green().bold() } else { "✗".red().bold() };
        let position = outcome
            .position
            .map(|p| format!(" (block #{p})"))
            .unwrap_or_default();
        println!(
            "{mark} {} → {}: {}{}",
            voter.bold(),
            candidate.cyan(),
            outcome.message,
            position.yellow()
        );
    }

    println!();
    for view in &export.chain {
        print_record(view);
    }
    println!(
        "Chain: {} records, integrity {}",
        ledger.record_count()?.to_string().bold(),
        if ledger.is_valid() { "✓".green() } else { "✗".red() }
    );
    Ok(())
}

fn print_record(view: &RecordView) {
    println!("{}  {}", format!("#{}", view.index).yellow().bold(), short(&view.hash).dimmed());
    println!("  Voter: {}", short(&view.voter_id).cyan());
    println!("  Candidate: {}", view.candidate);
    println!("  Previous: {}", short(&view.previous_hash).dimmed());
    println!("  Timestamp: {}", view.timestamp);
}

fn short(text: &str) -> &str {
    text.get(..16).unwrap_or(text)
}

/// Parse and validate an exported chain document.
fn verify_document(source: &str) -> anyhow::Result<ValidationReport> {
    let export: ChainExport = serde_json::from_str(source).context("parsing chain document")?;
    let records = export.to_records()?;
    Ok(StreamValidator::validate_records(&records))
}

fn cmd_verify(args: VerifyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let report = verify_document(&source)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text if report.is_valid() => {
            println!("{} Vote chain integrity verified", "✓".green().bold());
            println!("  Records: {}", report.record_count.to_string().bold());
            println!("  Hash chain: {}", "valid".green());
            println!("  Sequence: {}", "dense".green());
            println!("  Voters: {}", "unique".green());
        }
        OutputFormat::Text => {
            println!("{} Vote chain integrity check failed", "✗".red().bold());
            for violation in &report.violations {
                println!(
                    "  {} {:?}: {}",
                    format!("#{}", violation.index).yellow(),
                    violation.kind,
                    violation.description
                );
            }
        }
    }

    if !report.is_valid() {
        anyhow::bail!("{} violation(s) found", report.violations.len());
    }
    Ok(())
}
