use clap::Parser;
use dfe_scheduler::config::{RunConfig, Seeds};
use dfe_scheduler::ingest::csv_source::read_dags_from_path;
use dfe_scheduler::logger;
use dfe_scheduler::model::{DemandConfig, FunctionDemand, PathCatalog, ScenarioConfig};
use dfe_scheduler::scheduler::{DpeScheduler, FixDocScheduler, FixedPaths, HeftScheduler};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::process::ExitCode;

/// Compares DPE, FixDoc and HEFT list-scheduling heuristics on a workload of
/// dependency-encoded DAGs, over a randomly synthesized compute substrate.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// CSV workload with at least `task_name` and `job_name` columns.
    #[arg(long)]
    workload: PathBuf,

    /// Number of compute nodes in the synthesized scenario.
    #[arg(long, default_value_t = 4)]
    server_num: usize,

    /// Upper bound on per-node random edge additions during synthesis.
    #[arg(long, default_value_t = 2)]
    density: usize,

    /// Upper bound on distinct function numbers across the run.
    #[arg(long, default_value_t = 500)]
    max_func_num: usize,

    /// Seed for scenario and function-demand synthesis.
    #[arg(long, default_value_t = 0)]
    scenario_seed: u64,

    /// Seed for FixDoc's per-DAG fixed-path sampling.
    #[arg(long, default_value_t = 1)]
    fixdoc_seed: u64,

    /// Seed for HEFT's own, separately sampled, fixed-path communication table.
    #[arg(long, default_value_t = 2)]
    heft_seed: u64,
}

fn main() -> ExitCode {
    logger::init();

    let cli = Cli::parse();
    let config = RunConfig {
        scenario: ScenarioConfig { server_num: cli.server_num, density: cli.density, bw_range: (30, 70), pp_range: (7, 14) },
        demand: DemandConfig { max_func_num: cli.max_func_num, demand_range: (1, 50), data_range: (1, 100) },
        seeds: Seeds { scenario: cli.scenario_seed, fixdoc: cli.fixdoc_seed, heft: cli.heft_seed },
        ..RunConfig::default()
    };

    match run(&cli.workload, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(workload: &PathBuf, config: &RunConfig) -> dfe_scheduler::Result<()> {
    let mut scenario_rng = StdRng::seed_from_u64(config.seeds.scenario);
    let scenario = dfe_scheduler::model::Scenario::synthesize(&config.scenario, &mut scenario_rng)?;
    log::info!("synthesized scenario with {} nodes", scenario.node_count);

    let catalog = PathCatalog::build(&scenario);
    let demand = FunctionDemand::synthesize(&config.demand, &mut scenario_rng);

    let dags = read_dags_from_path(workload)?;
    log::info!("loaded {} DAGs from '{}'", dags.len(), workload.display());
    for dag in &dags {
        dag.validate_demand_bounds(&demand)?;
    }

    let dpe = DpeScheduler::new(&scenario, &catalog);
    let dpe_results = dags.iter().map(|dag| dpe.schedule(dag, &demand)).collect();
    let dpe_report = dfe_scheduler::model::ScheduleReport::new("DPE", dpe_results);
    println!("{dpe_report}");

    // FixDoc and HEFT each fix one path per node pair at the start of every
    // DAG, drawn from their own running, separately seeded RNG stream.
    let mut fixdoc_rng = StdRng::seed_from_u64(config.seeds.fixdoc);
    let fixdoc_results = dags
        .iter()
        .map(|dag| {
            let fixed = FixedPaths::sample(&catalog, &mut fixdoc_rng);
            FixDocScheduler::new(&scenario, &fixed).schedule(dag, &demand)
        })
        .collect();
    let fixdoc_report = dfe_scheduler::model::ScheduleReport::new("FixDoc", fixdoc_results);
    println!("{fixdoc_report}");

    let mut heft_rng = StdRng::seed_from_u64(config.seeds.heft);
    let heft_results = dags
        .iter()
        .map(|dag| {
            let fixed = FixedPaths::sample(&catalog, &mut heft_rng);
            HeftScheduler::new(&scenario, &fixed).schedule(dag, &demand)
        })
        .collect();
    let heft_report = dfe_scheduler::model::ScheduleReport::new("HEFT", heft_results);
    println!("{heft_report}");

    Ok(())
}
