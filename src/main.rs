use stringevo::config::{ConfigManager, EvolutionConfig, ScoringMethod};
use stringevo::engines::generation::LogProgress;
use stringevo::{Closeness, ExactMatch, FitnessScore, GeneticAlgorithm, RunReport, Runner};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional TOML file; STRINGEVO__EVOLUTION__* variables override it
    let config_path = std::env::args().nth(1);
    let manager = ConfigManager::new();
    manager.load_layered(config_path.as_deref())?;
    let config = manager.get().evolution;

    let report = match config.scoring {
        ScoringMethod::Closeness => evolve::<Closeness>(&config)?,
        ScoringMethod::ExactMatch => evolve::<ExactMatch>(&config)?,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn evolve<S: FitnessScore>(config: &EvolutionConfig) -> anyhow::Result<RunReport> {
    let mut engine = match config.seed {
        Some(seed) => GeneticAlgorithm::<S>::with_seed(config.population_size, &config.target, seed)?,
        None => GeneticAlgorithm::<S>::new(config.population_size, &config.target)?,
    };
    let mut progress = LogProgress::new(config.log_every);

    let report = Runner::new(config.max_generations).run(&mut engine, &mut progress)?;
    Ok(report)
}
