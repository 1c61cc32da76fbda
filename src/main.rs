use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use who_sleeps_where::app::report;
use who_sleeps_where::utils::{logger, validation::Validate};
use who_sleeps_where::{
    CliConfig, LocalStorage, Person, PlanConfig, PlannerError, RandomNames, Roster, Session,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("🛏️ Starting who-sleeps-where");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(config).await {
        tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: CliConfig) -> Result<(), PlannerError> {
    config.validate()?;

    let plan = match &config.plan {
        Some(path) => {
            tracing::info!("📁 Loading plan from: {}", path.display());
            let plan = PlanConfig::from_file(path)?;
            plan.validate()?;
            Some(plan)
        }
        None => None,
    };

    let mut session = Session::new(LocalStorage::new(config.prefs.clone()))?;

    if let Some(enabled) = config.set_drumroll {
        session.set_drumroll_enabled(enabled)?;
        println!("🥁 Drumroll {}", if enabled { "enabled" } else { "disabled" });
        if !config.has_roster_input() && plan.is_none() {
            return Ok(());
        }
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    fill_roster(&config, plan.as_ref(), session.edit()?, &mut rng)?;

    // Overrides for this run only; the stored preference is untouched.
    let drumroll = config
        .drumroll
        .or_else(|| plan.as_ref().and_then(PlanConfig::drumroll_enabled))
        .unwrap_or_else(|| session.drumroll_enabled());
    session.override_drumroll(drumroll);
    if let Some(seconds) = config
        .drumroll_secs
        .or_else(|| plan.as_ref().and_then(PlanConfig::drumroll_seconds))
    {
        session.set_drumroll_delay(Duration::from_secs(seconds));
    }

    display_roster_summary(session.roster(), plan.as_ref());

    if let Some(message) = session.error_message() {
        tracing::warn!("Gate rejected roster: {}", message);
    }

    let assignment = session.decide_and_reveal(&mut rng).await?;

    println!();
    print!("{}", report::render_text(assignment));

    let output = config
        .output_path
        .clone()
        .or_else(|| plan.as_ref().and_then(|p| p.output_path().map(str::to_string)));
    if let Some(output_path) = output {
        let mut formats = config.formats.clone();
        if formats.is_empty() {
            formats = plan
                .as_ref()
                .and_then(|p| p.output.as_ref().map(|o| o.formats.clone()))
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| vec!["json".to_string()]);
        }

        for path in report::export(assignment, &output_path, &formats)? {
            println!("📁 Output saved to: {}", path.display());
        }
    }

    Ok(())
}

fn fill_roster(
    config: &CliConfig,
    plan: Option<&PlanConfig>,
    roster: &mut Roster,
    rng: &mut StdRng,
) -> Result<(), PlannerError> {
    if let Some(plan) = plan {
        *roster = plan.to_roster();
    }

    for name in &config.people {
        roster.push_person(Person::new(name.clone()));
    }
    for bed in config.parsed_beds()? {
        if roster.push_bed(bed).is_none() {
            break;
        }
    }

    let mut names = RandomNames::new(StdRng::seed_from_u64(rng.random()));
    for _ in 0..config.random_people {
        roster.add_person(&mut names);
    }
    for _ in 0..config.random_beds {
        if roster.add_bed(&mut names).is_none() {
            break;
        }
    }

    Ok(())
}

fn display_roster_summary(roster: &Roster, plan: Option<&PlanConfig>) {
    println!("📋 Roster Summary:");
    if let Some(name) = plan.and_then(PlanConfig::name) {
        println!("  Plan: {}", name);
    }
    println!("  Who ({}):", roster.people().len());
    for person in roster.people() {
        println!("    - {}", person.name);
    }
    println!("  Where ({}):", roster.total_spots());
    for (position, bed) in roster.beds().iter().enumerate() {
        println!(
            "    {} {} (sleeps {})",
            bed.kind(position).emoji(),
            bed.effective_label(position),
            bed.capacity
        );
    }
}
