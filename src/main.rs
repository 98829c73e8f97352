//! VakaGöz - command-line driver
//!
//! Runs the progress engine against the on-disk store in the platform data
//! directory. Useful for inspecting and seeding progress outside the app.

use anyhow::{bail, Context, Result};

use vakagoz::data::{departments_for_faculty, DataManager, Faculty};
use vakagoz::save::DEFAULT_WEEKLY_GOAL;
use vakagoz::{
    format_case_count, CaseResult, CaseStatsCalculator, FileStore, KeyValueStore,
    ProgressAnalytics, ProgressStore, UserProgress,
};

const USAGE: &str = "\
VakaGöz - progress engine

Usage:
  vakagoz status
  vakagoz submit <case-id> <score> <minutes> <hints> <correct|wrong> [diagnosis]
  vakagoz consult
  vakagoz history
  vakagoz departments
  vakagoz onboard <medicine|pharmacy> [weekly-goal]
  vakagoz reset
  vakagoz --version";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    if matches!(command.as_str(), "--help" | "-h") {
        println!("{}", USAGE);
        return Ok(());
    }
    if matches!(command.as_str(), "--version" | "-v") {
        println!("vakagoz {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let backend = FileStore::in_data_directory();
    log::info!("Using data directory {:?}", backend.dir());
    run(&ProgressStore::new(backend), &args)
}

/// Execute one store-backed command; `args[0]` is the command name
fn run<S: KeyValueStore>(store: &ProgressStore<S>, args: &[String]) -> Result<()> {
    let command = args.first().map(String::as_str).unwrap_or("status");
    match command {
        "status" => print_status(&store.try_load()?),
        "submit" => {
            let result = parse_case_result(&args[1..])?;
            let update = store.try_apply_case_result(&result)?;
            println!("+{} points", update.earned_points);
            for achievement in &update.new_achievements {
                println!("Achievement unlocked: {} - {}", achievement.title, achievement.description);
            }
            print_status(&update.progress);
        }
        "consult" => {
            let update = store.try_apply_pharmacy_consultation()?;
            println!("+{} points", update.earned_points);
            for achievement in &update.new_achievements {
                println!("Achievement unlocked: {} - {}", achievement.title, achievement.description);
            }
            print_status(&update.progress);
        }
        "history" => {
            let results = store.try_case_results()?;
            if results.is_empty() {
                println!("No cases recorded yet.");
            }
            for result in results {
                println!(
                    "{:<20} score {:>3}  {:>3} min  hints {}  {}",
                    result.case_id,
                    result.score,
                    result.time_spent,
                    result.hints_used,
                    if result.is_correct { "correct" } else { "wrong" },
                );
            }
        }
        "departments" => {
            let progress = store.try_load()?;
            let calculator = CaseStatsCalculator::new(DataManager::new().tables);
            let mut rng = rand::thread_rng();
            for department in departments_for_faculty(progress.faculty) {
                let stats = calculator.compute(&department, &progress, &mut rng);
                println!(
                    "{:<24} {:<26} {} ({} locked)",
                    department.id,
                    department.name,
                    format_case_count(&stats),
                    stats.locked,
                );
            }
        }
        "onboard" => {
            let faculty = args
                .get(1)
                .and_then(|name| Faculty::from_short_name(name))
                .context("expected faculty: medicine or pharmacy")?;
            let weekly_goal = match args.get(2) {
                Some(goal) => goal.parse().context("weekly goal must be a number")?,
                None => DEFAULT_WEEKLY_GOAL,
            };
            let progress = store.try_onboard(faculty, weekly_goal)?;
            print_status(&progress);
        }
        "reset" => {
            store.try_reset()?;
            println!("Progress reset.");
        }
        other => bail!("Unknown command: {} (run 'vakagoz --help' for usage)", other),
    }

    Ok(())
}

/// Build a case result from `submit` arguments
fn parse_case_result(args: &[String]) -> Result<CaseResult> {
    if args.len() < 5 {
        bail!("submit needs <case-id> <score> <minutes> <hints> <correct|wrong>");
    }
    let is_correct = match args[4].as_str() {
        "correct" | "yes" | "true" => true,
        "wrong" | "no" | "false" => false,
        other => bail!("expected correct or wrong, got {:?}", other),
    };

    Ok(CaseResult {
        case_id: args[0].clone(),
        score: args[1].parse().context("score must be 0-100")?,
        time_spent: args[2].parse().context("minutes must be a whole number")?,
        hints_used: args[3].parse().context("hints must be a whole number")?,
        completed: true,
        diagnosis: args.get(5).cloned().unwrap_or_default(),
        is_correct,
    })
}

fn print_status(progress: &UserProgress) {
    let analytics = ProgressAnalytics::from_progress(progress);
    println!("Faculty:      {}", progress.faculty.name());
    println!(
        "Level:        {} ({} points, {} to next level, {:.0}%)",
        progress.level, progress.total_points, analytics.points_to_next_level, analytics.level_progress
    );
    println!("Cases:        {} completed, streak {}", progress.completed_cases, progress.current_streak);
    println!(
        "Weekly goal:  {}/{} ({:.0}%)",
        progress.weekly_progress, progress.weekly_goal, analytics.weekly_progress_percentage
    );
    if !progress.achievements.is_empty() {
        let titles: Vec<&str> = progress.achievements.iter().map(|a| a.title.as_str()).collect();
        println!("Achievements: {}", titles.join(", "));
    }
}
