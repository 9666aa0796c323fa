use trainer_app::database::db;
use trainer_app::models::Lesson;
use trainer_app::{Grade, Performance, SpacedRepetitionService};

use chrono::Utc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let conn = db::open_database("trainer.sqlite3").expect("Failed to open trainer database");
    let mut service = SpacedRepetitionService::new(conn);

    if service.get_stats().total == 0 {
        let catalog = vec![
            Lesson::new("King and Pawn vs King"),
            Lesson::new("Lucena Position"),
            Lesson::new("Philidor Position"),
            Lesson::new("Queen vs Rook"),
        ];
        service.sync_from_catalog(&catalog);
        println!("Seeded {} lessons from the sample catalog", catalog.len());
    }

    let stats = service.get_stats();
    println!(
        "Problems: {} total, {} new, {} reviewed today, {} waiting",
        stats.total, stats.new_today, stats.reviewed_today, stats.to_review
    );

    let now = Utc::now();
    let queue = service.due_queue(now);
    println!("Due today: {} problems", queue.len());
    for entry in &queue {
        println!(
            "  - {} ({} days overdue)",
            entry.problem.lesson_title, entry.days_overdue
        );
    }

    if let Some(next) = service.next_problem(now) {
        let title = next.lesson_title.clone();
        println!("Reviewing next: {title}");

        // Stand-in for a played-through lesson; the real app reports the
        // learner's grade from the board UI.
        service.record_completion(&title, Performance::FourGrade(Grade::Good), false, 0);

        let stats = service.get_stats();
        println!(
            "After review: {} reviewed today, {} still due",
            stats.reviewed_today,
            service.due_queue(now).len()
        );
    } else {
        println!("Nothing due. Come back tomorrow.");
    }
}
