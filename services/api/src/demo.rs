use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use shift_planner::error::AppError;
use shift_planner::planning::{
    MemoryPlanningStore, NewShift, PlanningError, PlanningService, Shift, Slot, WorkerId,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// First roster date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: Option<NaiveDate>,
}

/// One scheduling attempt and what the service said about it.
#[derive(Debug)]
pub(crate) struct DemoStep {
    pub(crate) request: NewShift,
    pub(crate) outcome: Result<Shift, String>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let start = args.start.unwrap_or_else(|| Local::now().date_naive());
    let service = PlanningService::new(Arc::new(MemoryPlanningStore::new()));

    println!("Shift planning demo starting {start}");
    let worker = service.create_worker(WorkerId(1), Some("Bob".to_string()))?;
    println!(
        "- Registered worker {} ({})",
        worker.id,
        worker.name.as_deref().unwrap_or("no name")
    );

    println!("\nScheduling attempts");
    for step in schedule_walkthrough(&service, worker.id, start)? {
        let NewShift { date, slot, .. } = step.request;
        match step.outcome {
            Ok(shift) => println!("  accepted  {date} {slot} -> shift {}", shift.id),
            Err(reason) => println!("  rejected  {date} {slot} -> {reason}"),
        }
    }

    println!("\nRoster for worker {}", worker.id);
    for entry in service.list_worker_shifts(worker.id)? {
        println!("  {} slot {} ({})", entry.date, entry.slot.code(), entry.slot);
    }

    service.delete_worker(worker.id)?;
    match service.get_worker(worker.id) {
        Err(PlanningError::WorkerNotFound(id)) => {
            println!("\nWorker {id} deleted together with all shifts")
        }
        Ok(_) => println!("\nWorker {} still present after delete", worker.id),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

/// Replays the conflict rules: a same-day double booking and both overnight directions.
pub(crate) fn schedule_walkthrough(
    service: &PlanningService<MemoryPlanningStore>,
    worker_id: WorkerId,
    start: NaiveDate,
) -> Result<Vec<DemoStep>, AppError> {
    let plan = [
        (0, Slot::MidnightToEight),
        (0, Slot::EightToFour),
        (2, Slot::FourToMidnight),
        (3, Slot::MidnightToEight),
        (5, Slot::MidnightToEight),
        (4, Slot::FourToMidnight),
        (4, Slot::EightToFour),
    ];

    let mut steps = Vec::with_capacity(plan.len());
    for (offset, slot) in plan {
        let request = NewShift {
            worker_id,
            slot,
            date: start + Duration::days(offset),
        };
        let outcome = match service.create_shift(request) {
            Ok(shift) => Ok(shift),
            Err(err @ PlanningError::Conflict { .. }) => Err(err.to_string()),
            Err(err) => return Err(err.into()),
        };
        steps.push(DemoStep { request, outcome });
    }

    Ok(steps)
}
