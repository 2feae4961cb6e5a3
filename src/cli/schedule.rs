use std::fmt::Write as _;

use dulcevida::{Config, schedule};
use dulcevida_schedule::{LoadSource, SaveOutcome, SyncInfo};
use dulcevida_shared::{WeekSchedule, Weekday};

#[tracing::instrument(skip(config))]
pub async fn show(config: Config) -> anyhow::Result<()> {
    let (controller, outcome) = schedule::connect(&config).await?;

    print!("{}", render_week(&outcome.schedule, Weekday::today()));
    println!("{}", render_origin(outcome.source, &controller.sync_info()));

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn today(config: Config) -> anyhow::Result<()> {
    let (controller, _) = schedule::connect(&config).await?;
    let today = controller.today();

    println!(
        "{}: {} ({})",
        today.display_name(),
        today.color_name(),
        today.color()
    );

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn set(
    config: Config,
    day: Weekday,
    color: String,
    name: Option<String>,
) -> anyhow::Result<()> {
    let (color, color_name) = super::palette::resolve(&color, name.as_deref())?;
    let (controller, _) = schedule::connect(&config).await?;

    if controller.update_day(day, &color, &color_name).await.is_ok() {
        println!("{}: {color_name} ({color})", day.display_name());
    } else {
        tracing::warn!(%day, "update rejected, schedule reloaded");
        let current = controller.snapshot();
        let entry = current.get(day);
        println!(
            "{}: unchanged, still {} ({})",
            entry.display_name(),
            entry.color_name(),
            entry.color()
        );
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn save(config: Config) -> anyhow::Result<()> {
    let (controller, _) = schedule::resume(&config)?;

    match controller.save_all().await {
        SaveOutcome::Ok => println!("schedule saved"),
        SaveOutcome::FailedButCached => println!("server unreachable, schedule kept locally"),
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn reset(config: Config, push: bool) -> anyhow::Result<()> {
    let controller = schedule::build(&config)?;
    let week = controller.reset_to_default();
    print!("{}", render_week(&week, Weekday::today()));

    if push && !controller.save_all().await.is_ok() {
        println!("server unreachable, defaults kept locally");
    }

    Ok(())
}

fn render_week(schedule: &WeekSchedule, today: Weekday) -> String {
    let mut out = String::new();
    for entry in schedule {
        let marker = if entry.day() == today { ">" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {:<10} {:<8} {}",
            entry.display_name(),
            entry.color(),
            entry.color_name()
        );
    }
    out
}

fn render_origin(source: LoadSource, info: &SyncInfo) -> String {
    match (source, &info.updated_at, &info.updated_by) {
        (LoadSource::Remote, Some(at), Some(by)) => format!("updated {at} by {by}"),
        (LoadSource::Remote, Some(at), None) => format!("updated {at}"),
        (LoadSource::Remote, _, _) => "loaded from server".to_owned(),
        (LoadSource::Cache, _, _) => "server unreachable, showing cached schedule".to_owned(),
        (LoadSource::Default, _, _) => "server unreachable, showing defaults".to_owned(),
    }
}
