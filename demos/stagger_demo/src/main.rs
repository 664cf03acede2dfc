use reveal_core::*;
use reveal_ui::*;
use web_time::Duration;

const HEADLINES: [&str; 6] = [
    "Clinic opening hours extended",
    "New vaccination schedule published",
    "Lab results now available online",
    "Telehealth consultations launched",
    "Flu season: what to expect",
    "Patient portal maintenance window",
];

const ROW_HEIGHT: f32 = 160.0;
const SCREEN: f32 = 640.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting stagger demo");

    let runtime = Runtime::with_viewport(Rect::new(0.0, 0.0, 360.0, SCREEN));
    let viewport = runtime.viewport();

    // Normally layout feeds these in; here we lay the feed out by hand.
    let targets: Vec<TargetId> = (0..HEADLINES.len())
        .map(|i| viewport.register_target(Rect::new(0.0, i as f32 * ROW_HEIGHT, 360.0, 140.0)))
        .collect();

    let build = {
        let targets = targets.clone();
        move || {
            StaggeredList(
                "headlines",
                targets
                    .iter()
                    .zip(HEADLINES.iter())
                    .map(|(target, headline)| StaggerItem::new(*target, Text(*headline)))
                    .collect(),
            )
        }
    };

    // First paint, nothing scrolled yet.
    runtime.compose(build.clone());
    viewport.dispatch();

    // Scroll through the feed one row per tick and watch items reveal.
    for step in 0..HEADLINES.len() {
        runtime.scroll_to(Rect::new(0.0, step as f32 * ROW_HEIGHT, 360.0, SCREEN));
        runtime.advance(Duration::from_millis(100));

        let view = runtime.compose(build.clone());
        for (i, child) in view.children.iter().enumerate() {
            log::info!(
                "t={:>4}ms item {} -> `{}`",
                runtime.timers().now().as_millis(),
                i,
                child.class_name()
            );
        }
    }

    // Drain the tail of the stagger.
    runtime.advance(Duration::from_millis(600));
    let view = runtime.compose(build);
    for (i, child) in view.children.iter().enumerate() {
        log::info!("final item {} -> `{}`", i, child.class_name());
    }

    Ok(())
}
