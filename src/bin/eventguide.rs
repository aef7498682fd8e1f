use anyhow::Result;
use eventguide::cli::{self, Command, DarkModeAction};
use eventguide::config::Config;
use eventguide::contact::AlertContainer;
use eventguide::context::{AppContext, StandardContext};
use eventguide::controller::{FilterOutcome, PageController};
use eventguide::logging;
use eventguide::model::normalize_date_text;
use log::LevelFilter;
use std::env;
use std::sync::Arc;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let invocation = cli::parse_args(&args)?;

    if invocation.command == Command::Help {
        cli::print_help("eventguide");
        return Ok(());
    }

    let ctx: Arc<dyn AppContext> = Arc::new(StandardContext::new(invocation.root.clone()));
    let config = Config::load(ctx.as_ref())?;
    let level = if invocation.verbose {
        LevelFilter::Debug
    } else {
        config.level_filter()
    };
    if let Err(e) = logging::init(level) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let controller = PageController::new(ctx, config);

    match invocation.command {
        Command::Help => {}
        Command::Show { events } => print_outcome(&controller.show(events.as_deref())?),
        Command::Filter { input, events } => {
            print_outcome(&controller.apply(&input, events.as_deref())?)
        }
        Command::Clear { events } => print_outcome(&controller.clear(events.as_deref())?),
        Command::Normalize(text) => println!("{}", normalize_date_text(&text)),
        Command::DarkMode(action) => {
            let theme = match action {
                DarkModeAction::Status => controller.theme()?,
                DarkModeAction::Toggle => controller.toggle_theme()?,
            };
            println!("{} {}", theme.toggle_icon(), theme);
            if let Some(class) = theme.body_class() {
                println!("body class: {}", class);
            }
        }
        Command::Scroll(offset) => {
            let mut button = controller.scroll_button();
            button.on_scroll(offset);
            if button.is_visible() {
                let target = button.activate();
                println!("visible (scrolls to {} {:?})", target.top, target.behavior);
            } else {
                println!("hidden");
            }
        }
        Command::Contact(form) => {
            let submission = controller.submit_contact(form);
            let mut alerts = AlertContainer::default();
            alerts.show(submission.alert.clone());
            if let Some(alert) = alerts.current() {
                println!("{} {}", alert.css_class(), alert);
            }
            for err in &submission.errors {
                eprintln!("  - {}", err);
            }
            if !submission.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &FilterOutcome) {
    if outcome.filtered {
        let c = &outcome.criteria;
        eprintln!(
            "Filters: search={:?} category={:?} date={:?}",
            c.search_term, c.category, c.iso_date
        );
    }
    for event in &outcome.visible {
        println!("{}", event);
    }
    eprintln!("{} of {} events shown", outcome.visible.len(), outcome.total);
}
