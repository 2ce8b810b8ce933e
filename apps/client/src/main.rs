use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use dotenv::dotenv;
use inquire::{DateSelect, Password, Select, Text};
use tokio::time::{timeout, Duration};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_cell::models::Credentials;
use auth_cell::SessionService;
use provider_cell::{Provider, ProviderCatalogService};
use schedule_cell::{
    DaySchedule, DaySelection, RemoteBackend, ScheduleController, ScheduleSignal, SlotView,
};
use shared_config::AppConfig;
use shared_models::auth::Session;
use shared_utils::validation::ValidationFailure;

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Chairtime client");

    // Load configuration
    let config = AppConfig::from_env();

    let session = sign_in(&config).await?;
    println!("Welcome back, {}!", session.user.name);

    // The catalog is loaded once per run, like once per screen mount.
    let catalog = ProviderCatalogService::new(&config);
    let providers = catalog.list_providers(&session).await?;
    if providers.is_empty() {
        println!("No providers are available right now.");
        return Ok(());
    }

    let provider = pick_provider(&providers)?;
    let date = DateSelect::new("Which day?")
        .with_default(Local::now().date_naive())
        .prompt()?;

    let backend = Arc::new(RemoteBackend::new(&config));
    let initial = DaySelection::new(provider.id.clone(), date);
    let (controller, mut handle, mut signals) =
        ScheduleController::new(backend, session, initial, &config);
    tokio::spawn(controller.run());

    println!("Checking {}'s availability...", provider.name);

    let mut snapshot = handle.changed().await?;
    loop {
        render_schedule(&snapshot.schedule);

        let open_slots: Vec<SlotView> = snapshot
            .schedule
            .morning
            .iter()
            .chain(snapshot.schedule.afternoon.iter())
            .filter(|slot| slot.available)
            .cloned()
            .collect();

        const ANOTHER_DAY: &str = "Pick another day";
        const QUIT: &str = "Quit";

        let mut options: Vec<String> = open_slots.iter().map(|slot| slot.label.clone()).collect();
        options.push(ANOTHER_DAY.to_string());
        options.push(QUIT.to_string());

        let prompt = if open_slots.is_empty() {
            "No open slots on that day"
        } else {
            "Pick a time"
        };
        let choice = Select::new(prompt, options).prompt()?;

        match choice.as_str() {
            QUIT => return Ok(()),
            ANOTHER_DAY => {
                let date = DateSelect::new("Which day?")
                    .with_default(snapshot.selection.date)
                    .prompt()?;
                handle.set_date(date)?;
                println!("Checking availability...");

                // A failed refresh never publishes; fall back to the last
                // known schedule instead of waiting forever.
                match timeout(Duration::from_secs(15), handle.changed()).await {
                    Ok(next) => snapshot = next?,
                    Err(_) => println!("Could not refresh, showing the last known availability."),
                }
            }
            label => {
                let slot = open_slots
                    .iter()
                    .find(|slot| slot.label == label)
                    .expect("choice comes from the rendered list");
                handle.set_hour(slot.hour)?;
                snapshot = handle.changed().await?;
                handle.book()?;

                match signals.recv().await {
                    Some(ScheduleSignal::BookingConfirmed(at)) => {
                        println!(
                            "Appointment confirmed with {} for {}.",
                            provider.name,
                            at.format("%A, %B %-d at %H:%M")
                        );
                        return Ok(());
                    }
                    Some(ScheduleSignal::BookingFailed(message)) => {
                        println!("{}", message);
                        // Selection is untouched; the loop re-renders and the
                        // user may retry.
                    }
                    None => return Ok(()),
                }
            }
        }
    }
}

async fn sign_in(config: &AppConfig) -> Result<Session> {
    let service = SessionService::new(config);

    loop {
        let email = Text::new("E-mail:").prompt()?;
        let password = Password::new("Password:")
            .without_confirmation()
            .prompt()?;

        match service.sign_in(&Credentials::new(email, password)).await {
            Ok(session) => return Ok(session),
            Err(err) => match err.downcast_ref::<ValidationFailure>() {
                Some(failure) => {
                    for (field, message) in failure.field_messages() {
                        println!("  {}: {}", field, message);
                    }
                }
                None => println!("Sign in failed: {}", err),
            },
        }
    }
}

fn pick_provider(providers: &[Provider]) -> Result<Provider> {
    let names: Vec<String> = providers.iter().map(|p| p.name.clone()).collect();
    let choice = Select::new("Who would you like to book?", names).prompt()?;

    let provider = providers
        .iter()
        .find(|p| p.name == choice)
        .expect("choice comes from the provider list");
    Ok(provider.clone())
}

fn render_schedule(schedule: &DaySchedule) {
    println!();
    println!("Morning");
    render_slots(&schedule.morning);
    println!("Afternoon");
    render_slots(&schedule.afternoon);
}

fn render_slots(slots: &[SlotView]) {
    if slots.is_empty() {
        println!("  (nothing)");
        return;
    }

    for slot in slots {
        let status = if slot.available { "open" } else { "booked" };
        println!("  {}  {}", slot.label, status);
    }
}
