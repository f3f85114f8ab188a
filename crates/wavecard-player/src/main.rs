//! Wavecard demo player
//!
//! This is the main entry point for the demo GUI. It:
//! 1. Loads YAML configuration (source, control variant, engine simulation)
//! 2. Launches the iced application with a scripted waveform engine

mod app;
mod config;
mod engine;
mod waveform_view;

use iced::{Size, Task};

use app::{App, Message};

fn main() -> iced::Result {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("wavecard-player starting up");

    let config_path = config::default_config_path();
    let config = config::load_config(&config_path);

    // Wrap config in a cell so the boot closure can be Fn (required by iced);
    // the boot function is only called once
    let config_cell = std::cell::RefCell::new(Some(config));

    iced::application(
        move || {
            let config = config_cell
                .borrow_mut()
                .take()
                .expect("config already taken");
            (App::new(config), Task::none())
        },
        update,
        view,
    )
    .subscription(subscription)
    .title("Wavecard Player")
    .window_size(Size::new(960.0, 600.0))
    .run()
}

/// Update function for iced
fn update(app: &mut App, message: Message) -> Task<Message> {
    app.update(message)
}

/// View function for iced
fn view(app: &App) -> iced::Element<'_, Message> {
    app.view()
}

/// Subscription function for iced
fn subscription(app: &App) -> iced::Subscription<Message> {
    app.subscription()
}
