mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::SessionEvent;
pub use handlers::LogEventHandler;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &SessionEvent);
}
