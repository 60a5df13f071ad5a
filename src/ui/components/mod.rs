mod empty_message;
mod help;
mod source_card;
mod status;

/// Namespace for small reusable widgets shared by the screens.
pub struct UiComponent;
