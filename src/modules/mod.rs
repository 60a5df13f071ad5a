pub mod chat;
pub mod login;
pub mod router;
pub mod upload;
pub mod view_handler;

pub use chat::ChatView;
pub use login::LoginView;
pub use router::Route;
pub use upload::UploadView;
pub use view_handler::ViewHandler;
