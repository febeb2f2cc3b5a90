mod login;
mod page;

pub use login::login;
pub use page::login_page;
