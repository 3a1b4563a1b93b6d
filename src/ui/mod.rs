// UI shell decisions consumed by the page renderer

pub mod button;
pub mod layout;
pub mod page;

pub use button::{ButtonSize, ButtonStyle, ButtonVariant};
pub use layout::{layout_for, main_class, shows_footer, shows_navbar, LayoutVariant};
pub use page::render_shell;
