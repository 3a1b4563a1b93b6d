// Route-driven page chrome: main container padding, navbar and footer visibility

/// Container style of the `<main>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutVariant {
    /// Full-bleed pages with their own header treatment (home, chats, auth).
    Bare,
    /// Standard pages offset below the fixed navbar and above the bottom nav.
    Padded,
}

impl LayoutVariant {
    pub fn main_class(self) -> &'static str {
        match self {
            LayoutVariant::Bare => "flex-1",
            LayoutVariant::Padded => "pt-12 pb-16 flex-1",
        }
    }
}

/// Routes rendered without container padding. Matching is exact.
const BARE_ROUTES: &[&str] = &[
    "/",
    "/messages",
    "/chat-video",
    "/mon-double-ia/assistant",
    "/mon-double-ia/coach",
    "/mon-double-ia/confident",
    "/avatar-fx",
    "/voix",
    "/histoire",
    "/connexion",
    "/inscription",
];

/// Full-screen chat routes without the top navbar.
const NAVBAR_HIDDEN_ROUTES: &[&str] = &[
    "/messages",
    "/mon-double-ia/assistant",
    "/mon-double-ia/coach",
    "/mon-double-ia/confident",
];

const FOOTER_HIDDEN_ROUTES: &[&str] = &["/messages"];

pub fn layout_for(path: &str) -> LayoutVariant {
    if BARE_ROUTES.contains(&path) {
        LayoutVariant::Bare
    } else {
        LayoutVariant::Padded
    }
}

pub fn main_class(path: &str) -> &'static str {
    layout_for(path).main_class()
}

pub fn shows_navbar(path: &str) -> bool {
    !NAVBAR_HIDDEN_ROUTES.contains(&path)
}

pub fn shows_footer(path: &str) -> bool {
    !FOOTER_HIDDEN_ROUTES.contains(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_routes() {
        for path in BARE_ROUTES {
            assert_eq!(layout_for(path), LayoutVariant::Bare, "{}", path);
        }
        assert_eq!(main_class("/chat-video"), "flex-1");
    }

    #[test]
    fn test_padded_routes() {
        assert_eq!(layout_for("/compte"), LayoutVariant::Padded);
        assert_eq!(layout_for("/tarification"), LayoutVariant::Padded);
        assert_eq!(main_class("/compte"), "pt-12 pb-16 flex-1");
    }

    #[test]
    fn test_matching_is_exact() {
        assert_eq!(layout_for("/chat-video/"), LayoutVariant::Padded);
        assert_eq!(layout_for("/mon-double-ia"), LayoutVariant::Padded);
        assert_eq!(layout_for("/voix/nouvelle"), LayoutVariant::Padded);
    }

    #[test]
    fn test_chrome_visibility() {
        assert!(!shows_navbar("/messages"));
        assert!(!shows_navbar("/mon-double-ia/coach"));
        assert!(shows_navbar("/chat-video"));
        assert!(shows_navbar("/"));

        assert!(!shows_footer("/messages"));
        assert!(shows_footer("/mon-double-ia/coach"));
    }
}
