use super::{
    button::{ButtonSize, ButtonStyle, ButtonVariant},
    layout::{main_class, shows_footer, shows_navbar},
};

/// HTML shell for a page route. The client bundle hydrates `#app`; the server
/// only decides the chrome around it.
pub fn render_shell(path: &str) -> String {
    let navbar = if shows_navbar(path) {
        format!(
            r#"<nav id="navbar" class="fixed top-0 inset-x-0 z-50"><a href="/tarification" class="{}">Premium</a></nav>"#,
            ButtonStyle::new(ButtonVariant::Default, ButtonSize::Sm).class_name()
        )
    } else {
        String::new()
    };

    let footer = if shows_footer(path) {
        r#"<div class="pb-20"><footer id="footer"></footer></div>"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>MyDouble</title>
</head>
<body class="bg-black text-white min-h-screen flex flex-col">
    {}
    <main class="{}"><div id="app"></div></main>
    {}
</body>
</html>"#,
        navbar,
        main_class(path),
        footer
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_uses_layout_class() {
        assert!(render_shell("/").contains(r#"<main class="flex-1">"#));
        assert!(render_shell("/compte").contains(r#"<main class="pt-12 pb-16 flex-1">"#));
    }

    #[test]
    fn test_shell_chrome() {
        let messages = render_shell("/messages");
        assert!(!messages.contains(r#"id="navbar""#));
        assert!(!messages.contains(r#"id="footer""#));

        let pricing = render_shell("/tarification");
        assert!(pricing.contains(r#"id="navbar""#));
        assert!(pricing.contains(r#"id="footer""#));
    }
}
