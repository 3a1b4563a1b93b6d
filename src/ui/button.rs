// Button class composition

const BASE_CLASSES: &str = "font-semibold rounded-lg transition-all disabled:opacity-50 disabled:cursor-not-allowed inline-flex items-center justify-center gap-2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Default,
    Ghost,
}

impl ButtonVariant {
    pub fn classes(self) -> &'static str {
        match self {
            ButtonVariant::Default => {
                "bg-gradient-to-r from-[#e31fc1] via-[#ff6b9d] to-[#ffc0cb] text-white hover:scale-105"
            },
            ButtonVariant::Ghost => "bg-transparent hover:bg-gray-800 text-white",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl ButtonSize {
    pub fn classes(self) -> &'static str {
        match self {
            ButtonSize::Sm => "px-4 py-2 text-sm",
            ButtonSize::Md => "px-6 py-3 text-base",
            ButtonSize::Lg => "px-8 py-4 text-lg",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonStyle {
    pub variant: ButtonVariant,
    pub size: ButtonSize,
    pub extra: String,
}

impl ButtonStyle {
    pub fn new(variant: ButtonVariant, size: ButtonSize) -> Self {
        Self {
            variant,
            size,
            extra: String::new(),
        }
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    /// Base, variant, size then caller classes, space separated.
    pub fn class_name(&self) -> String {
        let mut parts = vec![BASE_CLASSES, self.variant.classes(), self.size.classes()];
        let extra = self.extra.trim();
        if !extra.is_empty() {
            parts.push(extra);
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = ButtonStyle::default();
        assert_eq!(style.variant, ButtonVariant::Default);
        assert_eq!(style.size, ButtonSize::Md);
        assert_eq!(
            style.class_name(),
            format!(
                "{} bg-gradient-to-r from-[#e31fc1] via-[#ff6b9d] to-[#ffc0cb] text-white hover:scale-105 px-6 py-3 text-base",
                BASE_CLASSES
            )
        );
    }

    #[test]
    fn test_ghost_small_with_extra() {
        let class_name = ButtonStyle::new(ButtonVariant::Ghost, ButtonSize::Sm)
            .with_extra("w-full")
            .class_name();

        assert!(class_name.starts_with(BASE_CLASSES));
        assert!(class_name.ends_with("bg-transparent hover:bg-gray-800 text-white px-4 py-2 text-sm w-full"));
    }

    #[test]
    fn test_blank_extra_is_dropped() {
        let class_name = ButtonStyle::new(ButtonVariant::Default, ButtonSize::Lg)
            .with_extra("  ")
            .class_name();
        assert!(class_name.ends_with("px-8 py-4 text-lg"));
    }
}
