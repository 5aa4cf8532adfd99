use crate::render::DEFAULT_ACCENT_COLOR;

/// The session's accent color. Stored as given; layouts pass it through opaquely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentTheme {
    color: String,
}

impl Default for AccentTheme {
    fn default() -> Self {
        Self {
            color: DEFAULT_ACCENT_COLOR.to_string(),
        }
    }
}

impl AccentTheme {
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
