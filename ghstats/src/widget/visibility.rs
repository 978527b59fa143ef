//! Legend visibility state of plotted series.

use ghstats_common::SeriesId;

/// Per-series visibility as set through the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesVisibility {
    /// Not touched by the user; follows the dataset default.
    #[default]
    Auto,
    /// Explicitly shown.
    Shown,
    /// Explicitly hidden.
    Hidden,
}

impl SeriesVisibility {
    /// Effective hidden state given the dataset default.
    pub fn is_hidden(self, default_hidden: bool) -> bool {
        match self {
            SeriesVisibility::Auto => default_hidden,
            SeriesVisibility::Shown => false,
            SeriesVisibility::Hidden => true,
        }
    }

    /// State after one legend click. Never returns `Auto`.
    pub fn toggled(self, default_hidden: bool) -> Self {
        if self.is_hidden(default_hidden) {
            SeriesVisibility::Shown
        } else {
            SeriesVisibility::Hidden
        }
    }
}

/// Hide/show notification emitted after a legend toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesToggled {
    pub id: SeriesId,
    pub hidden: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_visible_toggles_to_hidden_then_shown() {
        let v = SeriesVisibility::Auto;
        assert!(!v.is_hidden(false));

        let v = v.toggled(false);
        assert_eq!(v, SeriesVisibility::Hidden);

        let v = v.toggled(false);
        assert_eq!(v, SeriesVisibility::Shown);

        let v = v.toggled(false);
        assert_eq!(v, SeriesVisibility::Hidden);
    }

    #[test]
    fn test_auto_hidden_by_default_toggles_to_shown() {
        let v = SeriesVisibility::Auto;
        assert!(v.is_hidden(true));
        assert_eq!(v.toggled(true), SeriesVisibility::Shown);
    }

    #[test]
    fn test_explicit_states_ignore_default() {
        assert!(SeriesVisibility::Hidden.is_hidden(false));
        assert!(!SeriesVisibility::Shown.is_hidden(true));
    }
}
