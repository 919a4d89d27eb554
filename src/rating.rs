use std::fmt;

/// Verdict derived from the TMDB average score. Derived on render, never
/// stored on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingCategory {
    WorthWatching,
    GiveItAChance,
    SkipIt,
}

/// Total over all inputs: absent or non-finite scores count as 0.
pub fn classify(score: Option<f64>) -> RatingCategory {
    let score = match score {
        Some(s) if s.is_finite() => s,
        _ => 0.0,
    };
    if score >= 7.0 {
        RatingCategory::WorthWatching
    } else if score >= 4.0 {
        RatingCategory::GiveItAChance
    } else {
        RatingCategory::SkipIt
    }
}

impl RatingCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RatingCategory::WorthWatching => "Worth Watching",
            RatingCategory::GiveItAChance => "Give It a Chance",
            RatingCategory::SkipIt => "Skip It",
        }
    }

    /// Longer variant shown on result cards.
    pub fn badge(&self) -> &'static str {
        match self {
            RatingCategory::WorthWatching => "Definitely Worth Watching!",
            RatingCategory::GiveItAChance => "Give It a Chance",
            RatingCategory::SkipIt => "Maybe Skip This One",
        }
    }
}

impl fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One-decimal score for display, "N/A" when the service sent nothing usable.
pub fn display_score(score: Option<f64>) -> String {
    match score {
        Some(s) if s.is_finite() => format!("{s:.1}"),
        _ => "N/A".to_string(),
    }
}
