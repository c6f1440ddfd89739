//! Field rules for profile updates.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::types::ProfileUpdate;

/// Maximum bio length, in characters.
pub const BIO_MAX_CHARS: usize = 255;
/// Maximum number of interests.
pub const MAX_INTERESTS: usize = 20;
/// Maximum length of one interest, in characters.
pub const INTEREST_MAX_CHARS: usize = 50;

static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https://www\.linkedin\.com/in/)([A-zÀ-ú0-9ç_-]+/?)+$")
        .expect("linkedin pattern compiles")
});

static GITHUB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https://github\.com/)([A-zÀ-ú0-9ç_-]+/?)+$")
        .expect("github pattern compiles")
});

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileValidationError {
    /// Bio exceeds [`BIO_MAX_CHARS`].
    #[error("bio must be at most {max} characters (got {actual})")]
    BioTooLong {
        /// Limit.
        max: usize,
        /// Submitted length.
        actual: usize,
    },

    /// LinkedIn URL has the wrong shape.
    #[error("linkedin must look like https://www.linkedin.com/in/<name>")]
    InvalidLinkedin,

    /// GitHub URL has the wrong shape.
    #[error("github must look like https://github.com/<name>")]
    InvalidGithub,

    /// Too many interests.
    #[error("at most {max} interests are allowed (got {actual})")]
    TooManyInterests {
        /// Limit.
        max: usize,
        /// Submitted count.
        actual: usize,
    },

    /// An interest is blank.
    #[error("interest #{index} is blank")]
    BlankInterest {
        /// Zero-based position.
        index: usize,
    },

    /// An interest exceeds [`INTEREST_MAX_CHARS`].
    #[error("interest #{index} must be at most {max} characters")]
    InterestTooLong {
        /// Zero-based position.
        index: usize,
        /// Limit.
        max: usize,
    },
}

impl ProfileValidationError {
    /// Name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BioTooLong { .. } => "bio",
            Self::InvalidLinkedin => "linkedin",
            Self::InvalidGithub => "github",
            Self::TooManyInterests { .. }
            | Self::BlankInterest { .. }
            | Self::InterestTooLong { .. } => "interests",
        }
    }
}

/// Whether `url` is an acceptable LinkedIn profile URL.
#[must_use]
pub fn is_valid_linkedin(url: &str) -> bool {
    LINKEDIN_RE.is_match(url)
}

/// Whether `url` is an acceptable GitHub profile URL.
#[must_use]
pub fn is_valid_github(url: &str) -> bool {
    GITHUB_RE.is_match(url)
}

impl ProfileUpdate {
    /// Check this update against the profile rules.
    ///
    /// # Errors
    ///
    /// Returns every violation found.
    pub fn validate(&self) -> Result<(), Vec<ProfileValidationError>> {
        validate_update(self)
    }
}

/// Check every rule and collect all violations.
///
/// # Errors
///
/// Returns the full list of violations when any rule fails.
pub fn validate_update(update: &ProfileUpdate) -> Result<(), Vec<ProfileValidationError>> {
    let mut violations = Vec::new();

    if let Some(bio) = &update.bio {
        let actual = bio.chars().count();
        if actual > BIO_MAX_CHARS {
            violations.push(ProfileValidationError::BioTooLong {
                max: BIO_MAX_CHARS,
                actual,
            });
        }
    }

    // Empty links clear the field.
    if let Some(link) = update.linkedin.as_deref().map(str::trim)
        && !link.is_empty()
        && !is_valid_linkedin(link)
    {
        violations.push(ProfileValidationError::InvalidLinkedin);
    }

    if let Some(link) = update.github.as_deref().map(str::trim)
        && !link.is_empty()
        && !is_valid_github(link)
    {
        violations.push(ProfileValidationError::InvalidGithub);
    }

    if let Some(interests) = &update.interests {
        if interests.len() > MAX_INTERESTS {
            violations.push(ProfileValidationError::TooManyInterests {
                max: MAX_INTERESTS,
                actual: interests.len(),
            });
        }
        for (index, interest) in interests.iter().enumerate() {
            let trimmed = interest.trim();
            if trimmed.is_empty() {
                violations.push(ProfileValidationError::BlankInterest { index });
            } else if trimmed.chars().count() > INTEREST_MAX_CHARS {
                violations.push(ProfileValidationError::InterestTooLong {
                    index,
                    max: INTEREST_MAX_CHARS,
                });
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://www.linkedin.com/in/ana-silva", true)]
    #[case("https://www.linkedin.com/in/joão_ç/", true)]
    #[case("https://www.linkedin.com/in/", false)]
    #[case("http://www.linkedin.com/in/ana", false)]
    #[case("https://linkedin.com/in/ana", false)]
    #[case("https://www.linkedin.com/in/ana silva", false)]
    fn test_linkedin_pattern(#[case] url: &str, #[case] valid: bool) {
        assert_eq!(is_valid_linkedin(url), valid);
    }

    #[rstest]
    #[case("https://github.com/ana", true)]
    #[case("https://github.com/ana/portfolio/", true)]
    #[case("https://github.com/", false)]
    #[case("https://gitlab.com/ana", false)]
    #[case("https://github.com/ana?tab=repos", false)]
    fn test_github_pattern(#[case] url: &str, #[case] valid: bool) {
        assert_eq!(is_valid_github(url), valid);
    }

    #[test]
    fn test_empty_links_are_allowed() {
        let update = ProfileUpdate {
            linkedin: Some(String::new()),
            github: Some("  ".into()),
            ..ProfileUpdate::default()
        };
        assert!(validate_update(&update).is_ok());
    }

    #[test]
    fn test_bio_limit_counts_characters() {
        let at_limit = ProfileUpdate {
            bio: Some("é".repeat(BIO_MAX_CHARS)),
            ..ProfileUpdate::default()
        };
        assert!(validate_update(&at_limit).is_ok());

        let over = ProfileUpdate {
            bio: Some("a".repeat(BIO_MAX_CHARS + 1)),
            ..ProfileUpdate::default()
        };
        assert_eq!(
            validate_update(&over).unwrap_err(),
            vec![ProfileValidationError::BioTooLong {
                max: BIO_MAX_CHARS,
                actual: BIO_MAX_CHARS + 1
            }]
        );
    }

    #[test]
    fn test_collects_every_violation() {
        let update = ProfileUpdate {
            bio: None,
            linkedin: Some("https://example.com/ana".into()),
            github: Some("github.com/ana".into()),
            interests: Some(vec!["rust".into(), " ".into(), "x".repeat(51)]),
        };
        let violations = validate_update(&update).unwrap_err();
        let fields: Vec<_> = violations.iter().map(ProfileValidationError::field).collect();
        assert_eq!(fields, vec!["linkedin", "github", "interests", "interests"]);
        assert!(violations.contains(&ProfileValidationError::BlankInterest { index: 1 }));
    }

    #[test]
    fn test_too_many_interests() {
        let update = ProfileUpdate {
            interests: Some((0..=MAX_INTERESTS).map(|i| format!("topic{i}")).collect()),
            ..ProfileUpdate::default()
        };
        assert!(matches!(
            validate_update(&update).unwrap_err()[0],
            ProfileValidationError::TooManyInterests { .. }
        ));
    }

    proptest! {
        #[test]
        fn prop_short_bio_always_valid(bio in "\\PC{0,255}") {
            let update = ProfileUpdate { bio: Some(bio), ..ProfileUpdate::default() };
            prop_assert!(validate_update(&update).is_ok());
        }

        #[test]
        fn prop_github_handles_accepted(handle in "[a-zA-Z0-9_-]{1,39}") {
            let url = format!("https://github.com/{handle}");
            prop_assert!(is_valid_github(&url));
        }
    }
}
