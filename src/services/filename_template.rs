//! Output filename templates.
//!
//! Templates contain `{filename}`, `{width}`, `{height}`, `{scale}`,
//! `{date}` and `{mode}` tokens. Expansion is a single regex pass, so text
//! inserted for one token is never scanned again: a source file literally
//! named `{width}` stays `{width}` in the output.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use nearest_resample::ResizeMode;
use regex::{Captures, Regex};

/// Default per-image template for uniform scaling
pub const SCALE_TEMPLATE: &str = "{filename}_x{scale}";

/// Default per-image template for explicit dimensions
pub const DIMENSIONS_TEMPLATE: &str = "{filename}_{width}x{height}";

/// Default archive name template
pub const ARCHIVE_TEMPLATE: &str = "resized-images-{date}";

/// Default per-image template for a resize mode
pub fn default_template(mode: ResizeMode) -> &'static str {
    match mode {
        ResizeMode::Scale => SCALE_TEMPLATE,
        ResizeMode::Dimensions => DIMENSIONS_TEMPLATE,
    }
}

/// Values available to a template expansion.
///
/// Unset fields expand to the empty string.
#[derive(Debug, Clone)]
pub struct TemplateContext<'a> {
    pub filename: Option<&'a str>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub scale: Option<u32>,
    pub mode: Option<ResizeMode>,
    pub date: DateTime<Utc>,
}

impl<'a> TemplateContext<'a> {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            filename: None,
            width: None,
            height: None,
            scale: None,
            mode: None,
            date,
        }
    }

    pub fn filename(mut self, stem: &'a str) -> Self {
        self.filename = Some(stem);
        self
    }

    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn scale(mut self, factor: Option<u32>) -> Self {
        self.scale = factor;
        self
    }

    pub fn mode(mut self, mode: ResizeMode) -> Self {
        self.mode = Some(mode);
        self
    }

    fn resolve(&self, token: &str) -> String {
        match token {
            "filename" => self.filename.unwrap_or_default().to_string(),
            "width" => self.width.map(|w| w.to_string()).unwrap_or_default(),
            "height" => self.height.map(|h| h.to_string()).unwrap_or_default(),
            "scale" => self.scale.map(|s| s.to_string()).unwrap_or_default(),
            "mode" => self.mode.map(|m| m.name().to_string()).unwrap_or_default(),
            "date" => format_date(self.date),
            _ => String::new(),
        }
    }
}

/// ISO-8601 timestamp truncated to whole seconds, e.g. `2024-05-01T13:45:09`
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{(filename|width|height|scale|date|mode)\}")
            .expect("token pattern is a valid regex")
    })
}

/// Expand every known token in `template` in one pass.
///
/// Unknown `{...}` sequences are left untouched.
pub fn expand(template: &str, context: &TemplateContext<'_>) -> String {
    token_pattern()
        .replace_all(template, |caps: &Captures<'_>| context.resolve(&caps[1]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 13, 45, 9).unwrap()
    }

    #[test]
    fn test_scale_template() {
        let ctx = TemplateContext::new(fixed_date())
            .filename("hero")
            .dimensions(64, 64)
            .scale(Some(4))
            .mode(ResizeMode::Scale);
        assert_eq!(expand(SCALE_TEMPLATE, &ctx), "hero_x4");
    }

    #[test]
    fn test_dimensions_template() {
        let ctx = TemplateContext::new(fixed_date())
            .filename("tiles")
            .dimensions(800, 600)
            .mode(ResizeMode::Dimensions);
        assert_eq!(expand(DIMENSIONS_TEMPLATE, &ctx), "tiles_800x600");
    }

    #[test]
    fn test_scale_empty_outside_uniform_mode() {
        let ctx = TemplateContext::new(fixed_date())
            .filename("tiles")
            .mode(ResizeMode::Dimensions);
        assert_eq!(expand("{filename}_x{scale}", &ctx), "tiles_x");
    }

    #[test]
    fn test_date_truncated_to_seconds() {
        let ctx = TemplateContext::new(fixed_date());
        assert_eq!(
            expand(ARCHIVE_TEMPLATE, &ctx),
            "resized-images-2024-05-01T13:45:09"
        );
    }

    #[test]
    fn test_missing_context_expands_empty() {
        let ctx = TemplateContext::new(fixed_date()).mode(ResizeMode::Scale);
        assert_eq!(expand("{filename}-{width}x{height}-{mode}", &ctx), "-x-scale");
    }

    #[test]
    fn test_unknown_tokens_left_literal() {
        let ctx = TemplateContext::new(fixed_date()).filename("a");
        assert_eq!(expand("{filename}{size}{}", &ctx), "a{size}{}");
    }

    #[test]
    fn test_single_pass_no_resubstitution() {
        // A stem containing a token must not be expanded again
        let ctx = TemplateContext::new(fixed_date())
            .filename("{width}")
            .dimensions(10, 20);
        assert_eq!(expand("{filename}_{height}", &ctx), "{width}_20");
    }

    #[test]
    fn test_repeated_tokens() {
        let ctx = TemplateContext::new(fixed_date()).scale(Some(3));
        assert_eq!(expand("{scale}{scale}x", &ctx), "33x");
    }

    #[test]
    fn test_default_template_per_mode() {
        assert_eq!(default_template(ResizeMode::Scale), SCALE_TEMPLATE);
        assert_eq!(default_template(ResizeMode::Dimensions), DIMENSIONS_TEMPLATE);
    }
}
