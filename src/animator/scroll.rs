use crate::config::AnimatorConfig;

/// Collapses bursts of scroll events into one flush per animation frame.
#[derive(Debug, Default)]
pub struct ScrollSampler {
    pending: bool,
    last_offset: f64,
}

impl ScrollSampler {
    /// Returns true when the caller has to schedule a frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    pub fn flush(&mut self, offset: f64, config: &AnimatorConfig) -> ScrollFrame {
        self.pending = false;
        self.last_offset = offset;
        ScrollFrame::at(offset, config)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderShadow {
    None,
    Raised,
}

impl HeaderShadow {
    pub fn css<'a>(&self, config: &'a AnimatorConfig) -> &'a str {
        match self {
            HeaderShadow::None => "none",
            HeaderShadow::Raised => config.header_shadow.as_str(),
        }
    }
}

/// Parallax state of the hero. Neither value is clamped: opacity goes
/// negative past the fade distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroTransform {
    pub translate_y: f64,
    pub opacity: f64,
}

impl HeroTransform {
    pub fn transform_css(&self) -> String {
        format!("translateY({}px)", self.translate_y)
    }

    pub fn opacity_css(&self) -> String {
        self.opacity.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollFrame {
    pub offset: f64,
    pub header_shadow: HeaderShadow,
    pub hero: HeroTransform,
}

impl ScrollFrame {
    pub fn at(offset: f64, config: &AnimatorConfig) -> Self {
        let header_shadow = if offset <= 0.0 {
            HeaderShadow::None
        } else {
            HeaderShadow::Raised
        };
        Self {
            offset,
            header_shadow,
            hero: HeroTransform {
                translate_y: offset * config.parallax_rate,
                opacity: 1.0 - offset / config.fade_distance_px,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_of_requests_schedules_one_frame() {
        let mut sampler = ScrollSampler::default();
        assert!(sampler.request());
        for _ in 0..50 {
            assert!(!sampler.request());
        }
        sampler.flush(10.0, &AnimatorConfig::default());
        assert!(!sampler.is_pending());
        assert!(sampler.request());
    }

    #[test]
    fn top_of_page_has_no_shadow() {
        let config = AnimatorConfig::default();
        let frame = ScrollFrame::at(0.0, &config);
        assert_eq!(frame.header_shadow, HeaderShadow::None);
        assert_eq!(frame.header_shadow.css(&config), "none");
        assert_eq!(frame.hero.opacity_css(), "1");
        assert_eq!(frame.hero.transform_css(), "translateY(0px)");
    }

    #[test]
    fn parallax_at_300() {
        let config = AnimatorConfig::default();
        let frame = ScrollFrame::at(300.0, &config);
        assert_eq!(frame.header_shadow.css(&config), "0 2px 10px rgba(0, 0, 0, 0.1)");
        assert_eq!(frame.hero.translate_y, 150.0);
        assert_eq!(frame.hero.opacity, 0.5);
        assert_eq!(frame.hero.transform_css(), "translateY(150px)");
        assert_eq!(frame.hero.opacity_css(), "0.5");
    }

    #[test]
    fn opacity_is_not_clamped() {
        let config = AnimatorConfig::default();
        assert_eq!(ScrollFrame::at(900.0, &config).hero.opacity, -0.5);
        assert_eq!(ScrollFrame::at(-60.0, &config).hero.opacity, 1.1);
        assert_eq!(ScrollFrame::at(-60.0, &config).header_shadow, HeaderShadow::None);
    }

    #[test]
    fn flush_remembers_offset() {
        let mut sampler = ScrollSampler::default();
        sampler.request();
        sampler.flush(42.0, &AnimatorConfig::default());
        assert_eq!(sampler.last_offset(), 42.0);
    }
}
