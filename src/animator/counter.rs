use super::Surface;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CounterState {
    Idle,
    Animating { started_at: f64, ticks: u32 },
    Done,
}

/// A `.stat-number` that ramps from 0 to its `data-target` once.
///
/// Tick `k` is due at `started_at + k * interval`. Advancing applies every due
/// tick and writes the text once; the counter finishes after `steps` ticks or
/// as soon as the ramped value reaches the target, and then shows the target
/// itself.
pub struct StatCounter<E> {
    element: E,
    target: f64,
    current: f64,
    state: CounterState,
}

impl<E: Surface> StatCounter<E> {
    pub fn new(element: E, target: f64) -> Self {
        Self {
            element,
            target,
            current: 0.0,
            state: CounterState::Idle,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    #[cfg(test)]
    pub fn state(&self) -> CounterState {
        self.state
    }

    pub fn has_animated(&self) -> bool {
        self.state != CounterState::Idle
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, CounterState::Animating { .. })
    }

    /// Returns false when the counter already ran.
    pub fn start(&mut self, now: f64) -> bool {
        if self.has_animated() {
            return false;
        }
        self.state = CounterState::Animating {
            started_at: now,
            ticks: 0,
        };
        self.element.add_class("animated");
        true
    }

    /// Returns whether the counter still wants frames.
    pub fn advance(&mut self, now: f64, steps: u32, interval_ms: f64) -> bool {
        let (started_at, ticks) = match self.state {
            CounterState::Animating { started_at, ticks } => (started_at, ticks),
            CounterState::Idle | CounterState::Done => return false,
        };

        let elapsed = now - started_at;
        let due = if elapsed > 0.0 {
            ((elapsed / interval_ms).floor() as u32).min(steps)
        } else {
            0
        };
        if due <= ticks {
            return true;
        }

        let increment = self.target / steps as f64;
        let value = increment * due as f64;
        if value >= self.target || due >= steps {
            self.current = self.target;
            self.state = CounterState::Done;
            self.element.set_text(&format_value(self.target));
            false
        } else {
            self.current = value;
            self.state = CounterState::Animating {
                started_at,
                ticks: due,
            };
            self.element.set_text(&format_value(value));
            true
        }
    }
}

/// Reads a leading decimal the way the page's markup writes it
/// (`"95.5"`, `" 42 "`, `"3.2%"`). Non-finite values are rejected.
pub fn parse_target(raw: &str) -> Option<f64> {
    numeric_prefix(raw.trim())
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Longest leading `[sign] digits [. digits] [e [sign] digits]` run.
fn numeric_prefix(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let whole = digits(end);
    end += whole;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits(end + 1);
        if whole + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole + fraction == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let count = digits(exponent);
        if count > 0 {
            end = exponent + count;
        }
    }
    &raw[..end]
}

/// One decimal place. Exact ties round away from zero and zero never
/// renders as `-0.0`.
pub fn format_value(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0 {
        let rounded = (value.abs() * 10.0).ceil() / 10.0;
        return format!("{:.1}", rounded.copysign(value));
    }
    if value == 0.0 {
        return "0.0".to_string();
    }
    format!("{:.1}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::testing::FakeNode;

    const STEPS: u32 = 60;
    const INTERVAL: f64 = 2000.0 / 60.0;

    fn running(target: f64) -> (FakeNode, StatCounter<FakeNode>) {
        let node = FakeNode::default();
        let mut counter = StatCounter::new(node.clone(), target);
        assert!(counter.start(0.0));
        (node, counter)
    }

    #[test]
    fn finishes_on_exact_target_text() {
        let (node, mut counter) = running(87.3);
        let mut now = 0.0;
        while counter.advance(now, STEPS, INTERVAL) {
            now += 16.0;
        }
        assert_eq!(node.text(), "87.3");
        assert_eq!(counter.state(), CounterState::Done);
        assert_eq!(counter.current(), 87.3);
    }

    #[test]
    fn displayed_value_never_decreases() {
        let (node, mut counter) = running(250.0);
        let mut last = 0.0;
        let mut now = 0.0;
        loop {
            let more = counter.advance(now, STEPS, INTERVAL);
            if !node.text().is_empty() {
                let shown: f64 = node.text().parse().unwrap();
                assert!(shown >= last, "{shown} after {last}");
                assert!(shown <= 250.0);
                last = shown;
            }
            if !more {
                break;
            }
            now += 7.0;
        }
        assert_eq!(last, 250.0);
    }

    #[test]
    fn stops_after_exactly_steps_ticks() {
        let (_, mut counter) = running(10.0);
        assert!(counter.advance(INTERVAL * 59.0 + 0.5, STEPS, INTERVAL));
        assert!(counter.is_animating());
        assert!(!counter.advance(INTERVAL * 60.0 + 0.5, STEPS, INTERVAL));
        assert!(!counter.advance(INTERVAL * 500.0, STEPS, INTERVAL));
    }

    #[test]
    fn no_tick_before_first_interval() {
        let (node, mut counter) = running(42.0);
        assert!(counter.advance(-5.0, STEPS, INTERVAL));
        assert!(counter.advance(INTERVAL - 1.0, STEPS, INTERVAL));
        assert_eq!(node.text(), "");
        assert!(counter.advance(INTERVAL + 1.0, STEPS, INTERVAL));
        assert_eq!(node.text(), "0.7");
    }

    #[test]
    fn zero_and_negative_targets_finish_on_first_tick() {
        for target in [0.0, -12.0] {
            let (node, mut counter) = running(target);
            assert!(!counter.advance(INTERVAL + 1.0, STEPS, INTERVAL));
            assert_eq!(node.text(), format_value(target));
        }
    }

    #[test]
    fn starts_only_once() {
        let (node, mut counter) = running(5.0);
        assert!(!counter.start(100.0));
        assert_eq!(node.classes(), vec!["animated".to_string()]);
    }

    #[test]
    fn idle_counter_does_not_advance() {
        let node = FakeNode::default();
        let mut counter = StatCounter::new(node.clone(), 5.0);
        assert!(!counter.advance(10_000.0, STEPS, INTERVAL));
        assert_eq!(node.text(), "");
    }

    #[test]
    fn parses_leading_decimals() {
        assert_eq!(parse_target("95.5"), Some(95.5));
        assert_eq!(parse_target(" 42 "), Some(42.0));
        assert_eq!(parse_target("3.2%"), Some(3.2));
        assert_eq!(parse_target("-7"), Some(-7.0));
        assert_eq!(parse_target(""), None);
        assert_eq!(parse_target("abc"), None);
        assert_eq!(parse_target("inf"), None);
        assert_eq!(parse_target("-"), None);
        assert_eq!(parse_target("."), None);
    }

    #[test]
    fn parses_fractions_and_exponents() {
        assert_eq!(parse_target(".5"), Some(0.5));
        assert_eq!(parse_target("-.5k"), Some(-0.5));
        assert_eq!(parse_target("12."), Some(12.0));
        assert_eq!(parse_target("1e3 people"), Some(1000.0));
        assert_eq!(parse_target("12e"), Some(12.0));
        assert_eq!(parse_target("4E-1x"), Some(0.4));
    }

    #[test]
    fn long_attribute_reads_its_prefix_once() {
        let raw = format!("7{}", "x".repeat(200_000));
        assert_eq!(parse_target(&raw), Some(7.0));
        let digits = "9".repeat(300);
        assert_eq!(parse_target(&digits), Some(digits.parse().unwrap()));
    }

    #[test]
    fn formats_one_decimal() {
        assert_eq!(format_value(87.3), "87.3");
        assert_eq!(format_value(100.0), "100.0");
        assert_eq!(format_value(0.25), "0.3");
        assert_eq!(format_value(-0.25), "-0.3");
        assert_eq!(format_value(-0.0), "0.0");
        assert_eq!(format_value(1.04), "1.0");
    }
}
