use log::debug;

use super::Surface;
use crate::config::AnimatorConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSpec {
    pub angle_deg: f64,
    pub pulse_secs: f64,
}

impl LineSpec {
    pub fn styles(&self) -> Vec<(&'static str, String)> {
        vec![
            ("position", "absolute".to_string()),
            ("width", "2px".to_string()),
            ("height", "50px".to_string()),
            ("background", "rgba(52, 152, 219, 0.5)".to_string()),
            ("transform-origin", "top".to_string()),
            (
                "animation",
                format!("connectionPulse {}s ease-in-out infinite", self.pulse_secs),
            ),
            ("left", "50%".to_string()),
            ("top", "50%".to_string()),
            ("transform", format!("rotate({}deg)", self.angle_deg)),
        ]
    }
}

pub fn line_specs(config: &AnimatorConfig) -> Vec<LineSpec> {
    let count = config.connection_count;
    (0..count)
        .map(|index| LineSpec {
            angle_deg: 360.0 / count as f64 * index as f64,
            pulse_secs: config.pulse_base_secs + index as f64 * config.pulse_step_secs,
        })
        .collect()
}

/// Radial pulse lines inside `.connections`, created at most once.
#[derive(Debug, Default)]
pub struct ConnectionLines {
    installed: bool,
}

impl ConnectionLines {
    #[cfg(test)]
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Returns how many lines were appended.
    pub fn install<E: Surface>(
        &mut self,
        container: Option<&E>,
        config: &AnimatorConfig,
    ) -> usize {
        let container = match container {
            Some(container) => container,
            None => return 0,
        };
        if self.installed {
            debug!("Connection lines already installed");
            return 0;
        }
        self.installed = true;

        let mut created = 0;
        for spec in line_specs(config) {
            if let Some(line) = container.append_div() {
                for (property, value) in spec.styles() {
                    line.set_style(property, &value);
                }
                created += 1;
            }
        }
        created
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::testing::FakeNode;

    #[test]
    fn five_lines_at_72_degree_steps() {
        let specs = line_specs(&AnimatorConfig::default());
        let angles: Vec<f64> = specs.iter().map(|s| s.angle_deg).collect();
        assert_eq!(angles, vec![0.0, 72.0, 144.0, 216.0, 288.0]);
        let pulses: Vec<f64> = specs.iter().map(|s| s.pulse_secs).collect();
        assert_eq!(pulses, vec![2.0, 2.5, 3.0, 3.5, 4.0]);
    }

    #[test]
    fn install_styles_each_line() {
        let container = FakeNode::default();
        let mut lines = ConnectionLines::default();
        assert_eq!(lines.install(Some(&container), &AnimatorConfig::default()), 5);

        let children = container.children();
        assert_eq!(children.len(), 5);
        assert_eq!(children[1].style("transform").as_deref(), Some("rotate(72deg)"));
        assert_eq!(
            children[1].style("animation").as_deref(),
            Some("connectionPulse 2.5s ease-in-out infinite")
        );
        assert_eq!(children[4].style("transform").as_deref(), Some("rotate(288deg)"));
        assert_eq!(children[0].style("position").as_deref(), Some("absolute"));
    }

    #[test]
    fn second_install_is_a_no_op() {
        let container = FakeNode::default();
        let mut lines = ConnectionLines::default();
        let config = AnimatorConfig::default();
        lines.install(Some(&container), &config);
        assert_eq!(lines.install(Some(&container), &config), 0);
        assert_eq!(container.children().len(), 5);
    }

    #[test]
    fn missing_container_creates_nothing() {
        let mut lines = ConnectionLines::default();
        assert_eq!(lines.install::<FakeNode>(None, &AnimatorConfig::default()), 0);
        assert!(!lines.is_installed());
    }
}
