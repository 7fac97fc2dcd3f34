#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTarget {
    Globe,
    /// Index into the watched elements.
    Card(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pointer {
    Enter,
    Leave,
}

impl Pointer {
    pub fn event(self) -> &'static str {
        match self {
            Pointer::Enter => "mouseenter",
            Pointer::Leave => "mouseleave",
        }
    }
}

pub fn globe_styles(pointer: Pointer) -> &'static [(&'static str, &'static str)] {
    match pointer {
        Pointer::Enter => &[("animation-play-state", "paused")],
        Pointer::Leave => &[("animation-play-state", "running")],
    }
}

pub fn card_styles(pointer: Pointer) -> &'static [(&'static str, &'static str)] {
    match pointer {
        Pointer::Enter => &[
            ("transition", "all 0.3s ease"),
            ("border-left", "4px solid var(--secondary-color)"),
        ],
        Pointer::Leave => &[("border-left", "none")],
    }
}
