use crate::config::MosaicConfig;
use crate::pointer::GlowState;

pub const DEFAULT_BG_CLASS: &str = "mosaic-bg-dark";
pub const BUTTON_HEIGHT_SHARE: &str = "33%";
pub const BUTTON_MIN_HEIGHT_PX: u32 = 220;
pub const GLOW_RADIUS_PX: u32 = 600;
pub const MASK_RADIUS_PX: u32 = 300;

/// Presentation of the button content. Both share the same interaction and
/// mosaic behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonLayout {
    #[default]
    Centered,
    /// Title on top, "go to" affordance at the bottom, dimmed until hovered.
    Split,
}

impl ButtonLayout {
    pub fn class(self) -> &'static str {
        match self {
            Self::Centered => "mosaic-layout-centered",
            Self::Split => "mosaic-layout-split",
        }
    }

    pub fn has_dim_overlay(self) -> bool {
        matches!(self, Self::Split)
    }

    pub fn has_go_to(self) -> bool {
        matches!(self, Self::Split)
    }
}

/// Inputs the mounted mosaic depends on. A link renders an `<a>` root and a
/// plain button a `<div>` root, so toggling `href` replaces the canvas node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MountKey {
    pub config: MosaicConfig,
    pub is_link: bool,
}

impl MountKey {
    pub fn new(config: MosaicConfig, href: Option<&str>) -> Self {
        Self {
            config,
            is_link: href.is_some(),
        }
    }
}

pub fn root_style() -> String {
    format!("height: {BUTTON_HEIGHT_SHARE}; min-height: {BUTTON_MIN_HEIGHT_PX}px;")
}

pub fn glow_style(glow: &GlowState) -> String {
    format!(
        "opacity: {}; background: radial-gradient({GLOW_RADIUS_PX}px circle at {:.2}px {:.2}px, rgba(255, 255, 255, 0.10), transparent 40%);",
        glow.opacity(),
        glow.x,
        glow.y
    )
}

pub fn mask_style(glow: &GlowState) -> String {
    let mask = format!(
        "radial-gradient({MASK_RADIUS_PX}px circle at {:.2}px {:.2}px, black, transparent)",
        glow.x, glow.y
    );
    format!(
        "opacity: {}; mask-image: {mask}; -webkit-mask-image: {mask};",
        glow.opacity()
    )
}

pub fn dim_style(glow: &GlowState) -> String {
    format!("opacity: {};", 1.0 - glow.opacity())
}
