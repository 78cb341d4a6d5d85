use serde::Serialize;

/// Where the displayed time of day comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    Live,
    Manual,
}

impl TimeMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Live => "LIVE",
            Self::Manual => "MANUAL",
        }
    }
}

/// Which visual mode the cross-fade is pinned to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseMode {
    Auto,
    Geo,
    Tri,
}

impl PhaseMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "geo" => Some(Self::Geo),
            "tri" => Some(Self::Tri),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Geo => "MANUAL(GEO)",
            Self::Tri => "MANUAL(TRI)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouletteState {
    Off,
    Spin,
    Brake,
}

impl RouletteState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Spin => "ON",
            Self::Brake => "BRAKE",
        }
    }

    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Off)
    }
}

/// A 2D point in logical (design) space, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: (other.x - self.x).mul_add(t, self.x),
            y: (other.y - self.y).mul_add(t, self.y),
        }
    }
}
